use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};

use crate::models::domain::{AccessType, MetadataRecord, ResourceType, SuggestedUse};

/// One element of the JSON array the model returns for metadata resolution.
///
/// Every field is optional on the wire so that a single sloppy row does not
/// sink the whole response; `into_record` decides what is usable.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MetadataRowDto {
    /// Official title if recognizable, otherwise a concise accurate title.
    pub title: Option<String>,
    /// One of: Report, Dataset, Web page, Policy brief, Video, Overview, Academic article.
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    /// Publication year, or null when unknown.
    #[serde(deserialize_with = "lenient_year")]
    #[schemars(with = "Option<i32>")]
    pub year: Option<i32>,
    /// One of: Open access, Open-licensed, Freely accessible.
    pub access: Option<String>,
    /// At most two sentences on how the resource serves the objective.
    pub why_aligns: Option<String>,
    /// One of: Core reading, Supplementary reading, Pre-read, Dataset exercise, Case anchor, Video primer.
    #[serde(rename = "use")]
    pub suggested_use: Option<String>,
    /// Must exactly match one of the provided URLs.
    pub url: Option<String>,
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl MetadataRowDto {
    /// Converts the row into a record. Rows without a URL are unusable.
    /// The URL is kept verbatim so it can only match a verified URL exactly.
    pub fn into_record(self) -> Option<MetadataRecord> {
        let url = self.url?;
        if url.trim().is_empty() {
            return None;
        }
        Some(MetadataRecord {
            title: self.title.unwrap_or_default().trim().to_string(),
            resource_type: ResourceType::from_label(&self.resource_type.unwrap_or_default()),
            year: self.year,
            access: AccessType::from_label(&self.access.unwrap_or_default()),
            why_aligns: self.why_aligns.unwrap_or_default().trim().to_string(),
            suggested_use: SuggestedUse::from_label(&self.suggested_use.unwrap_or_default()),
            url,
        })
    }
}
