use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::{
    constants::prompts,
    errors::GenerationError,
    models::{domain::MetadataRecord, dto::metadata_row::MetadataRowDto},
    services::model_service::{ChatMessage, CompletionRequest, TextGenerator},
};

pub const METADATA_TEMPERATURE: f32 = 0.1;

static ROW_SCHEMA: Lazy<String> = Lazy::new(|| {
    let schema = schemars::schema_for!(Vec<MetadataRowDto>);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
});

/// Asks the model to describe verified URLs and keeps only what can be
/// trusted: rows whose URL is one of the inputs, in input order.
pub struct MetadataResolver {
    generator: Arc<dyn TextGenerator>,
}

impl MetadataResolver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Never fails. A generation error or an unreadable reply yields an
    /// empty list.
    pub async fn resolve(&self, verified: &[String], model: &str) -> Vec<MetadataRecord> {
        if verified.is_empty() {
            return Vec::new();
        }

        let text = match self.request_rows(verified, model).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Metadata resolution failed: {}", e);
                return Vec::new();
            }
        };

        let rows = parse_rows(&text);
        if rows.is_empty() {
            log::warn!("Metadata reply contained no usable rows");
        }
        let records = retain_verified(rows, verified);
        log::info!(
            "Resolved metadata for {} of {} verified URLs",
            records.len(),
            verified.len()
        );
        records
    }

    async fn request_rows(&self, verified: &[String], model: &str) -> Result<String, GenerationError> {
        self.generator
            .complete(CompletionRequest {
                model: model.to_string(),
                temperature: METADATA_TEMPERATURE,
                messages: vec![
                    ChatMessage::system(prompts::METADATA_SYSTEM_PROMPT),
                    ChatMessage::user(prompts::metadata_request(verified, &ROW_SCHEMA)),
                ],
            })
            .await
    }
}

/// Reads an array of rows out of a reply that may be wrapped in a code
/// fence, surrounded by prose, or nested in an object.
pub fn parse_rows(text: &str) -> Vec<MetadataRowDto> {
    let value = serde_json::from_str::<Value>(text.trim())
        .ok()
        .or_else(|| bracketed(text).and_then(|slice| serde_json::from_str(slice).ok()));

    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Object(fields)) => fields
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

fn bracketed(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Drops rows for URLs outside `verified`, keeps the first row per URL and
/// orders the survivors like `verified`.
pub fn retain_verified(rows: Vec<MetadataRowDto>, verified: &[String]) -> Vec<MetadataRecord> {
    let position: HashMap<&str, usize> = verified
        .iter()
        .enumerate()
        .map(|(i, url)| (url.as_str(), i))
        .collect();

    let mut slots: Vec<Option<MetadataRecord>> = vec![None; verified.len()];
    for record in rows.into_iter().filter_map(MetadataRowDto::into_record) {
        match position.get(record.url.as_str()) {
            Some(&i) if slots[i].is_none() => slots[i] = Some(record),
            Some(_) => log::debug!("Duplicate metadata row for {}", record.url),
            None => log::warn!("Discarding metadata for unverified URL {}", record.url),
        }
    }
    slots.into_iter().flatten().collect()
}
