use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ResourceType {
    Report,
    Dataset,
    WebPage,
    PolicyBrief,
    Video,
    Overview,
    AcademicArticle,
    Other(String),
}

impl ResourceType {
    pub const LABELS: [&'static str; 7] = [
        "Report",
        "Dataset",
        "Web page",
        "Policy brief",
        "Video",
        "Overview",
        "Academic article",
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "report" => ResourceType::Report,
            "dataset" => ResourceType::Dataset,
            "web page" => ResourceType::WebPage,
            "policy brief" => ResourceType::PolicyBrief,
            "video" => ResourceType::Video,
            "overview" => ResourceType::Overview,
            "academic article" => ResourceType::AcademicArticle,
            _ => ResourceType::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ResourceType::Report => "Report",
            ResourceType::Dataset => "Dataset",
            ResourceType::WebPage => "Web page",
            ResourceType::PolicyBrief => "Policy brief",
            ResourceType::Video => "Video",
            ResourceType::Overview => "Overview",
            ResourceType::AcademicArticle => "Academic article",
            ResourceType::Other(label) => label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AccessType {
    OpenAccess,
    OpenLicensed,
    FreelyAccessible,
    Other(String),
}

impl AccessType {
    pub const LABELS: [&'static str; 3] = ["Open access", "Open-licensed", "Freely accessible"];

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "open access" => AccessType::OpenAccess,
            "open-licensed" => AccessType::OpenLicensed,
            "freely accessible" => AccessType::FreelyAccessible,
            _ => AccessType::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AccessType::OpenAccess => "Open access",
            AccessType::OpenLicensed => "Open-licensed",
            AccessType::FreelyAccessible => "Freely accessible",
            AccessType::Other(label) => label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SuggestedUse {
    CoreReading,
    SupplementaryReading,
    PreRead,
    DatasetExercise,
    CaseAnchor,
    VideoPrimer,
    Other(String),
}

impl SuggestedUse {
    pub const LABELS: [&'static str; 6] = [
        "Core reading",
        "Supplementary reading",
        "Pre-read",
        "Dataset exercise",
        "Case anchor",
        "Video primer",
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "core reading" => SuggestedUse::CoreReading,
            "supplementary reading" => SuggestedUse::SupplementaryReading,
            "pre-read" => SuggestedUse::PreRead,
            "dataset exercise" => SuggestedUse::DatasetExercise,
            "case anchor" => SuggestedUse::CaseAnchor,
            "video primer" => SuggestedUse::VideoPrimer,
            _ => SuggestedUse::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SuggestedUse::CoreReading => "Core reading",
            SuggestedUse::SupplementaryReading => "Supplementary reading",
            SuggestedUse::PreRead => "Pre-read",
            SuggestedUse::DatasetExercise => "Dataset exercise",
            SuggestedUse::CaseAnchor => "Case anchor",
            SuggestedUse::VideoPrimer => "Video primer",
            SuggestedUse::Other(label) => label,
        }
    }
}

/// Citation metadata for one verified URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub title: String,
    pub resource_type: ResourceType,
    pub year: Option<i32>,
    pub access: AccessType,
    pub why_aligns: String,
    pub suggested_use: SuggestedUse,
    pub url: String,
}
