use chrono::{DateTime, Utc};

use crate::models::domain::{LivenessVerdict, MetadataRecord};

/// Text produced by one repair request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepairAttempt {
    pub attempt: u32,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    pub raw_draft: String,
    pub attempts: Vec<RepairAttempt>,
    pub link_report: Vec<LivenessVerdict>,
}

/// Everything one run hands back to the caller.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub run_id: String,
    pub narrative: String,
    pub resource_table: String,
    pub optional_leads: String,
    pub verified_urls: Vec<String>,
    pub resources: Vec<MetadataRecord>,
    pub retries_used: u32,
    pub warnings: Vec<String>,
    pub diagnostics: Option<Diagnostics>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SearchOutcome {
    pub fn verified_count(&self) -> usize {
        self.verified_urls.len()
    }
}
