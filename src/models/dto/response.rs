use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    Diagnostics, LivenessVerdict, MetadataRecord, RepairAttempt, SearchOutcome,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ResourceDto {
    pub title: String,
    pub resource_type: String,
    pub year: Option<i32>,
    pub access: String,
    pub why_aligns: String,
    pub suggested_use: String,
    pub url: String,
}

impl From<MetadataRecord> for ResourceDto {
    fn from(record: MetadataRecord) -> Self {
        ResourceDto {
            title: record.title,
            resource_type: record.resource_type.label().to_string(),
            year: record.year,
            access: record.access.label().to_string(),
            why_aligns: record.why_aligns,
            suggested_use: record.suggested_use.label().to_string(),
            url: record.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LinkCheckDto {
    pub url: String,
    pub alive: bool,
    pub note: String,
}

impl From<LivenessVerdict> for LinkCheckDto {
    fn from(verdict: LivenessVerdict) -> Self {
        LinkCheckDto {
            url: verdict.url,
            alive: verdict.alive,
            note: verdict.note,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct RepairAttemptDto {
    pub attempt: u32,
    pub text: String,
}

impl From<RepairAttempt> for RepairAttemptDto {
    fn from(attempt: RepairAttempt) -> Self {
        RepairAttemptDto {
            attempt: attempt.attempt,
            text: attempt.text,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct DiagnosticsDto {
    pub raw_draft: String,
    pub attempts: Vec<RepairAttemptDto>,
    pub working_links: Vec<LinkCheckDto>,
    pub broken_links: Vec<LinkCheckDto>,
}

impl From<Diagnostics> for DiagnosticsDto {
    fn from(diagnostics: Diagnostics) -> Self {
        let (working, broken): (Vec<_>, Vec<_>) = diagnostics
            .link_report
            .into_iter()
            .partition(|verdict| verdict.alive);

        DiagnosticsDto {
            raw_draft: diagnostics.raw_draft,
            attempts: diagnostics.attempts.into_iter().map(Into::into).collect(),
            working_links: working.into_iter().map(Into::into).collect(),
            broken_links: broken.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SearchResponseDto {
    pub run_id: String,
    pub narrative: String,
    pub resource_table: String,
    pub optional_leads: String,
    pub verified_count: usize,
    pub verified_urls: Vec<String>,
    pub resources: Vec<ResourceDto>,
    pub retries_used: u32,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsDto>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl From<SearchOutcome> for SearchResponseDto {
    fn from(outcome: SearchOutcome) -> Self {
        SearchResponseDto {
            verified_count: outcome.verified_count(),
            run_id: outcome.run_id,
            narrative: outcome.narrative,
            resource_table: outcome.resource_table,
            optional_leads: outcome.optional_leads,
            verified_urls: outcome.verified_urls,
            resources: outcome.resources.into_iter().map(Into::into).collect(),
            retries_used: outcome.retries_used,
            warnings: outcome.warnings,
            diagnostics: outcome.diagnostics.map(Into::into),
            started_at: outcome.started_at,
            completed_at: outcome.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SessionQuotaDto {
    pub remaining_runs: usize,
    pub max_runs: usize,
    pub window_secs: i64,
    pub max_input_chars: usize,
}
