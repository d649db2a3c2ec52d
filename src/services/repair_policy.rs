use crate::config::Config;

pub const MIN_VERIFIED_LINKS: usize = 6;
pub const MAX_REPAIR_RETRIES: u32 = 2;

pub const INITIAL_URL_CAP: usize = 60;
pub const RETRY_URL_CAP: usize = 40;
pub const REPORT_URL_CAP: usize = 120;

const DEFAULT_CHECK_CONCURRENCY: usize = 1;

/// Knobs of the draft-verify-repair loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairPolicy {
    pub min_verified: usize,
    pub max_retries: u32,
    pub initial_url_cap: usize,
    pub retry_url_cap: usize,
    pub report_url_cap: usize,
    pub check_concurrency: usize,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self {
            min_verified: MIN_VERIFIED_LINKS,
            max_retries: MAX_REPAIR_RETRIES,
            initial_url_cap: INITIAL_URL_CAP,
            retry_url_cap: RETRY_URL_CAP,
            report_url_cap: REPORT_URL_CAP,
            check_concurrency: DEFAULT_CHECK_CONCURRENCY,
        }
    }
}

impl RepairPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_verified: config.min_verified_links,
            max_retries: config.max_repair_retries,
            initial_url_cap: config.initial_url_cap,
            retry_url_cap: config.retry_url_cap,
            report_url_cap: config.report_url_cap,
            check_concurrency: config.link_check_concurrency.max(1),
        }
    }

    pub fn with_min_verified(mut self, min_verified: usize) -> Self {
        self.min_verified = min_verified;
        self
    }

    pub fn is_satisfied(&self, verified: usize) -> bool {
        verified >= self.min_verified
    }

    pub fn short_run_warning(&self, verified: usize) -> Option<String> {
        if self.is_satisfied(verified) {
            return None;
        }
        Some(format!(
            "Only {} verified links were available. Consider narrowing the topic, \
             relaxing recency, or allowing reputable media sources.",
            verified
        ))
    }
}
