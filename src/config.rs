use std::env;
use secrecy::SecretString;

use crate::{
    errors::{AppError, AppResult},
    services::repair_policy,
};

/// Longest accepted rate-limit window: one year.
pub const MAX_RUN_WINDOW_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: Option<SecretString>,
    pub openai_api_base: String,
    pub app_passcode: Option<SecretString>,
    pub default_model: String,
    pub allowed_models: Vec<String>,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub min_verified_links: usize,
    pub max_repair_retries: u32,
    pub initial_url_cap: usize,
    pub retry_url_cap: usize,
    pub report_url_cap: usize,
    pub link_head_timeout_secs: u64,
    pub link_get_timeout_secs: u64,
    pub link_check_concurrency: usize,
    pub run_window_secs: i64,
    pub max_runs_per_window: usize,
}

fn env_secret(names: &[&str]) -> Option<SecretString> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_secret(&["OPENAI_OPENAI_API_KEY", "OPENAI_API_KEY"]),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            app_passcode: env_secret(&["APP_PASSCODE"]),
            default_model: env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            allowed_models: env::var("ALLOWED_MODELS")
                .unwrap_or_else(|_| "gpt-4o,gpt-4o-mini".to_string())
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env_parse("WEB_SERVER_PORT", 8080),
            min_verified_links: env_parse("MIN_VERIFIED_LINKS", repair_policy::MIN_VERIFIED_LINKS),
            max_repair_retries: env_parse("MAX_REPAIR_RETRIES", repair_policy::MAX_REPAIR_RETRIES),
            initial_url_cap: env_parse("INITIAL_URL_CAP", repair_policy::INITIAL_URL_CAP),
            retry_url_cap: env_parse("RETRY_URL_CAP", repair_policy::RETRY_URL_CAP),
            report_url_cap: env_parse("REPORT_URL_CAP", repair_policy::REPORT_URL_CAP),
            link_head_timeout_secs: env_parse("LINK_HEAD_TIMEOUT_SECS", 6),
            link_get_timeout_secs: env_parse("LINK_GET_TIMEOUT_SECS", 8),
            link_check_concurrency: env_parse("LINK_CHECK_CONCURRENCY", 1),
            run_window_secs: env_parse("RUN_WINDOW_SECS", 3600),
            max_runs_per_window: env_parse("MAX_RUNS_PER_WINDOW", 15),
        }
    }

    /// Checks everything a run depends on before the server accepts traffic.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.is_none() {
            return Err(AppError::ConfigurationError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }
        if self.app_passcode.is_none() {
            return Err(AppError::ConfigurationError(
                "APP_PASSCODE is not set".to_string(),
            ));
        }
        if !self.allowed_models.contains(&self.default_model) {
            return Err(AppError::ConfigurationError(format!(
                "DEFAULT_MODEL '{}' is not listed in ALLOWED_MODELS",
                self.default_model
            )));
        }
        if self.initial_url_cap == 0 || self.retry_url_cap == 0 || self.report_url_cap == 0 {
            return Err(AppError::ConfigurationError(
                "URL caps must be greater than zero".to_string(),
            ));
        }
        if self.link_check_concurrency == 0 {
            return Err(AppError::ConfigurationError(
                "LINK_CHECK_CONCURRENCY must be greater than zero".to_string(),
            ));
        }
        if self.run_window_secs <= 0 || self.run_window_secs > MAX_RUN_WINDOW_SECS {
            return Err(AppError::ConfigurationError(format!(
                "RUN_WINDOW_SECS must be between 1 and {}",
                MAX_RUN_WINDOW_SECS
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: Some(SecretString::from("sk-test".to_string())),
            openai_api_base: "http://127.0.0.1:9/v1".to_string(),
            app_passcode: Some(SecretString::from("open-sesame".to_string())),
            default_model: "gpt-4o".to_string(),
            allowed_models: vec!["gpt-4o".to_string(), "gpt-4o-mini".to_string()],
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            min_verified_links: 6,
            max_repair_retries: 2,
            initial_url_cap: 60,
            retry_url_cap: 40,
            report_url_cap: 120,
            link_head_timeout_secs: 1,
            link_get_timeout_secs: 1,
            link_check_concurrency: 1,
            run_window_secs: 3600,
            max_runs_per_window: 15,
        }
    }
}
