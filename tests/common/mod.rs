#![allow(dead_code)]

use std::{
    collections::{HashSet, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use resource_finder_server::{
    app_state::AppState,
    config::Config,
    constants::prompts,
    errors::GenerationError,
    models::domain::LivenessVerdict,
    services::{
        link_checker::LinkProbe,
        model_service::{CompletionRequest, TextGenerator},
        rate_limiter::SystemClock,
    },
};

pub const PASSCODE: &str = "correct-horse";
pub const FOREIGN_URL: &str = "https://invented.example.net/report";

pub fn config() -> Config {
    Config {
        openai_api_key: Some(SecretString::from("sk-integration".to_string())),
        openai_api_base: "http://127.0.0.1:9/v1".to_string(),
        app_passcode: Some(SecretString::from(PASSCODE.to_string())),
        default_model: "gpt-4o".to_string(),
        allowed_models: vec!["gpt-4o".to_string(), "gpt-4o-mini".to_string()],
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
        min_verified_links: 6,
        max_repair_retries: 2,
        initial_url_cap: 60,
        retry_url_cap: 40,
        report_url_cap: 120,
        link_head_timeout_secs: 1,
        link_get_timeout_secs: 1,
        link_check_concurrency: 2,
        run_window_secs: 3600,
        max_runs_per_window: 15,
    }
}

pub fn urls(host: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("https://{host}/doc/{i}"))
        .collect()
}

pub fn cite(urls: &[String]) -> String {
    let rows: Vec<String> = urls
        .iter()
        .map(|url| format!("| Source | Report | [Link]({url}) |"))
        .collect();
    format!("E. Resource Table\n| Title | Type | URL |\n|---|---|---|\n{}", rows.join("\n"))
}

/// Answers each kind of prompt the pipeline sends. Repair replies are
/// consumed in order; once they run out repairs fail.
pub struct LibrarianGenerator {
    draft: String,
    repairs: RwLock<VecDeque<String>>,
    requests: RwLock<Vec<CompletionRequest>>,
}

impl LibrarianGenerator {
    pub fn new(draft: String, repairs: Vec<String>) -> Self {
        Self {
            draft,
            repairs: RwLock::new(repairs.into()),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }

    /// Describes every listed URL and slips in one the caller never sent.
    fn metadata_for(prompt: &str) -> String {
        let listed = prompt
            .lines()
            .filter_map(|line| line.strip_prefix("- "))
            .filter(|line| line.starts_with("http"));

        let mut rows: Vec<serde_json::Value> = listed
            .chain(std::iter::once(FOREIGN_URL))
            .enumerate()
            .map(|(i, url)| {
                serde_json::json!({
                    "title": format!("Source {i}"),
                    "type": "Report",
                    "year": 2020 + i as i32,
                    "access": "Open access",
                    "why_aligns": "Directly addresses the objective.",
                    "use": "Core reading",
                    "url": url,
                })
            })
            .collect();
        rows.reverse();
        format!("```json\n{}\n```", serde_json::Value::Array(rows))
    }
}

#[async_trait]
impl TextGenerator for LibrarianGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let prompt = request.last_user_message().unwrap_or_default().to_string();
        self.requests.write().await.push(request);

        if prompt.starts_with("Module-level objective") {
            Ok(self.draft.clone())
        } else if prompt == prompts::REPAIR_INSTRUCTION {
            self.repairs
                .write()
                .await
                .pop_front()
                .ok_or_else(|| GenerationError::Service("repair unavailable".to_string()))
        } else if prompt.starts_with("Given these verified URLs") {
            Ok(Self::metadata_for(&prompt))
        } else if prompt == prompts::NARRATIVE_INSTRUCTION {
            Ok("A. Search plan\nB. ELOs\nC. Queries\nD. Criteria\nF. Student Reading".to_string())
        } else if prompt == prompts::LEADS_INSTRUCTION {
            Ok("G. Optional Leads\n- Urban Economics Review (journals.example.org)".to_string())
        } else {
            Err(GenerationError::Service(format!("unexpected prompt: {prompt}")))
        }
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Service("401 invalid api key".to_string()))
    }
}

/// Liveness from a fixed set; records every probe.
pub struct InMemoryProbe {
    live: HashSet<String>,
    probed: RwLock<Vec<String>>,
}

impl InMemoryProbe {
    pub fn new(live: &[String]) -> Self {
        Self {
            live: live.iter().cloned().collect(),
            probed: RwLock::new(Vec::new()),
        }
    }

    pub async fn probed(&self) -> Vec<String> {
        self.probed.read().await.clone()
    }
}

#[async_trait]
impl LinkProbe for InMemoryProbe {
    async fn check(&self, url: &str) -> LivenessVerdict {
        self.probed.write().await.push(url.to_string());
        if self.live.contains(url) {
            LivenessVerdict::alive(url, "200")
        } else {
            LivenessVerdict::dead(url, "404")
        }
    }
}

pub fn state_with(
    config: Config,
    generator: Arc<dyn TextGenerator>,
    probe: Arc<dyn LinkProbe>,
) -> AppState {
    AppState::with_components(config, generator, probe, Arc::new(SystemClock))
        .expect("test state should build")
}
