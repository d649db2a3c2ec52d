use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use reqwest::redirect::Policy;

use crate::{
    errors::{AppError, AppResult},
    models::domain::LivenessVerdict,
};

const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!("resource-finder/", env!("CARGO_PKG_VERSION"));

/// Decides whether a URL currently resolves. Implementations never fail:
/// every outcome is expressed as a verdict.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn check(&self, url: &str) -> LivenessVerdict;
}

/// Statuses where a HEAD answer is not trusted and a GET is tried instead.
pub fn needs_full_probe(status: u16) -> bool {
    matches!(status, 403 | 405) || status >= 500
}

pub fn classify_status(url: &str, status: u16) -> LivenessVerdict {
    match status {
        200..=299 => LivenessVerdict::alive(url, status.to_string()),
        300..=399 => LivenessVerdict::alive(url, format!("{status} (redirect)")),
        _ => LivenessVerdict::dead(url, status.to_string()),
    }
}

fn error_note(err: &reqwest::Error) -> String {
    let class = if err.is_timeout() {
        "Timeout"
    } else if err.is_connect() {
        "ConnectError"
    } else if err.is_redirect() {
        "TooManyRedirects"
    } else if err.is_builder() {
        "InvalidUrl"
    } else if err.is_body() || err.is_decode() {
        "InvalidResponse"
    } else if err.is_request() {
        "RequestError"
    } else {
        "TransportError"
    };
    format!("error: {class}")
}

/// Two-phase HTTP probe: a HEAD with a short timeout, escalated to a GET
/// with a longer timeout when the HEAD status is ambiguous. Redirects are
/// followed in both phases; bodies are never read.
pub struct HttpLinkChecker {
    client: reqwest::Client,
    head_timeout: Duration,
    get_timeout: Duration,
}

impl HttpLinkChecker {
    pub fn new(head_timeout: Duration, get_timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            head_timeout,
            get_timeout,
        })
    }

    async fn probe_status(&self, url: &str) -> Result<u16, reqwest::Error> {
        let head = self
            .client
            .head(url)
            .timeout(self.head_timeout)
            .send()
            .await?;
        let status = head.status().as_u16();
        if !needs_full_probe(status) {
            return Ok(status);
        }

        let full = self
            .client
            .get(url)
            .timeout(self.get_timeout)
            .send()
            .await?;
        Ok(full.status().as_u16())
    }
}

#[async_trait]
impl LinkProbe for HttpLinkChecker {
    async fn check(&self, url: &str) -> LivenessVerdict {
        let verdict = match self.probe_status(url).await {
            Ok(status) => classify_status(url, status),
            Err(err) => LivenessVerdict::dead(url, error_note(&err)),
        };
        log::debug!("Link check {} -> {}", url, verdict.note);
        verdict
    }
}

/// Probes every URL, at most `concurrency` at a time, and returns verdicts
/// in the same order as `urls`.
pub async fn check_all(
    probe: &dyn LinkProbe,
    urls: &[String],
    concurrency: usize,
) -> Vec<LivenessVerdict> {
    let checks: Vec<_> = urls.iter().map(|url| probe.check(url)).collect();
    stream::iter(checks)
        .buffered(concurrency.max(1))
        .collect()
        .await
}
