pub mod fixtures {
    use crate::models::domain::SearchBrief;

    /// A typical brief with the default model and temperature.
    pub fn test_brief() -> SearchBrief {
        SearchBrief {
            objective: "Analyze how industrialization accelerated the growth of modern cities"
                .to_string(),
            constraints: Some("Region: global; Recency: since 2010".to_string()),
            temperature: 0.2,
            model: "gpt-4o".to_string(),
        }
    }

    /// `count` distinct URLs on one host, numbered from `start`.
    pub fn urls(host: &str, start: usize, count: usize) -> Vec<String> {
        (start..start + count)
            .map(|i| format!("https://{host}/resource/{i}"))
            .collect()
    }

    /// Renders URLs as a resource table the way a draft would cite them.
    pub fn draft_citing(urls: &[String]) -> String {
        let rows = urls
            .iter()
            .enumerate()
            .map(|(i, url)| format!("| Resource {i} | Report | [Link]({url}) |"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "A. Search plan: urban growth.\n\nE. Resource Table\n| Title | Type | URL |\n|---|---|---|\n{rows}\n"
        )
    }
}

pub mod doubles {
    use std::{
        collections::{HashSet, VecDeque},
        sync::Mutex,
    };

    use async_trait::async_trait;

    use crate::{
        errors::GenerationError,
        models::domain::LivenessVerdict,
        services::{
            link_checker::LinkProbe,
            model_service::{CompletionRequest, TextGenerator},
        },
    };

    /// Replays canned replies in call order and records every request.
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedGenerator {
        pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GenerationError::EmptyResponse))
        }
    }

    /// Answers 200 for URLs in the live set and 404 for everything else.
    pub struct TableProbe {
        live: HashSet<String>,
        checked: Mutex<Vec<String>>,
    }

    impl TableProbe {
        pub fn new<I, S>(live: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                live: live.into_iter().map(Into::into).collect(),
                checked: Mutex::new(Vec::new()),
            }
        }

        pub fn checked(&self) -> Vec<String> {
            self.checked.lock().unwrap().clone()
        }

        pub fn times_checked(&self, url: &str) -> usize {
            self.checked.lock().unwrap().iter().filter(|u| *u == url).count()
        }
    }

    #[async_trait]
    impl LinkProbe for TableProbe {
        async fn check(&self, url: &str) -> LivenessVerdict {
            self.checked.lock().unwrap().push(url.to_string());
            if self.live.contains(url) {
                LivenessVerdict::alive(url, "200")
            } else {
                LivenessVerdict::dead(url, "404")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{doubles::*, fixtures::*};
    use crate::services::{link_checker::LinkProbe, url_extractor::extract_urls};

    #[test]
    fn draft_citing_round_trips_through_extraction() {
        let cited = urls("data.example.org", 0, 4);
        assert_eq!(extract_urls(&draft_citing(&cited), 60), cited);
    }

    #[actix_web::test]
    async fn table_probe_records_checks() {
        let probe = TableProbe::new(["https://live.org/"]);

        assert!(probe.check("https://live.org/").await.alive);
        assert!(!probe.check("https://dead.org/").await.alive);
        assert_eq!(probe.times_checked("https://live.org/"), 1);
        assert_eq!(probe.checked().len(), 2);
    }
}
