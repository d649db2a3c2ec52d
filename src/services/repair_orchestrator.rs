use std::sync::Arc;

use serde::Serialize;

use crate::{
    errors::GenerationError,
    models::domain::{LivenessVerdict, RepairAttempt, SearchBrief, VerifiedSet},
    services::{
        draft_generator::DraftGenerator,
        link_checker::{check_all, LinkProbe},
        repair_policy::RepairPolicy,
        url_extractor::extract_urls,
    },
};

/// Where a run currently is in the draft-verify-repair loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Drafting,
    Verifying,
    Satisfied,
    Retrying,
    Resolving,
    Done,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Drafting => write!(f, "drafting"),
            RunPhase::Verifying => write!(f, "verifying"),
            RunPhase::Satisfied => write!(f, "satisfied"),
            RunPhase::Retrying => write!(f, "retrying"),
            RunPhase::Resolving => write!(f, "resolving"),
            RunPhase::Done => write!(f, "done"),
        }
    }
}

/// Working memory of one run. Created per run and dropped with it.
#[derive(Debug, Clone)]
pub struct RunState {
    pub phase: RunPhase,
    pub accumulated: String,
    pub verified: VerifiedSet,
    pub retries: u32,
    pub raw_draft: String,
    pub attempts: Vec<RepairAttempt>,
    pub verdicts: Vec<LivenessVerdict>,
    /// VerifiedSet size after each verification pass.
    pub verified_per_pass: Vec<usize>,
    /// Every phase entered, starting with `Drafting`.
    pub history: Vec<RunPhase>,
}

impl RunState {
    fn new() -> Self {
        Self {
            phase: RunPhase::Drafting,
            accumulated: String::new(),
            verified: VerifiedSet::new(),
            retries: 0,
            raw_draft: String::new(),
            attempts: Vec::new(),
            verdicts: Vec::new(),
            verified_per_pass: Vec::new(),
            history: vec![RunPhase::Drafting],
        }
    }

    pub fn append_segment(&mut self, segment: &str) {
        if !self.accumulated.is_empty() {
            self.accumulated.push_str("\n\n");
        }
        self.accumulated.push_str(segment);
    }

    /// Marks the run as resolved and rendered.
    pub fn finish(&mut self) {
        self.transition(RunPhase::Done);
    }

    fn transition(&mut self, phase: RunPhase) {
        log::debug!("Run phase {} -> {}", self.phase, phase);
        self.phase = phase;
        self.history.push(phase);
    }
}

pub struct RepairOrchestrator {
    drafts: Arc<DraftGenerator>,
    probe: Arc<dyn LinkProbe>,
    policy: RepairPolicy,
}

impl RepairOrchestrator {
    pub fn new(drafts: Arc<DraftGenerator>, probe: Arc<dyn LinkProbe>, policy: RepairPolicy) -> Self {
        Self {
            drafts,
            probe,
            policy,
        }
    }

    pub fn policy(&self) -> &RepairPolicy {
        &self.policy
    }

    /// Drives a run until enough links are verified or the retry budget is
    /// spent. Only a failed initial draft is returned as an error.
    pub async fn run(&self, brief: &SearchBrief) -> Result<RunState, GenerationError> {
        let mut state = RunState::new();

        let draft = match self.drafts.initial_draft(brief).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Initial draft failed: {}", e);
                return Err(e);
            }
        };
        state.raw_draft = draft.clone();
        state.append_segment(&draft);

        let mut segment = draft;
        let mut cap = self.policy.initial_url_cap;

        loop {
            state.transition(RunPhase::Verifying);
            let gained = self.verify_segment(&mut state, &segment, cap).await;
            state.verified_per_pass.push(state.verified.len());
            log::info!(
                "Verification pass {}: {} new, {} verified in total",
                state.retries,
                gained,
                state.verified.len()
            );

            if self.policy.is_satisfied(state.verified.len()) {
                state.transition(RunPhase::Satisfied);
                break;
            }
            if state.retries >= self.policy.max_retries {
                break;
            }

            state.transition(RunPhase::Retrying);
            state.retries += 1;
            cap = self.policy.retry_url_cap;

            segment = match self.drafts.repair(brief, &state.accumulated).await {
                Ok(text) => {
                    state.attempts.push(RepairAttempt {
                        attempt: state.retries,
                        text: text.clone(),
                    });
                    state.append_segment(&text);
                    text
                }
                Err(e) => {
                    log::warn!("Repair attempt {} failed: {}", state.retries, e);
                    String::new()
                }
            };
        }

        if let Some(warning) = self.policy.short_run_warning(state.verified.len()) {
            log::warn!("{}", warning);
        }

        state.transition(RunPhase::Resolving);
        Ok(state)
    }

    /// Checks the URLs of one new segment and merges the live ones.
    /// Returns how many URLs joined the VerifiedSet.
    async fn verify_segment(&self, state: &mut RunState, segment: &str, cap: usize) -> usize {
        let candidates: Vec<String> = extract_urls(segment, cap)
            .into_iter()
            .filter(|url| !state.verified.contains(url))
            .collect();
        if candidates.is_empty() {
            return 0;
        }

        let verdicts = check_all(
            self.probe.as_ref(),
            &candidates,
            self.policy.check_concurrency,
        )
        .await;

        let mut gained = 0;
        for verdict in &verdicts {
            if verdict.alive && state.verified.insert(&verdict.url) {
                gained += 1;
            }
        }
        state.verdicts.extend(verdicts);
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::draft_generator::InstructionProfile,
        test_utils::{
            doubles::{ScriptedGenerator, TableProbe},
            fixtures::{draft_citing, test_brief, urls},
        },
    };

    fn orchestrator(
        generator: Arc<ScriptedGenerator>,
        probe: Arc<TableProbe>,
    ) -> RepairOrchestrator {
        let drafts = DraftGenerator::new(generator, InstructionProfile::default());
        RepairOrchestrator::new(Arc::new(drafts), probe, RepairPolicy::default())
    }

    #[actix_web::test]
    async fn satisfied_on_first_pass_needs_no_repair() {
        let cited = urls("a.org", 0, 8);
        let live: Vec<String> = cited[..6].to_vec();
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok(draft_citing(&cited))]));
        let probe = Arc::new(TableProbe::new(live.clone()));

        let state = orchestrator(generator.clone(), probe.clone())
            .run(&test_brief())
            .await
            .unwrap();

        assert_eq!(state.retries, 0);
        assert_eq!(state.verified.as_slice(), live.as_slice());
        assert_eq!(generator.call_count(), 1);
        assert_eq!(state.verdicts.len(), 8);
        assert_eq!(state.phase, RunPhase::Resolving);
        assert_eq!(
            state.history,
            vec![
                RunPhase::Drafting,
                RunPhase::Verifying,
                RunPhase::Satisfied,
                RunPhase::Resolving
            ]
        );
    }

    #[actix_web::test]
    async fn retries_stop_at_the_bound_when_nothing_is_alive() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(draft_citing(&urls("dead.org", 0, 5))),
            Ok(draft_citing(&urls("dead.org", 5, 5))),
            Ok(draft_citing(&urls("dead.org", 10, 5))),
            Ok(draft_citing(&urls("dead.org", 15, 5))),
        ]));
        let probe = Arc::new(TableProbe::new(Vec::<String>::new()));

        let state = orchestrator(generator.clone(), probe)
            .run(&test_brief())
            .await
            .unwrap();

        assert_eq!(state.retries, 2);
        assert_eq!(state.attempts.len(), 2);
        assert_eq!(generator.call_count(), 3);
        assert!(state.verified.is_empty());
        assert!(!state.history.contains(&RunPhase::Satisfied));
        assert_eq!(state.history.last(), Some(&RunPhase::Resolving));
    }

    #[actix_web::test]
    async fn verified_set_only_grows_across_passes() {
        let first = urls("a.org", 0, 3);
        let second = urls("b.org", 0, 1);
        let mut live = first.clone();
        live.extend(second.clone());

        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(draft_citing(&first)),
            Ok(draft_citing(&second)),
            Ok("No new links this time.".to_string()),
        ]));
        let probe = Arc::new(TableProbe::new(live));

        let state = orchestrator(generator.clone(), probe)
            .run(&test_brief())
            .await
            .unwrap();

        assert_eq!(state.retries, 2);
        assert_eq!(state.verified_per_pass, vec![3, 4, 4]);
        assert!(state
            .verified_per_pass
            .windows(2)
            .all(|pair| pair[0] <= pair[1]));
        assert_eq!(state.verified.len(), 4);
        assert_eq!(
            RepairPolicy::default().short_run_warning(state.verified.len()),
            Some(
                "Only 4 verified links were available. Consider narrowing the topic, \
                 relaxing recency, or allowing reputable media sources."
                    .to_string()
            )
        );
    }

    #[actix_web::test]
    async fn failed_repair_counts_as_an_empty_pass() {
        let first = urls("a.org", 0, 2);
        let later = urls("c.org", 0, 4);
        let mut live = first.clone();
        live.extend(later.clone());

        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(draft_citing(&first)),
            Err(GenerationError::Service("rate limit".into())),
            Ok(draft_citing(&later)),
        ]));
        let probe = Arc::new(TableProbe::new(live));

        let state = orchestrator(generator, probe)
            .run(&test_brief())
            .await
            .unwrap();

        assert_eq!(state.retries, 2);
        assert_eq!(state.attempts.len(), 1);
        assert_eq!(state.attempts[0].attempt, 2);
        assert_eq!(state.verified.len(), 6);
    }

    #[actix_web::test]
    async fn failed_initial_draft_is_fatal() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(
            GenerationError::Service("unauthorized".into()),
        )]));
        let probe = Arc::new(TableProbe::new(Vec::<String>::new()));

        let result = orchestrator(generator.clone(), probe.clone())
            .run(&test_brief())
            .await;

        assert!(matches!(result, Err(GenerationError::Service(_))));
        assert_eq!(generator.call_count(), 1);
        assert!(probe.checked().is_empty());
    }

    #[actix_web::test]
    async fn repair_passes_only_check_their_own_segment() {
        let first = urls("a.org", 0, 3);
        let repaired = urls("b.org", 0, 3);
        let mut live = first.clone();
        live.extend(repaired.clone());

        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(draft_citing(&first)),
            Ok(draft_citing(&repaired)),
        ]));
        let probe = Arc::new(TableProbe::new(live.clone()));

        let state = orchestrator(generator.clone(), probe.clone())
            .run(&test_brief())
            .await
            .unwrap();

        assert_eq!(state.retries, 1);
        assert_eq!(state.verified.as_slice(), live.as_slice());
        assert_eq!(
            state.history,
            vec![
                RunPhase::Drafting,
                RunPhase::Verifying,
                RunPhase::Retrying,
                RunPhase::Verifying,
                RunPhase::Satisfied,
                RunPhase::Resolving
            ]
        );
        for url in &live {
            assert_eq!(probe.times_checked(url), 1, "{url} probed more than once");
        }

        // The repair turn sees everything produced so far.
        let requests = generator.requests();
        assert!(requests[1]
            .messages
            .iter()
            .any(|m| m.content.contains(&first[0])));
        assert!(state.accumulated.contains(&repaired[2]));
    }

    #[actix_web::test]
    async fn lower_threshold_stops_early() {
        let cited = urls("a.org", 0, 2);
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok(draft_citing(&cited))]));
        let probe = Arc::new(TableProbe::new(cited.clone()));
        let drafts = DraftGenerator::new(generator.clone(), InstructionProfile::default());
        let orchestrator = RepairOrchestrator::new(
            Arc::new(drafts),
            probe,
            RepairPolicy::default().with_min_verified(2),
        );

        let state = orchestrator.run(&test_brief()).await.unwrap();

        assert_eq!(state.retries, 0);
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn segments_are_joined_with_blank_lines() {
        let mut state = RunState::new();
        state.append_segment("first");
        state.append_segment("second");

        assert_eq!(state.accumulated, "first\n\nsecond");
    }
}
