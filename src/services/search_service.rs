use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::{Config, MAX_RUN_WINDOW_SECS},
    errors::{AppError, AppResult},
    models::{
        domain::{Diagnostics, SearchBrief, SearchOutcome},
        dto::{
            request::{SearchRequestDto, MAX_INPUT_CHARS},
            response::SessionQuotaDto,
        },
    },
    services::{
        draft_generator::{DraftGenerator, InstructionProfile},
        link_checker::{check_all, LinkProbe},
        metadata_resolver::MetadataResolver,
        model_service::TextGenerator,
        rate_limiter::{Clock, SessionRegistry},
        repair_orchestrator::RepairOrchestrator,
        repair_policy::RepairPolicy,
        table_renderer,
        url_extractor::extract_urls,
    },
};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Runs resource searches for callers: validation, per-session quota, the
/// repair loop, metadata, and the final text sections.
pub struct ResourceSearchService {
    drafts: Arc<DraftGenerator>,
    orchestrator: RepairOrchestrator,
    resolver: MetadataResolver,
    probe: Arc<dyn LinkProbe>,
    policy: RepairPolicy,
    sessions: SessionRegistry,
    default_model: String,
    allowed_models: Vec<String>,
}

impl ResourceSearchService {
    pub fn new(
        config: &Config,
        generator: Arc<dyn TextGenerator>,
        probe: Arc<dyn LinkProbe>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let policy = RepairPolicy::from_config(config);
        let drafts = Arc::new(DraftGenerator::new(
            generator.clone(),
            InstructionProfile::default(),
        ));

        Self {
            orchestrator: RepairOrchestrator::new(drafts.clone(), probe.clone(), policy.clone()),
            resolver: MetadataResolver::new(generator),
            drafts,
            probe,
            policy,
            sessions: SessionRegistry::new(
                clock,
                Duration::try_seconds(config.run_window_secs)
                    .unwrap_or_else(|| Duration::seconds(MAX_RUN_WINDOW_SECS)),
                config.max_runs_per_window,
            ),
            default_model: config.default_model.clone(),
            allowed_models: config.allowed_models.clone(),
        }
    }

    pub fn allowed_models(&self) -> &[String] {
        &self.allowed_models
    }

    pub async fn quota(&self, session: &str) -> SessionQuotaDto {
        SessionQuotaDto {
            remaining_runs: self.sessions.remaining(session).await,
            max_runs: self.sessions.max_runs(),
            window_secs: self.sessions.window().num_seconds(),
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    /// Validates a request and resolves its defaults.
    pub fn build_brief(&self, request: &SearchRequestDto) -> AppResult<SearchBrief> {
        request.validate()?;

        let model = match request.model.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.default_model.clone(),
        };
        if !self.allowed_models.contains(&model) {
            return Err(AppError::ValidationError(format!(
                "Model '{}' is not available",
                model
            )));
        }

        Ok(SearchBrief {
            objective: request.objective.trim().to_string(),
            constraints: request
                .constraints
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            model,
        })
    }

    /// Entry point for callers. Nothing touches the network until the request
    /// is valid and the session still has runs left.
    pub async fn submit(&self, session: &str, request: SearchRequestDto) -> AppResult<SearchOutcome> {
        let brief = self.build_brief(&request)?;
        self.sessions.begin_run(session).await?;
        self.run_search(&brief, request.include_diagnostics.unwrap_or(false))
            .await
    }

    pub async fn run_search(
        &self,
        brief: &SearchBrief,
        include_diagnostics: bool,
    ) -> AppResult<SearchOutcome> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        log::info!("Run {} started with model {}", run_id, brief.model);

        let mut state = self.orchestrator.run(brief).await.map_err(|e| {
            log::error!("Run {} aborted: {}", run_id, e);
            AppError::from(e)
        })?;

        let verified_urls = state.verified.as_slice().to_vec();
        let mut warnings = Vec::new();
        if let Some(warning) = self.policy.short_run_warning(verified_urls.len()) {
            warnings.push(warning);
        }

        let resources = self.resolver.resolve(&verified_urls, &brief.model).await;
        if !verified_urls.is_empty() && resources.is_empty() {
            warnings.push("Resource details could not be resolved for the verified links.".to_string());
        }
        let resource_table = table_renderer::render(&resources);

        let narrative = match self.drafts.clean_narrative(brief).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Run {}: narrative regeneration failed: {}", run_id, e);
                warnings.push(format!("The narrative could not be generated: {}", e));
                String::new()
            }
        };

        let optional_leads = match self.drafts.optional_leads(brief).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Run {}: optional leads failed: {}", run_id, e);
                warnings.push(format!("Optional leads could not be generated: {}", e));
                String::new()
            }
        };

        let diagnostics = if include_diagnostics {
            let urls = extract_urls(&state.accumulated, self.policy.report_url_cap);
            let link_report =
                check_all(self.probe.as_ref(), &urls, self.policy.check_concurrency).await;
            Some(Diagnostics {
                raw_draft: state.raw_draft.clone(),
                attempts: state.attempts.clone(),
                link_report,
            })
        } else {
            None
        };

        state.finish();
        let completed_at = Utc::now();
        log::info!(
            "Run {} finished: {} verified, {} resources, {} retries",
            run_id,
            verified_urls.len(),
            resources.len(),
            state.retries
        );

        Ok(SearchOutcome {
            run_id,
            narrative,
            resource_table,
            optional_leads,
            verified_urls,
            resources,
            retries_used: state.retries,
            warnings,
            diagnostics,
            started_at,
            completed_at,
        })
    }
}
