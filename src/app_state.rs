use std::{sync::Arc, time::Duration};

use crate::{
    auth::PasscodeVerifier,
    config::Config,
    errors::AppResult,
    services::{
        link_checker::{HttpLinkChecker, LinkProbe},
        model_service::{OpenAiTextGenerator, TextGenerator},
        rate_limiter::{Clock, SystemClock},
        search_service::ResourceSearchService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<ResourceSearchService>,
    pub passcode: PasscodeVerifier,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let generator = Arc::new(OpenAiTextGenerator::from_config(&config)?);
        let probe = Arc::new(HttpLinkChecker::new(
            Duration::from_secs(config.link_head_timeout_secs),
            Duration::from_secs(config.link_get_timeout_secs),
        )?);

        Self::with_components(config, generator, probe, Arc::new(SystemClock))
    }

    /// Builds the state around caller-supplied generator, probe and clock.
    pub fn with_components(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        probe: Arc<dyn LinkProbe>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let passcode = PasscodeVerifier::from_config(&config)?;
        let search_service = Arc::new(ResourceSearchService::new(&config, generator, probe, clock));

        Ok(Self {
            search_service,
            passcode,
            config: Arc::new(config),
        })
    }
}
