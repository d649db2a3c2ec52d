pub mod draft_generator;
pub mod link_checker;
pub mod metadata_resolver;
pub mod model_service;
pub mod rate_limiter;
pub mod repair_orchestrator;
pub mod repair_policy;
pub mod search_service;
pub mod table_renderer;
pub mod url_extractor;

pub use link_checker::{HttpLinkChecker, LinkProbe};
pub use model_service::{OpenAiTextGenerator, TextGenerator};
pub use search_service::ResourceSearchService;
