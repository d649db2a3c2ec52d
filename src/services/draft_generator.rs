use std::sync::Arc;

use crate::{
    constants::prompts,
    errors::GenerationError,
    models::domain::SearchBrief,
    services::model_service::{ChatMessage, CompletionRequest, TextGenerator},
};

pub const REPAIR_TEMPERATURE: f32 = 0.2;
pub const NARRATIVE_TEMPERATURE: f32 = 0.2;

/// Fixed instructions sent ahead of every drafting turn in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionProfile {
    pub system_prompt: String,
}

impl Default for InstructionProfile {
    fn default() -> Self {
        Self {
            system_prompt: prompts::BASE_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl InstructionProfile {
    /// System block followed by the scope lock for `objective`.
    pub fn preamble(&self, objective: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::system(prompts::scope_lock(objective)),
        ]
    }
}

/// Drafting front-end over a [`TextGenerator`]. Errors are returned to the
/// caller untouched; nothing is retried here.
pub struct DraftGenerator {
    generator: Arc<dyn TextGenerator>,
    profile: InstructionProfile,
}

impl DraftGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, profile: InstructionProfile) -> Self {
        Self { generator, profile }
    }

    pub async fn generate(
        &self,
        brief: &SearchBrief,
        turns: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let mut messages = self.profile.preamble(&brief.objective);
        messages.extend(turns);

        self.generator
            .complete(CompletionRequest {
                model: brief.model.clone(),
                temperature,
                messages,
            })
            .await
    }

    pub async fn initial_draft(&self, brief: &SearchBrief) -> Result<String, GenerationError> {
        let request = prompts::initial_request(&brief.objective, brief.constraints_or_none());
        self.generate(brief, vec![ChatMessage::user(request)], brief.temperature)
            .await
    }

    /// Asks for replacement citations only, with everything produced so far as context.
    pub async fn repair(
        &self,
        brief: &SearchBrief,
        accumulated: &str,
    ) -> Result<String, GenerationError> {
        self.generate(
            brief,
            vec![
                ChatMessage::assistant(accumulated),
                ChatMessage::user(prompts::REPAIR_INSTRUCTION),
            ],
            REPAIR_TEMPERATURE,
        )
        .await
    }

    /// Sections A-D and F without any links.
    pub async fn clean_narrative(&self, brief: &SearchBrief) -> Result<String, GenerationError> {
        self.generate(
            brief,
            vec![
                ChatMessage::assistant(prompts::NARRATIVE_CONTEXT),
                ChatMessage::user(prompts::NARRATIVE_INSTRUCTION),
            ],
            NARRATIVE_TEMPERATURE,
        )
        .await
    }

    /// Section G, titles and domains only.
    pub async fn optional_leads(&self, brief: &SearchBrief) -> Result<String, GenerationError> {
        self.generate(
            brief,
            vec![
                ChatMessage::assistant(prompts::LEADS_CONTEXT),
                ChatMessage::user(prompts::LEADS_INSTRUCTION),
            ],
            NARRATIVE_TEMPERATURE,
        )
        .await
    }
}
