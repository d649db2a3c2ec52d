use async_graphql::InputObject;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Longest objective or constraints text accepted, in characters.
pub const MAX_INPUT_CHARS: usize = 2000;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("Please provide the module objective first.".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SearchRequestDto {
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub objective: String,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub constraints: Option<String>,

    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub include_diagnostics: Option<bool>,
}
