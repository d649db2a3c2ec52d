/// One validated run request: what to look for and how to ask for it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchBrief {
    pub objective: String,
    pub constraints: Option<String>,
    pub temperature: f32,
    pub model: String,
}

impl SearchBrief {
    /// Constraints as shown to the model; `None` when absent or blank.
    pub fn constraints_or_none(&self) -> &str {
        match self.constraints.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => "None",
        }
    }
}
