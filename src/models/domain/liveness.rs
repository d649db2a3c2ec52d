use serde::Serialize;

/// Outcome of probing one URL.
///
/// `note` is the numeric status, the status followed by ` (redirect)`, or an
/// `error: <class>` tag when no status was received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LivenessVerdict {
    pub url: String,
    pub alive: bool,
    pub note: String,
}

impl LivenessVerdict {
    pub fn alive(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alive: true,
            note: note.into(),
        }
    }

    pub fn dead(url: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alive: false,
            note: note.into(),
        }
    }
}
