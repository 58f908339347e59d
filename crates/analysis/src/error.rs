use thiserror::Error;

/// Analysis of one conversation failed (transport, status, malformed or empty reply, timeout).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("analysis of \"{conversation}\" failed: {cause}")]
pub struct AnalysisFailure {
    pub conversation: String,
    pub cause: String,
}

impl AnalysisFailure {
    pub fn new(conversation: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            conversation: conversation.into(),
            cause: cause.into(),
        }
    }
}
