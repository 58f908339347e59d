//! Pipeline errors. Conversation-scoped errors skip one conversation; [`RunError`] aborts a run.

use std::path::PathBuf;

use analysis::AnalysisFailure;
use digest_core::DigestError;
use storage::PersistenceError;
use thiserror::Error;

/// Artifact file could not be written.
#[derive(Error, Debug)]
#[error("cannot write artifact {path}: {source}")]
pub struct StorageError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failure scoped to one conversation in a run.
#[derive(Error, Debug)]
pub enum ConversationError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Analysis(#[from] AnalysisFailure),

    #[error("delivery failed: {0}")]
    Delivery(#[from] DigestError),
}

/// Failure that aborts a whole run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("cannot read messages: {0}")]
    Persistence(#[from] PersistenceError),
}
