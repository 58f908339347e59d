//! Error types for the digest core.
//!
//! [`DigestError`] is the top-level error; [`DigestError::Delivery`] is what every [`crate::Bot`]
//! implementation returns when a notice or document cannot be pushed to a destination.

use thiserror::Error;

/// Top-level error (delivery or handler).
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Unauthorized access")]
    Unauthorized,
}

/// Result type for core operations; uses [`DigestError`].
pub type Result<T> = std::result::Result<T, DigestError>;
