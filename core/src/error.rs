//! Error type for request construction and payload encoding.
//!
//! # Design
//! Every failure in this crate happens before any byte reaches the network:
//! the payload could not be turned into JSON, could not be flattened into
//! form fields, or the method string is not a valid HTTP token. Transport
//! failures belong to the crate that performs the I/O.

use thiserror::Error;

/// Errors returned while building an `HttpRequest` or encoding a payload.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The payload could not be serialized to JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload could not be flattened into string form fields.
    #[error("form encoding failed: {0}")]
    Form(String),

    /// The method is empty or contains characters not allowed in a token.
    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),
}
