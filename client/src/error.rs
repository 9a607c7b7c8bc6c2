//! Error type for executed round trips.
//!
//! Non-2xx statuses are not errors here: the response body is returned to
//! the caller like any other. Only failures to build, send or read count.

use thiserror::Error;
use wirekit_core::EncodeError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The payload could not be encoded into a request body.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The URL or a header was rejected while assembling the request.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ureq::http::Error),

    /// Connecting, sending or reading the response body failed.
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] ureq::Error),
}
