//! JSON response helpers for axum handlers.
//!
//! # Overview
//! Every helper returns an owned `axum::response::Response` carrying the
//! status code, `Content-Type: application/json` and the serialized body.
//! Handlers return it directly, so a response can only be written once.
//!
//! # Design
//! - `respond_with_envelope` always sets `count`; `Respond::respond` writes
//!   an envelope exactly as the caller built it.
//! - A body that fails to serialize is logged and replaced by a fixed 500
//!   envelope rather than an empty or truncated body.
//! - A code outside the HTTP status range is logged and sent as 500; the
//!   body keeps the caller's code.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};
use wirekit_core::Envelope;

/// Body sent when the real payload cannot be serialized.
pub const SERIALIZATION_FAILURE_BODY: &str =
    r#"{"code":500,"message":"failed to serialize response","data":null}"#;

/// Writes `self` as a JSON response.
pub trait Respond {
    fn respond(&self) -> Response;
}

impl<T: Serialize> Respond for Envelope<T> {
    fn respond(&self) -> Response {
        json_response(self.code, self)
    }
}

/// Wrap `payload` in an envelope with `count` set and write it with status `code`.
pub fn respond_with_envelope<T: Serialize>(
    code: u16,
    message: impl Into<String>,
    payload: T,
    count: i64,
) -> Response {
    Envelope::new(code, message, payload).with_count(count).respond()
}

/// Write `payload` as-is, without an envelope.
pub fn respond_raw<T: Serialize + ?Sized>(code: u16, payload: &T) -> Response {
    json_response(code, payload)
}

fn json_response<T: Serialize + ?Sized>(code: u16, payload: &T) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or_else(|_| {
        warn!(code, "status code out of range, responding with 500");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    match serde_json::to_vec(payload) {
        Ok(body) => (status, json_content_type(), body).into_response(),
        Err(e) => {
            error!(code, error = %e, "failed to serialize response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json_content_type(),
                SERIALIZATION_FAILURE_BODY,
            )
                .into_response()
        }
    }
}

fn json_content_type() -> [(header::HeaderName, HeaderValue); 1] {
    [(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    )]
}
