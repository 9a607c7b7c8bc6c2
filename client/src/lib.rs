//! Blocking request helpers: one round trip, fully buffered body.
//!
//! # Overview
//! Wraps `wirekit-core` request descriptors with an executor built on
//! ureq. Each helper builds a request (GET, POST JSON, POST URL-encoded
//! form, POST multipart form, or any method with custom headers), sends
//! it, reads the entire response body into memory and returns it.
//!
//! # Design
//! - `Client` carries the configured agent; the free functions below use
//!   a default `Client` per call.
//! - Calls block the current thread and are never retried.
//! - Bodies are buffered in full; set `ClientConfig::max_body_size` to cap
//!   them.

pub mod client;
pub mod error;

use std::collections::HashMap;

use serde::Serialize;

pub use client::{Client, ClientConfig};
pub use error::ClientError;
pub use wirekit_core::{FormFields, HttpMethod, HttpResponse, SerdeForm, ToFormFields};

/// `GET endpoint` with a default client.
pub fn get(endpoint: &str) -> Result<Vec<u8>, ClientError> {
    Client::new().get(endpoint)
}

/// `POST endpoint` with `payload` as JSON, using a default client.
pub fn post_json<T: Serialize + ?Sized>(endpoint: &str, payload: &T) -> Result<Vec<u8>, ClientError> {
    Client::new().post_json(endpoint, payload)
}

/// Arbitrary method with headers and a JSON body, using a default client.
pub fn send_request<T: Serialize + ?Sized>(
    method: &str,
    url: &str,
    headers: &HashMap<String, String>,
    payload: &T,
) -> Result<HttpResponse, ClientError> {
    Client::new().send_request(method, url, headers, payload)
}

/// `POST endpoint` with URL-encoded form fields, using a default client.
pub fn post_form<P: ToFormFields + ?Sized>(endpoint: &str, payload: &P) -> Result<Vec<u8>, ClientError> {
    Client::new().post_form(endpoint, payload)
}

/// `POST endpoint` with multipart form fields, using a default client.
pub fn post_multipart<P: ToFormFields + ?Sized>(
    endpoint: &str,
    payload: &P,
) -> Result<Vec<u8>, ClientError> {
    Client::new().post_multipart(endpoint, payload)
}
