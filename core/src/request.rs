//! Stateless construction of outbound request descriptors.
//!
//! # Design
//! Every helper here returns an `HttpRequest` without touching the network,
//! so encoding can be tested byte-for-byte. The client crate executes the
//! descriptor. JSON serialization failures are returned to the caller
//! instead of producing an empty body.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::EncodeError;
use crate::form::ToFormFields;
use crate::http::{HttpMethod, HttpRequest};
use crate::multipart::MultipartForm;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// `GET endpoint` with no headers and no body.
pub fn build_get(endpoint: &str) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url: endpoint.to_string(),
        headers: Vec::new(),
        body: None,
    }
}

/// `POST endpoint` with `payload` as a JSON body.
pub fn build_post_json<T: Serialize + ?Sized>(
    endpoint: &str,
    payload: &T,
) -> Result<HttpRequest, EncodeError> {
    let body = serde_json::to_vec(payload)?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: endpoint.to_string(),
        headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
        body: Some(body),
    })
}

/// Arbitrary method with `payload` as a JSON body and caller-supplied headers.
///
/// Headers are emitted sorted by name, each exactly once; names differing
/// only in case count as the same header and the first in sort order wins.
/// `content-type: application/json` is added unless the caller already
/// supplied a content type.
pub fn build_request<T: Serialize + ?Sized>(
    method: &str,
    url: &str,
    headers: &HashMap<String, String>,
    payload: &T,
) -> Result<HttpRequest, EncodeError> {
    let method: HttpMethod = method.parse()?;
    let body = serde_json::to_vec(payload)?;

    let mut sorted: Vec<(&String, &String)> = headers.iter().collect();
    sorted.sort();

    let mut request = HttpRequest {
        method,
        url: url.to_string(),
        headers: Vec::with_capacity(sorted.len() + 1),
        body: Some(body),
    };
    for (name, value) in sorted {
        if request.header(name).is_none() {
            request.headers.push((name.clone(), value.clone()));
        }
    }
    if request.header(CONTENT_TYPE).is_none() {
        request
            .headers
            .push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    }
    Ok(request)
}

/// `POST endpoint` with the payload's fields as a URL-encoded body.
pub fn build_post_form<P: ToFormFields + ?Sized>(
    endpoint: &str,
    payload: &P,
) -> Result<HttpRequest, EncodeError> {
    let fields = payload.to_form_fields()?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: endpoint.to_string(),
        headers: vec![(CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string())],
        body: Some(fields.to_urlencoded().into_bytes()),
    })
}

/// `POST endpoint` with the payload's fields as a `multipart/form-data` body.
pub fn build_post_multipart<P: ToFormFields + ?Sized>(
    endpoint: &str,
    payload: &P,
) -> Result<HttpRequest, EncodeError> {
    build_post_multipart_with(endpoint, payload, MultipartForm::new())
}

/// Like `build_post_multipart`, writing into a caller-prepared form
/// (for a fixed boundary).
pub fn build_post_multipart_with<P: ToFormFields + ?Sized>(
    endpoint: &str,
    payload: &P,
    mut form: MultipartForm,
) -> Result<HttpRequest, EncodeError> {
    let fields = payload.to_form_fields()?;
    form.write_fields(&fields);
    let content_type = form.content_type();
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: endpoint.to_string(),
        headers: vec![(CONTENT_TYPE.to_string(), content_type)],
        body: Some(form.finish()),
    })
}
