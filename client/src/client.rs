//! Blocking execution of `HttpRequest` descriptors over ureq.
//!
//! # Design
//! `Client` holds a configured `ureq::Agent` and nothing else that changes
//! between calls. Every helper builds its descriptor with `wirekit-core`,
//! runs one round trip through `execute`, and buffers the whole body.
//! Status codes are data: a 404 or 500 still returns its body.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use ureq::http::header::USER_AGENT;
use ureq::Agent;
use wirekit_core::{
    build_get, build_post_form, build_post_json, build_post_multipart, build_request, HttpRequest,
    HttpResponse, ToFormFields,
};

use crate::error::ClientError;

/// Knobs for a `Client`. The default matches a bare transport: no timeout,
/// no body size cap, ureq's own user agent.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Deadline for the whole round trip, body read included.
    pub timeout: Option<Duration>,
    /// Largest response body that will be buffered.
    pub max_body_size: Option<u64>,
    /// Sent as `User-Agent` unless the request already sets one.
    pub user_agent: Option<String>,
}

/// Synchronous HTTP client returning fully buffered bodies.
#[derive(Clone)]
pub struct Client {
    agent: Agent,
    config: ClientConfig,
}

impl Client {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self { agent, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one round trip and read the whole response body.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        if let Some(user_agent) = &self.config.user_agent {
            if request.header(USER_AGENT.as_str()).is_none() {
                builder = builder.header(USER_AGENT, user_agent);
            }
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        debug!(method = %request.method, url = %request.url, "sending request");
        let mut response = match request.body {
            Some(body) => self.agent.run(builder.body(body)?)?,
            None => self.agent.run(builder.body(())?)?,
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.config.max_body_size.unwrap_or(u64::MAX))
            .read_to_vec()?;
        debug!(status, bytes = body.len(), "response read");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// `GET endpoint`, returning the body.
    pub fn get(&self, endpoint: &str) -> Result<Vec<u8>, ClientError> {
        Ok(self.execute(build_get(endpoint))?.body)
    }

    /// `POST endpoint` with `payload` as JSON, returning the body.
    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<Vec<u8>, ClientError> {
        Ok(self.execute(build_post_json(endpoint, payload)?)?.body)
    }

    /// Arbitrary method, JSON body and caller headers. Returns status,
    /// headers and the already-read body.
    pub fn send_request<T: Serialize + ?Sized>(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        payload: &T,
    ) -> Result<HttpResponse, ClientError> {
        self.execute(build_request(method, url, headers, payload)?)
    }

    /// `POST endpoint` with the payload's fields URL-encoded.
    pub fn post_form<P: ToFormFields + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Vec<u8>, ClientError> {
        let result = build_post_form(endpoint, payload)
            .map_err(ClientError::from)
            .and_then(|request| self.execute(request));
        match result {
            Ok(response) => Ok(response.body),
            Err(e) => {
                warn!(endpoint, error = %e, "form request failed");
                Err(e)
            }
        }
    }

    /// `POST endpoint` with the payload's fields as `multipart/form-data`.
    pub fn post_multipart<P: ToFormFields + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Vec<u8>, ClientError> {
        let result = build_post_multipart(endpoint, payload)
            .map_err(ClientError::from)
            .and_then(|request| self.execute(request));
        match result {
            Ok(response) => Ok(response.body),
            Err(e) => {
                warn!(endpoint, error = %e, "multipart request failed");
                Err(e)
            }
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
