//! Echo server for exercising the request helpers end to end.
//!
//! Every route answers through `wirekit-respond`, so the server doubles as
//! a live user of the response helpers.

use axum::{
    body::Bytes,
    extract::{Multipart, Path},
    http::{header, HeaderMap, Method, StatusCode},
    response::Response,
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};
use wirekit_core::Envelope;
use wirekit_respond::{respond_raw, respond_with_envelope, Respond};

/// What `/echo` saw. Headers keep their wire order and repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoedRequest {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl EchoedRequest {
    /// All values received for `name`, ignoring case.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Fields decoded by `/form` or `/multipart`, in body order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedForm {
    pub content_type: String,
    pub fields: Vec<(String, String)>,
}

pub fn app() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/echo", any(echo))
        .route("/form", post(form))
        .route("/multipart", post(multipart))
        .route("/envelope", post(envelope))
        .route("/status/{code}", get(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn ping() -> &'static str {
    "pong"
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Response {
    debug!(%method, bytes = body.len(), "echo");
    let echoed = EchoedRequest {
        method: method.to_string(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    respond_raw(200, &echoed)
}

async fn form(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = content_type(&headers);
    if !content_type.starts_with("application/x-www-form-urlencoded") {
        return respond_with_envelope(
            StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16(),
            "expected application/x-www-form-urlencoded",
            (),
            0,
        );
    }
    let fields = url::form_urlencoded::parse(&body).into_owned().collect();
    respond_raw(
        200,
        &DecodedForm {
            content_type,
            fields,
        },
    )
}

async fn multipart(headers: HeaderMap, mut multipart: Multipart) -> Response {
    let mut fields = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return respond_with_envelope(e.status().as_u16(), e.body_text(), (), 0),
        };
        let name = field.name().unwrap_or_default().to_string();
        match field.text().await {
            Ok(value) => fields.push((name, value)),
            Err(e) => return respond_with_envelope(e.status().as_u16(), e.body_text(), (), 0),
        }
    }
    respond_raw(
        200,
        &DecodedForm {
            content_type: content_type(&headers),
            fields,
        },
    )
}

/// Wraps the posted JSON in a successful envelope.
async fn envelope(Json(data): Json<serde_json::Value>) -> Response {
    let count = data.as_array().map(|items| items.len() as i64);
    let mut envelope = Envelope::new(200, "ok", data).with_success(true);
    envelope.count = count;
    envelope.respond()
}

async fn status(Path(code): Path<u16>) -> Response {
    let reason = StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default();
    respond_with_envelope(code, reason.to_lowercase(), (), 0)
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
