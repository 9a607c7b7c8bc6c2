//! Plain-data building blocks for JSON HTTP services and clients.
//!
//! # Overview
//! Defines the response envelope, the form field set, the URL-encoded and
//! multipart body encoders, and the `build_*` functions that turn a payload
//! into an `HttpRequest` descriptor (host-does-IO pattern). Nothing in this
//! crate performs I/O.
//!
//! # Design
//! - Request construction is split from execution so encoders stay
//!   deterministic and testable without a server.
//! - Payloads opt into form encoding through `ToFormFields`; `SerdeForm`
//!   covers any `Serialize` struct.
//! - Serialization failures are returned, never swallowed.

pub mod envelope;
pub mod error;
pub mod form;
pub mod http;
pub mod multipart;
pub mod request;

pub use envelope::Envelope;
pub use error::EncodeError;
pub use form::{FormFields, SerdeForm, ToFormFields};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use multipart::MultipartForm;
pub use request::{
    build_get, build_post_form, build_post_json, build_post_multipart, build_post_multipart_with,
    build_request,
};
