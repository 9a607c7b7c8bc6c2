//! `multipart/form-data` body encoding for plain text fields.
//!
//! Only text fields are written; there are no file parts. Each field becomes
//! one part carrying a single `Content-Disposition` header.

use uuid::Uuid;

use crate::error::EncodeError;
use crate::form::FormFields;

/// A `multipart/form-data` body under construction.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Start a form with a random boundary.
    pub fn new() -> Self {
        Self {
            boundary: Uuid::new_v4().simple().to_string(),
            body: Vec::new(),
        }
    }

    /// Start a form with a caller-chosen boundary.
    ///
    /// The boundary must be 1 to 70 characters from the RFC 2046 set and
    /// must not end with a space.
    pub fn with_boundary(boundary: &str) -> Result<Self, EncodeError> {
        let valid = (1..=70).contains(&boundary.len())
            && !boundary.ends_with(' ')
            && boundary.bytes().all(is_boundary_byte);
        if !valid {
            return Err(EncodeError::Form(format!(
                "invalid multipart boundary {boundary:?}"
            )));
        }
        Ok(Self {
            boundary: boundary.to_string(),
            body: Vec::new(),
        })
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `multipart/form-data; boundary=...`, quoting the boundary when needed.
    pub fn content_type(&self) -> String {
        if self.boundary.bytes().any(|b| b"()<>@,;:\\\"/[]?= ".contains(&b)) {
            format!("multipart/form-data; boundary=\"{}\"", self.boundary)
        } else {
            format!("multipart/form-data; boundary={}", self.boundary)
        }
    }

    pub fn write_field(&mut self, name: &str, value: &str) {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                escape_quotes(name)
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    pub fn write_fields(&mut self, fields: &FormFields) {
        for (name, value) in fields.iter() {
            self.write_field(name, value);
        }
    }

    /// Write the closing delimiter and return the body bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.body.extend_from_slice(b"--");
        self.body.extend_from_slice(self.boundary.as_bytes());
        self.body.extend_from_slice(b"--\r\n");
        self.body
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn is_boundary_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"'()+_,-./:=? ".contains(&b)
}

fn escape_quotes(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
