//! The uniform JSON response envelope.
//!
//! # Design
//! `success` and `count` are `Option`s so "not set" is distinct from
//! `false` / `0`; unset fields are left out of the JSON entirely instead of
//! being written as `null`. `data` is always written, so a missing payload
//! shows up as `"data":null`.

use serde::{Deserialize, Serialize};

/// `{ "success"?: bool, "code": int, "message": string, "count"?: int, "data": any }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    pub data: T,
}

impl<T> Envelope<T> {
    /// An envelope with neither `success` nor `count` set.
    pub fn new(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            success: None,
            code,
            message: message.into(),
            count: None,
            data,
        }
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }
}
