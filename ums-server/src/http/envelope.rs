//! Response wrapper for mutating endpoints
//!
//! `POST`, `PUT` and `DELETE` answer with `{success, message, data?, error?}`.
//! Reads return bare users; the frontend relies on both shapes.

use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Option<User>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}
