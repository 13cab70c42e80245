//! Wire types shared by the intake front ends and the relay server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validated submission sent once to the relay endpoint.
///
/// `data` keeps insertion order, which is the schema order of the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl ServiceRequest {
    /// Value submitted under `label`, if present.
    #[must_use]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.data.get(label).and_then(Value::as_str)
    }
}

/// Body of every relay response, success or failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayReply {
    /// Bare acknowledgement: `{ "ok": true }`.
    #[must_use]
    pub fn ok() -> Self {
        Self { ok: true, ..Self::default() }
    }

    /// Acknowledgement with an informational message.
    #[must_use]
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self { ok: true, message: Some(message.into()), error: None }
    }

    /// Failure reply: `{ "error": "..." }`.
    #[must_use]
    pub fn error(error: impl Into<String>) -> Self {
        Self { ok: false, message: None, error: Some(error.into()) }
    }
}

/// Failure of a single relay attempt as seen by the intake side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The request never produced an HTTP response.
    #[error("relay transport failed: {0}")]
    Transport(String),
    /// The relay answered with a non-success status.
    #[error("relay returned status {status}")]
    Status { status: u16, error: Option<String> },
}

/// Carries one [`ServiceRequest`] to the relay endpoint.
///
/// Front ends provide the HTTP implementation; tests provide mocks.
#[async_trait::async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, request: &ServiceRequest) -> Result<RelayReply, RelayError>;
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
