//! Service-request relay: validate the payload, then log or mail it.
//!
//! DESIGN
//! ======
//! Each request runs straight through
//! `received → validated → {logged-only | resolve destination → send}`.
//! There are no retries and nothing is kept between requests. Delivery
//! being switched off wins over every later check, so a server without a
//! destination or credentials still acknowledges requests while disabled.
//!
//! ERROR HANDLING
//! ==============
//! Errors carry internal detail for the logs. The route layer decides what
//! the client sees.

use intake::ServiceRequest;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::RelayConfig;
use crate::services::mailer::{Email, MailError, Mailer};

/// Display name on every outgoing notification.
pub const FROM_NAME: &str = "KİMTAŞSİGORTA Form";
const SUBJECT_PREFIX: &str = "Yeni teklif talebi - ";
const EMPTY_VALUE: &str = "-";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("missing serviceName or data")]
    MissingInput,
    #[error("no destination address configured")]
    NoDestination,
    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
}

/// What happened to an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Delivery is switched off; the request was only logged.
    LoggedOnly,
    Sent,
}

/// Lenient view of the incoming body; every field may be absent or mistyped.
#[derive(Debug, Default, Deserialize)]
struct RawRequest {
    #[serde(rename = "serviceName", default)]
    service_name: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    to: Option<Value>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a request body into a [`ServiceRequest`].
///
/// # Errors
///
/// Returns [`RelayError::MissingInput`] for unparseable JSON, a missing or
/// blank `serviceName`, or a `data` that is not a non-empty object.
pub fn parse_request(body: &[u8]) -> Result<ServiceRequest, RelayError> {
    let raw: RawRequest = serde_json::from_slice(body).map_err(|_| RelayError::MissingInput)?;

    let service_name = match raw.service_name {
        Some(Value::String(name)) if !name.trim().is_empty() => name,
        _ => return Err(RelayError::MissingInput),
    };
    let data = match raw.data {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(RelayError::MissingInput),
    };
    let to = match raw.to {
        Some(Value::String(to)) => Some(to.trim().to_owned()).filter(|t| !t.is_empty()),
        _ => None,
    };

    Ok(ServiceRequest { service_name, data, to })
}

// =============================================================================
// RELAY
// =============================================================================

/// Request override first, then the configured default inbox.
#[must_use]
pub fn resolve_destination<'a>(request: &'a ServiceRequest, config: &'a RelayConfig) -> Option<&'a str> {
    request.to.as_deref().or(config.default_to.as_deref())
}

/// Log or deliver one validated request.
///
/// # Errors
///
/// - [`RelayError::NoDestination`] when delivery is on but no inbox is known.
/// - [`RelayError::Delivery`] when no mailer is configured or the provider fails.
pub async fn relay(
    config: &RelayConfig,
    mailer: Option<&dyn Mailer>,
    request: &ServiceRequest,
) -> Result<Outcome, RelayError> {
    let destination = resolve_destination(request, config);

    if !config.email_enabled {
        tracing::info!(
            service = %request.service_name,
            to = ?destination,
            data = %serde_json::Value::Object(request.data.clone()),
            "email disabled, service request logged only"
        );
        return Ok(Outcome::LoggedOnly);
    }

    let to = destination.ok_or(RelayError::NoDestination)?;
    let mailer = mailer.ok_or(MailError::MissingCredentials)?;

    let email = Email {
        from_name: FROM_NAME.to_owned(),
        to: to.to_owned(),
        subject: subject(&request.service_name),
        text: render_body(&request.data),
    };
    mailer.send(&email).await?;

    tracing::info!(service = %request.service_name, %to, "service request mailed");
    Ok(Outcome::Sent)
}

#[must_use]
pub fn subject(service_name: &str) -> String {
    format!("{SUBJECT_PREFIX}{service_name}")
}

/// One `label: value` line per entry, in insertion order.
#[must_use]
pub fn render_body(data: &Map<String, Value>) -> String {
    data.iter()
        .map(|(label, value)| format!("{label}: {}", render_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_VALUE.to_owned(),
        Value::String(s) if s.trim().is_empty() => EMPTY_VALUE.to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
