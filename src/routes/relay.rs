//! HTTP surface of the service-request relay.
//!
//! The body is taken as raw bytes so malformed JSON gets the same 400 as a
//! missing field instead of axum's extractor rejection.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use intake::RelayReply;

use crate::services::relay::{self, Outcome, RelayError};
use crate::state::AppState;

pub const DISABLED_MESSAGE: &str = "Email disabled, request logged only.";
pub const MISSING_INPUT: &str = "Missing serviceName or data";
pub const NO_DESTINATION: &str = "EMAIL_TO env variable is not set on the server.";
pub const DELIVERY_FAILED: &str = "Failed to send email";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// `POST /api/send-service-request`
pub async fn send_service_request(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match relay::parse_request(&body) {
        Ok(request) => relay::relay(&state.relay, state.mailer(), &request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(Outcome::LoggedOnly) => Json(RelayReply::ok_with_message(DISABLED_MESSAGE)).into_response(),
        Ok(Outcome::Sent) => Json(RelayReply::ok()).into_response(),
        Err(e) => {
            if let RelayError::Delivery(cause) = &e {
                tracing::error!(error = %cause, "service request delivery failed");
            } else {
                tracing::warn!(error = %e, "service request rejected");
            }
            let (status, message) = relay_error_to_response(&e);
            (status, Json(RelayReply::error(message))).into_response()
        }
    }
}

/// Any other method on the relay path.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, Json(RelayReply::error(METHOD_NOT_ALLOWED))).into_response()
}

/// Status and public message; delivery detail never leaves the server.
pub(crate) fn relay_error_to_response(err: &RelayError) -> (StatusCode, &'static str) {
    match err {
        RelayError::MissingInput => (StatusCode::BAD_REQUEST, MISSING_INPUT),
        RelayError::NoDestination => (StatusCode::INTERNAL_SERVER_ERROR, NO_DESTINATION),
        RelayError::Delivery(_) => (StatusCode::INTERNAL_SERVER_ERROR, DELIVERY_FAILED),
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
