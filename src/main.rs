mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{RelayConfig, ServerConfig};
use crate::services::mailer::{Mailer, SmtpMailer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server = ServerConfig::from_env().expect("invalid server configuration");
    let relay = RelayConfig::from_env();
    let mailer = build_mailer(&relay);
    tracing::info!(email_enabled = relay.email_enabled, to = ?relay.default_to, "relay configured");

    let state = state::AppState::new(relay, mailer);
    let app = routes::app(state, server.website_dir.clone());

    let listener = tokio::net::TcpListener::bind(server.bind_addr())
        .await
        .expect("failed to bind");

    tracing::info!(port = server.port, "kimtas relay listening");
    axum::serve(listener, app).await.expect("server failed");
}

/// Non-fatal: without a mailer, enabled delivery answers 500 per request.
fn build_mailer(relay: &RelayConfig) -> Option<Arc<dyn Mailer>> {
    if !relay.email_enabled {
        tracing::info!("EMAIL_ENABLED is off, requests will be logged only");
        return None;
    }
    match SmtpMailer::from_settings(&relay.smtp) {
        Ok(mailer) => {
            tracing::info!(host = %relay.smtp.host, port = relay.smtp.port, "SMTP mailer initialized");
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::warn!(error = %e, "SMTP mailer not configured, delivery will fail");
            None
        }
    }
}
