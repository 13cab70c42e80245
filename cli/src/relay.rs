//! HTTP transport from the intake form to the relay server.

use std::time::Duration;

use async_trait::async_trait;
use intake::{RelayError, RelayReply, RelayTransport, ServiceRequest};

pub const RELAY_PATH: &str = "/api/send-service-request";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpRelay {
    client: reqwest::Client,
    url: String,
}

impl HttpRelay {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url: endpoint_url(base_url, RELAY_PATH) })
    }
}

pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn send(&self, request: &ServiceRequest) -> Result<RelayReply, RelayError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        // Error bodies are best-effort; a proxy may answer with HTML.
        let reply = response.json::<RelayReply>().await.unwrap_or_default();

        if !status.is_success() {
            return Err(RelayError::Status { status: status.as_u16(), error: reply.error });
        }
        Ok(reply)
    }
}
