//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the relay configuration read at startup and the mailer, which is
//! only built when delivery is enabled and credentials are present. Nothing
//! in here changes after startup.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::mailer::Mailer;

/// Clone is required by Axum; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayConfig>,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    #[must_use]
    pub fn new(relay: RelayConfig, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self { relay: Arc::new(relay), mailer }
    }

    /// Borrowed mailer for a single request.
    #[must_use]
    pub fn mailer(&self) -> Option<&dyn Mailer> {
        self.mailer.as_deref()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::services::mailer::{Email, MailError};

    /// Records every email; fails with `Smtp(reason)` when `fail_with` is set.
    #[derive(Default)]
    pub struct MockMailer {
        pub sent: Mutex<Vec<Email>>,
        pub fail_with: Option<String>,
    }

    impl MockMailer {
        #[must_use]
        pub fn failing(reason: &str) -> Self {
            Self { sent: Mutex::new(Vec::new()), fail_with: Some(reason.to_owned()) }
        }

        pub fn sent(&self) -> Vec<Email> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &Email) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            match &self.fail_with {
                Some(reason) => Err(MailError::Smtp(reason.clone())),
                None => Ok(()),
            }
        }
    }

    /// Delivery enabled with a default inbox.
    #[must_use]
    pub fn enabled_config() -> RelayConfig {
        RelayConfig {
            email_enabled: true,
            default_to: Some("teklif@example.com".into()),
            ..RelayConfig::default()
        }
    }

    /// State wired to `mailer`; the caller keeps its own `Arc` to inspect it.
    #[must_use]
    pub fn test_app_state(relay: RelayConfig, mailer: Option<Arc<MockMailer>>) -> AppState {
        AppState::new(relay, mailer.map(|m| m as Arc<dyn Mailer>))
    }
}
