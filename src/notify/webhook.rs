//! Webhook push channel
//!
//! Sends the run report as a JSON POST, the shape most push relays
//! (WeChat/QQ bridges) accept: a short title naming the account and job
//! kind, the rendered report as the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Notifier, NotifyError};
use crate::config::PushConfig;
use crate::models::JobKind;

#[derive(Serialize)]
struct PushPayload<'a> {
    title: String,
    content: &'a str,
}

/// Report delivery via HTTP POST
#[derive(Debug)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Create a webhook notifier from the `[push]` configuration section
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Config` when no URL is configured or the URL
    /// has no http/https scheme.
    pub fn new(config: &PushConfig) -> Result<Self, NotifyError> {
        let url = config
            .webhook_url
            .clone()
            .ok_or_else(|| NotifyError::Config("webhook_url is not set".to_string()))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NotifyError::Config(
                "webhook_url must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, account: &str, kind: JobKind, text: &str) -> Result<(), NotifyError> {
        let payload = PushPayload {
            title: format!("{account} {kind}"),
            content: text,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_rejected() {
        let config = PushConfig::default();
        let err = WebhookNotifier::new(&config).unwrap_err();
        assert!(matches!(err, NotifyError::Config(_)));
    }

    #[test]
    fn test_schemeless_url_is_rejected() {
        let config = PushConfig {
            webhook_url: Some("hooks.example.com/push".to_string()),
            ..PushConfig::default()
        };
        assert!(WebhookNotifier::new(&config).is_err());
    }

    #[test]
    fn test_valid_url_is_accepted() {
        let config = PushConfig {
            webhook_url: Some("https://hooks.example.com/push".to_string()),
            ..PushConfig::default()
        };
        assert!(WebhookNotifier::new(&config).is_ok());
    }
}
