//! Outbound notification side channel (email-equivalent).

use crate::error::NotificationError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, instrument};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Writes notifications to the log. Used when no relay is configured.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(to = %notification.to, subject = %notification.subject, "Notification (log only)");
        Ok(())
    }
}

/// Posts notifications as JSON to a mail relay webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    #[instrument(skip(self, notification), fields(to = %notification.to))]
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let response = self.client.post(&self.url).json(notification).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected(status.as_u16()));
        }
        info!("Notification delivered");
        Ok(())
    }
}
