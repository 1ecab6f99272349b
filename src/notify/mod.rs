//! Outcome notifications: plain-text alert topic plus a chat webhook message.

pub mod slack;
pub mod sns;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ChatSettings;
use crate::constants::{COLOR_FAILED, COLOR_OK};
use crate::error::NotifyError;

pub use slack::SlackWebhook;
pub use sns::SnsTopic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Failed,
}

impl Severity {
    pub fn color(self) -> &'static str {
        match self {
            Self::Ok => COLOR_OK,
            Self::Failed => COLOR_FAILED,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Failed => "[FAILED]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatAttachment {
    pub color: String,
    pub text: String,
}

/// Body POSTed to the chat webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPayload {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub attachments: Vec<ChatAttachment>,
}

impl ChatPayload {
    pub fn new(chat: &ChatSettings, severity: Severity, message: &str) -> Self {
        Self {
            channel: chat.channel.clone(),
            username: format!("{} {}", severity.tag(), chat.username),
            icon_emoji: chat.icon_emoji.clone(),
            attachments: vec![ChatAttachment {
                color: severity.color().to_string(),
                text: message.to_string(),
            }],
        }
    }
}

/// Raw webhook reply. Only logged, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: String,
}

/// Pub/sub alert channel.
#[async_trait]
pub trait AlertTopic: Send + Sync {
    async fn publish(&self, message: &str) -> Result<(), NotifyError>;
}

/// Chat integration reached through an incoming webhook.
#[async_trait]
pub trait ChatWebhook: Send + Sync {
    async fn post(&self, payload: &ChatPayload) -> Result<WebhookResponse, NotifyError>;
}

/// Fans a message out to the alert topic and the chat webhook.
pub struct Dispatcher<'a> {
    topic: &'a dyn AlertTopic,
    webhook: &'a dyn ChatWebhook,
    chat: ChatSettings,
}

impl<'a> Dispatcher<'a> {
    pub fn new(topic: &'a dyn AlertTopic, webhook: &'a dyn ChatWebhook, chat: ChatSettings) -> Self {
        Self {
            topic,
            webhook,
            chat,
        }
    }

    /// Publish `message`, then POST its chat rendering. Non-2xx replies are
    /// logged like any other; transport and publish failures are returned.
    pub async fn dispatch(
        &self,
        message: &str,
        severity: Severity,
    ) -> Result<WebhookResponse, NotifyError> {
        self.topic.publish(message).await?;

        let payload = ChatPayload::new(&self.chat, severity, message);
        let response = self.webhook.post(&payload).await?;

        tracing::info!(
            notification = message,
            severity = severity.tag(),
            status_code = response.status_code,
            response = %response.body,
            "Chat notification sent"
        );
        Ok(response)
    }
}
