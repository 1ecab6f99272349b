use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;

use super::AlertTopic;
use crate::error::NotifyError;

/// [`AlertTopic`] publishing to an SNS topic.
#[derive(Debug, Clone)]
pub struct SnsTopic {
    client: Client,
    topic_arn: String,
}

impl SnsTopic {
    pub fn new(sdk_config: &SdkConfig, topic_arn: &str) -> Self {
        Self {
            client: Client::new(sdk_config),
            topic_arn: topic_arn.to_string(),
        }
    }
}

#[async_trait]
impl AlertTopic for SnsTopic {
    async fn publish(&self, message: &str) -> Result<(), NotifyError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| NotifyError::Publish(DisplayErrorContext(e).to_string()))?;

        tracing::debug!(
            topic_arn = %self.topic_arn,
            message_id = output.message_id().unwrap_or_default(),
            "Published alert"
        );
        Ok(())
    }
}
