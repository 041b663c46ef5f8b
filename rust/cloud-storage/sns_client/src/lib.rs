mod metadata_edit;

use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_sns::types::MessageAttributeValue;

pub use metadata_edit::{MetadataEditPublish, build_metadata_edit};

#[derive(Clone, Debug)]
pub struct SNS {
    inner: aws_sdk_sns::Client,
}

impl SNS {
    pub fn new(inner: aws_sdk_sns::Client) -> Self {
        Self { inner }
    }

    /// Publishes a message with string attributes and returns its message id
    #[tracing::instrument(skip(self, message))]
    pub async fn publish(
        &self,
        topic_arn: &str,
        message: &str,
        attributes: HashMap<String, String>,
    ) -> anyhow::Result<String> {
        let attributes = attributes
            .into_iter()
            .map(|(name, value)| {
                let value = MessageAttributeValue::builder()
                    .data_type("String")
                    .string_value(value)
                    .build()
                    .context("building message attribute")?;
                Ok((name, value))
            })
            .collect::<anyhow::Result<HashMap<_, _>>>()?;

        let output = self
            .inner
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .set_message_attributes(Some(attributes).filter(|a| !a.is_empty()))
            .send()
            .await
            .context("failed to publish message")?;

        Ok(output.message_id.unwrap_or_default())
    }

    /// Publishes a metadata edit. Fields outside the allowlist are refused before anything is
    /// sent, so they never reach the topic.
    #[tracing::instrument(skip(self, value))]
    pub async fn publish_metadata_edit(
        &self,
        topic_arn: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> anyhow::Result<String> {
        let edit = build_metadata_edit(id, field, value)?;
        self.publish(topic_arn, &edit.body, edit.attributes()).await
    }
}
