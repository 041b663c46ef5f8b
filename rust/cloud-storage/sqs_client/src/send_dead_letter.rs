use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_sqs::types::MessageAttributeValue;

use crate::REASON_ATTRIBUTE;

// attribute values must be non empty
const UNKNOWN_REASON: &str = "unknown";

fn reason_attribute(reason: &str) -> anyhow::Result<MessageAttributeValue> {
    let reason = if reason.is_empty() {
        UNKNOWN_REASON
    } else {
        reason
    };

    MessageAttributeValue::builder()
        .data_type("String")
        .string_value(reason)
        .build()
        .context("building reason attribute")
}

#[tracing::instrument(skip(sqs_client, body))]
pub(crate) async fn send_dead_letter(
    sqs_client: &aws_sdk_sqs::Client,
    queue_url: &str,
    body: &str,
    reason: &str,
) -> anyhow::Result<String> {
    let message_attributes =
        HashMap::from([(REASON_ATTRIBUTE.to_string(), reason_attribute(reason)?)]);

    let output = sqs_client
        .send_message()
        .queue_url(queue_url)
        .message_body(body)
        .set_message_attributes(Some(message_attributes))
        .send()
        .await
        .context("failed to send message to dead letter queue")?;

    Ok(output.message_id.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carry_the_reason_as_a_string_attribute() {
        let attr = reason_attribute("unsupported file extension").unwrap();
        assert_eq!(attr.data_type(), "String");
        assert_eq!(attr.string_value(), Some("unsupported file extension"));
    }

    #[test]
    fn test_fill_in_an_empty_reason() {
        let attr = reason_attribute("").unwrap();
        assert_eq!(attr.string_value(), Some(UNKNOWN_REASON));
    }
}
