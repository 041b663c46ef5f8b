use std::collections::BTreeMap;

use aws_lambda_events::event::s3::S3EventRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AssetKey, EnvelopeError};

/// Message attribute carrying the name of the edited metadata field.
/// Subscriptions filter on it, so it has to be set by every producer of metadata edits.
pub const METADATA_TYPE_ATTRIBUTE: &str = "metadata_type";

/// A single message taken off a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub message_id: String,
    pub body: Option<String>,
}

impl QueueMessage {
    pub fn new(message_id: impl Into<String>, body: impl Into<String>) -> Self {
        QueueMessage {
            message_id: message_id.into(),
            body: Some(body.into()),
        }
    }
}

/// A message as it was published to a topic
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicMessage {
    pub body: String,
    pub attributes: BTreeMap<String, String>,
}

impl TopicMessage {
    pub fn new(body: impl Into<String>) -> Self {
        TopicMessage {
            body: body.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The field name used to route a metadata edit. The message attribute wins, the `field`
    /// member of the body is only consulted when the attribute is absent.
    pub fn metadata_type(&self) -> Option<String> {
        if let Some(attribute) = self.attributes.get(METADATA_TYPE_ATTRIBUTE) {
            return Some(attribute.clone());
        }

        serde_json::from_str::<MetadataEditBody>(&self.body)
            .ok()
            .and_then(|body| body.field)
    }
}

/// A metadata edit delivered through the topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEditMessage {
    pub message_id: String,
    pub message: TopicMessage,
}

/// Body of a metadata edit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataEditBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Extracts the storage notification records from a queue or topic body.
///
/// The body is either the storage notification itself or a topic notification whose
/// `Message` member carries it as a json string. A notification without a `Records` member,
/// such as the storage test event, yields no records.
pub fn storage_records(body: &str) -> Result<Vec<Value>, EnvelopeError> {
    let mut value: Value = serde_json::from_str(body)?;

    if let Some(message) = value.get("Message") {
        let message = message.as_str().ok_or(EnvelopeError::TopicMessage)?;
        value = serde_json::from_str(message)?;
    }

    match value.get_mut("Records").map(Value::take) {
        Some(Value::Array(records)) => Ok(records),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => Err(EnvelopeError::NotARecordList),
    }
}

/// The parts of a storage notification record the pipeline cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRecord {
    pub event_name: String,
    pub bucket: String,
    /// the key exactly as delivered, still percent encoded
    pub raw_key: String,
}

impl StorageRecord {
    /// Reads a storage notification record, every member the pipeline relies on has to be set
    pub fn parse(record: &Value) -> Result<Self, EnvelopeError> {
        let S3EventRecord { event_name, s3, .. } =
            S3EventRecord::deserialize(record).map_err(EnvelopeError::StorageRecord)?;

        Ok(StorageRecord {
            event_name: event_name.ok_or(EnvelopeError::MissingStorageField("eventName"))?,
            bucket: s3
                .bucket
                .name
                .ok_or(EnvelopeError::MissingStorageField("s3.bucket.name"))?,
            raw_key: s3
                .object
                .key
                .ok_or(EnvelopeError::MissingStorageField("s3.object.key"))?,
        })
    }
}

/// A terminal record forwarded to the dead-letter queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub asset_key: AssetKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    pub reason: String,
    pub source_message_id: String,
}
