use serde_json::Value;

use super::{
    AssetKey, EnvelopeError, METADATA_TYPE_ATTRIBUTE, MetadataEditBody, MetadataField,
    StorageRecord, TopicMessage, ValidationError,
};

/// The kind of change a storage notification reports
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Created,
    Removed,
}

impl EventKind {
    /// Maps a storage `eventName` such as `ObjectCreated:Put` onto its kind
    pub fn from_event_name(event_name: &str) -> Option<Self> {
        if event_name.starts_with("ObjectCreated") {
            Some(EventKind::Created)
        } else if event_name.starts_with("ObjectRemoved") {
            Some(EventKind::Removed)
        } else {
            None
        }
    }
}

/// A record as it arrived on one of the two channels, before classification
#[derive(Debug, Clone, Copy)]
pub enum RawRecord<'a> {
    Storage(&'a Value),
    MetadataEdit(&'a TopicMessage),
}

/// The meaning of a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEvent {
    Created { bucket: String, key: AssetKey },
    Removed { bucket: String, key: AssetKey },
    MetadataUpdate(MetadataEditRequest),
    /// anything the pipelines do not act on, with a description for the logs
    Unrecognized(String),
}

/// A metadata edit for a recognized field whose payload has not been checked yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEditRequest {
    pub id: Option<String>,
    pub field: MetadataField,
    pub value: Option<String>,
}

/// A metadata edit that is ready to be merged into the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEdit {
    pub key: AssetKey,
    pub field: MetadataField,
    pub value: String,
}

impl MetadataEditRequest {
    /// Empty strings count as missing
    pub fn validate(self) -> Result<MetadataEdit, ValidationError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingField("id"))?;
        let value = self
            .value
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingField("value"))?;

        Ok(MetadataEdit {
            key: AssetKey::from_canonical(id),
            field: self.field,
            value,
        })
    }
}

/// Decides what a raw record means. Both pipelines dispatch through here.
pub fn classify(raw: RawRecord<'_>) -> Result<AssetEvent, EnvelopeError> {
    match raw {
        RawRecord::Storage(record) => classify_storage(record),
        RawRecord::MetadataEdit(message) => classify_metadata_edit(message),
    }
}

fn classify_storage(record: &Value) -> Result<AssetEvent, EnvelopeError> {
    let record = StorageRecord::parse(record)?;
    let key = AssetKey::from_storage_key(&record.raw_key);

    let event = match EventKind::from_event_name(&record.event_name) {
        Some(EventKind::Created) => AssetEvent::Created {
            bucket: record.bucket,
            key,
        },
        Some(EventKind::Removed) => AssetEvent::Removed {
            bucket: record.bucket,
            key,
        },
        None => AssetEvent::Unrecognized(format!("storage event {}", record.event_name)),
    };

    Ok(event)
}

fn classify_metadata_edit(message: &TopicMessage) -> Result<AssetEvent, EnvelopeError> {
    let body: MetadataEditBody =
        serde_json::from_str(&message.body).map_err(EnvelopeError::MetadataEdit)?;

    let attribute = message.attributes.get(METADATA_TYPE_ATTRIBUTE);
    let name = match (attribute, body.field.as_ref()) {
        (Some(attribute), Some(field)) if attribute != field => {
            return Ok(AssetEvent::Unrecognized(format!(
                "{METADATA_TYPE_ATTRIBUTE} {attribute} disagrees with field {field}"
            )));
        }
        (Some(name), _) | (None, Some(name)) => name,
        (None, None) => {
            return Ok(AssetEvent::Unrecognized(format!(
                "metadata edit without {METADATA_TYPE_ATTRIBUTE}"
            )));
        }
    };

    let Ok(field) = name.parse::<MetadataField>() else {
        return Ok(AssetEvent::Unrecognized(format!("metadata field {name}")));
    };

    Ok(AssetEvent::MetadataUpdate(MetadataEditRequest {
        id: body.id,
        field,
        value: body.value,
    }))
}
