use thiserror::Error;

use super::AssetKey;

/// A message or record that could not be parsed. Redelivering it will not help.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("message has no body")]
    MissingBody,
    #[error("body is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Message member is not a json string")]
    TopicMessage,
    #[error("Records member is not an array")]
    NotARecordList,
    #[error("malformed storage record: {0}")]
    StorageRecord(serde_json::Error),
    #[error("storage record has no {0}")]
    MissingStorageField(&'static str),
    #[error("malformed metadata edit: {0}")]
    MetadataEdit(serde_json::Error),
}

/// A record that parsed but describes something the catalog does not accept
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{key} has no file extension")]
    MissingExtension { key: AssetKey },
    #[error("{key} has unsupported extension .{extension}")]
    UnsupportedExtension { key: AssetKey, extension: String },
    #[error("{0} is missing or empty")]
    MissingField(&'static str),
}

/// A failed catalog store call
#[derive(Debug, Error)]
pub enum StoreError {
    /// connectivity, throttling or timeouts; the same call may succeed later
    #[error("transient store failure: {0:#}")]
    Transient(anyhow::Error),
    /// the store refused the call, retrying it unchanged will fail again
    #[error("store rejected the request: {0:#}")]
    Rejected(anyhow::Error),
}

/// How the pipelines react to a [RecordFailure]
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureClass {
    /// drop the record, log it and move on
    Skip,
    /// route the record to the dead-letter path
    Terminal,
    /// have the invoker redeliver the message
    Retryable,
}

/// Everything that can go wrong with a single record
#[derive(Debug, Error)]
pub enum RecordFailure {
    #[error(transparent)]
    Malformed(#[from] EnvelopeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RecordFailure {
    pub fn class(&self) -> FailureClass {
        match self {
            RecordFailure::Malformed(_) => FailureClass::Skip,
            RecordFailure::Validation(_) => FailureClass::Terminal,
            RecordFailure::Store(StoreError::Rejected(_)) => FailureClass::Terminal,
            RecordFailure::Store(StoreError::Transient(_)) => FailureClass::Retryable,
        }
    }
}
