mod asset;
mod envelope;
mod error;
mod event;
mod notification;
mod outcome;

pub use asset::{AssetKey, AssetKind, AssetRecord, MetadataField};
pub use envelope::{
    DeadLetter, METADATA_TYPE_ATTRIBUTE, MetadataEditBody, MetadataEditMessage, QueueMessage,
    StorageRecord, TopicMessage, storage_records,
};
pub use error::{EnvelopeError, FailureClass, RecordFailure, StoreError, ValidationError};
pub use event::{
    AssetEvent, EventKind, MetadataEdit, MetadataEditRequest, RawRecord, classify,
};
pub use notification::{
    CONFIRMATION_SUBJECT, CatalogChange, ChangeKind, EXHAUSTED_REASON,
    NotificationReport, OutboundEmail, REJECTION_SUBJECT,
};
pub use outcome::{BatchReport, Disposition, MessageReport, Mutation, RecordOutcome};
