//! This module defines all of the ports the asset pipelines require and the services they expose

use crate::domain::models::{
    AssetKey, AssetRecord, BatchReport, CatalogChange, DeadLetter, MetadataEditMessage,
    MetadataField, NotificationReport, OutboundEmail, QueueMessage, StoreError,
};

/// Durable key-value storage of [AssetRecord]s keyed by [AssetKey].
/// Every operation must be idempotent and atomic per key.
pub trait CatalogStore: Send + Sync + 'static {
    /// create the record or replace it entirely
    fn put(&self, record: AssetRecord) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// remove the record, removing a missing key succeeds
    fn delete(&self, key: AssetKey) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// set exactly one field, creating a record holding only that field when the key is absent
    fn merge_update(
        &self,
        key: AssetKey,
        field: MetadataField,
        value: String,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// read a record
    fn get(
        &self,
        key: AssetKey,
    ) -> impl Future<Output = Result<Option<AssetRecord>, StoreError>> + Send;
}

/// The outbound email dispatch service
pub trait Notifier: Send + Sync + 'static {
    fn send(&self, email: OutboundEmail) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// The dead-letter path for terminal records.
/// Each terminal record is forwarded on its own so its siblings are never reported with it.
pub trait DeadLetterSink: Send + Sync + 'static {
    fn forward(&self, dead_letter: DeadLetter) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Applies storage notifications taken off the processing queue
pub trait IngestionService: Send + Sync + 'static {
    /// process every message of the batch, never failing as a whole
    fn ingest(&self, messages: Vec<QueueMessage>) -> impl Future<Output = BatchReport> + Send;
}

/// Applies metadata edits delivered through the topic
pub trait MetadataUpdateService: Send + Sync + 'static {
    fn apply_edits(
        &self,
        messages: Vec<MetadataEditMessage>,
    ) -> impl Future<Output = BatchReport> + Send;
}

/// Sends a best-effort rejection for every asset found in dead-lettered messages
pub trait DeadLetterReconciler: Send + Sync + 'static {
    fn reconcile(
        &self,
        messages: Vec<QueueMessage>,
    ) -> impl Future<Output = NotificationReport> + Send;
}

/// Confirms newly catalogued assets
pub trait ConfirmationService: Send + Sync + 'static {
    fn confirm(
        &self,
        changes: Vec<CatalogChange>,
    ) -> impl Future<Output = NotificationReport> + Send;
}
