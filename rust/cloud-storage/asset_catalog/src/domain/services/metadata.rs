use strum::IntoEnumIterator;

use crate::domain::{
    models::{
        AssetEvent, BatchReport, MessageReport, MetadataEditMessage, MetadataField, Mutation,
        RawRecord, RecordOutcome, StoreError, classify,
    },
    ports::{CatalogStore, MetadataUpdateService},
    routing::FilterPredicate,
};

/// concrete struct which implements [MetadataUpdateService]
#[derive(Clone)]
pub struct MetadataUpdateServiceImpl<S> {
    store: S,
    allowed: FilterPredicate,
}

impl<S> MetadataUpdateServiceImpl<S>
where
    S: CatalogStore,
{
    pub fn new(store: S) -> Self {
        MetadataUpdateServiceImpl {
            store,
            allowed: FilterPredicate::metadata_fields(MetadataField::iter()),
        }
    }

    #[tracing::instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn apply_edit(&self, message: MetadataEditMessage) -> MessageReport {
        let outcome = self.edit_outcome(&message).await;
        MessageReport::from_records(message.message_id, vec![outcome])
    }

    async fn edit_outcome(&self, message: &MetadataEditMessage) -> RecordOutcome {
        // subscriptions already filter on the field, this catches misconfigured ones
        if !self.allowed.matches(&message.message) {
            tracing::warn!(
                metadata_type = ?message.message.metadata_type(),
                "skipping edit of a field that is not allowed"
            );
            return RecordOutcome::Skipped("metadata field not allowed".to_string());
        }

        let request = match classify(RawRecord::MetadataEdit(&message.message)) {
            Ok(AssetEvent::MetadataUpdate(request)) => request,
            Ok(AssetEvent::Unrecognized(description)) => {
                tracing::info!(%description, "skipping unrecognized edit");
                return RecordOutcome::Skipped(description);
            }
            Ok(event) => {
                tracing::warn!(?event, "storage event arrived on the metadata channel");
                return RecordOutcome::Skipped("storage event on metadata channel".to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed edit");
                return RecordOutcome::Skipped(e.to_string());
            }
        };

        let edit = match request.validate() {
            Ok(edit) => edit,
            Err(e) => {
                tracing::warn!(error = %e, "skipping incomplete edit");
                return RecordOutcome::Skipped(e.to_string());
            }
        };

        match self
            .store
            .merge_update(edit.key.clone(), edit.field, edit.value)
            .await
        {
            Ok(()) => {
                tracing::info!(key = %edit.key, field = %edit.field, "merged");
                RecordOutcome::Applied(Mutation::Merge {
                    key: edit.key,
                    field: edit.field,
                })
            }
            Err(e @ StoreError::Transient(_)) => {
                tracing::warn!(key = %edit.key, error = %e, "edit will be retried");
                RecordOutcome::Retry(e.to_string())
            }
            Err(e @ StoreError::Rejected(_)) => {
                tracing::error!(key = %edit.key, error = %e, "store rejected edit");
                RecordOutcome::Skipped(e.to_string())
            }
        }
    }
}

impl<S> MetadataUpdateService for MetadataUpdateServiceImpl<S>
where
    S: CatalogStore,
{
    #[tracing::instrument(skip(self, messages), fields(batch_size = messages.len()))]
    async fn apply_edits(&self, messages: Vec<MetadataEditMessage>) -> BatchReport {
        let mut report = BatchReport::default();
        for message in messages {
            report.messages.push(self.apply_edit(message).await);
        }
        report
    }
}
