use serde_json::Value;

use crate::domain::{
    models::{
        AssetEvent, AssetKey, AssetKind, AssetRecord, BatchReport, DeadLetter, Disposition,
        EnvelopeError, FailureClass, MessageReport, Mutation, QueueMessage, RawRecord,
        RecordFailure, RecordOutcome, classify, storage_records,
    },
    ports::{CatalogStore, DeadLetterSink, IngestionService},
};

/// concrete struct which implements [IngestionService]
#[derive(Clone)]
pub struct IngestionServiceImpl<S, D> {
    store: S,
    dead_letters: D,
}

impl<S, D> IngestionServiceImpl<S, D>
where
    S: CatalogStore,
    D: DeadLetterSink,
{
    pub fn new(store: S, dead_letters: D) -> Self {
        IngestionServiceImpl {
            store,
            dead_letters,
        }
    }

    #[tracing::instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn ingest_message(&self, message: QueueMessage) -> MessageReport {
        let QueueMessage { message_id, body } = message;

        let records = match body
            .as_deref()
            .ok_or(EnvelopeError::MissingBody)
            .and_then(storage_records)
        {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed message");
                return MessageReport::acknowledged(
                    message_id,
                    vec![RecordOutcome::Skipped(e.to_string())],
                );
            }
        };

        if records.is_empty() {
            tracing::info!("message carries no storage records");
            return MessageReport::acknowledged(
                message_id,
                vec![RecordOutcome::Skipped("no storage records".to_string())],
            );
        }

        let mut outcomes = Vec::with_capacity(records.len());
        for record in &records {
            outcomes.push(self.ingest_record(&message_id, record).await);
        }

        self.settle(message_id, outcomes).await
    }

    async fn ingest_record(&self, message_id: &str, record: &Value) -> RecordOutcome {
        let event = match classify(RawRecord::Storage(record)) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed record");
                return RecordOutcome::Skipped(e.to_string());
            }
        };

        let (bucket, key, result) = match event {
            AssetEvent::Created { bucket, key } => {
                let result = self.create(&key).await;
                (bucket, key, result)
            }
            AssetEvent::Removed { bucket, key } => {
                let result = self.remove(&key).await;
                (bucket, key, result)
            }
            AssetEvent::Unrecognized(description) => {
                tracing::info!(%description, "skipping unrecognized record");
                return RecordOutcome::Skipped(description);
            }
            AssetEvent::MetadataUpdate(request) => {
                tracing::warn!(?request, "metadata edit arrived on the storage channel");
                return RecordOutcome::Skipped("metadata edit on storage channel".to_string());
            }
        };

        match result {
            Ok(mutation) => {
                tracing::info!(?mutation, "applied");
                RecordOutcome::Applied(mutation)
            }
            Err(failure) => match failure.class() {
                FailureClass::Skip => {
                    tracing::warn!(%key, error = %failure, "skipping record");
                    RecordOutcome::Skipped(failure.to_string())
                }
                FailureClass::Terminal => {
                    tracing::warn!(%key, error = %failure, "rejecting record");
                    RecordOutcome::Rejected(DeadLetter {
                        asset_key: key,
                        bucket: Some(bucket),
                        reason: failure.to_string(),
                        source_message_id: message_id.to_string(),
                    })
                }
                FailureClass::Retryable => {
                    tracing::warn!(%key, error = %failure, "record will be retried");
                    RecordOutcome::Retry(failure.to_string())
                }
            },
        }
    }

    async fn create(&self, key: &AssetKey) -> Result<Mutation, RecordFailure> {
        AssetKind::from_key(key)?;
        self.store.put(AssetRecord::new(key.clone())).await?;
        Ok(Mutation::Put(key.clone()))
    }

    async fn remove(&self, key: &AssetKey) -> Result<Mutation, RecordFailure> {
        self.store.delete(key.clone()).await?;
        Ok(Mutation::Delete(key.clone()))
    }

    /// Derives the disposition of a message from its records.
    /// A retry anywhere means the whole message comes back, so nothing is dead lettered yet.
    async fn settle(&self, message_id: String, records: Vec<RecordOutcome>) -> MessageReport {
        if records.iter().any(RecordOutcome::is_retry) {
            tracing::warn!("message has retryable failures");
            return MessageReport::from_records(message_id, records);
        }

        let mut disposition = Disposition::Acknowledge;
        for outcome in &records {
            let RecordOutcome::Rejected(dead_letter) = outcome else {
                continue;
            };

            if let Err(e) = self.dead_letters.forward(dead_letter.clone()).await {
                tracing::error!(error = ?e, "failed to forward dead letter");
                disposition = Disposition::Redeliver;
                break;
            }
        }

        MessageReport {
            message_id,
            records,
            disposition,
        }
    }
}

impl<S, D> IngestionService for IngestionServiceImpl<S, D>
where
    S: CatalogStore,
    D: DeadLetterSink,
{
    #[tracing::instrument(skip(self, messages), fields(batch_size = messages.len()))]
    async fn ingest(&self, messages: Vec<QueueMessage>) -> BatchReport {
        let mut report = BatchReport::default();
        for message in messages {
            report.messages.push(self.ingest_message(message).await);
        }
        report
    }
}
