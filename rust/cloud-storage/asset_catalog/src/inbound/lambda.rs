use aws_lambda_events::event::{
    dynamodb::{Event, EventRecord},
    sns::{SnsEvent, SnsRecord},
    sqs::{BatchItemFailure, SqsBatchResponse, SqsEvent, SqsMessage},
};

use crate::domain::models::{
    AssetRecord, BatchReport, CatalogChange, MetadataEditMessage, QueueMessage, TopicMessage,
};

impl From<SqsMessage> for QueueMessage {
    fn from(message: SqsMessage) -> Self {
        QueueMessage {
            message_id: message.message_id.unwrap_or_default(),
            body: message.body,
        }
    }
}

pub fn queue_messages(event: SqsEvent) -> Vec<QueueMessage> {
    event.records.into_iter().map(QueueMessage::from).collect()
}

/// Reports every redelivered message as a batch item failure, acknowledging the rest
pub fn batch_response(report: &BatchReport) -> SqsBatchResponse {
    let mut response = SqsBatchResponse::default();
    response.batch_item_failures = report
        .redeliver_ids()
        .into_iter()
        .map(|message_id| {
            let mut failure = BatchItemFailure::default();
            failure.item_identifier = message_id.to_string();
            failure
        })
        .collect();
    response
}

impl From<SnsRecord> for MetadataEditMessage {
    fn from(record: SnsRecord) -> Self {
        let attributes = record
            .sns
            .message_attributes
            .into_iter()
            .map(|(name, attribute)| (name, attribute.value))
            .collect();

        MetadataEditMessage {
            message_id: record.sns.message_id,
            message: TopicMessage {
                body: record.sns.message,
                attributes,
            },
        }
    }
}

pub fn metadata_edit_messages(event: SnsEvent) -> Vec<MetadataEditMessage> {
    event
        .records
        .into_iter()
        .map(MetadataEditMessage::from)
        .collect()
}

impl From<EventRecord> for CatalogChange {
    fn from(record: EventRecord) -> Self {
        let image: Result<AssetRecord, _> = serde_dynamo::from_item(record.change.new_image);
        let key = image
            .map(|image| image.key)
            .inspect_err(|e| tracing::debug!(error = %e, "stream record has no readable image"))
            .ok();

        CatalogChange {
            kind: record.event_name.parse().ok(),
            key,
        }
    }
}

/// Reads the change stream of the catalog table
pub fn catalog_changes(event: Event) -> Vec<CatalogChange> {
    event.records.into_iter().map(CatalogChange::from).collect()
}
