use asset_catalog::{
    domain::ports::IngestionService,
    inbound::lambda::{batch_response, queue_messages},
};
use aws_lambda_events::event::sqs::{SqsBatchResponse, SqsEvent};
use lambda_runtime::{Error, LambdaEvent, tracing};

/// Applies a batch of storage notifications, reporting the messages that have to come back
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<T: IngestionService>(
    service: &T,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error> {
    let messages = queue_messages(event.payload);
    tracing::trace!(count = messages.len(), "processing messages");

    let report = service.ingest(messages).await;
    let response = batch_response(&report);

    tracing::info!(
        applied = report.applied().count(),
        rejected = report.rejected().count(),
        skipped = report.skipped(),
        redelivered = response.batch_item_failures.len(),
        "batch processed"
    );

    Ok(response)
}
