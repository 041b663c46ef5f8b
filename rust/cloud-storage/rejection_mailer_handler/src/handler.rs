use asset_catalog::{domain::ports::DeadLetterReconciler, inbound::lambda::queue_messages};
use aws_lambda_events::event::sqs::{SqsBatchResponse, SqsEvent};
use lambda_runtime::{Error, LambdaEvent, tracing};

/// Notifies about every asset found on the dead-letter queue.
/// Reconciliation is best effort, every message is acknowledged even when its email failed.
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<T: DeadLetterReconciler>(
    service: &T,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error> {
    let messages = queue_messages(event.payload);
    let report = service.reconcile(messages).await;

    tracing::info!(
        sent = report.sent,
        skipped = report.skipped,
        failed = report.failed,
        "dead letters processed"
    );

    Ok(SqsBatchResponse::default())
}
