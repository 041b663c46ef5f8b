use asset_catalog::{
    domain::ports::MetadataUpdateService, inbound::lambda::metadata_edit_messages,
};
use aws_lambda_events::event::sns::SnsEvent;
use lambda_runtime::{Error, LambdaEvent, tracing};

/// Merges the metadata edits of the event into the catalog.
/// Topic deliveries cannot be acknowledged one by one, so any edit that needs another attempt
/// fails the whole invocation. Edits that were already applied are idempotent.
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<T: MetadataUpdateService>(
    service: &T,
    event: LambdaEvent<SnsEvent>,
) -> Result<(), Error> {
    let messages = metadata_edit_messages(event.payload);
    tracing::trace!(count = messages.len(), "processing edits");

    let report = service.apply_edits(messages).await;
    tracing::info!(
        applied = report.applied().count(),
        skipped = report.skipped(),
        "edits processed"
    );

    let redeliver = report.redeliver_ids();
    if !redeliver.is_empty() {
        tracing::warn!(?redeliver, "edits failed transiently");
        return Err(anyhow::anyhow!("{} metadata edits must be redelivered", redeliver.len()).into());
    }

    Ok(())
}
