use asset_catalog::{domain::ports::ConfirmationService, inbound::lambda::catalog_changes};
use aws_lambda_events::event::dynamodb::Event;
use lambda_runtime::{Error, LambdaEvent, tracing};

/// Sends a confirmation for every asset inserted into the catalog.
/// Email failures are logged and never fail the invocation.
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<T: ConfirmationService>(
    service: &T,
    event: LambdaEvent<Event>,
) -> Result<(), Error> {
    let changes = catalog_changes(event.payload);
    let report = service.confirm(changes).await;

    tracing::info!(
        sent = report.sent,
        skipped = report.skipped,
        failed = report.failed,
        "stream records processed"
    );

    Ok(())
}
