#![recursion_limit = "256"]

mod config;
mod handler;

use std::sync::Arc;

use anyhow::Context;
use asset_catalog::domain::services::DeadLetterReconcilerImpl;
use asset_entrypoint::{AssetEntrypoint, AwsSettings};
use aws_lambda_events::event::sqs::SqsEvent;
use config::Config;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use ses_client::SesClient;

#[tokio::main]
async fn main() -> Result<(), Error> {
    AssetEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("failed to read config")?;

    let aws_config = AwsSettings::from_env()
        .context("failed to read aws settings")?
        .region(config.ses_region.clone())
        .load()
        .await;

    let ses = SesClient::new(aws_sdk_sesv2::Client::new(&aws_config), &config.email_from);

    let service = Arc::new(DeadLetterReconcilerImpl::new(ses, &config.email_to));

    let func = service_fn(move |event: LambdaEvent<SqsEvent>| {
        let service = service.clone();
        async move { handler(service.as_ref(), event).await }
    });

    run(func).await
}
