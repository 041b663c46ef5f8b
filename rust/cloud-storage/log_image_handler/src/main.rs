#![recursion_limit = "256"]

mod config;
mod handler;

use std::sync::Arc;

use anyhow::Context;
use asset_catalog::domain::services::IngestionServiceImpl;
use asset_entrypoint::{AssetEntrypoint, AwsSettings};
use aws_lambda_events::event::sqs::SqsEvent;
use config::Config;
use dynamodb_client::CatalogTable;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    AssetEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("failed to read config")?;
    tracing::trace!("initialized config");

    let aws_config = AwsSettings::from_env()
        .context("failed to read aws settings")?
        .load()
        .await;

    let table = CatalogTable::new(&aws_config, &config.catalog_table);

    let sqs = sqs_client::SQS::new(aws_sdk_sqs::Client::new(&aws_config))
        .dead_letter_queue(&config.dead_letter_queue);

    tracing::trace!("initialized clients");

    let service = Arc::new(IngestionServiceImpl::new(table, sqs));

    let func = service_fn(move |event: LambdaEvent<SqsEvent>| {
        let service = service.clone();
        async move { handler(service.as_ref(), event).await }
    });

    run(func).await
}
