#![recursion_limit = "256"]

mod config;
mod handler;

use std::sync::Arc;

use anyhow::Context;
use asset_catalog::domain::services::MetadataUpdateServiceImpl;
use asset_entrypoint::{AssetEntrypoint, AwsSettings};
use aws_lambda_events::event::sns::SnsEvent;
use config::Config;
use dynamodb_client::CatalogTable;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    AssetEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("failed to read config")?;

    let aws_config = AwsSettings::from_env()
        .context("failed to read aws settings")?
        .load()
        .await;

    let table = CatalogTable::new(&aws_config, &config.catalog_table);
    tracing::trace!(table = table.table(), "initialized catalog table client");

    let service = Arc::new(MetadataUpdateServiceImpl::new(table));

    let func = service_fn(move |event: LambdaEvent<SnsEvent>| {
        let service = service.clone();
        async move { handler(service.as_ref(), event).await }
    });

    run(func).await
}
