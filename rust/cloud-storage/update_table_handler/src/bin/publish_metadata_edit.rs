/// publish_metadata_edit.rs publishes a single caption, date or photographer edit to the
/// metadata topic. Fields outside the allowlist are refused before anything is sent.
/// Optional environment variables:
/// - AWS_OPERATION_TIMEOUT_SECONDS
use anyhow::Context;
use asset_entrypoint::{AssetEntrypoint, AwsSettings};
use clap::Parser;

#[derive(clap::Parser, Debug)]
struct Args {
    /// Arn of the topic the metadata update pipeline subscribes to
    #[arg(long = "topic_arn", short = 't')]
    topic_arn: String,

    /// Canonical identifier of the asset, e.g. `photo 1.png`
    #[arg(long = "id", short = 'i')]
    id: String,

    /// One of Caption, Date or Photographer
    #[arg(long = "field", short = 'f')]
    field: String,

    #[arg(long = "value", short = 'v')]
    value: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    AssetEntrypoint::default().init();

    let args = Args::parse();

    let aws_config = AwsSettings::from_env()
        .context("failed to read aws settings")?
        .load()
        .await;
    let sns = sns_client::SNS::new(aws_sdk_sns::Client::new(&aws_config));

    let message_id = sns
        .publish_metadata_edit(&args.topic_arn, &args.id, &args.field, &args.value)
        .await
        .context("failed to publish metadata edit")?;

    println!("published {} edit for {} as {message_id}", args.field, args.id);

    Ok(())
}
