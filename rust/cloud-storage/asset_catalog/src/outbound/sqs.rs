use anyhow::Context;
use sqs_client::SQS;

use crate::domain::{models::DeadLetter, ports::DeadLetterSink};

impl DeadLetterSink for SQS {
    #[tracing::instrument(skip(self, dead_letter), fields(key = %dead_letter.asset_key))]
    async fn forward(&self, dead_letter: DeadLetter) -> anyhow::Result<()> {
        let body = serde_json::to_string(&dead_letter).context("serializing dead letter")?;
        let message_id = self.send_dead_letter(&body, &dead_letter.reason).await?;
        tracing::info!(%message_id, "forwarded to dead-letter queue");

        Ok(())
    }
}
