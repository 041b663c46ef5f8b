mod send_dead_letter;

use aws_sdk_sqs as sqs;

/// Message attribute carrying the reason a record was dead lettered
pub const REASON_ATTRIBUTE: &str = "reason";

#[derive(Clone, Debug)]
pub struct SQS {
    inner: sqs::Client,
    dead_letter_queue: Option<String>,
}

impl SQS {
    pub fn new(inner: sqs::Client) -> Self {
        Self {
            inner,
            dead_letter_queue: None,
        }
    }

    /// Sets the dead_letter_queue url
    pub fn dead_letter_queue(mut self, dead_letter_queue: &str) -> Self {
        self.dead_letter_queue = Some(dead_letter_queue.to_string());
        self
    }

    /// Sends a message straight to the dead letter queue and returns its message id
    #[tracing::instrument(skip(self, body))]
    pub async fn send_dead_letter(&self, body: &str, reason: &str) -> anyhow::Result<String> {
        if let Some(queue_url) = &self.dead_letter_queue {
            return send_dead_letter::send_dead_letter(&self.inner, queue_url, body, reason).await;
        }

        Err(anyhow::anyhow!("dead_letter_queue is not set"))
    }
}
