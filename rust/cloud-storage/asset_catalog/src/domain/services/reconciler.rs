use crate::domain::{
    models::{
        AssetEvent, AssetKey, DeadLetter, EXHAUSTED_REASON, NotificationReport, OutboundEmail,
        QueueMessage, RawRecord, classify, storage_records,
    },
    ports::{DeadLetterReconciler, Notifier},
};

/// concrete struct which implements [DeadLetterReconciler]
#[derive(Clone)]
pub struct DeadLetterReconcilerImpl<N> {
    notifier: N,
    recipient: String,
}

impl<N> DeadLetterReconcilerImpl<N>
where
    N: Notifier,
{
    pub fn new(notifier: N, recipient: &str) -> Self {
        DeadLetterReconcilerImpl {
            notifier,
            recipient: recipient.to_string(),
        }
    }
}

/// Pulls every asset and the reason it was rejected out of a dead-lettered body.
/// Bodies forwarded directly carry their reason. A redriven storage notification ran out of
/// retries, only its creations are reported and they get [EXHAUSTED_REASON].
fn rejected_assets(body: &str) -> Vec<(AssetKey, String)> {
    if let Ok(dead_letter) = serde_json::from_str::<DeadLetter>(body) {
        return vec![(dead_letter.asset_key, dead_letter.reason)];
    }

    let Ok(records) = storage_records(body) else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match classify(RawRecord::Storage(record)) {
            Ok(AssetEvent::Created { key, .. }) => Some((key, EXHAUSTED_REASON.to_string())),
            _ => None,
        })
        .collect()
}

impl<N> DeadLetterReconciler for DeadLetterReconcilerImpl<N>
where
    N: Notifier,
{
    #[tracing::instrument(skip(self, messages), fields(batch_size = messages.len()))]
    async fn reconcile(&self, messages: Vec<QueueMessage>) -> NotificationReport {
        let mut report = NotificationReport::default();

        for message in messages {
            let assets = message
                .body
                .as_deref()
                .map(rejected_assets)
                .unwrap_or_default();

            if assets.is_empty() {
                tracing::warn!(message_id = %message.message_id, "no asset found in dead letter");
                report.skipped += 1;
                continue;
            }

            for (key, reason) in assets {
                let email = OutboundEmail::rejection(&self.recipient, &key, &reason);
                match self.notifier.send(email).await {
                    Ok(()) => {
                        tracing::info!(%key, "rejection sent");
                        report.sent += 1;
                    }
                    Err(e) => {
                        tracing::error!(%key, error = ?e, "failed to send rejection");
                        report.failed += 1;
                    }
                }
            }
        }

        report
    }
}
