use crate::domain::{
    models::{CatalogChange, ChangeKind, NotificationReport, OutboundEmail},
    ports::{ConfirmationService, Notifier},
};

/// concrete struct which implements [ConfirmationService]
#[derive(Clone)]
pub struct ConfirmationServiceImpl<N> {
    notifier: N,
    recipient: String,
}

impl<N> ConfirmationServiceImpl<N>
where
    N: Notifier,
{
    pub fn new(notifier: N, recipient: &str) -> Self {
        ConfirmationServiceImpl {
            notifier,
            recipient: recipient.to_string(),
        }
    }
}

impl<N> ConfirmationService for ConfirmationServiceImpl<N>
where
    N: Notifier,
{
    /// Only inserts are confirmed. Replacing an existing record shows up as a modification,
    /// so a redelivered creation never sends a second email.
    #[tracing::instrument(skip(self, changes), fields(batch_size = changes.len()))]
    async fn confirm(&self, changes: Vec<CatalogChange>) -> NotificationReport {
        let mut report = NotificationReport::default();

        for change in changes {
            let key = match change {
                CatalogChange {
                    kind: Some(ChangeKind::Insert),
                    key: Some(key),
                } => key,
                CatalogChange {
                    kind: Some(ChangeKind::Insert),
                    key: None,
                } => {
                    tracing::warn!("image name is missing from the inserted record");
                    report.skipped += 1;
                    continue;
                }
                other => {
                    tracing::debug!(kind = ?other.kind, "skipping change that is not an insert");
                    report.skipped += 1;
                    continue;
                }
            };

            match self
                .notifier
                .send(OutboundEmail::confirmation(&self.recipient, &key))
                .await
            {
                Ok(()) => {
                    tracing::info!(%key, "confirmation sent");
                    report.sent += 1;
                }
                Err(e) => {
                    tracing::error!(%key, error = ?e, "failed to send confirmation");
                    report.failed += 1;
                }
            }
        }

        report
    }
}
