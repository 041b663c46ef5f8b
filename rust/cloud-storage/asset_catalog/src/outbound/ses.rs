use ses_client::{EmailBody, SesClient};

use crate::domain::{models::OutboundEmail, ports::Notifier};

impl Notifier for SesClient {
    #[tracing::instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: OutboundEmail) -> anyhow::Result<()> {
        let OutboundEmail { to, subject, text } = email;
        let message_id = self
            .send_email(&to, &subject, &EmailBody::Text(text))
            .await?;
        tracing::debug!(%message_id, "email accepted");
        Ok(())
    }
}
