mod send_email;

use aws_sdk_sesv2 as ses;

pub use send_email::EmailBody;

#[derive(Clone, Debug)]
pub struct SesClient {
    inner: ses::Client,
    from_email: String,
}

impl SesClient {
    pub fn new(inner: ses::Client, from_email: &str) -> Self {
        Self {
            inner,
            from_email: from_email.to_string(),
        }
    }

    /// The address every email is sent from
    pub fn from_email(&self) -> &str {
        self.from_email.as_str()
    }

    /// Sends a single email to `to_email` and returns the SES message id
    #[tracing::instrument(skip(self, body), fields(from_email = %self.from_email))]
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &EmailBody,
    ) -> anyhow::Result<String> {
        send_email::send_email(&self.inner, &self.from_email, to_email, subject, body).await
    }
}
