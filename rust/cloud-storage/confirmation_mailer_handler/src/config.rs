use anyhow::Context;

/// The configuration parameters for the confirmation mailer, read from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The verified address emails are sent from
    pub email_from: String,

    /// The address confirmations are sent to
    pub email_to: String,

    /// Region of the email service when it differs from the lambda's own
    pub ses_region: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{name} must be provided"))
        };

        Ok(Config {
            email_from: required("SES_EMAIL_FROM")?,
            email_to: required("SES_EMAIL_TO")?,
            ses_region: lookup("SES_REGION").filter(|v| !v.is_empty()),
        })
    }
}
