use anyhow::Context;

/// The configuration parameters for the rejection mailer, read from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The verified address emails are sent from
    pub email_from: String,

    /// The address rejections are sent to
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_without_a_sender() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert_eq!(err.to_string(), "SES_EMAIL_FROM must be provided");
    }

    #[test]
    fn test_ignore_an_empty_region() {
        let config = Config::from_lookup(|name| match name {
            "SES_REGION" => Some(String::new()),
            _ => Some(format!("{}@example.com", name.to_lowercase())),
        })
        .unwrap();
        assert_eq!(config.ses_region, None);
        assert_eq!(config.email_to, "ses_email_to@example.com");
    }
}
