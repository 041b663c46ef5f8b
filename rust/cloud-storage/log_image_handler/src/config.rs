use anyhow::Context;

/// The configuration parameters for the ingestion lambda, read from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The catalog table assets are written to
    pub catalog_table: String,

    /// Url of the dead-letter queue rejected records are forwarded to one by one
    pub dead_letter_queue: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let catalog_table = lookup("DYNAMODB_TABLE")
            .filter(|v| !v.is_empty())
            .context("DYNAMODB_TABLE must be provided")?;
        let dead_letter_queue = lookup("DEAD_LETTER_QUEUE")
            .filter(|v| !v.is_empty())
            .context("DEAD_LETTER_QUEUE must be provided")?;

        Ok(Config {
            catalog_table,
            dead_letter_queue,
        })
    }
}
