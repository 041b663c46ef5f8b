use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The catalog table edits are merged into
    pub catalog_table: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let catalog_table = lookup("DYNAMODB_TABLE")
            .filter(|v| !v.is_empty())
            .context("DYNAMODB_TABLE must be provided")?;

        Ok(Config { catalog_table })
    }
}
