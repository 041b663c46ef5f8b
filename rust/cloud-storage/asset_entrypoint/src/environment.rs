use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Name of the variable that selects the [Environment]
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The environment the lambda is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine, e.g. under `cargo lambda watch`
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("could not convert {0} into an environment value")]
pub struct UnknownEnvironment(String);

impl Environment {
    /// Read the environment from [ENVIRONMENT_VAR]
    pub fn new_from_env() -> anyhow::Result<Self> {
        let value = std::env::var(ENVIRONMENT_VAR)?;
        Ok(Self::from_str(&value)?)
    }

    /// read the environment, falling back to production when it is unset or unknown
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(environment: &str) -> Result<Self, UnknownEnvironment> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownEnvironment(s.to_string())),
        }
    }
}
