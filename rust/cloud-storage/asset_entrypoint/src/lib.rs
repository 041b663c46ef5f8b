#![deny(missing_docs)]
//! Standard process bootstrap shared by every asset pipeline lambda.
//! Installs the tracing subscriber for the current [Environment], sets the panic hook and
//! provides the AWS SDK configuration with bounded operation timeouts.

mod aws;
mod environment;

pub use aws::AwsSettings;
pub use environment::{Environment, UnknownEnvironment};

use tracing_subscriber::EnvFilter;

/// How log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// multi line output with colors, for a developer's terminal
    Pretty,
    /// one flattened json object per event, for the log ingestion of deployed lambdas
    Json,
}

impl From<Environment> for LogFormat {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Local => LogFormat::Pretty,
            Environment::Production | Environment::Develop => LogFormat::Json,
        }
    }
}

/// Initializes logging for a lambda binary before it starts serving events
#[derive(Debug)]
pub struct AssetEntrypoint {
    env: Environment,
}

impl Default for AssetEntrypoint {
    fn default() -> Self {
        AssetEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// proof that [AssetEntrypoint::init] was called
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl AssetEntrypoint {
    /// consume self, install the global subscriber and return [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        let fmt = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_file(true)
            .with_line_number(true);

        match LogFormat::from(self.env) {
            LogFormat::Pretty => fmt.with_ansi(true).pretty().init(),
            LogFormat::Json => fmt
                .with_ansi(false)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .init(),
        }

        tracing::debug!(environment = %self.env, "tracing initialized");

        InitializedEntrypoint(())
    }
}
