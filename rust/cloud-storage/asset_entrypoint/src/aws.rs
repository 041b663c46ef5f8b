use std::time::Duration;

use anyhow::Context;
use aws_config::{
    BehaviorVersion, Region, SdkConfig, meta::region::RegionProviderChain, timeout::TimeoutConfig,
};

/// Name of the variable that bounds every AWS SDK operation
pub const OPERATION_TIMEOUT_VAR: &str = "AWS_OPERATION_TIMEOUT_SECONDS";

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REGION: &str = "us-east-1";

/// Settings used to build the shared [SdkConfig] for a lambda.
///
/// Every store, queue and email call made through the resulting config is bounded by
/// `operation_timeout`, including the SDK's own retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    /// explicit region, falls back to the default provider chain and then `us-east-1`
    pub region: Option<String>,
    /// upper bound for a single SDK operation
    pub operation_timeout: Duration,
}

impl Default for AwsSettings {
    fn default() -> Self {
        AwsSettings {
            region: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl AwsSettings {
    /// read the settings from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// read the settings through `lookup`, which returns the value of a variable if it is set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let operation_timeout = match lookup(OPERATION_TIMEOUT_VAR).filter(|v| !v.is_empty()) {
            Some(seconds) => {
                let seconds: u64 = seconds.parse().with_context(|| {
                    format!("{OPERATION_TIMEOUT_VAR} must be a whole number of seconds")
                })?;
                anyhow::ensure!(seconds > 0, "{OPERATION_TIMEOUT_VAR} must be greater than 0");
                Duration::from_secs(seconds)
            }
            None => DEFAULT_OPERATION_TIMEOUT,
        };

        Ok(AwsSettings {
            region: None,
            operation_timeout,
        })
    }

    /// override the region
    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// load the [SdkConfig] with the configured region and timeouts
    #[tracing::instrument]
    pub async fn load(&self) -> SdkConfig {
        let region_provider = match self.region.clone() {
            Some(region) => RegionProviderChain::first_try(Region::new(region))
                .or_default_provider()
                .or_else(Region::new(DEFAULT_REGION)),
            None => RegionProviderChain::default_provider().or_else(Region::new(DEFAULT_REGION)),
        };

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(self.operation_timeout)
            .build();

        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .timeout_config(timeouts)
            .load()
            .await
    }
}
