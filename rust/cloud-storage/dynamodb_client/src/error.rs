use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Service error codes for requests that may succeed when retried unchanged
const TRANSIENT_CODES: &[&str] = &[
    "InternalServerError",
    "LimitExceededException",
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "ServiceUnavailable",
    "ThrottlingException",
    "TransactionInProgressException",
];

#[derive(Debug, Error)]
pub enum CatalogTableError {
    /// The request failed for a reason that may clear up on its own, e.g. throttling or a timeout
    #[error("{operation} failed transiently: {source}")]
    Transient {
        operation: &'static str,
        source: anyhow::Error,
    },
    /// The table refused the request, retrying it unchanged will fail again
    #[error("{operation} was rejected: {source}")]
    Rejected {
        operation: &'static str,
        source: anyhow::Error,
    },
    /// The partition key cannot be changed through an attribute update
    #[error("the partition key attribute cannot be updated")]
    KeyAttribute,
}

impl CatalogTableError {
    pub(crate) fn from_sdk<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        let transient = match &err {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
                true
            }
            SdkError::ServiceError(_) => err
                .as_service_error()
                .and_then(|e| e.code())
                .is_some_and(|code| TRANSIENT_CODES.contains(&code)),
            _ => false,
        };

        let source = anyhow::Error::new(err);
        if transient {
            CatalogTableError::Transient { operation, source }
        } else {
            CatalogTableError::Rejected { operation, source }
        }
    }

    /// Whether the failed request should be retried
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogTableError::Transient { .. })
    }
}
