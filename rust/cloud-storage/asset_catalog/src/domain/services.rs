//! This module defines the services that are exposed by this crate

mod confirmation;
mod ingestion;
mod metadata;
mod reconciler;

pub use confirmation::ConfirmationServiceImpl;
pub use ingestion::IngestionServiceImpl;
pub use metadata::MetadataUpdateServiceImpl;
pub use reconciler::DeadLetterReconcilerImpl;

#[cfg(test)]
mod tests;
