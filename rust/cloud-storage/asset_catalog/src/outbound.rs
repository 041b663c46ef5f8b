//! Implementations of the domain ports

pub mod dynamodb;
pub mod memory;
pub mod ses;
pub mod sqs;
