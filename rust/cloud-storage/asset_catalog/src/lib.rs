//! Event routing, validation and idempotent catalog mutation for uploaded assets.
//!
//! The crate follows the hexagonal architecture pattern:
//! - [domain] holds the models, the ports the pipelines depend on, the routing engine and the
//!   pipeline services themselves
//! - [inbound] converts lambda event payloads into domain messages and reports back
//! - [outbound] implements the ports against DynamoDB, SES, SQS and in memory

pub mod domain;
pub mod inbound;
pub mod outbound;
