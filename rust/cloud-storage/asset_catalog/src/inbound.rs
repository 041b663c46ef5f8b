//! Adapters from lambda event payloads into the domain

pub mod lambda;
