//! This module defines all members of the domain

pub mod models;
pub mod ports;
pub mod routing;
pub mod services;
