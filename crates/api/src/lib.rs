//! HTTP API: configuration, routing, and request/response mapping for the
//! supply ledger.

pub mod app;
pub mod config;

pub use config::{ApiConfig, ConfigError};
