//! Infrastructure: configuration loading and observability wiring.

pub mod config;
pub mod logging;
