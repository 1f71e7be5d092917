//! Read-only REST facade over the NBA/WNBA stats providers.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod service;
pub mod upstream;
pub mod wire;
