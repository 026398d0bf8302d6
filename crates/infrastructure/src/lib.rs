//! Canopy Infrastructure - Adapters and implementations
//!
//! This crate provides the blocking HTTP adapter for the application
//! ports, configuration loading and the JSON run report.

pub mod adapters;
pub mod config;
pub mod report;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use crate::config::{CanopyConfig, ConfigError};
pub use report::{ReportError, RunReport};
pub use serialization::{SerializationError, from_json, to_json_stable, to_json_stable_bytes};
