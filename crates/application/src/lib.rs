//! Canopy Application - Suite orchestration and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, clock)
//! - The session and typed call checks
//! - The sequential registry suite and its reporter

pub mod check;
pub mod ports;
pub mod reporting;
pub mod session;
pub mod suite;

pub use check::{CallError, CallResult, Checked};
pub use ports::{Clock, HttpClient, HttpClientError};
pub use reporting::{render_banner, render_summary};
pub use session::ApiSession;
pub use suite::{CORS_HEADERS, RegistryTester, SERVICE_NAME};
