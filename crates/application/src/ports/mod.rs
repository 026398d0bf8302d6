//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the runner and the outside world.
//! Each port is a trait implemented by an adapter in the infrastructure layer.

mod clock;
mod http_client;

pub use clock::Clock;
pub use http_client::{HttpClient, HttpClientError};
