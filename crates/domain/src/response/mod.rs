//! HTTP response types received from the registry under test.

mod spec;

pub use spec::{ResponseSpec, StatusCode};
