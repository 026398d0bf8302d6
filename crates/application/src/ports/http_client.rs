//! HTTP Client port

use canopy_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Transport-level failures. None of these mean the registry answered;
/// an HTTP error status is a normal `ResponseSpec`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error text.
        message: String,
    },

    /// Nothing is listening on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No response arrived within the timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure, including a body that could not be read.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Calls are blocking round trips; the runner is strictly sequential, so
/// implementations need not be `Send` or `Sync`.
pub trait HttpClient {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained. Any status code,
    /// including 4xx and 5xx, is returned as `Ok`.
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        (**self).execute(request)
    }
}
