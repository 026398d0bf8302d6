//! HTTP session against one registry base path.

use canopy_domain::request::{DEFAULT_TIMEOUT_MS, Headers, RequestSpec};
use canopy_domain::response::ResponseSpec;

use crate::ports::{HttpClient, HttpClientError};

/// A client bound to the registry's base path.
///
/// Every request carries the JSON default headers and the session timeout.
/// The client, and whatever connection pool it holds, is reused for every
/// call of a run.
pub struct ApiSession<C: HttpClient> {
    client: C,
    api_base: String,
    headers: Headers,
    timeout_ms: u64,
}

impl<C: HttpClient> ApiSession<C> {
    /// Creates a session for `api_base`, e.g. `http://localhost:3000/api`.
    pub fn new(client: C, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            headers: Headers::json_defaults(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The base path all endpoint paths are appended to.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Default headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Joins an endpoint path (leading `/`) onto the base path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// `GET {api_base}{path}`.
    ///
    /// # Errors
    ///
    /// Returns the transport error if no response was obtained.
    pub fn get(&self, path: &str) -> Result<ResponseSpec, HttpClientError> {
        self.send(RequestSpec::get(self.url(path)))
    }

    /// `POST {api_base}{path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the transport error if no response was obtained.
    pub fn post(&self, path: &str, body: serde_json::Value) -> Result<ResponseSpec, HttpClientError> {
        self.send(RequestSpec::post(self.url(path), body))
    }

    /// `PUT {api_base}{path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the transport error if no response was obtained.
    pub fn put(&self, path: &str, body: serde_json::Value) -> Result<ResponseSpec, HttpClientError> {
        self.send(RequestSpec::put(self.url(path), body))
    }

    /// `DELETE {api_base}{path}`.
    ///
    /// # Errors
    ///
    /// Returns the transport error if no response was obtained.
    pub fn delete(&self, path: &str) -> Result<ResponseSpec, HttpClientError> {
        self.send(RequestSpec::delete(self.url(path)))
    }

    fn send(&self, request: RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let request = request
            .with_headers(self.headers.clone())
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let result = self.client.execute(&request);
        match &result {
            Ok(response) => tracing::debug!(
                status = response.status,
                elapsed = %response.duration_display(),
                "received response"
            ),
            Err(e) => tracing::debug!(error = %e, "request failed"),
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use canopy_domain::request::HttpMethod;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingClient {
        seen: RefCell<Vec<RequestSpec>>,
    }

    impl HttpClient for RecordingClient {
        fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(ResponseSpec::new(200, HashMap::new(), b"{}".to_vec(), Duration::ZERO))
        }
    }

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let session = ApiSession::new(RecordingClient::default(), "http://localhost:3000/api/");
        assert_eq!(session.api_base(), "http://localhost:3000/api");
        assert_eq!(session.url("/"), "http://localhost:3000/api/");
        assert_eq!(session.url("/monkeys/7"), "http://localhost:3000/api/monkeys/7");
    }

    #[test]
    fn test_requests_carry_defaults() {
        let client = RecordingClient::default();
        let session = ApiSession::new(&client, "http://h/api").with_timeout_ms(1234);

        session.get("/monkeys").unwrap();
        session
            .put("/monkeys/1", serde_json::json!({"name": "x"}))
            .unwrap();
        session.delete("/monkeys/1").unwrap();

        let seen = client.seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[1].method, HttpMethod::Put);
        assert_eq!(seen[1].body, Some(serde_json::json!({"name": "x"})));
        assert_eq!(seen[2].method, HttpMethod::Delete);
        for request in seen.iter() {
            assert_eq!(request.timeout_ms, 1234);
            assert_eq!(request.headers.get("Content-Type"), Some("application/json"));
            assert_eq!(request.headers.get("Accept"), Some("application/json"));
        }
    }
}
