//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port with reqwest's blocking
//! client. One client, and its connection pool, serves the whole run.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use canopy_application::ports::{HttpClient, HttpClientError};
use canopy_domain::{
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};
use reqwest::blocking::Client;
use reqwest::{Method, Url};

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Blocking HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Canopy/<version>"
    ///
    /// Timeouts are set per request from `RequestSpec::timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("Canopy/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Host and port of a failed request, for error messages.
    fn target_of(error: &reqwest::Error) -> (String, u16) {
        error.url().map_or_else(
            || ("unknown".to_string(), 80),
            |u| {
                (
                    u.host_str().unwrap_or("unknown").to_string(),
                    u.port_or_known_default().unwrap_or(80),
                )
            },
        )
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            // reqwest's Display stops at the outermost context; the cause
            // chain says whether DNS or the socket failed.
            let message = format!("{error:?}");
            let lowered = message.to_lowercase();
            let (host, port) = Self::target_of(error);
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host,
                    message: error.to_string(),
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused { host, port };
            }
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let parsed_url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), parsed_url)
            .timeout(Duration::from_millis(request.timeout_ms));

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(body) = &request.body {
            let bytes =
                serde_json::to_vec(body).map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder
            .send()
            .map_err(|e| Self::map_error(&e, request.timeout_ms))?;

        let status = response.status().as_u16();

        let response_headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body_bytes = response
            .bytes()
            .map_err(|e| {
                if e.is_timeout() {
                    HttpClientError::Timeout {
                        timeout_ms: request.timeout_ms,
                    }
                } else {
                    HttpClientError::Other(format!("Failed to read body: {e}"))
                }
            })?
            .to_vec();

        let duration = start.elapsed();

        Ok(ResponseSpec::new(
            status,
            response_headers,
            body_bytes,
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Put),
            Method::PUT
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url_is_rejected_before_sending() {
        let client = ReqwestHttpClient::new().map_err(|e| e.to_string());
        let result = client.map(|c| c.execute(&RequestSpec::get("not a url")));
        assert!(matches!(result, Ok(Err(HttpClientError::InvalidUrl(_)))));
    }

    #[test]
    fn test_closed_port_is_a_transport_error() {
        // Port 9 (discard) is essentially never listening on test hosts.
        let client = ReqwestHttpClient::new().map_err(|e| e.to_string());
        let request = RequestSpec::get("http://127.0.0.1:9/api/").with_timeout_ms(2_000);
        let result = client.map(|c| c.execute(&request));
        assert!(matches!(
            result,
            Ok(Err(HttpClientError::ConnectionRefused { .. }
                | HttpClientError::ConnectionFailed(_)
                | HttpClientError::Timeout { .. }))
        ));
    }
}
