//! Typed checks over a single registry call.
//!
//! Every request wrapper yields a `CallResult`: either the decoded contract
//! or a `CallError` saying whether the transport failed, the status was
//! wrong, the body was not JSON, or the JSON had the wrong shape.

use canopy_domain::{ResponseData, TestResult, response::ResponseSpec};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Result of one checked call.
pub type CallResult<T> = Result<T, CallError>;

/// Why a call did not satisfy its contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// No response was obtained.
    #[error("Connection error: {0}")]
    Transport(#[from] HttpClientError),

    /// The registry answered with a different status.
    #[error("Status: {actual}")]
    UnexpectedStatus {
        /// Status the contract requires.
        expected: u16,
        /// Status received.
        actual: u16,
        /// Raw response text.
        body: String,
    },

    /// The body was expected to be JSON and was not.
    #[error("JSON parsing error: {error}")]
    MalformedBody {
        /// Parser error text.
        error: String,
        /// Raw response text.
        body: String,
    },

    /// The body was JSON but did not match the contract.
    #[error("{reason}")]
    ShapeMismatch {
        /// What was wrong.
        reason: String,
        /// The offending JSON.
        payload: serde_json::Value,
    },
}

impl CallError {
    /// Diagnostic payload to attach to the recorded outcome.
    #[must_use]
    pub fn payload(&self) -> Option<ResponseData> {
        match self {
            Self::Transport(_) => None,
            Self::UnexpectedStatus { body, .. } | Self::MalformedBody { body, .. } => {
                Some(ResponseData::Text(body.clone()))
            }
            Self::ShapeMismatch { payload, .. } => Some(ResponseData::Json(payload.clone())),
        }
    }

    /// Message naming both the expected and the received status, for checks
    /// whose whole point is a specific non-2xx status.
    #[must_use]
    pub fn expectation_message(&self) -> String {
        match self {
            Self::UnexpectedStatus {
                expected, actual, ..
            } => format!("Expected {expected}, got {actual}"),
            other => other.to_string(),
        }
    }

    /// Converts the error into a failed outcome.
    #[must_use]
    pub fn into_result(self, test_name: &str) -> TestResult {
        let message = self.to_string();
        TestResult::new(test_name, false, message, self.payload())
    }
}

/// A decoded contract together with the JSON it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    /// Typed view of the body.
    pub contract: T,
    /// Untyped body, kept for diagnostics.
    pub payload: serde_json::Value,
}

/// Requires `response` to carry exactly `expected`.
///
/// # Errors
///
/// Returns `CallError::UnexpectedStatus` with the response text otherwise.
pub fn expect_status(response: &ResponseSpec, expected: u16) -> CallResult<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(CallError::UnexpectedStatus {
            expected,
            actual: response.status,
            body: response.body.clone(),
        })
    }
}

/// Parses the body as JSON.
///
/// # Errors
///
/// Returns `CallError::MalformedBody` if the body is not JSON.
pub fn parse_json(response: &ResponseSpec) -> CallResult<serde_json::Value> {
    response.body_as_json().map_err(|e| CallError::MalformedBody {
        error: e.to_string(),
        body: response.body.clone(),
    })
}

/// Decodes already-parsed JSON into a contract.
///
/// # Errors
///
/// Returns `CallError::ShapeMismatch` carrying `reason` and the payload.
pub fn decode<T: DeserializeOwned>(payload: serde_json::Value, reason: &str) -> CallResult<Checked<T>> {
    match T::deserialize(&payload) {
        Ok(contract) => Ok(Checked { contract, payload }),
        Err(e) => {
            tracing::debug!(error = %e, "response did not match contract");
            Err(CallError::ShapeMismatch {
                reason: reason.to_string(),
                payload,
            })
        }
    }
}

/// Status, JSON and shape in one step.
///
/// # Errors
///
/// Returns the first check that fails.
pub fn expect_json<T: DeserializeOwned>(
    response: &ResponseSpec,
    expected_status: u16,
    shape_reason: &str,
) -> CallResult<Checked<T>> {
    expect_status(response, expected_status)?;
    let payload = parse_json(response)?;
    decode(payload, shape_reason)
}

/// Fails with a shape mismatch unless `condition` holds.
///
/// # Errors
///
/// Returns `CallError::ShapeMismatch` carrying `reason` and `payload`.
pub fn ensure(condition: bool, reason: &str, payload: &serde_json::Value) -> CallResult<()> {
    if condition {
        Ok(())
    } else {
        Err(CallError::ShapeMismatch {
            reason: reason.to_string(),
            payload: payload.clone(),
        })
    }
}
