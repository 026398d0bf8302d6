//! Recorded test outcomes and their summary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic payload attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Parsed JSON body.
    Json(serde_json::Value),
    /// Raw response text, used when the body is not (or not expected to be) JSON.
    Text(String),
}

impl fmt::Display for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<serde_json::Value> for ResponseData {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for ResponseData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// One recorded pass/fail outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Name of the check.
    pub test_name: String,
    /// Whether the check passed.
    pub success: bool,
    /// Human-readable explanation.
    pub message: String,
    /// Diagnostic payload, typically the offending response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<ResponseData>,
}

impl TestResult {
    /// Create an outcome.
    #[must_use]
    pub fn new(
        test_name: impl Into<String>,
        success: bool,
        message: impl Into<String>,
        response_data: Option<ResponseData>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            success,
            message: message.into(),
            response_data,
        }
    }

    /// Create a passed outcome.
    #[must_use]
    pub fn pass(test_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(test_name, true, message, None)
    }

    /// Create a failed outcome without payload.
    #[must_use]
    pub fn fail(test_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(test_name, false, message, None)
    }

    /// Create a failed outcome with a diagnostic payload.
    #[must_use]
    pub fn fail_with_data(
        test_name: impl Into<String>,
        message: impl Into<String>,
        data: impl Into<ResponseData>,
    ) -> Self {
        Self::new(test_name, false, message, Some(data.into()))
    }

    /// `✅ PASS name: message` or `❌ FAIL name: message`.
    #[must_use]
    pub fn status_line(&self) -> String {
        let status = if self.success { "✅ PASS" } else { "❌ FAIL" };
        format!("{status} {}: {}", self.test_name, self.message)
    }

    /// Indented payload line printed under failed outcomes.
    #[must_use]
    pub fn details_line(&self) -> Option<String> {
        if self.success {
            return None;
        }
        self.response_data
            .as_ref()
            .map(|data| format!("   Details: {data}"))
    }
}

/// Aggregate counts over a results list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    /// Number of recorded outcomes.
    pub total: usize,
    /// Number of passed outcomes.
    pub passed: usize,
    /// Number of failed outcomes.
    pub failed: usize,
}

impl TestSummary {
    /// Count the outcomes in `results`.
    #[must_use]
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Check if all outcomes passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Pass rate as a percentage. An empty run counts as fully passed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Pass rate rounded to one decimal, e.g. `91.7%`.
    #[must_use]
    pub fn success_rate_display(&self) -> String {
        format!("{:.1}%", self.success_rate())
    }

    /// Process exit status: 0 when everything passed, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_lines() {
        let ok = TestResult::pass("API Root Endpoint", "Root endpoint accessible");
        assert_eq!(
            ok.status_line(),
            "✅ PASS API Root Endpoint: Root endpoint accessible"
        );
        assert_eq!(ok.details_line(), None);

        let bad = TestResult::fail_with_data("Validation Errors", "Expected 400, got 201", "{}".to_string());
        assert_eq!(bad.status_line(), "❌ FAIL Validation Errors: Expected 400, got 201");
        assert_eq!(bad.details_line(), Some("   Details: {}".to_string()));
    }

    #[test]
    fn test_json_details_are_compact() {
        let bad = TestResult::fail_with_data("x", "y", json!({"error": "Monkey not found"}));
        assert_eq!(
            bad.details_line(),
            Some(r#"   Details: {"error":"Monkey not found"}"#.to_string())
        );
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            TestResult::pass("a", ""),
            TestResult::fail("b", "boom"),
            TestResult::pass("c", ""),
        ];
        let summary = TestSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed + summary.failed, summary.total);
        assert!(!summary.all_passed());
        assert_eq!(summary.success_rate_display(), "66.7%");
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_summary_rounding() {
        let mut results: Vec<TestResult> = (0..11).map(|i| TestResult::pass(i.to_string(), "")).collect();
        results.push(TestResult::fail("last", ""));
        let summary = TestSummary::from_results(&results);
        assert_eq!(summary.success_rate_display(), "91.7%");
    }

    #[test]
    fn test_summary_all_passed() {
        let results = vec![TestResult::pass("a", ""), TestResult::pass("b", "")];
        let summary = TestSummary::from_results(&results);
        assert!(summary.all_passed());
        assert_eq!(summary.success_rate_display(), "100.0%");
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = TestSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.all_passed());
        assert_eq!(summary.success_rate_display(), "100.0%");
    }

    #[test]
    fn test_result_serialization_omits_missing_data() {
        let value = serde_json::to_value(TestResult::pass("a", "ok")).ok();
        assert_eq!(
            value,
            Some(json!({"test_name": "a", "success": true, "message": "ok"}))
        );
    }
}
