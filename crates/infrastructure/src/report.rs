//! JSON report of a finished run.

use std::path::{Path, PathBuf};

use canopy_application::ports::Clock;
use canopy_domain::{TestResult, TestSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serialization::{SerializationError, to_json_stable_bytes};

/// Errors raised while writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report could not be serialized.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The report file could not be written.
    #[error("failed to write report to {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Machine-readable record of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Base URL the suite ran against.
    pub api_base: String,
    /// Aggregate counts.
    pub summary: TestSummary,
    /// Pass rate rounded to one decimal, e.g. `"91.7%"`.
    pub success_rate: String,
    /// Every recorded outcome, in order.
    pub results: Vec<TestResult>,
}

impl RunReport {
    /// Builds a report from the recorded outcomes.
    #[must_use]
    pub fn new(clock: &impl Clock, api_base: impl Into<String>, results: &[TestResult]) -> Self {
        let summary = TestSummary::from_results(results);
        Self {
            generated_at: clock.now(),
            api_base: api_base.into(),
            success_rate: summary.success_rate_display(),
            summary,
            results: results.to_vec(),
        }
    }

    /// Writes the report as stable JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let io_error = |source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let bytes = to_json_stable_bytes(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, bytes).map_err(io_error)?;

        tracing::info!(path = %path.display(), outcomes = self.results.len(), "report written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::serialization::from_json;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        )
    }

    fn sample_results() -> Vec<TestResult> {
        vec![
            TestResult::pass("API Root Endpoint", "Root endpoint accessible"),
            TestResult::fail("DELETE Monkey", "No test monkey ID available"),
        ]
    }

    #[test]
    fn test_report_summarizes_results() {
        let report = RunReport::new(&fixed_clock(), "http://localhost:3000/api", &sample_results());

        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.success_rate, "50.0%");
        assert_eq!(report.generated_at, fixed_clock().0);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("reports").join("run.json");
        let report = RunReport::new(&fixed_clock(), "http://localhost:3000/api", &sample_results());

        report.write_to(&path).expect("write report");

        let written = std::fs::read_to_string(&path).expect("read report");
        assert!(written.ends_with('\n'));
        let restored: RunReport = from_json(&written).expect("parse report");
        assert_eq!(restored, report);
    }

    #[test]
    fn test_write_into_missing_location_fails() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").expect("write blocker");

        let report = RunReport::new(&fixed_clock(), "http://localhost:3000/api", &[]);
        let result = report.write_to(&blocker.join("run.json"));

        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
