//! Canopy - conformance runner for the Monkey Registry API.
//!
//! Wires the configured session into the suite and writes the optional
//! JSON report. The binary adds logging and process exit codes.

use std::fmt::Display;

use canopy_application::{ApiSession, Clock, HttpClient, RegistryTester};
use canopy_infrastructure::{CanopyConfig, RunReport};

/// Exit status when nothing could be tested.
pub const EXIT_SETUP_FAILURE: u8 = 2;

/// Reports a failure that prevents any test from running and returns the
/// exit status for it.
#[must_use]
pub fn setup_failure(stage: &str, error: &impl Display) -> u8 {
    tracing::error!(error = %error, "{stage}");
    eprintln!("canopy: {stage}: {error}");
    EXIT_SETUP_FAILURE
}

/// Runs the whole suite once against `config.api_base()`.
///
/// Progress and the summary go to stdout. When `report_path` is set the
/// report is also written there; a failed write is logged and otherwise
/// ignored.
pub fn run_suite<C: HttpClient>(config: &CanopyConfig, client: C, clock: &impl Clock) -> RunReport {
    let session = ApiSession::new(client, config.api_base()).with_timeout_ms(config.timeout_ms);
    let mut tester = RegistryTester::new(session).with_service_name(config.service_name.clone());

    tester.run_all_tests();

    let report = RunReport::new(clock, tester.session().api_base(), tester.results());
    if let Some(path) = &config.report_path
        && let Err(e) = report.write_to(path)
    {
        tracing::warn!(error = %e, "could not write report");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_setup_failure_exit_status() {
        let status = setup_failure("could not build HTTP client", &"tls backend unavailable");
        assert_eq!(status, EXIT_SETUP_FAILURE);
        assert_eq!(status, 2);
    }
}
