//! The registry conformance suite.
//!
//! `RegistryTester` owns the session, the recorded outcomes and the id of the
//! monkey created during the run. Cases run in a fixed order; a failing case
//! never stops the run, and cases that need the created monkey record a
//! failure without touching the network when there is none.

mod cases;

use canopy_domain::{ResponseData, TestResult, TestSummary};

use crate::check::{CallError, CallResult};
use crate::ports::HttpClient;
use crate::reporting::{render_banner, render_summary};
use crate::session::ApiSession;

/// Banner text the root endpoint must contain.
pub const SERVICE_NAME: &str = "Monkey Registry API";

/// Cross-origin headers every collection response must carry.
pub const CORS_HEADERS: [&str; 3] = [
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
];

/// Sequential runner for the registry suite.
pub struct RegistryTester<C: HttpClient> {
    session: ApiSession<C>,
    service_name: String,
    test_monkey_id: Option<String>,
    test_results: Vec<TestResult>,
}

impl<C: HttpClient> RegistryTester<C> {
    /// Cases in execution order. Delete runs last to clean up.
    const CASES: [fn(&mut Self); 11] = [
        Self::test_api_root,
        Self::test_get_all_monkeys_empty,
        Self::test_create_monkey,
        Self::test_get_all_monkeys_with_data,
        Self::test_get_specific_monkey,
        Self::test_update_monkey,
        Self::test_ai_description_generation,
        Self::test_validation_errors,
        Self::test_not_found_errors,
        Self::test_response_headers,
        Self::test_delete_monkey,
    ];

    /// Creates a runner with no recorded outcomes.
    pub fn new(session: ApiSession<C>) -> Self {
        Self {
            session,
            service_name: SERVICE_NAME.to_string(),
            test_monkey_id: None,
            test_results: Vec::new(),
        }
    }

    /// Overrides the banner text expected from the root endpoint.
    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Outcomes recorded so far, in order.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.test_results
    }

    /// Counts over the outcomes recorded so far.
    #[must_use]
    pub fn summary(&self) -> TestSummary {
        TestSummary::from_results(&self.test_results)
    }

    /// Id of the monkey created by the create case, if it passed.
    #[must_use]
    pub fn test_monkey_id(&self) -> Option<&str> {
        self.test_monkey_id.as_deref()
    }

    /// The session the cases run against.
    #[must_use]
    pub const fn session(&self) -> &ApiSession<C> {
        &self.session
    }

    /// Records one outcome and prints it immediately.
    pub fn log_test(
        &mut self,
        test_name: &str,
        success: bool,
        message: impl Into<String>,
        response_data: Option<ResponseData>,
    ) {
        self.record(TestResult::new(test_name, success, message, response_data));
    }

    /// Runs every case, prints the summary, and returns true iff every
    /// recorded outcome passed.
    pub fn run_all_tests(&mut self) -> bool {
        println!("{}", render_banner(self.session.api_base()));

        for case in Self::CASES {
            case(self);
            println!();
        }

        println!("{}", render_summary(&self.test_results));

        let summary = self.summary();
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "suite finished"
        );
        summary.all_passed()
    }

    fn record(&mut self, result: TestResult) {
        println!("{}", result.status_line());
        if let Some(details) = result.details_line() {
            println!("{details}");
        }
        tracing::info!(
            test = %result.test_name,
            success = result.success,
            "recorded outcome"
        );
        self.test_results.push(result);
    }

    /// Records a passed outcome or the failure the call ended in.
    fn finish(&mut self, test_name: &str, outcome: CallResult<String>) {
        match outcome {
            Ok(message) => self.log_test(test_name, true, message, None),
            Err(e) => self.record(e.into_result(test_name)),
        }
    }

    /// Like `finish`, but a wrong status is reported as
    /// `Expected <n>, got <m>`.
    fn finish_expecting(&mut self, test_name: &str, outcome: CallResult<String>) {
        match outcome {
            Ok(message) => self.log_test(test_name, true, message, None),
            Err(e) => {
                let message = e.expectation_message();
                let data = e.payload();
                self.log_test(test_name, false, message, data);
            }
        }
    }

    /// The created monkey's id, or a recorded precondition failure.
    fn require_monkey_id(&mut self, test_name: &str) -> Option<String> {
        if self.test_monkey_id.is_none() {
            self.log_test(test_name, false, "No test monkey ID available", None);
        }
        self.test_monkey_id.clone()
    }
}
