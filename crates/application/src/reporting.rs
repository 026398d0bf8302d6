//! Human-readable run output.

use canopy_domain::{TestResult, TestSummary};

/// Horizontal rule framing the banner and the summary.
pub const RULE: &str = "============================================================";

/// Banner printed before the first case.
#[must_use]
pub fn render_banner(api_base: &str) -> String {
    [
        format!("Testing API at: {api_base}"),
        RULE.to_string(),
        "🐒 MONKEY REGISTRY BACKEND API TESTING".to_string(),
        RULE.to_string(),
    ]
    .join("\n")
}

/// Summary block: counts, success rate, and either the all-passed line or
/// every failed outcome in recorded order.
#[must_use]
pub fn render_summary(results: &[TestResult]) -> String {
    let summary = TestSummary::from_results(results);

    let mut lines = vec![
        RULE.to_string(),
        "📊 TEST SUMMARY".to_string(),
        RULE.to_string(),
        format!("Total Tests: {}", summary.total),
        format!("Passed: {}", summary.passed),
        format!("Failed: {}", summary.failed),
        format!("Success Rate: {}", summary.success_rate_display()),
        String::new(),
    ];

    if summary.all_passed() {
        lines.push("🎉 ALL TESTS PASSED! Backend API is working correctly.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "⚠️  {} tests failed. Check the details above.",
        summary.failed
    ));
    lines.push(String::new());
    lines.push("Failed Tests:".to_string());
    lines.extend(
        results
            .iter()
            .filter(|r| !r.success)
            .map(|r| format!("  - {}: {}", r.test_name, r.message)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_banner_names_target() {
        let banner = render_banner("http://localhost:3000/api");
        assert!(banner.starts_with("Testing API at: http://localhost:3000/api\n"));
        assert!(banner.contains("MONKEY REGISTRY BACKEND API TESTING"));
    }

    #[test]
    fn test_all_passed_summary() {
        let results = vec![TestResult::pass("a", "ok"), TestResult::pass("b", "ok")];
        let text = render_summary(&results);
        assert!(text.contains("Total Tests: 2\nPassed: 2\nFailed: 0\nSuccess Rate: 100.0%"));
        assert!(text.ends_with("🎉 ALL TESTS PASSED! Backend API is working correctly."));
        assert!(!text.contains("Failed Tests:"));
    }

    #[test]
    fn test_failed_summary_lists_failures_in_order() {
        let results = vec![
            TestResult::fail("POST Create Monkey", "Status: 500"),
            TestResult::pass("POST AI Description", "Generated description (10 chars)"),
            TestResult::fail("GET Specific Monkey", "No test monkey ID available"),
        ];
        let text = render_summary(&results);
        assert!(text.contains("Success Rate: 33.3%"));
        assert!(text.contains("⚠️  2 tests failed. Check the details above."));

        let tail: Vec<&str> = text.lines().rev().take(3).collect();
        assert_eq!(
            tail,
            vec![
                "  - GET Specific Monkey: No test monkey ID available",
                "  - POST Create Monkey: Status: 500",
                "Failed Tests:",
            ]
        );
    }
}
