//! Canopy binary.

use std::process::ExitCode;

use canopy::{run_suite, setup_failure};
use canopy_infrastructure::{CanopyConfig, ReqwestHttpClient, SystemClock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match CanopyConfig::load() {
        Ok(config) => config,
        Err(e) => return ExitCode::from(setup_failure("invalid configuration", &e)),
    };

    let client = match ReqwestHttpClient::new() {
        Ok(client) => client,
        Err(e) => return ExitCode::from(setup_failure("could not build HTTP client", &e)),
    };

    tracing::info!(
        api_base = %config.api_base(),
        "Starting Canopy v{}",
        env!("CARGO_PKG_VERSION")
    );

    let report = run_suite(&config, client, &SystemClock::new());
    ExitCode::from(report.summary.exit_code())
}
