mod api;
mod smoke;

use crate::api::{ApiClient, Credentials};
use crate::smoke::SmokeRunner;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Smoke-tests the KidMate API: logs in, then fetches the current user and their children.
#[derive(Parser)]
#[command(name = "kidmate-smoke", version, long_about = None)]
struct Cli {
    /// Base URL of the API under test.
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: Url,

    /// Email of the account to log in with.
    #[arg(long, default_value = "test22@gmail.com")]
    email: String,

    /// Password of the account to log in with.
    #[arg(long, default_value = "password")]
    password: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout is reserved for the test report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kidmate_smoke=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let credentials = Credentials {
        email: cli.email,
        password: cli.password,
    };

    let outcome = SmokeRunner::new(ApiClient::new(cli.base_url), credentials)
        .run()
        .await;

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
