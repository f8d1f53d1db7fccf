use super::outcome::SmokeOutcome;
use crate::api::{ApiClient, ApiError, ApiResponse, Credentials};
use serde_json::Value;
use tracing::debug;

const SEPARATOR: &str = "==================================================";

/// The individual calls we make, in order.
#[derive(Debug, Clone, Copy)]
enum Step {
    Login,
    Me,
    GetChildren,
}

impl Step {
    /// Used as the prefix of the raw response lines.
    fn label(self) -> &'static str {
        match self {
            Step::Login => "Login",
            Step::Me => "Me",
            Step::GetChildren => "Get Children",
        }
    }

    /// Used within the pass/fail lines.
    fn name(self) -> &'static str {
        match self {
            Step::Login => "Login",
            Step::Me => "Me endpoint",
            Step::GetChildren => "Get children",
        }
    }
}

/// Runs login, current user and children checks against the API, printing as it goes.
pub struct SmokeRunner {
    client: ApiClient,
    credentials: Credentials,
}

impl SmokeRunner {
    pub fn new(client: ApiClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Performs the full sequence.
    ///
    /// A failed login stops everything: neither authenticated endpoint is called.
    /// Otherwise both are called, and only the children response decides the outcome.
    pub async fn run(mut self) -> SmokeOutcome {
        println!("🧪 Testing KidMate API endpoints at {}", self.client.base_url());
        println!("{SEPARATOR}");

        let Ok(access_token) = self.attempt_login().await else {
            let outcome = SmokeOutcome::LoginFailed;
            println!("\n{outcome}");
            return outcome;
        };
        self.client.set_access_token(access_token);

        println!("\n{SEPARATOR}");
        println!("Testing authenticated endpoints...");

        // The current user is informational; its failure has already been printed.
        let _ = self.fetch_current_user().await;
        let children = self.fetch_children().await.ok();

        let outcome = SmokeOutcome::from_children(children.as_ref());
        println!("\n{outcome}");
        outcome
    }

    /// Logs in, yielding the access token on success.
    pub async fn attempt_login(&self) -> Result<String, ApiError> {
        let response = self.client.login(&self.credentials).await;
        let result = print_response(Step::Login, response)
            .and_then(|response| response.access_token());

        match &result {
            Ok(access_token) => {
                println!("✅ Login successful!");
                println!("Access Token: {access_token}");
            }
            // The login itself went through; there was simply nothing to use.
            Err(ApiError::MissingToken) => {
                debug!("login response carried no access token");
                println!("✅ Login successful!");
                println!("Access Token: Not found");
            }
            Err(error) => report_failure(Step::Login, error),
        }
        result
    }

    pub async fn fetch_current_user(&self) -> Result<Value, ApiError> {
        let response = self.client.me().await;
        json_step(Step::Me, response)
    }

    pub async fn fetch_children(&self) -> Result<Value, ApiError> {
        let response = self.client.children().await;
        json_step(Step::GetChildren, response)
    }
}

/// Prints the raw status and body of whatever we were given.
fn print_response(
    step: Step,
    response: Result<ApiResponse, ApiError>,
) -> Result<ApiResponse, ApiError> {
    let response = response?;
    let spacer = match step {
        Step::Login => "",
        _ => "\n",
    };
    println!(
        "{spacer}{} Response Status: {}",
        step.label(),
        response.status.as_u16()
    );
    println!("{} Response: {}", step.label(), response.body);
    Ok(response)
}

fn json_step(step: Step, response: Result<ApiResponse, ApiError>) -> Result<Value, ApiError> {
    let result = print_response(step, response).and_then(|response| response.json());
    match &result {
        Ok(_) => println!("✅ {} successful!", step.name()),
        Err(error) => report_failure(step, error),
    }
    result
}

fn report_failure(step: Step, error: &ApiError) {
    debug!(?step, ?error, "step failed");
    match error {
        ApiError::Status { body, .. } => println!("❌ {} failed: {body}", step.name()),
        error => println!("❌ {} error: {error}", step.name()),
    }
}
