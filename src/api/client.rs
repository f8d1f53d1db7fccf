use super::credentials::Credentials;
use reqwest::{header, RequestBuilder, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// The login endpoint, relative to the base URL.
const LOGIN_PATH: &str = "api/login";

/// Information about the currently authenticated user.
const ME_PATH: &str = "api/me";

/// All children belonging to the authenticated parent.
const CHILDREN_PATH: &str = "api/get-children";

/// Possible failures while talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed JSON body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no access_token in login response")]
    MissingToken,
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A response as received off the wire, before any interpretation.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Parses the body as JSON, provided the server answered with 200 OK.
    /// Any other status is treated as a failure, even within the 2xx range.
    pub fn json(&self) -> Result<Value, ApiError> {
        if self.status != StatusCode::OK {
            return Err(ApiError::Status {
                status: self.status,
                body: self.body.clone(),
            });
        }

        Ok(serde_json::from_str(&self.body)?)
    }

    /// Obtains the access token from a successful login response.
    /// An empty token is as good as none.
    pub fn access_token(&self) -> Result<String, ApiError> {
        self.json()?
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(ApiError::MissingToken)
    }
}

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    /// Always ends with `/`, so that endpoint paths append rather than replace.
    base_url: Url,
    /// The bearer token for authenticated requests, once we've logged in.
    access_token: Option<String>,
}

impl ApiClient {
    /// Creates a new, unauthenticated client for the API at `base_url`.
    pub fn new(mut base_url: Url) -> Self {
        // `Url::join` would otherwise drop the final path segment of e.g. `http://host/prefix`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
            access_token: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attaches the given token to every subsequent authenticated request.
    pub fn set_access_token(&mut self, access_token: String) {
        self.access_token = Some(access_token);
    }

    /// POSTs our credentials to the login endpoint.
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(LOGIN_PATH)?;
        debug!(%url, "POST");

        let request = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(credentials);
        execute(request).await
    }

    /// Fetches the currently authenticated user.
    pub async fn me(&self) -> Result<ApiResponse, ApiError> {
        self.authorized_get(ME_PATH).await
    }

    /// Fetches the children of the currently authenticated user.
    pub async fn children(&self) -> Result<ApiResponse, ApiError> {
        self.authorized_get(CHILDREN_PATH).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn authorized_get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, authorized = self.access_token.is_some(), "GET");

        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json");

        // Without a token we send no Authorization header at all.
        if let Some(access_token) = &self.access_token {
            request = request.bearer_auth(access_token);
        }

        execute(request).await
    }
}

/// Sends the request and reads its body in full, whatever the status.
async fn execute(request: RequestBuilder) -> Result<ApiResponse, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(%status, "response received");

    let body = response.text().await?;
    Ok(ApiResponse { status, body })
}
