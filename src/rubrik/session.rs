//! Rubrik Session Management
//!
//! Owns the shared HTTP client, the appliance credentials, and the bearer token
//! obtained from `POST /api/v1/session`. Every API call goes through
//! [`RubrikSession::make_request`], which attaches the token and turns non-2xx
//! responses into [`ExporterError::HttpStatus`].

use crate::config::RubrikConfig;
use crate::error::{ExporterError, Result};
use crate::rubrik::types::SessionToken;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Path of the session login endpoint
pub const LOGIN_PATH: &str = "/api/v1/session";

/// The appliance expects this exact value rather than `application/json`.
pub const CONTENT_TYPE_VALUE: &str = "text/JSON";

/// Per-call request parameters
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// Optional request body, sent verbatim
    pub body: Option<String>,
    /// Optional extra header as (name, value)
    pub header: Option<(String, String)>,
    /// Query parameters in the order they are encoded. Keys may repeat.
    pub query: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.header = Some((name.to_string(), value.to_string()));
        self
    }
}

/// Authenticated session against a Rubrik appliance
///
/// The token is stored behind an async `RwLock` so one session can be shared
/// by the collection loop and any other task. A 401 from the appliance clears
/// the token; the next request logs in again.
pub struct RubrikSession {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: SecretString,
    token: RwLock<Option<String>>,
}

impl RubrikSession {
    /// Build a session without logging in
    pub fn new(config: &RubrikConfig) -> Result<Self> {
        let base_url = config.url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if !config.verify_ssl {
            warn!("TLS certificate verification is disabled for {}", base_url);
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }
        let http = builder
            .build()
            .map_err(|e| ExporterError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            token: RwLock::new(None),
        })
    }

    /// Build a session and log in before returning
    pub async fn connect(config: &RubrikConfig) -> Result<Self> {
        info!("Creating new Rubrik API session for {}", config.url);
        let session = Self::new(config)?;
        session.login().await?;
        Ok(session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Obtain a fresh session token using basic auth
    pub async fn login(&self) -> Result<()> {
        let url = self.request_url(LOGIN_PATH, &[])?;
        debug!("Logging in at {}", url);

        let resp = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(|e| ExporterError::Auth(format!("login request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExporterError::Auth(format!(
                "login rejected by Rubrik (HTTP {})",
                status.as_u16()
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ExporterError::Auth(format!("failed to read login response: {}", e)))?;
        let session: SessionToken = serde_json::from_slice(&body)
            .map_err(|e| ExporterError::Auth(format!("invalid login response: {}", e)))?;

        match session.token {
            Some(token) if !token.is_empty() => {
                *self.token.write().await = Some(token);
                info!("Successfully authenticated to Rubrik as {}", self.username);
                Ok(())
            }
            _ => Err(ExporterError::Auth(
                "login response did not contain a session token".to_string(),
            )),
        }
    }

    /// Build `base_url + path` with the query parameters appended in order
    pub fn request_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    async fn current_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        info!("No active Rubrik session, logging in");
        self.login().await?;
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| ExporterError::Auth("no session token after login".to_string()))
    }

    /// Issue an authenticated request
    ///
    /// Returns the response only for 2xx statuses. Anything else is an
    /// [`ExporterError::HttpStatus`] and the body is discarded, so callers
    /// never try to decode an error page.
    pub async fn make_request(
        &self,
        method: Method,
        path: &str,
        params: &RequestParams,
    ) -> Result<reqwest::Response> {
        let url = self.request_url(path, &params.query)?;
        let token = self.current_token().await?;
        debug!("Requested action: {} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, CONTENT_TYPE_VALUE)
            .header(AUTHORIZATION, format!("Bearer {}", token));
        if let Some((name, value)) = &params.header {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &params.body {
            request = request.body(body.clone());
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("API Error: HTTP {} from {}", status.as_u16(), path);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                warn!("Session expired, will re-authenticate on next request");
                *self.token.write().await = None;
            }
            return Err(ExporterError::HttpStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(resp)
    }

    /// GET `path` and decode the JSON body into `T`
    pub async fn get_json<T>(&self, path: &str, params: &RequestParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = self.make_request(Method::GET, path, params).await?;
        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            debug!("Failed to decode response from {}: {}", path, e);
            ExporterError::Decode(e)
        })
    }
}
