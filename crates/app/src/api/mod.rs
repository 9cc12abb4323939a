//! Storefront API client
//!
//! Thin JSON client over the storefront REST API. Every request carries the
//! current session's bearer token; a 401 from any endpoint signs the user out.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::stores::SessionStore;

pub mod errors;

pub use errors::{ApiError, extract_detail};

/// Connection settings for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `"https://api.example.com"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client that authenticates with `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    /// `GET path`, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx status or an
    /// undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;

        Ok(response.json().await?)
    }

    /// `POST path` with a JSON body, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx status or an
    /// undecodable body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;

        Ok(response.json().await?)
    }

    /// `POST path` without a body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx status.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path)).await?;

        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.http.request(method, url);

        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        debug!(%status, url = %response.url(), "storefront api response");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = extract_detail(&text);

        if status == StatusCode::UNAUTHORIZED {
            warn!("session rejected by storefront api, signing out");

            if let Err(error) = self.session.logout() {
                warn!(%error, "failed to clear rejected session");
            }

            return Err(ApiError::Unauthorized { detail });
        }

        Err(ApiError::Status { status, detail })
    }
}
