//! Pipeline backend HTTP client
//!
//! Provides a thin authenticated wrapper over `reqwest::Client` that handles
//! bearer headers, base URL construction, and timeouts. The typed endpoint
//! calls live in [`crate::endpoints`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scribe_api::client::ApiClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new("https://scribe.example.com", "access-token")?;
//! let snapshot = client.get_dashboard().await?;
//! println!("{} files", snapshot.total);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use anyhow::Context;
use tracing::debug;

/// Default per-request timeout when none is configured
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API path prefix shared by every endpoint
pub(crate) const API_PREFIX: &str = "/api/v1";

/// HTTP client for the pipeline backend API
///
/// Wraps `reqwest::Client` with bearer authentication and base URL
/// construction. Cheap to clone is not needed; share via `Arc` like the
/// other adapters.
pub struct ApiClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests (scheme + host, no trailing slash)
    base_url: String,
    /// Current bearer access token
    access_token: String,
}

impl ApiClient {
    /// Creates a new ApiClient for the given backend
    ///
    /// # Arguments
    /// * `base_url` - Backend origin, e.g. `https://scribe.example.com`
    /// * `access_token` - A valid bearer token for the API
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, access_token, DEFAULT_TIMEOUT)
    }

    /// Creates a new ApiClient with an explicit request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            access_token: access_token.into(),
        })
    }

    /// Updates the access token (e.g., after the operator rotates it)
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
        debug!("Updated ApiClient access token");
    }

    /// Returns a reference to the current access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Automatically prepends the base URL and `/api/v1` prefix and adds the
    /// Authorization header.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, PUT, DELETE, etc.)
    /// * `path` - API path relative to the version prefix
    ///   (e.g., "/main/dashboard/")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("https://scribe.example.com", "test-token").unwrap();
        assert_eq!(client.access_token(), "test-token");
        assert_eq!(client.base_url(), "https://scribe.example.com");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = ApiClient::new("https://scribe.example.com/", "t").unwrap();
        assert_eq!(client.base_url(), "https://scribe.example.com");
    }

    #[test]
    fn test_set_access_token() {
        let mut client = ApiClient::new("http://localhost:8000", "old-token").unwrap();
        client.set_access_token("new-token");
        assert_eq!(client.access_token(), "new-token");
    }

    #[test]
    fn test_request_builder() {
        let client = ApiClient::new("http://localhost:8000", "test-token").unwrap();
        let request = client
            .request(Method::GET, "/main/dashboard/")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/v1/main/dashboard/"
        );
        let auth_header = request
            .headers()
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(auth_header, "Bearer test-token");
    }
}
