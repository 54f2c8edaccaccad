//! # HTTP Client Utilities
//!
//! Shared HTTP client for marketplace source clients.
//!
//! Wraps `reqwest` with a per-source request timeout, JSON decoding, and a
//! mapping from transport failures and HTTP status codes onto
//! [`SourceError`] attributed to the owning source.
//!
//! # Examples
//!
//! ```ignore
//! use product_composite::domain::value_objects::Source;
//! use product_composite::infrastructure::sources::http_client::HttpClient;
//!
//! let client = HttpClient::new(Source::Tiki, 3000)?;
//! let response: MyResponse = client.get_with_params(url, &[("q", "iphone")]).await?;
//! ```

use crate::domain::value_objects::Source;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for source clients.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Source that errors are attributed to.
    origin: Source,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Configuration` if the client cannot be created.
    pub fn new(origin: Source, timeout_ms: u64) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SourceError::configuration(origin, format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            origin,
            timeout_ms,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the source this client serves.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Source {
        self.origin
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Timeout` if the request times out.
    /// Returns `SourceError::Unavailable` if the request fails, the source
    /// answers with an error status, or the body cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> SourceResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                if e.is_timeout() {
                    SourceError::timeout(self.origin, Some(self.timeout_ms))
                } else {
                    SourceError::unavailable(self.origin, format!("Failed to parse response: {}", e))
                }
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a SourceError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout(self.origin, Some(self.timeout_ms))
        } else if error.is_connect() {
            SourceError::unavailable(self.origin, format!("Connection failed: {}", error))
        } else {
            SourceError::unavailable(self.origin, format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a SourceError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> SourceError {
        match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                SourceError::timeout(self.origin, None)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                SourceError::unavailable(self.origin, "Rate limit exceeded")
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SourceError::unavailable(self.origin, format!("Access denied ({})", status))
            }
            s if s.is_server_error() => {
                SourceError::unavailable(self.origin, format!("Server error ({}): {}", status, body))
            }
            _ => SourceError::unavailable(self.origin, format!("HTTP error ({}): {}", status, body)),
        }
    }
}
