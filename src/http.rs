//! HTTP client abstraction for the fetch executor.
//!
//! The executor talks to the network through the [`AdHttpClient`] trait so
//! tests can inject scripted clients. A fresh client is built per fetch task
//! through [`ClientFactory`]; dropping the client on any exit path releases
//! its connection resources.

use crate::config::FetchConfig;
use crate::error::FetchError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// A completed ad-server response.
///
/// Headers are available even when the body is missing; status is the raw
/// HTTP status code. `body` is `None` when the server returned no entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, first occurrence wins
    pub headers: ResponseHeaders,
    /// Response body, absent when the server sent no entity
    pub body: Option<String>,
}

/// Response header collection.
///
/// Preserves insertion order and resolves lookups to the first occurrence of
/// a name, matching the ad server contract. Name comparison is ASCII
/// case-insensitive since transports may normalize header casing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    /// Creates an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header. Earlier insertions shadow later ones on lookup.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the value of the first header with the given name.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if no headers are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of header entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ResponseHeaders {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Trait for asynchronous ad-request HTTP operations.
///
/// Implementors perform exactly one GET per call, with the configured
/// timeout applied to both connect and read phases.
pub trait AdHttpClient: Send + Sync {
    /// Performs an HTTP GET request with the given User-Agent header.
    ///
    /// # Arguments
    ///
    /// * `url` - The ad request URL
    /// * `user_agent` - Value for the `User-Agent` header
    ///
    /// # Returns
    ///
    /// The completed response, or a [`FetchError`] for transport failures
    /// and timeouts.
    fn get(
        &self,
        url: &str,
        user_agent: &str,
    ) -> impl Future<Output = Result<AdResponse, FetchError>> + Send;
}

/// Builds one HTTP client per fetch task.
///
/// The executor owns the returned client for the duration of exactly one
/// request and drops it on completion.
pub trait ClientFactory: Send + Sync + 'static {
    /// Concrete client type produced by this factory.
    type Client: AdHttpClient + Send + Sync + 'static;

    /// Creates a client configured for a single fetch.
    fn create(&self, config: &FetchConfig) -> Result<Self::Client, FetchError>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client whose connect and total-request timeouts are both
    /// set to `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl AdHttpClient for ReqwestClient {
    async fn get(&self, url: &str, user_agent: &str) -> Result<AdResponse, FetchError> {
        trace!(url, "ad request starting");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, is_connect = e.is_connect(), "ad request failed");
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let mut headers = ResponseHeaders::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }
        debug!(url, status, "ad response received");

        let text = response.text().await.map_err(|e| {
            warn!(url, error = %e, "failed to read ad response body");
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        // An empty entity is indistinguishable from a missing one here;
        // both are invalid for every ad type the server can deliver.
        let body = if text.is_empty() { None } else { Some(text) };

        Ok(AdResponse {
            status,
            headers,
            body,
        })
    }
}

/// Factory producing a fresh [`ReqwestClient`] per fetch task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestClientFactory;

impl ClientFactory for ReqwestClientFactory {
    type Client = ReqwestClient;

    fn create(&self, config: &FetchConfig) -> Result<ReqwestClient, FetchError> {
        ReqwestClient::new(config.timeout())
    }
}
