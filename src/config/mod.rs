//! Fetch configuration.

mod defaults;

pub use defaults::{
    DEFAULT_ENDPOINT, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_USER_AGENT, PROTOCOL_VERSION,
};

use std::time::Duration;

/// Configuration for ad fetching.
///
/// Groups the parameters needed to issue ad requests, providing sensible
/// defaults while allowing customization.
///
/// # Example
///
/// ```
/// use adstream::config::FetchConfig;
///
/// // Using defaults
/// let config = FetchConfig::default();
/// assert_eq!(config.timeout_ms(), 10_000);
///
/// // Custom configuration
/// let config = FetchConfig::new()
///     .with_endpoint("https://ads.example.net/m/ad")
///     .with_timeout_ms(5_000)
///     .with_user_agent("MyApp/1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Base URL of the ad-serving endpoint
    endpoint: String,
    /// Per-request timeout in milliseconds (connect and read)
    timeout_ms: u64,
    /// User-Agent header value, normally the surface's stored string
    user_agent: String,
    /// SDK version reported as the `nv` query parameter
    sdk_version: String,
}

impl FetchConfig {
    /// Create a new fetch configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ad-serving endpoint base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the per-request timeout in milliseconds.
    ///
    /// The timeout applies to both connection establishment and response
    /// read. Default: 10 seconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the User-Agent string sent with every ad request.
    ///
    /// Surfaces should store their own User-Agent up front and pass it here.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the SDK version string reported to the ad server.
    pub fn with_sdk_version(mut self, sdk_version: impl Into<String>) -> Self {
        self.sdk_version = sdk_version.into();
        self
    }

    /// Get the ad-serving endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the per-request timeout in milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Get the per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the User-Agent string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the SDK version string.
    pub fn sdk_version(&self) -> &str {
        &self.sdk_version
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sdk_version: crate::VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_ms(), DEFAULT_FETCH_TIMEOUT_MS);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.sdk_version(), crate::VERSION);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(FetchConfig::new(), FetchConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = FetchConfig::new()
            .with_endpoint("https://ads.example.net/m/ad")
            .with_timeout_ms(5_000)
            .with_user_agent("MyApp/1.0")
            .with_sdk_version("2.0.0");

        assert_eq!(config.endpoint(), "https://ads.example.net/m/ad");
        assert_eq!(config.timeout_ms(), 5_000);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.user_agent(), "MyApp/1.0");
        assert_eq!(config.sdk_version(), "2.0.0");
    }

    #[test]
    fn test_with_timeout_leaves_other_fields() {
        let config = FetchConfig::new().with_timeout_ms(30_000);
        assert_eq!(config.timeout_ms(), 30_000);
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT); // Unchanged
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT); // Unchanged
    }
}
