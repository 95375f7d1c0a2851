//! Ad request URL construction.
//!
//! Requests go to a fixed ad-serving endpoint with query parameters
//! describing the ad unit and the device context. Parameter spellings and
//! order are part of the server contract.

use crate::config::{FetchConfig, PROTOCOL_VERSION};
use sha1::{Digest, Sha1};
use thiserror::Error;
use url::Url;

/// Failures while building an ad request URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The configured endpoint is not a valid base URL.
    #[error("invalid ad endpoint {0:?}")]
    InvalidEndpoint(String),
}

/// Device orientation reported to the ad server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceOrientation {
    /// Device held upright.
    Portrait,
    /// Device held sideways.
    Landscape,
    /// Square display.
    Square,
    /// Orientation could not be determined.
    #[default]
    Unknown,
}

impl DeviceOrientation {
    /// Wire value for the `o` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            DeviceOrientation::Portrait => "p",
            DeviceOrientation::Landscape => "l",
            DeviceOrientation::Square => "s",
            DeviceOrientation::Unknown => "u",
        }
    }
}

/// Builder for ad request URLs.
///
/// # Example
///
/// ```
/// use adstream::config::FetchConfig;
/// use adstream::request::AdRequestBuilder;
///
/// let config = FetchConfig::default();
/// let url = AdRequestBuilder::new("agltb3B1Yi1pbmNyDQ")
///     .with_keywords("sports")
///     .with_timezone_offset("+0000")
///     .build(&config)
///     .unwrap();
/// assert!(url.contains("id=agltb3B1Yi1pbmNyDQ"));
/// ```
#[derive(Debug, Clone)]
pub struct AdRequestBuilder {
    ad_unit_id: String,
    keywords: Option<String>,
    location: Option<(f64, f64)>,
    timezone_offset: Option<String>,
    orientation: DeviceOrientation,
    screen_density: f32,
    rich_media_capable: bool,
    device_id: Option<String>,
}

impl AdRequestBuilder {
    /// Creates a builder for the given ad unit.
    pub fn new(ad_unit_id: impl Into<String>) -> Self {
        Self {
            ad_unit_id: ad_unit_id.into(),
            keywords: None,
            location: None,
            timezone_offset: None,
            orientation: DeviceOrientation::Unknown,
            screen_density: 1.0,
            rich_media_capable: true,
            device_id: None,
        }
    }

    /// Sets the targeting keyword string. Empty keywords are omitted from
    /// the request.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Sets the device location as latitude and longitude.
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    /// Sets the timezone offset string, e.g. `"+0100"`. When unset, the
    /// local offset is computed at build time.
    pub fn with_timezone_offset(mut self, offset: impl Into<String>) -> Self {
        self.timezone_offset = Some(offset.into());
        self
    }

    /// Sets the device orientation.
    pub fn with_orientation(mut self, orientation: DeviceOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the screen density scale factor.
    pub fn with_screen_density(mut self, density: f32) -> Self {
        self.screen_density = density;
        self
    }

    /// Declares whether the surface can render rich-media (interactive
    /// markup) ads. Enabled by default.
    pub fn with_rich_media_capable(mut self, capable: bool) -> Self {
        self.rich_media_capable = capable;
        self
    }

    /// Sets the raw device identifier. It is never sent as-is; the request
    /// carries a SHA-1 digest prefixed with `sha:`.
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Builds the request URL against the configured endpoint.
    pub fn build(&self, config: &FetchConfig) -> Result<String, RequestError> {
        let mut url = Url::parse(config.endpoint())
            .map_err(|_| RequestError::InvalidEndpoint(config.endpoint().to_string()))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("v", &PROTOCOL_VERSION.to_string());
            query.append_pair("id", &self.ad_unit_id);
            query.append_pair("nv", config.sdk_version());
            query.append_pair("udid", &hashed_device_id(self.device_id.as_deref()));

            if let Some(keywords) = self.keywords.as_deref().filter(|k| !k.is_empty()) {
                query.append_pair("q", keywords);
            }
            if let Some((latitude, longitude)) = self.location {
                query.append_pair("ll", &format!("{},{}", latitude, longitude));
            }

            let timezone = self
                .timezone_offset
                .clone()
                .unwrap_or_else(local_timezone_offset);
            query.append_pair("z", &timezone);
            query.append_pair("o", self.orientation.as_param());
            query.append_pair("sc_a", &self.screen_density.to_string());

            if self.rich_media_capable {
                query.append_pair("mr", "1");
            }
        }

        Ok(url.into())
    }
}

/// Joins two keyword sources with a comma, skipping empty parts.
pub fn merge_keywords(keywords: Option<&str>, addition: Option<&str>) -> Option<String> {
    match (
        keywords.filter(|k| !k.is_empty()),
        addition.filter(|a| !a.is_empty()),
    ) {
        (Some(keywords), Some(addition)) => Some(format!("{},{}", keywords, addition)),
        (Some(keywords), None) => Some(keywords.to_string()),
        (None, Some(addition)) => Some(addition.to_string()),
        (None, None) => None,
    }
}

/// SHA-1 digest of the device identifier, `sha:` prefixed. An absent
/// identifier hashes to the bare prefix.
fn hashed_device_id(device_id: Option<&str>) -> String {
    match device_id {
        Some(device_id) => {
            let digest = Sha1::digest(device_id.as_bytes());
            format!("sha:{}", hex::encode(digest))
        }
        None => "sha:".to_string(),
    }
}

/// Local timezone offset in `+HHMM` form.
fn local_timezone_offset() -> String {
    chrono::Local::now().format("%z").to_string()
}
