//! Per-response surface directives.
//!
//! Every well-formed ad response carries a set of headers that reconfigure
//! the display surface: click handling, creative geometry, refresh cadence.
//! They are parsed once, off the serialized context, and applied by the
//! coordinator only when the completion is fresh.

use super::headers;
use crate::backoff;
use crate::error::FetchError;
use crate::http::ResponseHeaders;

/// Parsed surface directives from an ad response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDirectives {
    /// Serving ad network, for logging.
    pub network_type: Option<String>,
    /// URL prefix that sends navigation to the external browser.
    pub launch_page_prefix: Option<String>,
    /// URL prepended to links for click tracking.
    pub clickthrough_url: Option<String>,
    /// Fallback URL to load when this ad fails.
    pub fail_url: Option<String>,
    /// URL fetched to record an impression.
    pub impression_url: Option<String>,
    /// Whether the rendered content may scroll.
    pub scrollable: bool,
    /// Creative width; zero unless both width and height were sent.
    pub width: u32,
    /// Creative height; zero unless both width and height were sent.
    pub height: u32,
    /// Auto-refresh interval in milliseconds, clamped to the allowed floor.
    /// `None` when the server sent no refresh header, which disables
    /// auto-refresh entirely.
    pub refresh_interval_ms: Option<u64>,
    /// Orientation constraint for the creative.
    pub orientation: Option<String>,
}

/// Parses surface directives out of the response headers.
///
/// Integer-valued headers parse strictly: a malformed width, height or
/// refresh value aborts the fetch with [`FetchError::MalformedHeader`].
/// Width and height are taken together or not at all.
pub fn parse_directives(headers: &ResponseHeaders) -> Result<ResponseDirectives, FetchError> {
    let mut directives = ResponseDirectives {
        network_type: headers.first(headers::NETWORK_TYPE).map(str::to_string),
        launch_page_prefix: headers.first(headers::LAUNCH_PAGE).map(str::to_string),
        clickthrough_url: headers.first(headers::CLICKTHROUGH).map(str::to_string),
        fail_url: headers.first(headers::FAIL_URL).map(str::to_string),
        impression_url: headers.first(headers::IMPRESSION_URL).map(str::to_string),
        scrollable: headers.first(headers::SCROLLABLE) == Some(headers::FLAG_ON),
        ..ResponseDirectives::default()
    };

    if let (Some(width), Some(height)) = (
        headers.first(headers::WIDTH),
        headers.first(headers::HEIGHT),
    ) {
        directives.width = parse_int(headers::WIDTH, width.trim())?;
        directives.height = parse_int(headers::HEIGHT, height.trim())?;
    }

    if let Some(seconds) = headers.first(headers::REFRESH_TIME) {
        let seconds: i64 = seconds.parse().map_err(|_| FetchError::MalformedHeader {
            header: headers::REFRESH_TIME,
            value: seconds.to_string(),
        })?;
        let interval_ms = backoff::clamp_server_interval(seconds.saturating_mul(1000));
        directives.refresh_interval_ms = Some(interval_ms);
    }

    directives.orientation = headers.first(headers::ORIENTATION).map(str::to_string);

    Ok(directives)
}

fn parse_int(header: &'static str, value: &str) -> Result<u32, FetchError> {
    value.parse().map_err(|_| FetchError::MalformedHeader {
        header,
        value: value.to_string(),
    })
}
