//! Ad-server response header names and sentinel values.
//!
//! These spellings are the integration contract with third-party ad-serving
//! responses and must not be changed.

/// Dispatch key selecting the ad content variant.
pub const AD_TYPE: &str = "X-Adtype";
/// Warm-up flag; `"1"` means the ad unit is not serving yet.
pub const WARMUP: &str = "X-Warmup";
/// Class name for the structured custom-event system.
pub const CUSTOM_EVENT_NAME: &str = "X-Custom-Event-Class-Name";
/// Opaque data accompanying a structured custom event.
pub const CUSTOM_EVENT_DATA: &str = "X-Custom-Event-Class-Data";
/// Selector for the legacy custom-event system.
pub const CUSTOM_SELECTOR: &str = "X-Customselector";
/// Structured parameters for native ads.
pub const NATIVE_PARAMS: &str = "X-Nativeparams";
/// Extended ad type accompanying native ads.
pub const FULL_AD_TYPE: &str = "X-Fulladtype";
/// Serving ad network, logged only.
pub const NETWORK_TYPE: &str = "X-Networktype";
/// URL prefix that redirects navigation to the external browser.
pub const LAUNCH_PAGE: &str = "X-Launchpage";
/// URL prepended to links for click tracking.
pub const CLICKTHROUGH: &str = "X-Clickthrough";
/// Fallback URL to load when the current request fails.
pub const FAIL_URL: &str = "X-Failurl";
/// URL fetched to record an impression.
pub const IMPRESSION_URL: &str = "X-Imptracker";
/// Scrollability flag for the rendered content (`"1"` enables).
pub const SCROLLABLE: &str = "X-Scrollable";
/// Creative width in density-independent pixels.
pub const WIDTH: &str = "X-Width";
/// Creative height in density-independent pixels.
pub const HEIGHT: &str = "X-Height";
/// Auto-refresh interval in seconds.
pub const REFRESH_TIME: &str = "X-Refreshtime";
/// Orientation constraint for the creative.
pub const ORIENTATION: &str = "X-Orientation";

/// `X-Adtype` sentinel meaning no inventory.
pub const AD_TYPE_CLEAR: &str = "clear";
/// `X-Adtype` value selecting the custom-event path.
pub const AD_TYPE_CUSTOM: &str = "custom";
/// `X-Adtype` value for rich-media (interactive markup) ads.
pub const AD_TYPE_MRAID: &str = "mraid";
/// `X-Adtype` value for plain HTML ads.
pub const AD_TYPE_HTML: &str = "html";
/// Flag value treated as "on" for `X-Warmup` and `X-Scrollable`.
pub const FLAG_ON: &str = "1";
