//! Display surface collaborator interface.
//!
//! The surface owns presentation: it renders fetched content, decides its
//! own visibility and layout, and holds the refresh interval state. The
//! fetch subsystem never owns a surface; the coordinator keeps a weak
//! reference and every asynchronous application is preceded by a liveness
//! check through [`AdSurface::is_torn_down`].

use crate::classify::ResponseDirectives;
use crate::error::{AdapterError, ErrorReason};
use std::collections::HashMap;

/// The external display surface that presents fetched ad content.
///
/// All methods are invoked on the surface's serialized context; a surface
/// implementation does not need internal locking against the fetch
/// subsystem beyond what its own threads require.
pub trait AdSurface: Send + Sync {
    /// Returns true once the surface has been torn down. Applying content
    /// to a torn-down surface is a no-op.
    fn is_torn_down(&self) -> bool;

    /// Hands a structured custom event to the surface's custom-event
    /// bridge. The params map carries the event class name and optional
    /// data under their header-name keys.
    fn load_custom_event(&self, params: HashMap<String, String>) -> Result<(), AdapterError>;

    /// Hands a legacy custom-event method name to the surface's registry-
    /// backed bridge.
    fn load_legacy_custom_event(&self, method_name: &str) -> Result<(), AdapterError>;

    /// Loads native ad content described by the params map.
    fn load_native_content(&self, params: HashMap<String, String>);

    /// Loads HTML ad markup.
    fn load_html_content(&self, markup: String);

    /// Called exactly once after a variant has been applied successfully.
    fn on_fetch_succeeded(&self);

    /// Called exactly once per reported failure.
    fn on_fetch_failed(&self, reason: ErrorReason);

    /// Current auto-refresh interval in milliseconds; zero means disabled.
    fn refresh_interval_ms(&self) -> u64;

    /// Replaces the auto-refresh interval.
    fn set_refresh_interval_ms(&self, interval_ms: u64);

    /// Receives the parsed per-response directives (click handling,
    /// geometry, orientation). Refresh cadence is handled separately by the
    /// coordinator. The default implementation ignores them.
    fn apply_settings(&self, directives: &ResponseDirectives) {
        let _ = directives;
    }
}
