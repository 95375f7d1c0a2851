//! Ad content variants and their application to the surface.
//!
//! A successful fetch produces exactly one [`AdVariant`]. Applying a
//! variant performs exactly one side effect against the surface; the
//! variant is consumed in the process, so its payload is released as soon
//! as application finishes or the variant is discarded as stale.

use crate::error::ErrorReason;
use crate::surface::AdSurface;
use std::collections::HashMap;
use tracing::{debug, info};

/// One member of the tagged union of successful fetch outcomes.
///
/// Variants hold only payload. The surface is passed in at application time
/// and checked for liveness; a variant never keeps the surface alive across
/// an asynchronous boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdVariant {
    /// Legacy custom event carrying the server-supplied selector, which may
    /// be absent when the server named none.
    LegacyCustomEvent {
        /// Registered handler name to invoke.
        method_name: Option<String>,
    },
    /// Structured custom event with a params map keyed by header names.
    CustomEvent {
        /// Event class name and optional data.
        params: HashMap<String, String>,
    },
    /// Native ad described by a params map keyed by header names.
    NativeAd {
        /// Ad type, native params and optional extended type.
        params: HashMap<String, String>,
    },
    /// Plain HTML ad markup.
    HtmlAd {
        /// Raw markup to render.
        markup: String,
    },
}

impl AdVariant {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AdVariant::LegacyCustomEvent { .. } => "legacy-custom-event",
            AdVariant::CustomEvent { .. } => "custom-event",
            AdVariant::NativeAd { .. } => "native",
            AdVariant::HtmlAd { .. } => "html",
        }
    }

    /// Applies this variant to the surface.
    ///
    /// No-ops (successfully) when the surface is already torn down.
    /// Custom-event dispatch that finds no registered handler reports
    /// [`ErrorReason::AdapterNotFound`]; the caller forwards that reason to
    /// the surface rather than treating it as a fetch failure.
    ///
    /// Consumes the variant; dropping the payload afterwards releases all
    /// held strings and maps.
    pub fn apply<S: AdSurface + ?Sized>(self, surface: &S) -> Result<(), ErrorReason> {
        if surface.is_torn_down() {
            debug!(kind = self.kind(), "surface torn down, dropping ad variant");
            return Ok(());
        }

        match self {
            AdVariant::LegacyCustomEvent { method_name: None } => {
                // The server selected the legacy path but named no method.
                info!("no legacy custom event method supplied by server");
                Err(ErrorReason::AdapterNotFound)
            }
            AdVariant::LegacyCustomEvent {
                method_name: Some(method_name),
            } => {
                info!(%method_name, "performing legacy custom event");
                surface
                    .load_legacy_custom_event(&method_name)
                    .map_err(|_| ErrorReason::AdapterNotFound)
            }
            AdVariant::CustomEvent { params } => {
                info!("performing custom event");
                surface
                    .load_custom_event(params)
                    .map_err(|_| ErrorReason::AdapterNotFound)
            }
            AdVariant::NativeAd { params } => {
                info!("loading native ad");
                surface.load_native_content(params);
                Ok(())
            }
            AdVariant::HtmlAd { markup } => {
                info!(bytes = markup.len(), "loading html ad");
                surface.load_html_content(markup);
                Ok(())
            }
        }
    }
}
