//! Response classification.
//!
//! Turns a completed 200 response into a typed fetch outcome. The decision
//! order and its fallback defaults are the integration contract with
//! third-party ad-serving responses; see [`classify`].

mod directives;
pub mod headers;

pub use directives::{parse_directives, ResponseDirectives};

use crate::fetch::FetchOutcome;
use crate::http::ResponseHeaders;
use crate::variant::AdVariant;
use std::collections::HashMap;
use tracing::debug;

/// Classifies a well-formed ad response into a fetch outcome.
///
/// Pure function over the response headers and body. Decision order, first
/// match wins:
///
/// 1. warm-up flag set: the ad unit is not serving yet
/// 2. ad type absent or `"clear"`: no inventory
/// 3. ad type `"custom"`: structured custom event when the class-name
///    header is present, legacy custom event otherwise
/// 4. ad type `"mraid"`: native ad whose params carry the raw body
/// 5. any other non-`"html"` ad type: native ad with params from the type,
///    optional extended type and native params (defaulting to `"{}"`)
/// 6. ad type `"html"`: HTML ad carrying the body as markup
pub fn classify(response_headers: &ResponseHeaders, body: &str) -> FetchOutcome {
    if response_headers.first(headers::WARMUP) == Some(headers::FLAG_ON) {
        debug!("ad unit is still warming up");
        return FetchOutcome::WarmingUp;
    }

    let ad_type = match response_headers.first(headers::AD_TYPE) {
        None | Some(headers::AD_TYPE_CLEAR) => {
            debug!("no inventory for ad unit");
            return FetchOutcome::NoInventory;
        }
        Some(ad_type) => ad_type,
    };

    let variant = match ad_type {
        headers::AD_TYPE_CUSTOM => classify_custom(response_headers),
        headers::AD_TYPE_MRAID => AdVariant::NativeAd {
            params: HashMap::from([
                (headers::AD_TYPE.to_string(), ad_type.to_string()),
                (headers::NATIVE_PARAMS.to_string(), body.to_string()),
            ]),
        },
        headers::AD_TYPE_HTML => AdVariant::HtmlAd {
            markup: body.to_string(),
        },
        other => classify_native(response_headers, other),
    };

    FetchOutcome::Success(variant)
}

/// Custom ad type: prefer the structured custom-event system, falling back
/// to the legacy selector for older integrations.
fn classify_custom(response_headers: &ResponseHeaders) -> AdVariant {
    if let Some(class_name) = response_headers.first(headers::CUSTOM_EVENT_NAME) {
        let mut params = HashMap::from([(
            headers::CUSTOM_EVENT_NAME.to_string(),
            class_name.to_string(),
        )]);
        if let Some(class_data) = response_headers.first(headers::CUSTOM_EVENT_DATA) {
            params.insert(headers::CUSTOM_EVENT_DATA.to_string(), class_data.to_string());
        }
        return AdVariant::CustomEvent { params };
    }

    AdVariant::LegacyCustomEvent {
        method_name: response_headers
            .first(headers::CUSTOM_SELECTOR)
            .map(str::to_string),
    }
}

/// Native SDK ad type: params from the type plus optional extended type and
/// native params, which default to an empty structured value.
fn classify_native(response_headers: &ResponseHeaders, ad_type: &str) -> AdVariant {
    let mut params = HashMap::from([
        (headers::AD_TYPE.to_string(), ad_type.to_string()),
        (
            headers::NATIVE_PARAMS.to_string(),
            response_headers
                .first(headers::NATIVE_PARAMS)
                .unwrap_or("{}")
                .to_string(),
        ),
    ]);
    if let Some(full_ad_type) = response_headers.first(headers::FULL_AD_TYPE) {
        params.insert(headers::FULL_AD_TYPE.to_string(), full_ad_type.to_string());
    }
    AdVariant::NativeAd { params }
}
