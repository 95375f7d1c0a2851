//! Default values for fetch configuration.

/// Default ad-serving endpoint requests are issued against.
pub const DEFAULT_ENDPOINT: &str = "https://ads.adstream.io/m/ad";

/// Default wall-clock timeout per fetch, applied to both the connect and
/// read phases of the request.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Default User-Agent string for ad requests.
///
/// Used when the owning surface has not stored one of its own. Some ad
/// servers reject requests without a User-Agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Protocol version sent as the `v` query parameter.
pub const PROTOCOL_VERSION: u32 = 6;
