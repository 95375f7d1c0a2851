//! AdStream - ad-fetch orchestration for display surfaces.
//!
//! This library handles loading ad content over a network connection on
//! behalf of a display surface. Fetches run on background tasks; only the
//! most recent request's result is ever applied to the surface. Server
//! responses are classified into typed ad-content variants (custom event,
//! legacy custom event, native, HTML), and a backoff policy drives the
//! refresh cadence after retryable server errors.
//!
//! # High-Level API
//!
//! ```ignore
//! use adstream::config::FetchConfig;
//! use adstream::fetch::FetchCoordinator;
//! use adstream::request::AdRequestBuilder;
//!
//! let config = FetchConfig::default();
//! let mut coordinator = FetchCoordinator::new(Arc::downgrade(&surface), config.clone());
//!
//! let url = AdRequestBuilder::new("my-ad-unit").build(&config)?;
//! coordinator.fetch(&url);
//! coordinator.process_next_completion().await;
//! ```
//!
//! The surface collaborator is described by [`surface::AdSurface`]; rendering
//! of fetched content stays with the surface implementation.

pub mod backoff;
pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod logging;
pub mod refresh;
pub mod registry;
pub mod request;
pub mod surface;
pub mod variant;

/// Version of the AdStream library.
///
/// Reported to the ad server as the `nv` query parameter unless overridden
/// in [`config::FetchConfig`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
