#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Forward geocoding for property addresses.
//!
//! Converts a visitor-typed address into coordinates for centering the
//! roof-tracing map, using a multi-provider strategy configured via
//! TOML files in `services/`:
//!
//! 1. **Mapbox Geocoding** (priority 1) — requires an access token via
//!    the environment; skipped automatically when no token is set.
//! 2. **Nominatim / OpenStreetMap** (priority 2) — free, 1 req/sec rate
//!    limit.
//!
//! Providers are loaded from the [`service_registry`] and executed in
//! priority order. A provider that errors is logged and skipped so a
//! single outage never blanks the address search.

pub mod mapbox;
pub mod nominatim;
pub mod service_registry;

use service_registry::ProviderConfig;
use thiserror::Error;

/// A geocoding result with coordinates and the matched address text.
#[derive(Debug, Clone)]
pub struct GeocodedAddress {
    /// The matched/canonical address returned by the geocoder.
    pub formatted: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Which provider resolved this address.
    pub provider: GeocodingProvider,
}

/// Which geocoding provider resolved an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodingProvider {
    /// Mapbox Geocoding API.
    Mapbox,
    /// Nominatim / OpenStreetMap.
    Nominatim,
}

impl GeocodingProvider {
    /// Provider id as it appears in the service registry.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Mapbox => "mapbox",
            Self::Nominatim => "nominatim",
        }
    }
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Geocodes a free-form address query against the enabled providers in
/// priority order.
///
/// Providers whose credentials are absent are skipped. A provider that
/// errors is logged and the next one is tried. Returns `Ok(None)` when
/// no provider produced a match.
///
/// # Errors
///
/// Returns the last provider's [`GeocodeError`] only if every enabled
/// provider failed with an error (as opposed to finding no match).
pub async fn search(
    client: &reqwest::Client,
    query: &str,
) -> Result<Option<GeocodedAddress>, GeocodeError> {
    let mut last_error = None;
    let mut any_completed = false;

    for service in service_registry::enabled_services() {
        let result = match &service.provider {
            ProviderConfig::Mapbox {
                base_url,
                token_env,
            } => {
                let Ok(token) = std::env::var(token_env) else {
                    log::debug!("geocoder: skipping mapbox ({token_env} not set)");
                    continue;
                };
                mapbox::geocode(client, base_url, &token, query).await
            }
            ProviderConfig::Nominatim { base_url, .. } => {
                nominatim::geocode(client, base_url, query).await
            }
        };

        match result {
            Ok(Some(address)) => {
                log::debug!(
                    "geocoder: '{query}' resolved by {}",
                    address.provider.id()
                );
                return Ok(Some(address));
            }
            Ok(None) => {
                log::debug!("geocoder: no match from {} for '{query}'", service.id);
                any_completed = true;
            }
            Err(e) => {
                log::warn!("geocoder: {} failed: {e}", service.id);
                last_error = Some(e);
            }
        }
    }

    match (any_completed, last_error) {
        (false, Some(e)) => Err(e),
        _ => Ok(None),
    }
}
