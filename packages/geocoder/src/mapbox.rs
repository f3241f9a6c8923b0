//! Mapbox Geocoding API client (v6 forward geocoding).
//!
//! The primary provider when an access token is configured. Handles
//! partial residential addresses better than Nominatim.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/>

use crate::{GeocodeError, GeocodedAddress, GeocodingProvider};

/// Geocodes a free-form address query using Mapbox forward geocoding.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    query: &str,
) -> Result<Option<GeocodedAddress>, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("q", query),
            ("access_token", token),
            ("country", "us"),
            ("limit", "1"),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a Mapbox v6 forward geocoding response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedAddress>, GeocodeError> {
    let features = body["features"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Mapbox response has no features array".to_string(),
        })?;

    let Some(first) = features.first() else {
        return Ok(None);
    };

    let coordinates = first["geometry"]["coordinates"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing geometry coordinates in Mapbox response".to_string(),
        })?;

    let (Some(lon), Some(lat)) = (
        coordinates.first().and_then(serde_json::Value::as_f64),
        coordinates.get(1).and_then(serde_json::Value::as_f64),
    ) else {
        return Err(GeocodeError::Parse {
            message: "Malformed coordinates in Mapbox response".to_string(),
        });
    };

    let properties = &first["properties"];
    let formatted = properties["full_address"]
        .as_str()
        .or_else(|| properties["name"].as_str())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing full_address in Mapbox response".to_string(),
        })?
        .to_string();

    Ok(Some(GeocodedAddress {
        formatted,
        latitude: lat,
        longitude: lon,
        provider: GeocodingProvider::Mapbox,
    }))
}
