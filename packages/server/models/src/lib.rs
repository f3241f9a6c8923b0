#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the roof quote server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the domain types to allow independent evolution of
//! the API contract.

use roof_quote_catalog::{Material, RoofingPackage};
use roof_quote_estimate_models::{Address, CustomerInfo};
use roof_quote_geocoder::GeocodedAddress;
use roof_quote_geometry::GeoPoint;
use roof_quote_pricing::CostRange;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the geocode endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeQueryParams {
    /// Free-form address text.
    pub q: String,
}

/// A geocoded address as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAddress {
    /// Formatted display string.
    pub formatted: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Which provider resolved the address.
    pub provider: String,
}

impl From<GeocodedAddress> for ApiAddress {
    fn from(g: GeocodedAddress) -> Self {
        Self {
            formatted: g.formatted,
            latitude: g.latitude,
            longitude: g.longitude,
            provider: g.provider.id().to_string(),
        }
    }
}

/// Request body for the measure endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureRequest {
    /// Traced outline vertices (closure implied).
    pub points: Vec<GeoPoint>,
    /// Pitch in `"rise/12"` notation; defaults to the standard
    /// residential pitch when absent or unknown.
    pub pitch: Option<String>,
    /// Waste fraction; defaults to the standard waste factor.
    pub waste_factor: Option<f64>,
}

/// Request body for the guided-estimate quote endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Measured roof size in roofing squares.
    pub total_squares: f64,
    /// Catalog package id.
    pub package_id: String,
}

/// Response from the quote endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Computed package price in dollars.
    pub price: f64,
    /// The chosen package, unchanged from the catalog.
    pub package: RoofingPackage,
}

/// Request body for the standalone cost calculator.
///
/// Roof size arrives in exactly one of the two entry modes; when both
/// are present, squares win (they are the canonical unit).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorRequest {
    /// Roof size in square feet.
    pub square_feet: Option<f64>,
    /// Roof size in roofing squares.
    pub squares: Option<f64>,
    /// Calculator material id.
    pub material_id: String,
    /// Include tear-off of the existing roof.
    #[serde(default)]
    pub include_removal: bool,
    /// Include the deck-repair allowance.
    #[serde(default)]
    pub include_deck_repair: bool,
}

/// Response from the cost calculator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResponse {
    /// Normalized roof size in squares.
    pub squares: f64,
    /// Normalized roof size in square feet.
    pub square_feet: f64,
    /// The material the range was built from.
    pub material: Material,
    /// The ranged project cost.
    pub cost: CostRange,
}

/// Request body for a full estimate submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEstimateRequest {
    /// Customer contact details.
    pub customer: CustomerInfo,
    /// The selected property.
    pub address: Address,
    /// Traced outline vertices.
    pub points: Vec<GeoPoint>,
    /// Pitch in `"rise/12"` notation.
    pub pitch: Option<String>,
    /// Waste fraction.
    pub waste_factor: Option<f64>,
    /// Chosen catalog package id.
    pub package_id: String,
    /// Client-rendered estimate PDF, base64-encoded. Forwarded as an
    /// email attachment untouched.
    pub document_pdf_base64: Option<String>,
}

/// Response from an estimate submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEstimateResponse {
    /// Submission reference handed back to the customer.
    pub reference: String,
    /// Whether the estimate email went out (false when delivery is not
    /// configured).
    pub emailed: bool,
}

/// Request body for a lead-capture form submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, any common US format.
    pub phone: String,
    /// City the property is in.
    pub city: Option<String>,
    /// Free-form message.
    pub message: Option<String>,
}

/// Response from the lead-capture endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    /// Lead reference id.
    pub reference: String,
}
