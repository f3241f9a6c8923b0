#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared customer and address types for roof quote estimates.
//!
//! These types cross every boundary of the estimate pipeline (capture,
//! wizard flow, document assembly, submission API), so they live in
//! their own models crate with no logic dependencies.

use serde::{Deserialize, Serialize};

/// A geocoded property location.
///
/// Produced by a geocoding lookup and consumed read-only to center the
/// drawing map; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Formatted display string (e.g. `"3400 Maple Ave, Dallas, TX"`).
    pub formatted: String,
    /// Latitude in degrees (WGS84).
    pub latitude: f64,
    /// Longitude in degrees (WGS84).
    pub longitude: f64,
}

/// Contact details collected before an estimate is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Email address the estimate is sent to.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Free-form notes from the customer.
    pub notes: Option<String>,
}
