#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static roofing package and material catalogs.
//!
//! Reference data only; nothing here is user-derived. Each installed
//! package tier is defined in a TOML file under `catalog/` and embedded
//! at compile time, as are the material-only price ranges used by the
//! standalone cost calculator. Malformed embedded TOML is a build
//! defect, so the registry panics rather than limping along without a
//! tier.

use serde::{Deserialize, Serialize};

/// A min/max price band in whole US dollars.
///
/// Ranges are the product's honest answer to cost uncertainty; they are
/// summed and scaled as ranges and never collapsed to a single number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Low end of the band.
    pub min: f64,
    /// High end of the band.
    pub max: f64,
}

impl PriceRange {
    /// Creates a price band.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the band with `min` and `max` swapped into order if
    /// needed.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self {
                min: self.max,
                max: self.min,
            }
        }
    }

    /// Scales both ends of the band by a non-negative quantity.
    #[must_use]
    pub fn scaled(self, quantity: f64) -> Self {
        Self {
            min: self.min * quantity,
            max: self.max * quantity,
        }
    }
}

/// An installed roofing package tier from the sales catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct RoofingPackage {
    /// Unique identifier (e.g. `"preferred"`).
    pub id: String,
    /// Display name (e.g. `"Preferred"`).
    pub name: String,
    /// Shingle brand and line.
    pub brand: String,
    /// Installed price per roofing square in US dollars.
    pub price_per_square: f64,
    /// Warranty text shown on quotes.
    pub warranty: String,
    /// Expected lifespan text shown on quotes.
    pub lifespan: String,
    /// Included features in display order.
    pub features: Vec<String>,
    /// Available shingle colors.
    pub colors: Vec<String>,
    /// Scope-of-work steps in execution order.
    pub scope_of_work: Vec<String>,
}

/// A material option for the standalone cost calculator, priced as a
/// range per roofing square (material only; labor and removal are
/// separate line items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Material {
    /// Unique identifier (e.g. `"architectural-asphalt"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Material-only price band per square.
    pub price_per_square: PriceRange,
}

/// Wrapper for the embedded materials TOML.
#[derive(Debug, Deserialize)]
struct MaterialsFile {
    materials: Vec<Material>,
}

// ── Compile-time embedded TOML files ────────────────────────────────

const PACKAGE_TOMLS: &[(&str, &str)] = &[
    ("essential", include_str!("../catalog/essential.toml")),
    ("preferred", include_str!("../catalog/preferred.toml")),
    ("premium", include_str!("../catalog/premium.toml")),
];

const MATERIALS_TOML: &str = include_str!("../catalog/materials.toml");

/// Returns all roofing package tiers in ascending price order as
/// authored.
///
/// # Panics
///
/// Panics if any embedded package TOML is malformed (this is a
/// compile-time guarantee since the catalogs are embedded).
#[must_use]
pub fn all_packages() -> Vec<RoofingPackage> {
    PACKAGE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse roofing package '{name}': {e}"))
        })
        .collect()
}

/// Looks up a roofing package tier by id.
#[must_use]
pub fn find_package(id: &str) -> Option<RoofingPackage> {
    all_packages().into_iter().find(|p| p.id == id)
}

/// Returns all calculator material options.
///
/// # Panics
///
/// Panics if the embedded materials TOML is malformed.
#[must_use]
pub fn all_materials() -> Vec<Material> {
    let file: MaterialsFile = toml::de::from_str(MATERIALS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse materials catalog: {e}"));
    file.materials
}

/// Looks up a calculator material by id.
#[must_use]
pub fn find_material(id: &str) -> Option<Material> {
    all_materials().into_iter().find(|m| m.id == id)
}
