//! Estimate document assembly.
//!
//! Takes the collected estimate data and arranges it into the fixed
//! five-section document handed to the rendering collaborator (PDF on
//! the client, plain text for email bodies). Sections appear in a fixed
//! order: cover summary, measurement breakdown, package details,
//! pricing, next steps.
//!
//! All four inputs are required. A missing input is an integration
//! error and fails loudly; a partial price quote sent to a customer is
//! worse than no quote.

use chrono::{DateTime, Utc};
use roof_quote_catalog::RoofingPackage;
use roof_quote_estimate_models::{Address, CustomerInfo};
use roof_quote_measure::RoofMeasurement;
use roof_quote_pricing::compute_cost_estimate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{format_percent, format_sq_ft, format_squares, format_usd};

/// A required document input was absent at assembly time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// No customer contact details.
    #[error("estimate document is missing customer info")]
    MissingCustomer,

    /// No property address.
    #[error("estimate document is missing the property address")]
    MissingAddress,

    /// No roof measurement.
    #[error("estimate document is missing the roof measurement")]
    MissingMeasurement,

    /// No chosen roofing package.
    #[error("estimate document is missing the roofing package")]
    MissingPackage,
}

/// The assembled multi-section estimate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateDocument {
    /// When the document was assembled.
    pub generated_at: DateTime<Utc>,
    /// Cover summary section.
    pub cover: CoverSummary,
    /// Measurement breakdown section.
    pub measurement: MeasurementBreakdown,
    /// Package details section.
    pub package: PackageDetails,
    /// Pricing section.
    pub pricing: PricingSection,
    /// Next steps section.
    pub next_steps: Vec<String>,
}

/// Who the estimate is for and the headline number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverSummary {
    /// Customer full name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer phone.
    pub customer_phone: String,
    /// Formatted property address.
    pub property_address: String,
    /// Chosen package display name.
    pub package_name: String,
    /// Headline total, display-formatted (e.g. `"$11,951"`).
    pub total_display: String,
}

/// How the roof was measured, with display-formatted figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementBreakdown {
    /// Planar footprint area (`"2,000"` sq ft).
    pub footprint_display: String,
    /// Pitch in rise/12 notation (`"6/12"`).
    pub pitch: String,
    /// Pitch multiplier to 3 decimals (`"1.118"`).
    pub pitch_multiplier_display: String,
    /// Pitch-adjusted area (`"2,236"` sq ft).
    pub adjusted_display: String,
    /// Waste factor as a percentage (`"15%"`).
    pub waste_display: String,
    /// Roofing squares to one decimal (`"25.7"`).
    pub squares_display: String,
}

/// The chosen package, carried through from the catalog unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    /// Package display name.
    pub name: String,
    /// Shingle brand and line.
    pub brand: String,
    /// Warranty text.
    pub warranty: String,
    /// Expected lifespan text.
    pub lifespan: String,
    /// Included features.
    pub features: Vec<String>,
    /// Available colors.
    pub colors: Vec<String>,
    /// Scope-of-work steps.
    pub scope_of_work: Vec<String>,
}

/// The price derivation shown to the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSection {
    /// Roofing squares to one decimal.
    pub squares_display: String,
    /// Package price per square, display-formatted.
    pub price_per_square_display: String,
    /// Computed total in dollars.
    pub total: f64,
    /// Computed total, display-formatted.
    pub total_display: String,
}

/// What happens after the customer receives the estimate.
const NEXT_STEPS: &[&str] = &[
    "A project consultant will call within one business day to review this estimate",
    "Schedule a free on-site inspection to confirm measurements and deck condition",
    "Lock in your color selection and installation date",
    "Financing options available on approved credit",
];

impl EstimateDocument {
    /// Assembles the estimate document from the four required inputs.
    ///
    /// # Errors
    ///
    /// Returns the [`DocumentError`] variant naming the first missing
    /// input (checked in section order: customer, address, measurement,
    /// package). No partial document is ever produced.
    pub fn assemble(
        customer: Option<&CustomerInfo>,
        address: Option<&Address>,
        measurement: Option<&RoofMeasurement>,
        package: Option<&RoofingPackage>,
    ) -> Result<Self, DocumentError> {
        let customer = customer.ok_or(DocumentError::MissingCustomer)?;
        let address = address.ok_or(DocumentError::MissingAddress)?;
        let measurement = measurement.ok_or(DocumentError::MissingMeasurement)?;
        let package = package.ok_or(DocumentError::MissingPackage)?;

        let total = compute_cost_estimate(measurement.total_squares, package.price_per_square);

        Ok(Self {
            generated_at: Utc::now(),
            cover: CoverSummary {
                customer_name: customer.name.clone(),
                customer_email: customer.email.clone(),
                customer_phone: customer.phone.clone(),
                property_address: address.formatted.clone(),
                package_name: package.name.clone(),
                total_display: format_usd(total),
            },
            measurement: MeasurementBreakdown {
                footprint_display: format_sq_ft(measurement.square_feet),
                pitch: measurement.pitch.to_string(),
                pitch_multiplier_display: format!("{:.3}", measurement.pitch_multiplier),
                adjusted_display: format_sq_ft(measurement.adjusted_square_feet),
                waste_display: format_percent(measurement.waste_factor),
                squares_display: format_squares(measurement.total_squares),
            },
            package: PackageDetails {
                name: package.name.clone(),
                brand: package.brand.clone(),
                warranty: package.warranty.clone(),
                lifespan: package.lifespan.clone(),
                features: package.features.clone(),
                colors: package.colors.clone(),
                scope_of_work: package.scope_of_work.clone(),
            },
            pricing: PricingSection {
                squares_display: format_squares(measurement.total_squares),
                price_per_square_display: format_usd(package.price_per_square),
                total,
                total_display: format_usd(total),
            },
            next_steps: NEXT_STEPS.iter().map(ToString::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roof_quote_measure::{Pitch, compute_roof_measurement};

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Pat Ramos".to_string(),
            email: "pat@example.com".to_string(),
            phone: "2145550147".to_string(),
            notes: None,
        }
    }

    fn address() -> Address {
        Address {
            formatted: "3400 Maple Ave, Dallas, TX".to_string(),
            latitude: 32.8,
            longitude: -96.8,
        }
    }

    fn measurement() -> RoofMeasurement {
        compute_roof_measurement(2000.0, Pitch::Rise6, 0.15)
    }

    fn package() -> RoofingPackage {
        roof_quote_catalog::find_package("preferred").unwrap()
    }

    #[test]
    fn assembles_all_sections() {
        let doc = EstimateDocument::assemble(
            Some(&customer()),
            Some(&address()),
            Some(&measurement()),
            Some(&package()),
        )
        .unwrap();

        assert_eq!(doc.cover.customer_name, "Pat Ramos");
        assert_eq!(doc.cover.property_address, "3400 Maple Ave, Dallas, TX");
        assert_eq!(doc.measurement.pitch, "6/12");
        assert_eq!(doc.measurement.waste_display, "15%");
        assert_eq!(doc.measurement.squares_display, "25.7");
        assert_eq!(doc.package.brand, "GAF Timberline HDZ");
        assert!(!doc.next_steps.is_empty());
    }

    #[test]
    fn pricing_multiplies_squares_by_package_rate() {
        let doc = EstimateDocument::assemble(
            Some(&customer()),
            Some(&address()),
            Some(&measurement()),
            Some(&package()),
        )
        .unwrap();

        // 25.7 squares x $465/square.
        assert!((doc.pricing.total - 11950.5).abs() < 1e-9);
        assert_eq!(doc.pricing.total_display, "$11,951");
        assert_eq!(doc.cover.total_display, doc.pricing.total_display);
    }

    #[test]
    fn missing_customer_fails() {
        let err = EstimateDocument::assemble(
            None,
            Some(&address()),
            Some(&measurement()),
            Some(&package()),
        )
        .unwrap_err();
        assert_eq!(err, DocumentError::MissingCustomer);
    }

    #[test]
    fn missing_address_fails() {
        let err = EstimateDocument::assemble(
            Some(&customer()),
            None,
            Some(&measurement()),
            Some(&package()),
        )
        .unwrap_err();
        assert_eq!(err, DocumentError::MissingAddress);
    }

    #[test]
    fn missing_measurement_fails() {
        let err = EstimateDocument::assemble(
            Some(&customer()),
            Some(&address()),
            None,
            Some(&package()),
        )
        .unwrap_err();
        assert_eq!(err, DocumentError::MissingMeasurement);
    }

    #[test]
    fn missing_package_fails() {
        let err = EstimateDocument::assemble(
            Some(&customer()),
            Some(&address()),
            Some(&measurement()),
            None,
        )
        .unwrap_err();
        assert_eq!(err, DocumentError::MissingPackage);
    }

    #[test]
    fn document_serializes_camel_case() {
        let doc = EstimateDocument::assemble(
            Some(&customer()),
            Some(&address()),
            Some(&measurement()),
            Some(&package()),
        )
        .unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json["cover"].get("propertyAddress").is_some());
        assert!(json["pricing"].get("totalDisplay").is_some());
    }
}
