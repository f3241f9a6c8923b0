//! The instant-estimate wizard as an explicit state machine.
//!
//! ```text
//! Idle -> AddressSelected -> PolygonDrawn -> PackageChosen
//!      -> CustomerInfoCollected -> Submitted
//! ```
//!
//! Each variant carries only the data valid at that step. Transitions
//! consume the flow and return the next step or a [`FlowError`];
//! selecting a new address from any step restarts at
//! `AddressSelected`; a traced polygon never carries across
//! addresses.

use roof_quote_catalog::RoofingPackage;
use roof_quote_estimate_models::{Address, CustomerInfo};
use roof_quote_geometry::{GeoPoint, polygon_area_sq_ft};
use roof_quote_measure::{Pitch, RoofMeasurement, compute_roof_measurement};
use thiserror::Error;

use crate::document::{DocumentError, EstimateDocument};

/// A transition was invoked from the wrong wizard step.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The requested action is not valid at the current step.
    #[error("cannot {action} at step '{step}'")]
    InvalidTransition {
        /// The step the wizard was at.
        step: &'static str,
        /// The attempted action.
        action: &'static str,
    },
}

/// The estimate wizard, one variant per step.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateFlow {
    /// Nothing selected yet.
    Idle,
    /// A property address has been geocoded and selected.
    AddressSelected {
        /// The selected property.
        address: Address,
    },
    /// The roof outline has been traced and measured.
    PolygonDrawn {
        /// The selected property.
        address: Address,
        /// The traced outline.
        points: Vec<GeoPoint>,
        /// Measurement derived from the outline.
        measurement: RoofMeasurement,
    },
    /// A roofing package has been chosen against the measurement.
    PackageChosen {
        /// The selected property.
        address: Address,
        /// The traced outline.
        points: Vec<GeoPoint>,
        /// Measurement derived from the outline.
        measurement: RoofMeasurement,
        /// The chosen package tier.
        package: RoofingPackage,
    },
    /// Contact details have been collected; ready to submit.
    CustomerInfoCollected {
        /// The selected property.
        address: Address,
        /// The traced outline.
        points: Vec<GeoPoint>,
        /// Measurement derived from the outline.
        measurement: RoofMeasurement,
        /// The chosen package tier.
        package: RoofingPackage,
        /// The customer's contact details.
        customer: CustomerInfo,
    },
    /// The estimate has been submitted for delivery.
    Submitted {
        /// The selected property.
        address: Address,
        /// Measurement the estimate was built from.
        measurement: RoofMeasurement,
        /// The chosen package tier.
        package: RoofingPackage,
        /// The customer's contact details.
        customer: CustomerInfo,
        /// Submission reference handed back to the customer.
        reference: String,
    },
}

impl Default for EstimateFlow {
    fn default() -> Self {
        Self::Idle
    }
}

impl EstimateFlow {
    /// Short step name for errors and logs.
    #[must_use]
    pub const fn step_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AddressSelected { .. } => "address-selected",
            Self::PolygonDrawn { .. } => "polygon-drawn",
            Self::PackageChosen { .. } => "package-chosen",
            Self::CustomerInfoCollected { .. } => "customer-info-collected",
            Self::Submitted { .. } => "submitted",
        }
    }

    /// Selects (or re-selects) the property address.
    ///
    /// Valid from every step: picking a different property always
    /// restarts the wizard at `AddressSelected`, discarding any traced
    /// polygon and downstream choices.
    #[must_use]
    pub fn select_address(self, address: Address) -> Self {
        Self::AddressSelected { address }
    }

    /// Records the traced roof outline, deriving the measurement from
    /// the raw planar area in one step.
    ///
    /// Valid once an address is selected; re-drawing from
    /// `PolygonDrawn` or `PackageChosen` replaces the outline and drops
    /// the chosen package (its price no longer matches).
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] from `Idle`,
    /// `CustomerInfoCollected`, or `Submitted`.
    pub fn draw_polygon(
        self,
        points: Vec<GeoPoint>,
        pitch: Pitch,
        waste_factor: f64,
    ) -> Result<Self, FlowError> {
        let address = match self {
            Self::AddressSelected { address }
            | Self::PolygonDrawn { address, .. }
            | Self::PackageChosen { address, .. } => address,
            other => {
                return Err(FlowError::InvalidTransition {
                    step: other.step_name(),
                    action: "draw the roof outline",
                });
            }
        };

        let square_feet = polygon_area_sq_ft(&points);
        let measurement = compute_roof_measurement(square_feet, pitch, waste_factor);

        Ok(Self::PolygonDrawn {
            address,
            points,
            measurement,
        })
    }

    /// Chooses (or re-chooses) the roofing package for the measured
    /// roof.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] unless a polygon has
    /// been drawn and the wizard has not moved past package choice.
    pub fn choose_package(self, package: RoofingPackage) -> Result<Self, FlowError> {
        match self {
            Self::PolygonDrawn {
                address,
                points,
                measurement,
            }
            | Self::PackageChosen {
                address,
                points,
                measurement,
                ..
            } => Ok(Self::PackageChosen {
                address,
                points,
                measurement,
                package,
            }),
            other => Err(FlowError::InvalidTransition {
                step: other.step_name(),
                action: "choose a package",
            }),
        }
    }

    /// Collects (or corrects) the customer's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] unless a package has
    /// been chosen.
    pub fn collect_customer(self, customer: CustomerInfo) -> Result<Self, FlowError> {
        match self {
            Self::PackageChosen {
                address,
                points,
                measurement,
                package,
            }
            | Self::CustomerInfoCollected {
                address,
                points,
                measurement,
                package,
                ..
            } => Ok(Self::CustomerInfoCollected {
                address,
                points,
                measurement,
                package,
                customer,
            }),
            other => Err(FlowError::InvalidTransition {
                step: other.step_name(),
                action: "collect customer info",
            }),
        }
    }

    /// Marks the estimate as submitted under a delivery reference.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] unless contact details
    /// have been collected.
    pub fn submit(self, reference: impl Into<String>) -> Result<Self, FlowError> {
        match self {
            Self::CustomerInfoCollected {
                address,
                measurement,
                package,
                customer,
                ..
            } => Ok(Self::Submitted {
                address,
                measurement,
                package,
                customer,
                reference: reference.into(),
            }),
            other => Err(FlowError::InvalidTransition {
                step: other.step_name(),
                action: "submit the estimate",
            }),
        }
    }

    /// Assembles the estimate document from whatever the wizard has
    /// collected so far.
    ///
    /// # Errors
    ///
    /// Returns the [`DocumentError`] naming the first missing input
    /// when invoked before all four inputs exist.
    pub fn assemble_document(&self) -> Result<EstimateDocument, DocumentError> {
        let (customer, address, measurement, package) = match self {
            Self::Idle => (None, None, None, None),
            Self::AddressSelected { address } => (None, Some(address), None, None),
            Self::PolygonDrawn {
                address,
                measurement,
                ..
            } => (None, Some(address), Some(measurement), None),
            Self::PackageChosen {
                address,
                measurement,
                package,
                ..
            } => (None, Some(address), Some(measurement), Some(package)),
            Self::CustomerInfoCollected {
                address,
                measurement,
                package,
                customer,
                ..
            }
            | Self::Submitted {
                address,
                measurement,
                package,
                customer,
                ..
            } => (
                Some(customer),
                Some(address),
                Some(measurement),
                Some(package),
            ),
        };
        EstimateDocument::assemble(customer, address, measurement, package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            formatted: "3400 Maple Ave, Dallas, TX".to_string(),
            latitude: 32.8,
            longitude: -96.8,
        }
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Pat Ramos".to_string(),
            email: "pat@example.com".to_string(),
            phone: "2145550147".to_string(),
            notes: None,
        }
    }

    fn outline() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(32.8000, -96.8000),
            GeoPoint::new(32.8000, -96.7998),
            GeoPoint::new(32.8002, -96.7998),
            GeoPoint::new(32.8002, -96.8000),
        ]
    }

    fn package() -> RoofingPackage {
        roof_quote_catalog::find_package("preferred").unwrap()
    }

    #[test]
    fn happy_path_reaches_submitted() {
        let flow = EstimateFlow::Idle
            .select_address(address())
            .draw_polygon(outline(), Pitch::Rise6, 0.15)
            .unwrap()
            .choose_package(package())
            .unwrap()
            .collect_customer(customer())
            .unwrap()
            .submit("est-123")
            .unwrap();

        assert_eq!(flow.step_name(), "submitted");
        let EstimateFlow::Submitted { measurement, .. } = &flow else {
            panic!("expected submitted");
        };
        assert!(measurement.square_feet > 0.0);
    }

    #[test]
    fn drawing_requires_an_address() {
        let err = EstimateFlow::Idle
            .draw_polygon(outline(), Pitch::Rise6, 0.15)
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::InvalidTransition { step: "idle", .. }
        ));
    }

    #[test]
    fn package_choice_requires_a_polygon() {
        let flow = EstimateFlow::Idle.select_address(address());
        let err = flow.choose_package(package()).unwrap_err();
        assert!(matches!(
            err,
            FlowError::InvalidTransition {
                step: "address-selected",
                ..
            }
        ));
    }

    #[test]
    fn submit_requires_customer_info() {
        let flow = EstimateFlow::Idle
            .select_address(address())
            .draw_polygon(outline(), Pitch::Rise6, 0.15)
            .unwrap()
            .choose_package(package())
            .unwrap();
        let err = flow.submit("est-123").unwrap_err();
        assert!(matches!(
            err,
            FlowError::InvalidTransition {
                step: "package-chosen",
                ..
            }
        ));
    }

    #[test]
    fn reselecting_address_discards_everything_downstream() {
        let flow = EstimateFlow::Idle
            .select_address(address())
            .draw_polygon(outline(), Pitch::Rise6, 0.15)
            .unwrap()
            .choose_package(package())
            .unwrap()
            .select_address(Address {
                formatted: "789 Cactus Rd, Phoenix, AZ".to_string(),
                latitude: 33.45,
                longitude: -112.07,
            });

        assert_eq!(flow.step_name(), "address-selected");
    }

    #[test]
    fn redrawing_drops_the_chosen_package() {
        let flow = EstimateFlow::Idle
            .select_address(address())
            .draw_polygon(outline(), Pitch::Rise6, 0.15)
            .unwrap()
            .choose_package(package())
            .unwrap()
            .draw_polygon(outline(), Pitch::Rise8, 0.15)
            .unwrap();

        assert_eq!(flow.step_name(), "polygon-drawn");
        let EstimateFlow::PolygonDrawn { measurement, .. } = &flow else {
            panic!("expected polygon-drawn");
        };
        assert_eq!(measurement.pitch, Pitch::Rise8);
    }

    #[test]
    fn measurement_derives_from_the_outline() {
        let flow = EstimateFlow::Idle
            .select_address(address())
            .draw_polygon(outline(), Pitch::Rise0, 0.10)
            .unwrap();
        let EstimateFlow::PolygonDrawn {
            points,
            measurement,
            ..
        } = &flow
        else {
            panic!("expected polygon-drawn");
        };
        assert!((measurement.square_feet - polygon_area_sq_ft(points)).abs() < 1e-9);
        assert_eq!(measurement.adjusted_square_feet, measurement.square_feet);
    }

    #[test]
    fn document_assembly_fails_before_all_inputs_exist() {
        let flow = EstimateFlow::Idle
            .select_address(address())
            .draw_polygon(outline(), Pitch::Rise6, 0.15)
            .unwrap();
        assert!(flow.assemble_document().is_err());

        let flow = flow
            .choose_package(package())
            .unwrap()
            .collect_customer(customer())
            .unwrap();
        assert!(flow.assemble_document().is_ok());
    }
}
