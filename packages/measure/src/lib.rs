#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pitch and waste adjustment for roof measurements.
//!
//! A traced footprint gives the *plan-view* area of a roof. The true
//! surface area is larger on any sloped roof: walking up a 6/12 pitch
//! covers more shingle than the ground distance below it. This crate
//! converts planar square footage into adjusted surface area via the
//! standard pitch-multiplier table, applies a waste factor for cut-offs
//! and complex shapes, and expresses the result in roofing squares
//! (1 square = 100 sq ft).
//!
//! Every measurement is recomputed in full from the raw planar area.
//! There is no incremental adjustment path, so repeated pitch or waste
//! changes can never compound.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Square feet per roofing square.
pub const SQFT_PER_SQUARE: f64 = 100.0;

/// Lowest waste factor offered in the estimate UI.
pub const WASTE_FACTOR_MIN: f64 = 0.10;

/// Highest waste factor offered in the estimate UI.
pub const WASTE_FACTOR_MAX: f64 = 0.20;

/// Waste factor applied when the caller does not choose one.
pub const WASTE_FACTOR_DEFAULT: f64 = 0.15;

/// Roof pitch expressed as vertical rise per 12 units of horizontal run.
///
/// Covers the standard residential range 0/12 (flat) through 12/12
/// (45 degrees). The wire form is the conventional `"rise/12"` notation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Pitch {
    /// Flat roof (no rise).
    #[serde(rename = "0/12")]
    #[strum(serialize = "0/12")]
    Rise0,
    /// 1 in 12 rise.
    #[serde(rename = "1/12")]
    #[strum(serialize = "1/12")]
    Rise1,
    /// 2 in 12 rise.
    #[serde(rename = "2/12")]
    #[strum(serialize = "2/12")]
    Rise2,
    /// 3 in 12 rise.
    #[serde(rename = "3/12")]
    #[strum(serialize = "3/12")]
    Rise3,
    /// 4 in 12 rise.
    #[serde(rename = "4/12")]
    #[strum(serialize = "4/12")]
    Rise4,
    /// 5 in 12 rise.
    #[serde(rename = "5/12")]
    #[strum(serialize = "5/12")]
    Rise5,
    /// 6 in 12 rise, the most common residential pitch.
    #[serde(rename = "6/12")]
    #[strum(serialize = "6/12")]
    Rise6,
    /// 7 in 12 rise.
    #[serde(rename = "7/12")]
    #[strum(serialize = "7/12")]
    Rise7,
    /// 8 in 12 rise.
    #[serde(rename = "8/12")]
    #[strum(serialize = "8/12")]
    Rise8,
    /// 9 in 12 rise.
    #[serde(rename = "9/12")]
    #[strum(serialize = "9/12")]
    Rise9,
    /// 10 in 12 rise.
    #[serde(rename = "10/12")]
    #[strum(serialize = "10/12")]
    Rise10,
    /// 11 in 12 rise.
    #[serde(rename = "11/12")]
    #[strum(serialize = "11/12")]
    Rise11,
    /// 12 in 12 rise (45 degrees).
    #[serde(rename = "12/12")]
    #[strum(serialize = "12/12")]
    Rise12,
}

impl Pitch {
    /// Fallback pitch for unknown or missing pitch keys.
    pub const DEFAULT: Self = Self::Rise6;

    /// All pitches in ascending steepness order.
    pub const ALL: &[Self] = &[
        Self::Rise0,
        Self::Rise1,
        Self::Rise2,
        Self::Rise3,
        Self::Rise4,
        Self::Rise5,
        Self::Rise6,
        Self::Rise7,
        Self::Rise8,
        Self::Rise9,
        Self::Rise10,
        Self::Rise11,
        Self::Rise12,
    ];

    /// Returns the vertical rise per 12 units of run.
    #[must_use]
    pub const fn rise(self) -> u8 {
        self as u8
    }

    /// Returns the surface-area multiplier for this pitch.
    ///
    /// Derived from `1 / cos(atan(rise/12))`, which simplifies to
    /// `sqrt(1 + (rise/12)^2)`. Flat is exactly `1.0` and the multiplier
    /// increases monotonically with pitch.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        let slope = f64::from(self.rise()) / 12.0;
        slope.mul_add(slope, 1.0).sqrt()
    }

    /// Parses a `"rise/12"` pitch string, falling back to
    /// [`Pitch::DEFAULT`] for unknown keys. Never fails and never
    /// yields a `NaN` multiplier.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.trim().parse().unwrap_or(Self::DEFAULT)
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A complete roof measurement derived from a traced footprint.
///
/// Always produced by [`compute_roof_measurement`] as a whole. Fields
/// are never patched individually, so `adjusted_square_feet` and
/// `total_squares` can never go stale against `square_feet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofMeasurement {
    /// Raw planar footprint area in square feet.
    pub square_feet: f64,
    /// Roof pitch used for the surface-area adjustment.
    pub pitch: Pitch,
    /// Multiplier applied for the pitch.
    pub pitch_multiplier: f64,
    /// Pitch-adjusted surface area in square feet.
    pub adjusted_square_feet: f64,
    /// Waste fraction applied for cut-offs and complex shapes.
    pub waste_factor: f64,
    /// Material requirement in roofing squares, rounded to 1 decimal.
    pub total_squares: f64,
}

/// Derives a [`RoofMeasurement`] from a planar area, pitch, and waste
/// factor.
///
/// Non-finite or negative areas are treated as `0.0` (an incomplete
/// drawing, not an error). The waste factor accepts any fraction and is
/// clamped to `[0.0, 1.0]`; a non-finite waste factor falls back to
/// [`WASTE_FACTOR_DEFAULT`].
#[must_use]
pub fn compute_roof_measurement(
    square_feet: f64,
    pitch: Pitch,
    waste_factor: f64,
) -> RoofMeasurement {
    let square_feet = if square_feet.is_finite() {
        square_feet.max(0.0)
    } else {
        0.0
    };
    let waste_factor = if waste_factor.is_finite() {
        waste_factor.clamp(0.0, 1.0)
    } else {
        WASTE_FACTOR_DEFAULT
    };

    let pitch_multiplier = pitch.multiplier();
    let adjusted_square_feet = square_feet * pitch_multiplier;
    let total_squares =
        round_to_tenth(adjusted_square_feet * (1.0 + waste_factor) / SQFT_PER_SQUARE);

    RoofMeasurement {
        square_feet,
        pitch,
        pitch_multiplier,
        adjusted_square_feet,
        waste_factor,
        total_squares,
    }
}

/// Converts roofing squares to square feet.
#[must_use]
pub fn square_feet_from_squares(squares: f64) -> f64 {
    squares * SQFT_PER_SQUARE
}

/// Converts square feet to roofing squares.
#[must_use]
pub fn squares_from_square_feet(square_feet: f64) -> f64 {
    square_feet / SQFT_PER_SQUARE
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_multiplier_is_exactly_one() {
        assert_eq!(Pitch::Rise0.multiplier(), 1.0);
    }

    #[test]
    fn six_twelve_multiplier_matches_table() {
        assert!((Pitch::Rise6.multiplier() - 1.118).abs() < 1e-3);
    }

    #[test]
    fn twelve_twelve_multiplier_is_sqrt_two() {
        assert!((Pitch::Rise12.multiplier() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn multiplier_is_monotonic_in_pitch() {
        for pair in Pitch::ALL.windows(2) {
            assert!(
                pair[1].multiplier() > pair[0].multiplier(),
                "{} should be steeper than {}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn parses_standard_pitch_notation() {
        assert_eq!(Pitch::parse_or_default("6/12"), Pitch::Rise6);
        assert_eq!(Pitch::parse_or_default("0/12"), Pitch::Rise0);
        assert_eq!(Pitch::parse_or_default(" 12/12 "), Pitch::Rise12);
    }

    #[test]
    fn unknown_pitch_falls_back_to_default() {
        assert_eq!(Pitch::parse_or_default("steep"), Pitch::DEFAULT);
        assert_eq!(Pitch::parse_or_default(""), Pitch::DEFAULT);
        assert_eq!(Pitch::parse_or_default("13/12"), Pitch::DEFAULT);
    }

    #[test]
    fn pitch_displays_as_rise_notation() {
        assert_eq!(Pitch::Rise6.to_string(), "6/12");
    }

    #[test]
    fn measurement_matches_guided_estimate_scenario() {
        // 2,000 sq ft footprint, 6/12 pitch, 15% waste.
        let m = compute_roof_measurement(2000.0, Pitch::Rise6, 0.15);
        assert!((m.adjusted_square_feet - 2236.0).abs() < 0.5);
        assert!((m.total_squares - 25.7).abs() < 1e-9);
    }

    #[test]
    fn flat_pitch_leaves_area_unchanged() {
        let m = compute_roof_measurement(2000.0, Pitch::Rise0, 0.15);
        assert_eq!(m.adjusted_square_feet, m.square_feet);
    }

    #[test]
    fn adjusted_area_never_shrinks() {
        for &pitch in Pitch::ALL {
            let m = compute_roof_measurement(1234.5, pitch, 0.12);
            assert!(m.adjusted_square_feet >= m.square_feet);
        }
    }

    #[test]
    fn recomputation_does_not_compound() {
        // Applying pitch A then B must match applying B directly, since
        // every computation starts from the raw planar area.
        let base = 1800.0;
        let _ = compute_roof_measurement(base, Pitch::Rise4, 0.15);
        let after_change = compute_roof_measurement(base, Pitch::Rise9, 0.15);
        let direct = compute_roof_measurement(base, Pitch::Rise9, 0.15);
        assert_eq!(after_change, direct);
    }

    #[test]
    fn waste_factor_is_clamped() {
        let high = compute_roof_measurement(1000.0, Pitch::Rise0, 1.5);
        assert!((high.waste_factor - 1.0).abs() < 1e-12);
        assert!((high.total_squares - 20.0).abs() < 1e-9);

        let negative = compute_roof_measurement(1000.0, Pitch::Rise0, -0.5);
        assert!((negative.waste_factor - 0.0).abs() < 1e-12);
        assert!((negative.total_squares - 10.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_inputs_recover() {
        let m = compute_roof_measurement(f64::NAN, Pitch::Rise6, f64::INFINITY);
        assert_eq!(m.square_feet, 0.0);
        assert!((m.waste_factor - WASTE_FACTOR_DEFAULT).abs() < 1e-12);
        assert_eq!(m.total_squares, 0.0);
    }

    #[test]
    fn negative_area_is_treated_as_empty() {
        let m = compute_roof_measurement(-500.0, Pitch::Rise6, 0.15);
        assert_eq!(m.square_feet, 0.0);
        assert_eq!(m.total_squares, 0.0);
    }

    #[test]
    fn squares_and_square_feet_round_trip() {
        assert!((square_feet_from_squares(25.7) - 2570.0).abs() < 1e-9);
        assert!((squares_from_square_feet(2570.0) - 25.7).abs() < 1e-9);
    }

    #[test]
    fn measurement_serializes_with_wire_names() {
        let m = compute_roof_measurement(2000.0, Pitch::Rise6, 0.15);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["pitch"], "6/12");
        assert!(json.get("adjustedSquareFeet").is_some());
        assert!(json.get("totalSquares").is_some());
    }
}
