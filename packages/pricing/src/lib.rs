#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Project cost estimation.
//!
//! Two paths:
//!
//! - **Guided estimate**: a measured roof paired with a catalog package
//!   yields a single price (`squares x price/square`).
//! - **Standalone calculator**: roof size plus a material selection
//!   yields a ranged total built from independently-ranged line items
//!   (material, labor, optional tear-off, optional deck-repair
//!   allowance, fixed permit/disposal costs). Min and max sum
//!   independently; the range is never collapsed to a single number.

use roof_quote_catalog::PriceRange;
use serde::{Deserialize, Serialize};

/// Industry-typical labor band per square, independent of material
/// choice.
pub const LABOR_PER_SQUARE: PriceRange = PriceRange::new(60.0, 100.0);

/// Tear-off and disposal band per square for removing the existing roof.
pub const REMOVAL_PER_SQUARE: PriceRange = PriceRange::new(100.0, 150.0);

/// Deck repair band per square, applied to the affected fraction only.
pub const DECK_REPAIR_PER_SQUARE: PriceRange = PriceRange::new(100.0, 160.0);

/// Fraction of roofs that typically need deck repair. The repair band
/// applies to this fraction of the roof, not the whole deck.
pub const DECK_REPAIR_AFFECTED_FRACTION: f64 = 0.15;

/// Flat permits/disposal cost, applied whenever there is any roof to
/// price.
pub const FIXED_MISC_COSTS: f64 = 750.0;

/// Line items behind a [`CostRange`], each already scaled to the roof
/// size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Material band for the full roof.
    pub material: PriceRange,
    /// Labor band for the full roof.
    pub labor: PriceRange,
    /// Tear-off band, present when removal was requested.
    pub removal: Option<PriceRange>,
    /// Deck-repair allowance band, present when requested.
    pub deck_repair: Option<PriceRange>,
    /// Flat permits/disposal cost.
    pub fixed_costs: f64,
}

/// A ranged project cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRange {
    /// Sum of all line-item minimums.
    pub total_min: f64,
    /// Sum of all line-item maximums.
    pub total_max: f64,
    /// The line items the totals were built from.
    pub breakdown: CostBreakdown,
}

/// Computes the guided-estimate price for a measured roof and a package
/// price per square.
///
/// Non-finite or negative inputs price as zero (an incomplete
/// measurement, not a fault).
#[must_use]
pub fn compute_cost_estimate(total_squares: f64, price_per_square: f64) -> f64 {
    let squares = sanitize_quantity(total_squares);
    let rate = sanitize_quantity(price_per_square);
    squares * rate
}

/// Computes a ranged project cost for the standalone calculator.
///
/// Input bands are normalized (min/max swapped into order) before
/// scaling, so `total_min <= total_max` holds for any input. The fixed
/// permits/disposal cost applies only when there is a roof to price.
#[must_use]
pub fn compute_cost_range(
    squares: f64,
    material: PriceRange,
    labor: PriceRange,
    include_removal: bool,
    include_deck_repair: bool,
) -> CostRange {
    let squares = sanitize_quantity(squares);

    let material = material.normalized().scaled(squares);
    let labor = labor.normalized().scaled(squares);
    let removal = include_removal.then(|| REMOVAL_PER_SQUARE.scaled(squares));
    let deck_repair = include_deck_repair
        .then(|| DECK_REPAIR_PER_SQUARE.scaled(squares * DECK_REPAIR_AFFECTED_FRACTION));
    let fixed_costs = if squares > 0.0 { FIXED_MISC_COSTS } else { 0.0 };

    let optional = |band: Option<PriceRange>, pick: fn(PriceRange) -> f64| {
        band.map_or(0.0, pick)
    };

    let total_min = material.min
        + labor.min
        + optional(removal, |b| b.min)
        + optional(deck_repair, |b| b.min)
        + fixed_costs;
    let total_max = material.max
        + labor.max
        + optional(removal, |b| b.max)
        + optional(deck_repair, |b| b.max)
        + fixed_costs;

    CostRange {
        total_min,
        total_max,
        breakdown: CostBreakdown {
            material,
            labor,
            removal,
            deck_repair,
            fixed_costs,
        },
    }
}

/// Clamps a quantity to finite, non-negative.
fn sanitize_quantity(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
