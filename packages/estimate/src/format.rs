//! Display formatting for estimate documents.
//!
//! Quotes show whole dollars with thousands separators, waste factors
//! as percentages, and squares to one decimal. All rounding here is
//! display-only; the underlying numbers stay untouched.

use roof_quote_catalog::PriceRange;

/// Formats a dollar amount as `"$12,345"` (rounded to whole dollars).
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = rounded.abs() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a price band as `"$7,750 - $12,000"`.
#[must_use]
pub fn format_usd_range(range: PriceRange) -> String {
    format!("{} - {}", format_usd(range.min), format_usd(range.max))
}

/// Formats a fraction as a whole percentage, e.g. `0.15` -> `"15%"`.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round())
}

/// Formats roofing squares to one decimal, e.g. `"25.7"`.
#[must_use]
pub fn format_squares(squares: f64) -> String {
    format!("{squares:.1}")
}

/// Formats square feet as whole feet with separators, e.g. `"2,236"`.
#[must_use]
pub fn format_sq_ft(square_feet: f64) -> String {
    let usd = format_usd(square_feet);
    usd.trim_start_matches('$').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_amounts() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(750.0), "$750");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(7750.0), "$7,750");
        assert_eq!(format_usd(12000.0), "$12,000");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn rounds_to_whole_dollars() {
        assert_eq!(format_usd(11950.5), "$11,951");
        assert_eq!(format_usd(11950.4), "$11,950");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_usd(-1234.0), "-$1,234");
    }

    #[test]
    fn formats_ranges() {
        assert_eq!(
            format_usd_range(PriceRange::new(7750.0, 12000.0)),
            "$7,750 - $12,000"
        );
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(format_percent(0.15), "15%");
        assert_eq!(format_percent(0.1), "10%");
    }

    #[test]
    fn formats_squares_to_one_decimal() {
        assert_eq!(format_squares(25.7), "25.7");
        assert_eq!(format_squares(25.0), "25.0");
    }

    #[test]
    fn formats_square_footage() {
        assert_eq!(format_sq_ft(2236.1), "2,236");
    }
}
