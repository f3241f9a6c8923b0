//! Plain-text rendering of estimate documents.
//!
//! Produces the fixed-width text layout used for estimate email bodies
//! and CLI output. Labels sit in a fixed-width left column so values
//! line up; the PDF rendering on the client consumes the same
//! [`EstimateDocument`] data, not this text.

use crate::document::EstimateDocument;

/// Width of the label column in section bodies.
const LABEL_WIDTH: usize = 22;

/// Renders the document as aligned plain text.
#[must_use]
pub fn render_text(doc: &EstimateDocument) -> String {
    let mut out = String::new();

    push_heading(&mut out, "ROOF REPLACEMENT ESTIMATE");
    out.push_str(&format!(
        "Generated {}\n\n",
        doc.generated_at.format("%B %e, %Y")
    ));

    push_heading(&mut out, "PREPARED FOR");
    push_row(&mut out, "Name", &doc.cover.customer_name);
    push_row(&mut out, "Property", &doc.cover.property_address);
    push_row(&mut out, "Email", &doc.cover.customer_email);
    push_row(&mut out, "Phone", &doc.cover.customer_phone);
    out.push('\n');

    push_heading(&mut out, "ROOF MEASUREMENT");
    push_row(
        &mut out,
        "Footprint area",
        &format!("{} sq ft", doc.measurement.footprint_display),
    );
    push_row(
        &mut out,
        "Pitch",
        &format!(
            "{} (x{})",
            doc.measurement.pitch, doc.measurement.pitch_multiplier_display
        ),
    );
    push_row(
        &mut out,
        "Adjusted area",
        &format!("{} sq ft", doc.measurement.adjusted_display),
    );
    push_row(&mut out, "Waste factor", &doc.measurement.waste_display);
    push_row(&mut out, "Total squares", &doc.measurement.squares_display);
    out.push('\n');

    push_heading(
        &mut out,
        &format!("PACKAGE: {} ({})", doc.package.name, doc.package.brand),
    );
    for feature in &doc.package.features {
        out.push_str(&format!("  - {feature}\n"));
    }
    push_row(&mut out, "Warranty", &doc.package.warranty);
    push_row(&mut out, "Lifespan", &doc.package.lifespan);
    push_row(&mut out, "Colors", &doc.package.colors.join(", "));
    out.push('\n');

    push_heading(&mut out, "PRICING");
    push_row(
        &mut out,
        "Rate",
        &format!("{}/square", doc.pricing.price_per_square_display),
    );
    push_row(&mut out, "Squares", &doc.pricing.squares_display);
    push_row(&mut out, "Total", &doc.pricing.total_display);
    out.push('\n');

    push_heading(&mut out, "NEXT STEPS");
    for (i, step) in doc.next_steps.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }

    out
}

fn push_heading(out: &mut String, heading: &str) {
    out.push_str(heading);
    out.push('\n');
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<LABEL_WIDTH$}{value}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::EstimateDocument;
    use roof_quote_estimate_models::{Address, CustomerInfo};
    use roof_quote_measure::{Pitch, compute_roof_measurement};

    fn document() -> EstimateDocument {
        EstimateDocument::assemble(
            Some(&CustomerInfo {
                name: "Pat Ramos".to_string(),
                email: "pat@example.com".to_string(),
                phone: "2145550147".to_string(),
                notes: None,
            }),
            Some(&Address {
                formatted: "3400 Maple Ave, Dallas, TX".to_string(),
                latitude: 32.8,
                longitude: -96.8,
            }),
            Some(&compute_roof_measurement(2000.0, Pitch::Rise6, 0.15)),
            Some(&roof_quote_catalog::find_package("preferred").unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn renders_all_sections_in_order() {
        let text = render_text(&document());
        let headings = [
            "ROOF REPLACEMENT ESTIMATE",
            "PREPARED FOR",
            "ROOF MEASUREMENT",
            "PACKAGE: Preferred (GAF Timberline HDZ)",
            "PRICING",
            "NEXT STEPS",
        ];
        let mut last = 0;
        for heading in headings {
            let pos = text.find(heading).unwrap_or_else(|| {
                panic!("missing heading {heading}");
            });
            assert!(pos >= last, "heading {heading} out of order");
            last = pos;
        }
    }

    #[test]
    fn values_line_up_in_the_label_column() {
        let text = render_text(&document());
        assert!(text.contains(&format!("  {:<LABEL_WIDTH$}{}", "Footprint area", "2,000 sq ft")));
        assert!(text.contains(&format!("  {:<LABEL_WIDTH$}{}", "Total squares", "25.7")));
        assert!(text.contains(&format!("  {:<LABEL_WIDTH$}{}", "Total", "$11,951")));
    }

    #[test]
    fn lists_package_features() {
        let text = render_text(&document());
        assert!(text.contains("- GAF Timberline HDZ architectural shingles with LayerLock"));
    }

    #[test]
    fn numbers_the_next_steps() {
        let text = render_text(&document());
        assert!(text.contains("  1. "));
        assert!(text.contains("  4. "));
    }
}
