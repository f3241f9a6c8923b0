//! HTTP handler functions for the roof quote API.

use actix_web::{HttpResponse, web};
use roof_quote_estimate::document::EstimateDocument;
use roof_quote_estimate::render::render_text;
use roof_quote_estimate_models::CustomerInfo;
use roof_quote_geometry::{GeoPoint, polygon_area_sq_ft};
use roof_quote_measure::{
    Pitch, RoofMeasurement, WASTE_FACTOR_DEFAULT, compute_roof_measurement,
    square_feet_from_squares, squares_from_square_feet,
};
use roof_quote_notify::{Attachment, EmailMessage, Mailer};
use roof_quote_pricing::{LABOR_PER_SQUARE, compute_cost_estimate, compute_cost_range};
use roof_quote_server_models::{
    ApiAddress, ApiHealth, CalculatorRequest, CalculatorResponse, GeocodeQueryParams,
    LeadRequest, LeadResponse, MeasureRequest, QuoteRequest, QuoteResponse,
    SubmitEstimateRequest, SubmitEstimateResponse,
};

use crate::validation::validate_contact;
use crate::{AppState, EMAIL_SEND_TIMEOUT};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/packages`
///
/// Returns the roofing package catalog for the package picker.
pub async fn packages() -> HttpResponse {
    HttpResponse::Ok().json(roof_quote_catalog::all_packages())
}

/// `GET /api/materials`
///
/// Returns the calculator material options.
pub async fn materials() -> HttpResponse {
    HttpResponse::Ok().json(roof_quote_catalog::all_materials())
}

/// `GET /api/geocode?q=`
///
/// Resolves a free-form address query to coordinates for centering the
/// roof-tracing map.
pub async fn geocode(
    state: web::Data<AppState>,
    params: web::Query<GeocodeQueryParams>,
) -> HttpResponse {
    let query = params.q.trim();
    if query.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Address query is required"
        }));
    }

    match roof_quote_geocoder::search(&state.http, query).await {
        Ok(Some(address)) => HttpResponse::Ok().json(ApiAddress::from(address)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "No match for that address"
        })),
        Err(e) => {
            log::error!("Geocoding failed for '{query}': {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Address lookup is temporarily unavailable"
            }))
        }
    }
}

/// `POST /api/measure`
///
/// Computes a roof measurement from a traced outline. An incomplete
/// outline is a normal in-progress state and yields a zero-area
/// measurement, not an error.
pub async fn measure(body: web::Json<MeasureRequest>) -> HttpResponse {
    let req = body.into_inner();
    let measurement =
        measurement_from_parts(&req.points, req.pitch.as_deref(), req.waste_factor);
    HttpResponse::Ok().json(measurement)
}

/// `POST /api/quote`
///
/// Prices a measured roof against a catalog package.
pub async fn quote(body: web::Json<QuoteRequest>) -> HttpResponse {
    let req = body.into_inner();
    let Some(package) = roof_quote_catalog::find_package(&req.package_id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unknown package '{}'", req.package_id)
        }));
    };

    let price = compute_cost_estimate(req.total_squares, package.price_per_square);
    HttpResponse::Ok().json(QuoteResponse { price, package })
}

/// `POST /api/calculator`
///
/// Computes a ranged project cost from a roof size and material
/// selection.
pub async fn calculator(body: web::Json<CalculatorRequest>) -> HttpResponse {
    let req = body.into_inner();

    let Some(squares) = resolve_squares(req.squares, req.square_feet) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Roof size is required (squares or squareFeet)"
        }));
    };

    let Some(material) = roof_quote_catalog::find_material(&req.material_id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unknown material '{}'", req.material_id)
        }));
    };

    let cost = compute_cost_range(
        squares,
        material.price_per_square,
        LABOR_PER_SQUARE,
        req.include_removal,
        req.include_deck_repair,
    );

    HttpResponse::Ok().json(CalculatorResponse {
        squares,
        square_feet: square_feet_from_squares(squares),
        material,
        cost,
    })
}

/// `POST /api/estimates`
///
/// Accepts a full estimate submission: recomputes the measurement
/// server-side from the submitted outline, assembles the estimate
/// document, and delivers it by email. Email failures are visible to
/// the caller; there is no automatic retry.
pub async fn submit_estimate(
    state: web::Data<AppState>,
    body: web::Json<SubmitEstimateRequest>,
) -> HttpResponse {
    let req = body.into_inner();

    let contact = match validate_contact(&req.customer.name, &req.customer.email, &req.customer.phone)
    {
        Ok(contact) => contact,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };
    let customer = CustomerInfo {
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        notes: req.customer.notes,
    };

    let measurement =
        measurement_from_parts(&req.points, req.pitch.as_deref(), req.waste_factor);
    if measurement.total_squares <= 0.0 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "A traced roof outline is required before submitting"
        }));
    }

    let Some(package) = roof_quote_catalog::find_package(&req.package_id) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unknown package '{}'", req.package_id)
        }));
    };

    let document = match EstimateDocument::assemble(
        Some(&customer),
        Some(&req.address),
        Some(&measurement),
        Some(&package),
    ) {
        Ok(document) => document,
        Err(e) => {
            log::error!("Estimate document assembly failed: {e}");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    let reference = uuid::Uuid::new_v4().to_string();
    let body_text = render_text(&document);

    let Some(mailer) = &state.mailer else {
        log::warn!("Estimate {reference} accepted but email delivery is not configured");
        return HttpResponse::Ok().json(SubmitEstimateResponse {
            reference,
            emailed: false,
        });
    };

    let attachments = req
        .document_pdf_base64
        .map(|content| {
            vec![Attachment {
                filename: "roof-estimate.pdf".to_string(),
                content,
            }]
        })
        .unwrap_or_default();

    let customer_message = EmailMessage {
        to: vec![customer.email.clone()],
        subject: format!("Your roof estimate for {}", req.address.formatted),
        text: body_text.clone(),
        html: None,
        attachments,
    };

    if let Err(e) = send_with_timeout(mailer, &customer_message).await {
        log::error!("Estimate {reference}: customer email failed: {e}");
        return HttpResponse::BadGateway().json(serde_json::json!({
            "error": "Failed to send the estimate email. Please try again."
        }));
    }

    if let Some(inbox) = &state.sales_inbox {
        let sales_message = EmailMessage {
            to: vec![inbox.clone()],
            subject: format!(
                "New estimate request: {} ({})",
                customer.name, req.address.formatted
            ),
            text: format!("Reference: {reference}\n\n{body_text}"),
            html: None,
            attachments: Vec::new(),
        };
        // The customer already has their estimate; a failed internal
        // notification is logged, not surfaced.
        if let Err(e) = send_with_timeout(mailer, &sales_message).await {
            log::error!("Estimate {reference}: sales notification failed: {e}");
        }
    }

    HttpResponse::Ok().json(SubmitEstimateResponse {
        reference,
        emailed: true,
    })
}

/// `POST /api/leads`
///
/// Accepts a lead-capture form submission and notifies the sales
/// inbox.
pub async fn lead(state: web::Data<AppState>, body: web::Json<LeadRequest>) -> HttpResponse {
    let req = body.into_inner();

    let contact = match validate_contact(&req.name, &req.email, &req.phone) {
        Ok(contact) => contact,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    let reference = uuid::Uuid::new_v4().to_string();

    let delivery = state
        .mailer
        .as_ref()
        .zip(state.sales_inbox.as_ref());
    let Some((mailer, inbox)) = delivery else {
        log::warn!(
            "Lead {reference} from {} <{}> accepted but notifications are not configured",
            contact.name,
            contact.email
        );
        return HttpResponse::Ok().json(LeadResponse { reference });
    };

    let mut lines = vec![
        format!("Name:  {}", contact.name),
        format!("Email: {}", contact.email),
        format!("Phone: {}", contact.phone),
    ];
    if let Some(city) = &req.city {
        lines.push(format!("City:  {city}"));
    }
    if let Some(message) = &req.message {
        lines.push(String::new());
        lines.push(message.clone());
    }

    let notification = EmailMessage {
        to: vec![inbox.clone()],
        subject: format!("New lead: {}", contact.name),
        text: lines.join("\n"),
        html: None,
        attachments: Vec::new(),
    };

    if let Err(e) = send_with_timeout(mailer, &notification).await {
        log::error!("Lead {reference}: notification failed: {e}");
        return HttpResponse::BadGateway().json(serde_json::json!({
            "error": "Failed to submit. Please try again."
        }));
    }

    HttpResponse::Ok().json(LeadResponse { reference })
}

/// Derives a measurement from request parts, applying the documented
/// defaults for missing pitch and waste factor.
fn measurement_from_parts(
    points: &[GeoPoint],
    pitch: Option<&str>,
    waste_factor: Option<f64>,
) -> RoofMeasurement {
    let pitch = pitch.map_or(Pitch::DEFAULT, Pitch::parse_or_default);
    let waste_factor = waste_factor.unwrap_or(WASTE_FACTOR_DEFAULT);
    compute_roof_measurement(polygon_area_sq_ft(points), pitch, waste_factor)
}

/// Normalizes the calculator's two size-entry modes to squares.
/// Squares win when both are present (they are the canonical unit).
fn resolve_squares(squares: Option<f64>, square_feet: Option<f64>) -> Option<f64> {
    squares.or_else(|| square_feet.map(squares_from_square_feet))
}

/// Sends one email under [`EMAIL_SEND_TIMEOUT`].
async fn send_with_timeout(mailer: &Mailer, message: &EmailMessage) -> Result<(), String> {
    match tokio::time::timeout(EMAIL_SEND_TIMEOUT, mailer.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!(
            "timed out after {}s",
            EMAIL_SEND_TIMEOUT.as_secs()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_defaults_apply() {
        let m = measurement_from_parts(&[], None, None);
        assert_eq!(m.pitch, Pitch::DEFAULT);
        assert!((m.waste_factor - WASTE_FACTOR_DEFAULT).abs() < 1e-12);
        assert_eq!(m.square_feet, 0.0);
    }

    #[test]
    fn measurement_parses_submitted_pitch() {
        let m = measurement_from_parts(&[], Some("8/12"), Some(0.12));
        assert_eq!(m.pitch, Pitch::Rise8);
        assert!((m.waste_factor - 0.12).abs() < 1e-12);
    }

    #[test]
    fn unknown_submitted_pitch_falls_back() {
        let m = measurement_from_parts(&[], Some("mystery"), None);
        assert_eq!(m.pitch, Pitch::DEFAULT);
    }

    #[test]
    fn squares_win_over_square_feet() {
        assert_eq!(resolve_squares(Some(25.0), Some(9999.0)), Some(25.0));
    }

    #[test]
    fn square_feet_convert_when_squares_absent() {
        assert_eq!(resolve_squares(None, Some(2570.0)), Some(25.7));
    }

    #[test]
    fn missing_size_resolves_to_none() {
        assert_eq!(resolve_squares(None, None), None);
    }
}
