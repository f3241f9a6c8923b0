#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the roof quote application.
//!
//! Serves the REST API behind the marketing site: catalog data for the
//! package picker, address geocoding for the instant-estimate map, the
//! measurement and pricing endpoints the wizard calls on every edit,
//! estimate submission (with email delivery), and lead-capture form
//! intake. The app is stateless per request: every measurement is
//! recomputed server-side from the submitted outline, and nothing is
//! persisted.

mod handlers;
pub mod validation;

use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use roof_quote_notify::Mailer;

/// Hard ceiling on a single email delivery attempt. Delivery past this
/// point fails visibly instead of hanging the submission.
pub const EMAIL_SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state.
pub struct AppState {
    /// HTTP client shared by the geocoding providers.
    pub http: reqwest::Client,
    /// Email client; `None` when delivery is not configured.
    pub mailer: Option<Mailer>,
    /// Inbox that receives lead and estimate notifications.
    pub sales_inbox: Option<String>,
}

/// Starts the roof quote API server.
///
/// Builds the shared HTTP client, configures email delivery from the
/// environment, and starts the Actix-Web HTTP server. This is a
/// regular async function; the caller is responsible for providing
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let http = reqwest::Client::new();
    let mailer = Mailer::from_env(http.clone());

    let sales_inbox = std::env::var("SALES_INBOX").ok();
    if sales_inbox.is_none() {
        log::warn!("SALES_INBOX not set; sales notifications are disabled");
    }

    let state = web::Data::new(AppState {
        http,
        mailer,
        sales_inbox,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/packages", web::get().to(handlers::packages))
                    .route("/materials", web::get().to(handlers::materials))
                    .route("/geocode", web::get().to(handlers::geocode))
                    .route("/measure", web::post().to(handlers::measure))
                    .route("/quote", web::post().to(handlers::quote))
                    .route("/calculator", web::post().to(handlers::calculator))
                    .route("/estimates", web::post().to(handlers::submit_estimate))
                    .route("/leads", web::post().to(handlers::lead)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
