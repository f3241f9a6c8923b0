#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Binary entry point for the roof quote API server.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    roof_quote_server::run_server().await
}
