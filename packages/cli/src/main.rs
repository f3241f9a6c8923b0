#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the roof quote toolchain.
//!
//! Provides subcommands for measuring a roof from a `GeoJSON` outline,
//! rendering a full quote document, running the standalone cost
//! calculator, listing the package catalog, and starting the API
//! server.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use roof_quote_estimate::document::EstimateDocument;
use roof_quote_estimate::render::render_text;
use roof_quote_estimate_models::{Address, CustomerInfo};
use roof_quote_geometry::{GeoPoint, outline_from_geojson, polygon_area_sq_ft};
use roof_quote_measure::{Pitch, compute_roof_measurement};
use roof_quote_pricing::{LABOR_PER_SQUARE, compute_cost_range};

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// Measure roofs and produce quotes from the command line.
#[derive(Parser)]
#[command(name = "roof_quote_cli")]
#[command(about = "Roof measurement and quote toolchain")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Measure a roof from a GeoJSON polygon outline.
    Measure {
        /// Path to a GeoJSON Polygon/MultiPolygon geometry file.
        geojson: PathBuf,

        /// Roof pitch in rise/12 notation.
        #[arg(long, default_value = "6/12")]
        pitch: String,

        /// Waste fraction (0.10-0.20 typical).
        #[arg(long, default_value_t = roof_quote_measure::WASTE_FACTOR_DEFAULT)]
        waste: f64,
    },

    /// Render a full quote document for a measured roof.
    Quote {
        /// Path to a GeoJSON Polygon/MultiPolygon geometry file.
        geojson: PathBuf,

        /// Roof pitch in rise/12 notation.
        #[arg(long, default_value = "6/12")]
        pitch: String,

        /// Waste fraction (0.10-0.20 typical).
        #[arg(long, default_value_t = roof_quote_measure::WASTE_FACTOR_DEFAULT)]
        waste: f64,

        /// Catalog package id (see `packages`).
        #[arg(long)]
        package: String,

        /// Customer full name.
        #[arg(long)]
        name: String,

        /// Customer email.
        #[arg(long)]
        email: String,

        /// Customer phone.
        #[arg(long)]
        phone: String,

        /// Formatted property address.
        #[arg(long)]
        address: String,
    },

    /// Estimate a ranged project cost without a traced outline.
    Calculator {
        /// Roof size in roofing squares.
        #[arg(long)]
        squares: Option<f64>,

        /// Roof size in square feet.
        #[arg(long)]
        square_feet: Option<f64>,

        /// Calculator material id (e.g. "architectural-asphalt").
        #[arg(long)]
        material: String,

        /// Include tear-off of the existing roof.
        #[arg(long)]
        include_removal: bool,

        /// Include the deck-repair allowance.
        #[arg(long)]
        include_deck_repair: bool,
    },

    /// List the roofing package catalog.
    Packages,

    /// Start the API server.
    Serve,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Serve = cli.command {
        // The server owns logger initialization and the actix runtime.
        return Ok(actix_web::rt::System::new().block_on(roof_quote_server::run_server())?);
    }

    pretty_env_logger::init_custom_env("RUST_LOG");

    match cli.command {
        Commands::Measure {
            geojson,
            pitch,
            waste,
        } => {
            let points = load_outline(&geojson)?;
            let measurement = compute_roof_measurement(
                polygon_area_sq_ft(&points),
                Pitch::parse_or_default(&pitch),
                waste,
            );
            println!("{}", serde_json::to_string_pretty(&measurement)?);
        }
        Commands::Quote {
            geojson,
            pitch,
            waste,
            package,
            name,
            email,
            phone,
            address,
        } => {
            let points = load_outline(&geojson)?;
            let measurement = compute_roof_measurement(
                polygon_area_sq_ft(&points),
                Pitch::parse_or_default(&pitch),
                waste,
            );
            let package = roof_quote_catalog::find_package(&package)
                .ok_or_else(|| format!("unknown package '{package}'"))?;
            let customer = CustomerInfo {
                name,
                email,
                phone,
                notes: None,
            };
            let address = Address {
                formatted: address,
                latitude: mean(points.iter().map(|p| p.latitude)),
                longitude: mean(points.iter().map(|p| p.longitude)),
            };
            let document = EstimateDocument::assemble(
                Some(&customer),
                Some(&address),
                Some(&measurement),
                Some(&package),
            )?;
            print!("{}", render_text(&document));
        }
        Commands::Calculator {
            squares,
            square_feet,
            material,
            include_removal,
            include_deck_repair,
        } => {
            let squares = squares
                .or_else(|| square_feet.map(roof_quote_measure::squares_from_square_feet))
                .ok_or("roof size is required (--squares or --square-feet)")?;
            let material = roof_quote_catalog::find_material(&material)
                .ok_or_else(|| format!("unknown material '{material}'"))?;
            let cost = compute_cost_range(
                squares,
                material.price_per_square,
                LABOR_PER_SQUARE,
                include_removal,
                include_deck_repair,
            );
            println!("{}", serde_json::to_string_pretty(&cost)?);
        }
        Commands::Packages => {
            for p in roof_quote_catalog::all_packages() {
                println!("{:<12} {} ({}) - ${}/square", p.id, p.name, p.brand, p.price_per_square);
            }
        }
        Commands::Serve => unreachable!("handled above"),
    }

    Ok(())
}

/// Loads and parses a `GeoJSON` outline file.
fn load_outline(path: &Path) -> Result<Vec<GeoPoint>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let points = outline_from_geojson(&raw)
        .ok_or_else(|| format!("{} is not a GeoJSON Polygon/MultiPolygon", path.display()))?;
    log::debug!("loaded {} outline vertices from {}", points.len(), path.display());
    Ok(points)
}

/// Mean of an iterator of coordinates.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}
