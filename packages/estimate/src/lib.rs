#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Estimate wizard flow and estimate document assembly.
//!
//! The instant-estimate wizard walks a visitor through address
//! selection, roof tracing, package choice, and contact collection
//! before an estimate is delivered. [`flow::EstimateFlow`] models those
//! steps as a sum type, one variant per step carrying only the data
//! valid at that point, so "step 4 without step 2's data" cannot be
//! represented.
//!
//! [`document`] assembles the final multi-section estimate document
//! from the collected data. Assembly owns display formatting only; all
//! measurement and pricing numbers arrive precomputed. A document with
//! a missing input is never produced.

pub mod document;
pub mod flow;
pub mod format;
pub mod render;
