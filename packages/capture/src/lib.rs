#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive polygon capture for roof tracing.
//!
//! A [`CaptureSession`] sits between the satellite-map drawing surface
//! and the measurement pipeline. The map provider delivers raw vertex
//! edits (click, drag, insert); the session runs them through a small
//! state machine and notifies its observer with the current vertex list
//! and recomputed area on every completed edit:
//!
//! ```text
//! Idle --start_drawing--> Drawing --close_shape--> Closed
//!   ^                                                 |
//!   +------------------ clear ------------------------+
//! ```
//!
//! Vertex moves and inserts while `Closed` keep the session `Closed`
//! and recompute. Selecting a new address from any state returns to
//! `Idle`; a traced polygon never carries across addresses. A map
//! provider that fails to initialize puts the session into a distinct
//! `ProviderFailed` state that supports an explicit retry.

use roof_quote_estimate_models::Address;
use roof_quote_geometry::{GeoPoint, polygon_area_sq_ft};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum vertices required to close a traced shape.
pub const MIN_CLOSED_VERTICES: usize = 3;

/// The drawing lifecycle state of a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    /// No polygon and not drawing.
    Idle,
    /// Collecting vertices from sequential clicks/taps.
    Drawing,
    /// Polygon complete and editable.
    Closed,
    /// The map provider failed to initialize; the user can retry.
    ProviderFailed {
        /// User-facing description of the failure.
        message: String,
    },
}

impl CaptureState {
    /// Short state name for errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing => "drawing",
            Self::Closed => "closed",
            Self::ProviderFailed { .. } => "provider-failed",
        }
    }
}

/// Snapshot delivered to the observer after every completed edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureUpdate {
    /// Planar area of the current polygon in square feet (`0.0` while
    /// there is no closed polygon).
    pub square_feet: f64,
    /// The current ordered vertex list (empty while idle).
    pub points: Vec<GeoPoint>,
}

/// Errors from capture operations invoked in the wrong state or with
/// invalid indices.
///
/// In-progress geometry (too few vertices to enclose area, collinear
/// shapes) is a normal transient state and is *not* an error; only
/// operations that violate the state machine are.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// An operation required an idle session.
    #[error("cannot start drawing from state '{state}'")]
    NotIdle {
        /// The state the session was in.
        state: &'static str,
    },

    /// An operation required an in-progress drawing.
    #[error("no drawing in progress (state: '{state}')")]
    NotDrawing {
        /// The state the session was in.
        state: &'static str,
    },

    /// An operation required a closed polygon.
    #[error("no closed polygon to edit (state: '{state}')")]
    NotClosed {
        /// The state the session was in.
        state: &'static str,
    },

    /// Closing was attempted with too few vertices.
    #[error("cannot close shape with {count} vertices (need {MIN_CLOSED_VERTICES})")]
    TooFewVertices {
        /// How many vertices had been placed.
        count: usize,
    },

    /// A vertex index was outside the polygon.
    #[error("vertex index {index} out of bounds (polygon has {len} vertices)")]
    VertexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The current vertex count.
        len: usize,
    },

    /// The map provider is unavailable; the session needs a retry.
    #[error("map provider unavailable: {message}")]
    ProviderUnavailable {
        /// User-facing description of the failure.
        message: String,
    },
}

/// Observer invoked with a [`CaptureUpdate`] after every completed edit.
pub type PolygonChangeCallback = Box<dyn FnMut(&CaptureUpdate)>;

/// The drawing surface contract between the map provider adapter and
/// the estimate flow.
///
/// Exactly one concrete implementation exists ([`CaptureSession`]);
/// map-provider specifics stay on the far side of the vertex-event
/// boundary.
pub trait DrawingSurface {
    /// Begins collecting vertices for a new polygon.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotIdle`] if a polygon already exists or
    /// drawing has already started, or
    /// [`CaptureError::ProviderUnavailable`] after a provider failure.
    fn start_drawing(&mut self) -> Result<(), CaptureError>;

    /// Discards any polygon and returns to idle.
    fn clear_drawing(&mut self);

    /// Registers the observer notified on every completed edit.
    fn on_polygon_change(&mut self, callback: PolygonChangeCallback);
}

/// The single concrete [`DrawingSurface`]: a per-session polygon
/// capture state machine.
///
/// Each browser session owns exactly one `CaptureSession`; there is no
/// shared state across sessions.
#[derive(Default)]
pub struct CaptureSession {
    state: CaptureState,
    address: Option<Address>,
    points: Vec<GeoPoint>,
    on_change: Option<PolygonChangeCallback>,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::Idle
    }
}

impl CaptureSession {
    /// Creates an idle session with no address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &CaptureState {
        &self.state
    }

    /// The current ordered vertex list.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The address the map is centered on, if one has been selected.
    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Planar area of the current polygon in square feet (`0.0` unless
    /// the polygon is closed).
    #[must_use]
    pub fn current_area_sq_ft(&self) -> f64 {
        if matches!(self.state, CaptureState::Closed) {
            polygon_area_sq_ft(&self.points)
        } else {
            0.0
        }
    }

    /// Centers the session on a new address.
    ///
    /// Any traced polygon belongs to the previous property and is
    /// discarded; the session returns to idle and the observer is told
    /// the polygon is gone.
    pub fn set_address(&mut self, address: Address) {
        log::debug!("capture: address set to {}", address.formatted);
        self.address = Some(address);
        self.reset_to_idle();
    }

    /// Records a vertex at the end of the in-progress outline.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotDrawing`] unless the session is
    /// collecting vertices.
    pub fn add_vertex(&mut self, point: GeoPoint) -> Result<(), CaptureError> {
        if self.state != CaptureState::Drawing {
            return Err(CaptureError::NotDrawing {
                state: self.state.name(),
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Closes the in-progress outline into an editable polygon and
    /// notifies the observer with the first computed area.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotDrawing`] if no drawing is in
    /// progress, or [`CaptureError::TooFewVertices`] with fewer than
    /// [`MIN_CLOSED_VERTICES`] vertices placed.
    pub fn close_shape(&mut self) -> Result<(), CaptureError> {
        if self.state != CaptureState::Drawing {
            return Err(CaptureError::NotDrawing {
                state: self.state.name(),
            });
        }
        if self.points.len() < MIN_CLOSED_VERTICES {
            return Err(CaptureError::TooFewVertices {
                count: self.points.len(),
            });
        }
        self.state = CaptureState::Closed;
        log::debug!("capture: shape closed with {} vertices", self.points.len());
        self.notify();
        Ok(())
    }

    /// Moves an existing vertex of the closed polygon and recomputes.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotClosed`] unless the polygon is
    /// closed, or [`CaptureError::VertexOutOfBounds`] for a bad index.
    pub fn move_vertex(&mut self, index: usize, point: GeoPoint) -> Result<(), CaptureError> {
        self.require_closed()?;
        if index >= self.points.len() {
            return Err(CaptureError::VertexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        self.points[index] = point;
        self.notify();
        Ok(())
    }

    /// Inserts a vertex mid-edge into the closed polygon and
    /// recomputes. `index` is the position the new vertex takes;
    /// `index == len` appends before the implied closing edge.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NotClosed`] unless the polygon is
    /// closed, or [`CaptureError::VertexOutOfBounds`] for a bad index.
    pub fn insert_vertex(&mut self, index: usize, point: GeoPoint) -> Result<(), CaptureError> {
        self.require_closed()?;
        if index > self.points.len() {
            return Err(CaptureError::VertexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, point);
        self.notify();
        Ok(())
    }

    /// Records a map-provider initialization failure.
    ///
    /// The session surfaces a distinct error state rather than a
    /// silently blank map; any in-progress polygon is discarded.
    pub fn provider_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("capture: map provider failed: {message}");
        self.points.clear();
        self.state = CaptureState::ProviderFailed { message };
        self.notify();
    }

    /// Retries after a provider failure, returning the session to idle
    /// so the map can reload.
    pub fn retry(&mut self) {
        if matches!(self.state, CaptureState::ProviderFailed { .. }) {
            log::info!("capture: retrying map provider");
            self.reset_to_idle();
        }
    }

    fn require_closed(&self) -> Result<(), CaptureError> {
        if self.state == CaptureState::Closed {
            Ok(())
        } else {
            Err(CaptureError::NotClosed {
                state: self.state.name(),
            })
        }
    }

    fn reset_to_idle(&mut self) {
        self.points.clear();
        self.state = CaptureState::Idle;
        self.notify();
    }

    /// Delivers `(square_feet, points)` for the current polygon, or
    /// `(0.0, [])` when there is none.
    fn notify(&mut self) {
        let update = CaptureUpdate {
            square_feet: if self.state == CaptureState::Closed {
                polygon_area_sq_ft(&self.points)
            } else {
                0.0
            },
            points: if self.state == CaptureState::Closed {
                self.points.clone()
            } else {
                Vec::new()
            },
        };
        if let Some(callback) = self.on_change.as_mut() {
            callback(&update);
        }
    }
}

impl DrawingSurface for CaptureSession {
    fn start_drawing(&mut self) -> Result<(), CaptureError> {
        match &self.state {
            CaptureState::Idle => {
                self.points.clear();
                self.state = CaptureState::Drawing;
                log::debug!("capture: drawing started");
                Ok(())
            }
            CaptureState::ProviderFailed { message } => Err(CaptureError::ProviderUnavailable {
                message: message.clone(),
            }),
            other => Err(CaptureError::NotIdle { state: other.name() }),
        }
    }

    fn clear_drawing(&mut self) {
        log::debug!("capture: cleared");
        self.reset_to_idle();
    }

    fn on_polygon_change(&mut self, callback: PolygonChangeCallback) {
        self.on_change = Some(callback);
    }
}
