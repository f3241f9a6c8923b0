#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planar area calculation for roof footprints traced on a satellite map.
//!
//! A traced outline arrives as an ordered list of latitude/longitude
//! vertices (closure implied: the last vertex connects back to the
//! first). At building-footprint scale the Earth is locally flat, so the
//! ring is projected into a local planar frame measured in feet (with a
//! `cos(latitude)` correction for longitude-degree compression) and the
//! enclosed area is taken with the shoelace formula via [`geo::Area`].
//!
//! Incomplete or degenerate outlines are a normal transient drawing
//! state, not a fault: they yield an area of `0.0`, never an error and
//! never `NaN`.

use geo::{Area, Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// WGS84 equatorial radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// International feet per meter.
const FEET_PER_METER: f64 = 3.280_839_895_013_123;

/// WGS84 equatorial radius in feet.
pub const EARTH_RADIUS_FEET: f64 = EARTH_RADIUS_METERS * FEET_PER_METER;

/// A single latitude/longitude vertex of a traced outline (degrees,
/// WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a vertex from latitude/longitude degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Computes the enclosed planar area of a traced outline in square feet.
///
/// The result is non-negative regardless of winding direction, unchanged
/// under rotation of the vertex list, and `0.0` for outlines with fewer
/// than 3 distinct vertices, collinear outlines, or non-finite
/// coordinates.
#[must_use]
pub fn polygon_area_sq_ft(points: &[GeoPoint]) -> f64 {
    if distinct_vertex_count(points) < 3 {
        return 0.0;
    }

    if points
        .iter()
        .any(|p| !p.latitude.is_finite() || !p.longitude.is_finite())
    {
        return 0.0;
    }

    // Longitude degrees compress toward the poles; project around the
    // ring's mean latitude so east-west distances come out in feet.
    #[allow(clippy::cast_precision_loss)]
    let mean_lat =
        points.iter().map(|p| p.latitude).sum::<f64>() / points.len() as f64;
    let cos_lat = mean_lat.to_radians().cos();

    let exterior: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord {
            x: p.longitude.to_radians() * cos_lat * EARTH_RADIUS_FEET,
            y: p.latitude.to_radians() * EARTH_RADIUS_FEET,
        })
        .collect();

    let ring = Polygon::new(LineString::from(exterior), vec![]);
    ring.unsigned_area()
}

/// Counts vertices that differ from every earlier vertex.
///
/// Outlines are short (a user traces a handful of corners), so the
/// quadratic scan is fine.
fn distinct_vertex_count(points: &[GeoPoint]) -> usize {
    let mut count = 0;
    for (i, p) in points.iter().enumerate() {
        if !points[..i].contains(p) {
            count += 1;
        }
    }
    count
}

/// Parses a `GeoJSON` geometry string into an outline vertex list.
///
/// Handles both `Polygon` and `MultiPolygon` geometry types, taking the
/// exterior ring of the first polygon. The closing duplicate vertex that
/// `GeoJSON` rings carry is dropped; closure is implied by the area
/// algorithm.
#[must_use]
pub fn outline_from_geojson(geojson_str: &str) -> Option<Vec<GeoPoint>> {
    let geojson: geojson::GeoJson = geojson_str.parse().ok()?;
    let geojson::GeoJson::Geometry(geom) = geojson else {
        return None;
    };

    let geo_geom: geo::Geometry<f64> = geom.try_into().ok()?;
    let exterior = match geo_geom {
        geo::Geometry::Polygon(p) => p.exterior().clone(),
        geo::Geometry::MultiPolygon(mp) => mp.0.first()?.exterior().clone(),
        _ => return None,
    };

    let mut points: Vec<GeoPoint> = exterior
        .coords()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect();

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A rectangle of `width_ft` x `height_ft` feet anchored at
    /// `lat`/`lon`, built by inverting the same spherical projection the
    /// area calculation uses.
    fn rectangle(lat: f64, lon: f64, width_ft: f64, height_ft: f64) -> Vec<GeoPoint> {
        let d_lat = (height_ft / EARTH_RADIUS_FEET).to_degrees();
        let d_lon =
            (width_ft / (EARTH_RADIUS_FEET * lat.to_radians().cos())).to_degrees();
        vec![
            GeoPoint::new(lat, lon),
            GeoPoint::new(lat, lon + d_lon),
            GeoPoint::new(lat + d_lat, lon + d_lon),
            GeoPoint::new(lat + d_lat, lon),
        ]
    }

    #[test]
    fn empty_outline_has_zero_area() {
        assert_eq!(polygon_area_sq_ft(&[]), 0.0);
    }

    #[test]
    fn single_vertex_has_zero_area() {
        assert_eq!(polygon_area_sq_ft(&[GeoPoint::new(33.0, -97.0)]), 0.0);
    }

    #[test]
    fn two_vertices_have_zero_area() {
        let points = [GeoPoint::new(33.0, -97.0), GeoPoint::new(33.001, -97.0)];
        assert_eq!(polygon_area_sq_ft(&points), 0.0);
    }

    #[test]
    fn duplicated_vertices_have_zero_area() {
        let p = GeoPoint::new(33.0, -97.0);
        assert_eq!(polygon_area_sq_ft(&[p, p, p, p]), 0.0);
    }

    #[test]
    fn collinear_vertices_have_zero_area() {
        let points = [
            GeoPoint::new(33.0, -97.0),
            GeoPoint::new(33.001, -97.0),
            GeoPoint::new(33.002, -97.0),
        ];
        assert!(polygon_area_sq_ft(&points).abs() < 1e-6);
    }

    #[test]
    fn non_finite_coordinates_have_zero_area() {
        let points = [
            GeoPoint::new(33.0, -97.0),
            GeoPoint::new(f64::NAN, -97.001),
            GeoPoint::new(33.001, -97.001),
        ];
        let area = polygon_area_sq_ft(&points);
        assert_eq!(area, 0.0);
    }

    #[test]
    fn known_rectangle_at_texas_latitude() {
        // 50 ft x 40 ft = 2,000 sq ft footprint near Dallas.
        let points = rectangle(33.0, -97.0, 50.0, 40.0);
        let area = polygon_area_sq_ft(&points);
        assert!((area - 2000.0).abs() < 0.5, "area was {area}");
    }

    #[test]
    fn rotation_of_vertex_list_does_not_change_area() {
        let points = rectangle(33.0, -97.0, 50.0, 40.0);
        let base = polygon_area_sq_ft(&points);
        for k in 1..points.len() {
            let mut rotated = points.clone();
            rotated.rotate_left(k);
            let area = polygon_area_sq_ft(&rotated);
            assert!((area - base).abs() < 1e-6, "rotation {k}: {area} != {base}");
        }
    }

    #[test]
    fn winding_direction_does_not_change_area() {
        let points = rectangle(33.0, -97.0, 50.0, 40.0);
        let mut reversed = points.clone();
        reversed.reverse();
        let cw = polygon_area_sq_ft(&points);
        let ccw = polygon_area_sq_ft(&reversed);
        assert!((cw - ccw).abs() < 1e-9);
        assert!(cw > 0.0);
    }

    #[test]
    fn triangle_is_half_the_rectangle() {
        let rect = rectangle(33.0, -97.0, 50.0, 40.0);
        let triangle = vec![rect[0], rect[1], rect[2]];
        let area = polygon_area_sq_ft(&triangle);
        assert!((area - 1000.0).abs() < 0.5, "area was {area}");
    }

    #[test]
    fn parses_geojson_polygon_outline() {
        let geojson_str = r#"{
            "type": "Polygon",
            "coordinates": [[
                [-97.0, 33.0],
                [-96.999, 33.0],
                [-96.999, 33.001],
                [-97.0, 33.001],
                [-97.0, 33.0]
            ]]
        }"#;
        let points = outline_from_geojson(geojson_str).unwrap();
        // Closing duplicate dropped.
        assert_eq!(points.len(), 4);
        assert!((points[0].latitude - 33.0).abs() < 1e-9);
        assert!((points[0].longitude - -97.0).abs() < 1e-9);
        assert!(polygon_area_sq_ft(&points) > 0.0);
    }

    #[test]
    fn parses_geojson_multipolygon_outline() {
        let geojson_str = r#"{
            "type": "MultiPolygon",
            "coordinates": [[[
                [-97.0, 33.0],
                [-96.999, 33.0],
                [-96.999, 33.001],
                [-97.0, 33.0]
            ]]]
        }"#;
        let points = outline_from_geojson(geojson_str).unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn rejects_non_polygon_geojson() {
        let geojson_str = r#"{ "type": "Point", "coordinates": [-97.0, 33.0] }"#;
        assert!(outline_from_geojson(geojson_str).is_none());
    }
}
