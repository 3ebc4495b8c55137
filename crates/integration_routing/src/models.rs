//! Routing and geocoding data models
//!
//! Typed representations of OSRM route summaries and OpenCage results, plus
//! the raw wire shapes they are parsed from.

use std::fmt;

use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};

/// Summary of the best route between two points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total travel time in seconds
    pub duration_seconds: f64,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} m, {:.0} s",
            self.distance_meters, self.duration_seconds
        )
    }
}

/// The first result of a forward geocode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodedPlace {
    /// Result coordinate
    pub coordinate: Coordinate,
    /// Formatted place name
    pub formatted: String,
}

// ----- OSRM wire format -----

#[derive(Debug, Deserialize)]
pub(crate) struct RawRouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    pub distance: f64,
    pub duration: f64,
}

// ----- OpenCage wire format -----

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeocodeResponse {
    #[serde(default)]
    pub results: Vec<RawGeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeocodeResult {
    pub formatted: Option<String>,
    pub geometry: Option<RawGeometry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawGeometry {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_display() {
        let route = Route {
            distance_meters: 5000.0,
            duration_seconds: 600.0,
        };
        assert_eq!(route.to_string(), "5000 m, 600 s");
    }

    #[test]
    fn test_raw_route_defaults() {
        let raw: RawRouteResponse = serde_json::from_str(r#"{"code": "NoRoute"}"#).unwrap();
        assert_eq!(raw.code, "NoRoute");
        assert!(raw.message.is_none());
        assert!(raw.routes.is_empty());
    }

    #[test]
    fn test_raw_geocode_ignores_extra_fields() {
        let json = r#"{
            "results": [{
                "formatted": "Times Square, New York, NY, United States",
                "geometry": {"lat": 40.758, "lng": -73.9855},
                "confidence": 9,
                "components": {"city": "New York"}
            }],
            "status": {"code": 200, "message": "OK"},
            "total_results": 1
        }"#;
        let raw: RawGeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.results.len(), 1);
        let geometry = raw.results[0].geometry.unwrap();
        assert!((geometry.lat - 40.758).abs() < f64::EPSILON);
    }
}
