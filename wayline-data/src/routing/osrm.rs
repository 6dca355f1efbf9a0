//! OSRM API response types for the Route service.
//!
//! This module provides deserialisation types for the OSRM Route API
//! response format. The Route service finds the fastest driving route
//! between supplied coordinates and returns its geometry as an encoded
//! polyline alongside snapped waypoints.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use geo::Coord;
use serde::Deserialize;

/// OSRM Route API response.
///
/// The response contains routes and waypoints on success or an error
/// message on failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoRoute"` - No route between the supplied coordinates
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first. Only the first is consumed; no
    /// alternatives are requested.
    pub routes: Option<Vec<OsrmRoute>>,

    /// Input coordinates snapped to the road network, in input order.
    pub waypoints: Option<Vec<OsrmWaypoint>>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route in an OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Route geometry as a precision-5 encoded polyline.
    pub geometry: String,
    /// Driving distance in metres.
    pub distance: f64,
}

/// One snapped waypoint in an OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct OsrmWaypoint {
    /// Snapped position in OSRM's native `[longitude, latitude]` order.
    pub location: [f64; 2],
}

impl OsrmWaypoint {
    /// The snapped position as a coordinate (`x` = longitude, `y` =
    /// latitude).
    #[must_use]
    pub fn coord(&self) -> Coord {
        Coord {
            x: self.location[0],
            y: self.location[1],
        }
    }
}
