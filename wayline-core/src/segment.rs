//! Driving segments between consecutive stops.

use geo::{Coord, LineString};

/// The driving path between two consecutive stops.
///
/// Produced by a [`crate::RouteProvider`] for a single (source,
/// destination) pair and consumed within one map-build call.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    /// Road geometry decoded from the routing service, in traversal order.
    pub geometry: LineString,
    /// Source coordinate snapped to the road network.
    pub start: Coord,
    /// Destination coordinate snapped to the road network.
    pub end: Coord,
    /// Driving distance in metres.
    pub distance: f64,
}

impl RouteSegment {
    /// Construct a segment from its parts.
    #[must_use]
    pub fn new(geometry: LineString, start: Coord, end: Coord, distance: f64) -> Self {
        Self {
            geometry,
            start,
            end,
            distance,
        }
    }

    /// The decoded geometry as a coordinate slice.
    #[must_use]
    pub fn points(&self) -> &[Coord] {
        &self.geometry.0
    }
}
