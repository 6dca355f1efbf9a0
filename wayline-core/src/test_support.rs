//! Test doubles for the map builder's seams.
//!
//! [`StubRouteProvider`] answers segment lookups without any network;
//! [`RecordingSink`] captures rendering primitives so tests can assert on
//! what the builder emitted.

use std::cell::Cell;

use geo::{Coord, LineString};

use crate::{LineStyle, MapSink, MapView, MarkerStyle, RouteError, RouteProvider, RouteSegment};

/// Stub `RouteProvider` for tests.
///
/// Returns straight two-point segments or a pre-configured error, and
/// counts how many lookups were issued.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayline_core::RouteProvider;
/// use wayline_core::test_support::StubRouteProvider;
///
/// let provider = StubRouteProvider::straight_lines();
/// let segment = provider
///     .get_route(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 })
///     .expect("stub should answer");
/// assert_eq!(segment.points().len(), 2);
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubRouteProvider {
    error: Option<RouteError>,
    distance: f64,
    calls: Cell<usize>,
}

impl StubRouteProvider {
    /// A provider answering every lookup with a straight two-point
    /// segment between the queried endpoints.
    #[must_use]
    pub fn straight_lines() -> Self {
        Self {
            error: None,
            distance: 1_000.0,
            calls: Cell::new(0),
        }
    }

    /// A provider answering straight segments with a fixed distance.
    #[must_use]
    pub fn with_distance(distance: f64) -> Self {
        Self {
            error: None,
            distance,
            calls: Cell::new(0),
        }
    }

    /// A provider failing every lookup with the given error.
    #[must_use]
    pub fn with_error(error: RouteError) -> Self {
        Self {
            error: Some(error),
            distance: 0.0,
            calls: Cell::new(0),
        }
    }

    /// Number of lookups issued so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RouteProvider for StubRouteProvider {
    fn get_route(&self, source: Coord, destination: Coord) -> Result<RouteSegment, RouteError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(RouteSegment::new(
            LineString::new(vec![source, destination]),
            source,
            destination,
            self.distance,
        ))
    }
}

/// `MapSink` that records every primitive it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// The last view set, if any.
    pub view: Option<MapView>,
    /// Recorded polylines in call order.
    pub lines: Vec<(Vec<Coord>, LineStyle)>,
    /// Recorded markers in call order.
    pub markers: Vec<(Coord, MarkerStyle)>,
}

impl MapSink for RecordingSink {
    fn set_view(&mut self, centre: Coord, zoom: u8) {
        self.view = Some(MapView { centre, zoom });
    }

    fn add_line(&mut self, points: &[Coord], style: &LineStyle) {
        self.lines.push((points.to_vec(), style.clone()));
    }

    fn add_marker(&mut self, location: Coord, style: &MarkerStyle) {
        self.markers.push((location, style.clone()));
    }
}
