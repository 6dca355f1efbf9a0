//! Incremental construction of route maps from ordered stop lists.
//!
//! For each consecutive stop pair the builder asks a [`RouteProvider`]
//! for the driving segment and renders it onto a [`MapSink`], styling
//! markers by stop role. A route of N stops yields exactly N-1 segment
//! lookups, N-1 polylines and N-1 markers; the final stop never receives
//! a marker.
//!
//! A separate overview path marks every stop with a role-coloured pin
//! and draws no lines at all, for inspecting order locations before any
//! routing has happened.

use std::collections::HashMap;

use geo::Coord;
use thiserror::Error;

use crate::{Colour, LineStyle, MapSink, MarkerStyle, RouteError, RouteMap, RouteProvider, Stop};

/// How the initial map view is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPolicy {
    /// Centre on the centroid of all stops (the default).
    Centroid,
    /// Centre on the stop at the given index. Out-of-range indices fall
    /// back to the centroid. `Stop(1)` reproduces the legacy framing
    /// that centred on the second stop.
    Stop(usize),
}

/// Styling configuration for the map builder.
///
/// Every presentation literal lives here, so the builder stays testable
/// without a real rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    /// Initial zoom level.
    pub zoom: u8,
    /// Initial view framing.
    pub view: ViewPolicy,
    /// Stroke presentation for route polylines.
    pub line: LineStyle,
    /// Marker for the first stop (start/depot).
    pub start: MarkerStyle,
    /// Badge border colour for preferred-member stops.
    pub preferred: Colour,
    /// Badge border colour for ordinary numbered stops.
    pub numbered: Colour,
    /// Role label to pin colour mapping. When non-empty, non-preferred
    /// stops render as role-coloured pins instead of numbered badges.
    pub role_colours: HashMap<String, Colour>,
    /// Pin colour for stops whose role label is absent or unmapped.
    pub fallback: Colour,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom: 12,
            view: ViewPolicy::Centroid,
            line: LineStyle::default(),
            start: MarkerStyle::Pin {
                colour: Colour::Green,
                icon: Some("building".to_string()),
            },
            preferred: Colour::Blue,
            numbered: Colour::Green,
            role_colours: HashMap::new(),
            fallback: Colour::Gray,
        }
    }
}

impl MapStyle {
    /// Set the initial zoom level.
    #[must_use]
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the view framing policy.
    #[must_use]
    pub fn with_view(mut self, view: ViewPolicy) -> Self {
        self.view = view;
        self
    }

    /// Set the polyline stroke style.
    #[must_use]
    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    /// Set the start/depot marker.
    #[must_use]
    pub fn with_start(mut self, start: MarkerStyle) -> Self {
        self.start = start;
        self
    }

    /// Set the role label to pin colour mapping.
    #[must_use]
    pub fn with_role_colours(mut self, role_colours: HashMap<String, Colour>) -> Self {
        self.role_colours = role_colours;
        self
    }

    /// Set the fallback pin colour for unmapped role labels.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Colour) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Errors from [`RouteMapBuilder::render`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapBuildError {
    /// Fewer than two stops were supplied; there is nothing to route.
    #[error("a route map needs at least two stops, got {count}")]
    InsufficientStops {
        /// Number of stops supplied.
        count: usize,
    },
    /// A segment lookup failed. Styling itself never fails.
    #[error(transparent)]
    Routing(#[from] RouteError),
}

/// Builds route maps from ordered stop lists.
///
/// # Examples
/// ```
/// use wayline_core::test_support::StubRouteProvider;
/// use wayline_core::{RouteMapBuilder, Stop};
///
/// let stops = vec![
///     Stop::new(-0.128, 51.507),
///     Stop::new(-0.142, 51.501),
///     Stop::new(-0.119, 51.503),
/// ];
/// let provider = StubRouteProvider::straight_lines();
/// let map = RouteMapBuilder::new().render(&stops, &provider)?;
///
/// assert_eq!(map.polylines.len(), 2);
/// assert_eq!(map.markers.len(), 2);
/// # Ok::<(), wayline_core::MapBuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteMapBuilder {
    style: MapStyle,
}

impl RouteMapBuilder {
    /// Builder with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with an explicit style.
    #[must_use]
    pub fn with_style(style: MapStyle) -> Self {
        Self { style }
    }

    /// The configured style.
    #[must_use]
    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Build a [`RouteMap`] for `stops`, querying `provider` for each
    /// consecutive pair.
    ///
    /// # Errors
    ///
    /// [`MapBuildError::InsufficientStops`] when fewer than two stops are
    /// supplied; [`MapBuildError::Routing`] when a segment lookup fails.
    pub fn render<P: RouteProvider>(
        &self,
        stops: &[Stop],
        provider: &P,
    ) -> Result<RouteMap, MapBuildError> {
        let mut map = RouteMap::new();
        self.render_into(stops, provider, &mut map)?;
        Ok(map)
    }

    /// Render `stops` onto an arbitrary [`MapSink`].
    ///
    /// Segment lookups are issued strictly sequentially, one per
    /// consecutive pair, in traversal order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RouteMapBuilder::render`].
    pub fn render_into<P: RouteProvider, S: MapSink>(
        &self,
        stops: &[Stop],
        provider: &P,
        sink: &mut S,
    ) -> Result<(), MapBuildError> {
        if stops.len() < 2 {
            return Err(MapBuildError::InsufficientStops { count: stops.len() });
        }

        sink.set_view(self.view_centre(stops), self.style.zoom);

        for (index, pair) in stops.windows(2).enumerate() {
            let [source, destination] = pair else {
                continue;
            };
            let segment = provider.get_route(source.location, destination.location)?;
            sink.add_line(segment.points(), &self.style.line);
            sink.add_marker(source.location, &self.marker_for(index, source));
        }

        Ok(())
    }

    /// Build an overview map: one role-coloured marker per stop, no
    /// route lines and no provider lookups.
    ///
    /// Unlike [`RouteMapBuilder::render`], every stop receives a marker,
    /// including the last, and the view always centres on the stop
    /// centroid. An empty stop list yields an empty map with the default
    /// view.
    #[must_use]
    pub fn render_overview(&self, stops: &[Stop]) -> RouteMap {
        let mut map = RouteMap::new();
        self.render_overview_into(stops, &mut map);
        map
    }

    /// Render the overview markers onto an arbitrary [`MapSink`].
    pub fn render_overview_into<S: MapSink>(&self, stops: &[Stop], sink: &mut S) {
        if stops.is_empty() {
            return;
        }
        sink.set_view(centroid(stops), self.style.zoom);
        for stop in stops {
            sink.add_marker(
                stop.location,
                &MarkerStyle::Pin {
                    colour: self.role_colour(stop),
                    icon: None,
                },
            );
        }
    }

    fn view_centre(&self, stops: &[Stop]) -> Coord {
        match self.style.view {
            ViewPolicy::Stop(index) => stops
                .get(index)
                .map_or_else(|| centroid(stops), |stop| stop.location),
            ViewPolicy::Centroid => centroid(stops),
        }
    }

    fn marker_for(&self, index: usize, stop: &Stop) -> MarkerStyle {
        if index == 0 {
            return self.style.start.clone();
        }
        if stop.preferred {
            return MarkerStyle::Numbered {
                number: index,
                border: self.style.preferred,
            };
        }
        if self.style.role_colours.is_empty() {
            return MarkerStyle::Numbered {
                number: index,
                border: self.style.numbered,
            };
        }
        MarkerStyle::Pin {
            colour: self.role_colour(stop),
            icon: None,
        }
    }

    fn role_colour(&self, stop: &Stop) -> Colour {
        stop.role
            .as_ref()
            .and_then(|role| self.style.role_colours.get(role))
            .copied()
            .unwrap_or(self.style.fallback)
    }
}

/// Arithmetic mean of all stop coordinates.
fn centroid(stops: &[Stop]) -> Coord {
    #[expect(clippy::cast_precision_loss, reason = "stop counts are small")]
    let count = stops.len() as f64;
    let sum = stops.iter().fold(Coord { x: 0.0, y: 0.0 }, |acc, stop| Coord {
        x: acc.x + stop.location.x,
        y: acc.y + stop.location.y,
    });
    Coord {
        x: sum.x / count,
        y: sum.y / count,
    }
}
