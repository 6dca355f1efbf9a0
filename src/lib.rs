//! Facade crate for the Wayline route-map engine.
//!
//! This crate re-exports the core map-building and solution-formatting
//! types and exposes the OSRM-backed route provider behind a feature
//! flag.

#![forbid(unsafe_code)]

pub use wayline_core::{
    Colour, LineStyle, MalformedSolutionError, MapBuildError, MapSink, MapStyle, MapView, Marker,
    MarkerStyle, ParseColourError, Polyline, RouteError, RouteMap, RouteMapBuilder, RouteProvider,
    RouteSegment, SolutionRow, SolutionTable, SolverResponse, Stop, VehicleRoute, ViewPolicy,
};

#[cfg(feature = "osrm")]
pub use wayline_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError};
