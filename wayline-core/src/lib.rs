//! Core domain types for the Wayline route visualisation engine.
//!
//! Responsibilities:
//! - Model stops, route segments and the accumulated map description.
//! - Define the seams (`RouteProvider`, `MapSink`) that keep the map
//!   builder independent of any HTTP client or rendering library.
//! - Build role-styled route maps from ordered stop lists.
//! - Reformat a routing solver's response into tabular rows and printable
//!   route text.
//!
//! Boundaries:
//! - No I/O lives here; HTTP adapters belong in `wayline-data`.
//! - Rendering is expressed as calls on a [`MapSink`]; the concrete map
//!   library is an external collaborator.

#![forbid(unsafe_code)]

mod builder;
mod provider;
mod segment;
mod sink;
mod solution;
mod stop;

#[doc(hidden)]
pub mod test_support;

pub use builder::{MapBuildError, MapStyle, RouteMapBuilder, ViewPolicy};
pub use provider::{RouteError, RouteProvider};
pub use segment::RouteSegment;
pub use sink::{
    Colour, LineStyle, MapSink, MapView, Marker, MarkerStyle, ParseColourError, Polyline, RouteMap,
};
pub use solution::{
    MalformedSolutionError, SolutionRow, SolutionTable, SolverResponse, VehicleRoute,
};
pub use stop::Stop;
