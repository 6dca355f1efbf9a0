//! HTTP-based route provider for OSRM routing services.
//!
//! This module provides [`HttpRouteProvider`], an implementation of
//! [`wayline_core::RouteProvider`] that fetches per-segment driving
//! geometry from an OSRM Route API endpoint.
//!
//! # Architecture
//!
//! The provider issues one `GET /route/v1/driving/{src};{dst}` request
//! per consecutive stop pair and decodes the returned precision-5
//! encoded polyline into a `LineString`. The synchronous
//! [`wayline_core::RouteProvider`] trait is implemented by blocking on
//! async HTTP calls internally, keeping the map builder embeddable in
//! synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use wayline_core::RouteMapBuilder;
//! use wayline_core::Stop;
//! use wayline_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//! use std::time::Duration;
//!
//! let config = HttpRouteProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(60));
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! let stops = vec![Stop::new(-0.128, 51.507), Stop::new(-0.142, 51.501)];
//! let map = RouteMapBuilder::new().render(&stops, &provider)?;
//! println!("{} segments", map.polylines.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig,
    ProviderBuildError,
};
