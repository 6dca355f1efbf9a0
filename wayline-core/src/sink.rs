//! Map rendering abstraction and the in-memory map description.
//!
//! The builder never talks to a concrete map library. It emits primitives
//! ("add this polyline", "add this marker") onto a [`MapSink`]; the
//! default sink is [`RouteMap`], an ordered, serialisable description the
//! caller can hand to any renderer.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker and line palette shared with common web map libraries.
///
/// The set is closed; role labels outside a configured mapping fall back
/// to [`Colour::Gray`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Orange.
    Orange,
    /// Purple.
    Purple,
    /// Gray, the fallback for unmapped role labels.
    Gray,
    /// Black.
    Black,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Gray => "gray",
            Self::Black => "black",
        };
        f.write_str(name)
    }
}

/// A colour name outside the closed palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised colour {0:?}")]
pub struct ParseColourError(pub String);

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "orange" => Ok(Self::Orange),
            "purple" => Ok(Self::Purple),
            "gray" | "grey" => Ok(Self::Gray),
            "black" => Ok(Self::Black),
            _ => Err(ParseColourError(name.to_string())),
        }
    }
}

/// Presentation of a rendered route polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke colour.
    pub colour: Colour,
    /// Stroke weight in pixels.
    pub weight: u32,
    /// Stroke opacity in `[0.0, 1.0]`.
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            colour: Colour::Blue,
            weight: 5,
            opacity: 0.6,
        }
    }
}

/// Presentation of a stop marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerStyle {
    /// A plain pin marker with an optional icon glyph.
    Pin {
        /// Pin colour.
        colour: Colour,
        /// Icon glyph name understood by the rendering library.
        icon: Option<String>,
    },
    /// A numbered badge marker showing the stop's position in the route.
    Numbered {
        /// Zero-based stop index shown on the badge.
        number: usize,
        /// Badge border colour.
        border: Colour,
    },
}

/// Initial framing of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Centre of the view (`x` = longitude, `y` = latitude).
    pub centre: Coord,
    /// Initial zoom level.
    pub zoom: u8,
}

/// One rendered route polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Geometry in traversal order.
    pub points: Vec<Coord>,
    /// Stroke presentation.
    pub style: LineStyle,
}

/// One rendered stop marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker position.
    pub location: Coord,
    /// Marker presentation.
    pub style: MarkerStyle,
}

/// Receives rendering primitives from the map builder.
///
/// Implement this to drive a concrete map library directly; tests use a
/// recording sink to assert on emitted primitives.
pub trait MapSink {
    /// Set the initial view once, before any primitives are added.
    fn set_view(&mut self, centre: Coord, zoom: u8);
    /// Append a polyline.
    fn add_line(&mut self, points: &[Coord], style: &LineStyle);
    /// Append a marker.
    fn add_marker(&mut self, location: Coord, style: &MarkerStyle);
}

/// The accumulated, ordered map description.
///
/// Built incrementally by the map builder and returned once fully
/// populated; ownership is exclusive to the caller after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMap {
    /// Initial framing.
    pub view: MapView,
    /// Rendered segments in traversal order.
    pub polylines: Vec<Polyline>,
    /// Rendered markers in stop order.
    pub markers: Vec<Marker>,
}

impl RouteMap {
    /// An empty map centred on the null island default view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: MapView {
                centre: Coord { x: 0.0, y: 0.0 },
                zoom: 1,
            },
            polylines: Vec::new(),
            markers: Vec::new(),
        }
    }
}

impl Default for RouteMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSink for RouteMap {
    fn set_view(&mut self, centre: Coord, zoom: u8) {
        self.view = MapView { centre, zoom };
    }

    fn add_line(&mut self, points: &[Coord], style: &LineStyle) {
        self.polylines.push(Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn add_marker(&mut self, location: Coord, style: &MarkerStyle) {
        self.markers.push(Marker {
            location,
            style: style.clone(),
        });
    }
}
