//! Stops along a vehicle route.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// One geographic point in an ordered route.
///
/// Coordinates follow the geo convention: `x` is longitude and `y` is
/// latitude. No range validation is performed; out-of-range values are
/// forwarded untouched to the routing service.
///
/// # Examples
/// ```
/// use wayline_core::Stop;
///
/// let depot = Stop::new(-0.1276, 51.5072).with_role("DEPOT");
/// assert_eq!(depot.role.as_deref(), Some("DEPOT"));
/// assert!(!depot.preferred);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Geospatial position (`x` = longitude, `y` = latitude).
    pub location: Coord,
    /// Optional role label (e.g. depot, pickup, delivery) driving marker
    /// styling. Unknown labels are not an error; they degrade to the
    /// configured fallback colour.
    pub role: Option<String>,
    /// Whether this stop is flagged as a preferred-member visit.
    pub preferred: bool,
}

impl Stop {
    /// Construct a stop from longitude and latitude.
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            location: Coord { x: lon, y: lat },
            role: None,
            preferred: false,
        }
    }

    /// Construct a stop from an existing coordinate.
    #[must_use]
    pub fn at(location: Coord) -> Self {
        Self {
            location,
            role: None,
            preferred: false,
        }
    }

    /// Attach a role label.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Mark the stop as a preferred-member visit.
    #[must_use]
    pub fn with_preferred(mut self, preferred: bool) -> Self {
        self.preferred = preferred;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_coordinates_lon_lat() {
        let stop = Stop::new(11.63, 52.12);
        assert_eq!(stop.location, Coord { x: 11.63, y: 52.12 });
    }

    #[test]
    fn builder_helpers_set_role_and_preference() {
        let stop = Stop::new(0.0, 0.0).with_role("Pickup").with_preferred(true);
        assert_eq!(stop.role.as_deref(), Some("Pickup"));
        assert!(stop.preferred);
    }
}
