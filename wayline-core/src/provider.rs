//! Route provider trait and its error type.
//!
//! The trait is the seam between the map builder and whatever fetches
//! driving geometry: an HTTP client against a routing service in
//! production, a stub in tests. It is synchronous so the builder stays
//! embeddable in plain call stacks; async implementations bridge
//! internally.

use geo::Coord;
use thiserror::Error;

use crate::RouteSegment;

/// Errors from [`RouteProvider::get_route`].
///
/// Failures are not retried; they propagate to the immediate caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The URL that timed out.
        url: String,
        /// The configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpStatus {
        /// The URL that failed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail from the HTTP layer.
        message: String,
    },
    /// The request could not be completed at the transport level.
    #[error("request to {url} failed: {message}")]
    Network {
        /// The URL that failed.
        url: String,
        /// Error detail from the transport layer.
        message: String,
    },
    /// The routing service reported an application-level error code.
    #[error("routing service returned {code}: {message}")]
    Service {
        /// Service status code (e.g. `"NoRoute"`).
        code: String,
        /// Error message supplied by the service, if any.
        message: String,
    },
    /// The response body was missing expected fields or undecodable.
    #[error("malformed routing response: {message}")]
    Parse {
        /// What was wrong with the payload.
        message: String,
    },
}

/// Fetch the driving route between one source/destination pair.
///
/// Implementations issue exactly one lookup per call and perform no
/// caching: identical pairs produce duplicate requests.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use wayline_core::{RouteError, RouteProvider, RouteSegment};
///
/// struct CrowFlies;
///
/// impl RouteProvider for CrowFlies {
///     fn get_route(&self, source: Coord, destination: Coord) -> Result<RouteSegment, RouteError> {
///         Ok(RouteSegment::new(
///             LineString::new(vec![source, destination]),
///             source,
///             destination,
///             0.0,
///         ))
///     }
/// }
///
/// let segment = CrowFlies.get_route(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 })?;
/// assert_eq!(segment.points().len(), 2);
/// # Ok::<(), RouteError>(())
/// ```
pub trait RouteProvider {
    /// Return the driving segment from `source` to `destination`.
    ///
    /// Coordinates use the geo convention (`x` = longitude, `y` =
    /// latitude) and are forwarded without validation.
    fn get_route(&self, source: Coord, destination: Coord) -> Result<RouteSegment, RouteError>;
}
