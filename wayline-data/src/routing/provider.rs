//! HTTP-based `RouteProvider` using OSRM's Route API.
//!
//! # Architecture
//!
//! The [`RouteProvider`] trait is synchronous to keep the map builder
//! embeddable in synchronous contexts. This provider bridges the async
//! HTTP calls to the sync interface by blocking on a Tokio runtime
//! internally.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use wayline_core::RouteProvider;
//! use wayline_data::routing::HttpRouteProvider;
//!
//! let provider = HttpRouteProvider::new("http://localhost:5000")?;
//! let segment = provider.get_route(
//!     Coord { x: -0.128, y: 51.507 },
//!     Coord { x: -0.142, y: 51.501 },
//! )?;
//! println!("{} m", segment.distance);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use geo::Coord;
use log::{debug, warn};
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use wayline_core::{RouteError, RouteProvider, RouteSegment};

use super::osrm::RouteResponse;

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default base URL: the public OSRM demo instance.
pub const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "wayline-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Precision of OSRM's encoded polylines.
const POLYLINE_PRECISION: u32 = 5;

/// Configuration for [`HttpRouteProvider`].
#[derive(Debug, Clone)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the OSRM service (e.g. `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based route provider using the OSRM Route API.
///
/// This provider implements the synchronous [`RouteProvider`] trait by
/// internally blocking on asynchronous HTTP requests. It owns a Tokio
/// runtime that is reused across calls, avoiding the overhead of
/// creating a new runtime per request.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded
/// Tokio runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the
/// provider falls back to using its own internal runtime. This avoids
/// the panic that `block_in_place` would cause, but may lead to
/// deadlocks if the caller's runtime is driving IO or timers that this
/// request depends on.
///
/// # Caching
///
/// None. Identical (source, destination) pairs issue duplicate requests.
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRouteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the OSRM service (e.g. `"http://localhost:5000"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build the OSRM Route API URL for one source/destination pair.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/driving/{src_lon},{src_lat};{dst_lon},{dst_lat}`.
    /// Coordinates are forwarded without validation, matching the
    /// service's native lon/lat order.
    fn build_route_url(&self, source: Coord, destination: Coord) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            source.x,
            source.y,
            destination.x,
            destination.y,
        )
    }

    /// Fetch one driving segment asynchronously.
    async fn fetch_route_async(
        &self,
        source: Coord,
        destination: Coord,
    ) -> Result<RouteSegment, RouteError> {
        let url = self.build_route_url(source, destination);
        debug!("requesting route: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let route_response: RouteResponse =
            response.json().await.map_err(|err| RouteError::Parse {
                message: err.to_string(),
            })?;

        self.convert_response(route_response)
    }

    /// Convert a reqwest error to a `RouteError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RouteError {
        if error.is_timeout() {
            return RouteError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RouteError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RouteError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Convert an OSRM response to a `RouteSegment`.
    ///
    /// The first route is consumed; its geometry is decoded from the
    /// precision-5 encoded polyline and the snapped endpoints are taken
    /// from the first two waypoints.
    fn convert_response(&self, response: RouteResponse) -> Result<RouteSegment, RouteError> {
        if !response.is_ok() {
            warn!("routing service answered {}", response.code);
            return Err(RouteError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response
            .routes
            .and_then(|mut routes| {
                if routes.is_empty() {
                    None
                } else {
                    Some(routes.swap_remove(0))
                }
            })
            .ok_or_else(|| RouteError::Parse {
                message: "OSRM response missing routes".to_string(),
            })?;

        let waypoints = response.waypoints.unwrap_or_default();
        let (Some(start), Some(end)) = (waypoints.first(), waypoints.get(1)) else {
            return Err(RouteError::Parse {
                message: "OSRM response missing waypoints".to_string(),
            });
        };

        let geometry = polyline::decode_polyline(&route.geometry, POLYLINE_PRECISION)
            .map_err(|err| RouteError::Parse {
                message: format!("undecodable route geometry: {err}"),
            })?;

        Ok(RouteSegment::new(
            geometry,
            start.coord(),
            end.coord(),
            route.distance,
        ))
    }
}

impl RouteProvider for HttpRouteProvider {
    /// Fetch the driving segment for one source/destination pair.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime
    /// must be multi-threaded (`flavor = "multi_thread"`). If called from
    /// within a `current_thread` runtime, the method falls back to using
    /// its own internal runtime, which may block the caller's runtime and
    /// cause deadlocks if the caller's runtime is driving IO or timers
    /// needed by this request.
    fn get_route(&self, source: Coord, destination: Coord) -> Result<RouteSegment, RouteError> {
        // If we're already inside a Tokio runtime, check the runtime
        // flavour. block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        let future = self.fetch_route_async(source, destination);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::osrm::{OsrmRoute, OsrmWaypoint};
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> HttpRouteProvider {
        HttpRouteProvider::new("http://osrm.example.com").expect("provider should build")
    }

    fn ok_response(geometry: &str) -> RouteResponse {
        RouteResponse {
            code: "Ok".to_string(),
            message: None,
            routes: Some(vec![OsrmRoute {
                geometry: geometry.to_string(),
                distance: 1234.5,
            }]),
            waypoints: Some(vec![
                OsrmWaypoint {
                    location: [-120.2, 38.5],
                },
                OsrmWaypoint {
                    location: [-126.453, 43.252],
                },
            ]),
        }
    }

    #[rstest]
    fn build_route_url_formats_lon_lat_pairs(provider: HttpRouteProvider) {
        let url = provider.build_route_url(
            Coord { x: -0.1, y: 51.5 },
            Coord { x: -0.2, y: 51.6 },
        );

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/driving/-0.1,51.5;-0.2,51.6"
        );
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash() {
        let provider =
            HttpRouteProvider::new("http://osrm.example.com/").expect("provider should build");

        let url = provider.build_route_url(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });

        assert!(url.starts_with("http://osrm.example.com/route/"));
        assert!(!url.contains("//route"));
    }

    #[rstest]
    fn convert_response_decodes_geometry_and_endpoints(provider: HttpRouteProvider) {
        let points = vec![
            Coord { x: -120.2, y: 38.5 },
            Coord { x: -120.95, y: 40.7 },
            Coord { x: -126.453, y: 43.252 },
        ];
        let geometry = polyline::encode_coordinates(points.clone(), POLYLINE_PRECISION)
            .expect("fixture should encode");

        let segment = provider
            .convert_response(ok_response(&geometry))
            .expect("should convert");

        assert_eq!(segment.points(), points.as_slice());
        assert_eq!(segment.start, Coord { x: -120.2, y: 38.5 });
        assert_eq!(segment.end, Coord { x: -126.453, y: 43.252 });
        assert_eq!(segment.distance, 1234.5);
    }

    #[rstest]
    fn convert_response_handles_service_error(provider: HttpRouteProvider) {
        let response: RouteResponse = serde_json::from_str(
            r#"{"code": "NoRoute", "message": "Impossible route between points"}"#,
        )
        .expect("fixture should deserialise");

        let err = provider
            .convert_response(response)
            .expect_err("should fail");

        assert_eq!(
            err,
            RouteError::Service {
                code: "NoRoute".to_string(),
                message: "Impossible route between points".to_string(),
            }
        );
    }

    #[rstest]
    fn convert_response_handles_missing_routes(provider: HttpRouteProvider) {
        let response: RouteResponse = serde_json::from_str(
            r#"{"code": "Ok", "waypoints": [{"location": [0.0, 0.0]}, {"location": [1.0, 1.0]}]}"#,
        )
        .expect("fixture should deserialise");

        let err = provider
            .convert_response(response)
            .expect_err("should fail");

        assert!(matches!(err, RouteError::Parse { .. }));
    }

    #[rstest]
    fn convert_response_handles_missing_waypoints(provider: HttpRouteProvider) {
        let response: RouteResponse = serde_json::from_str(
            r#"{"code": "Ok", "routes": [{"geometry": "_p~iF~ps|U", "distance": 1.0}]}"#,
        )
        .expect("fixture should deserialise");

        let err = provider
            .convert_response(response)
            .expect_err("should fail");

        assert!(matches!(err, RouteError::Parse { .. }));
    }

    #[rstest]
    fn convert_response_rejects_undecodable_geometry(provider: HttpRouteProvider) {
        // A lone continuation chunk is an unterminated polyline.
        let err = provider
            .convert_response(ok_response("_"))
            .expect_err("should fail");

        assert!(matches!(err, RouteError::Parse { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpRouteProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
