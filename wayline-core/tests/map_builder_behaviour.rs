//! Behavioural checks for the route map builder's public contract.

use std::collections::HashMap;

use geo::Coord;
use wayline_core::test_support::{RecordingSink, StubRouteProvider};
use wayline_core::{
    Colour, MapBuildError, MapStyle, MarkerStyle, RouteError, RouteMapBuilder, Stop,
};
use rstest::rstest;

fn square_route(n: usize) -> Vec<Stop> {
    (0..n)
        .map(|i| {
            #[expect(clippy::cast_precision_loss, reason = "test sizes are tiny")]
            let offset = i as f64;
            Stop::new(offset * 0.01, offset * 0.01)
        })
        .collect()
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(8)]
fn n_stops_yield_n_minus_one_segments_and_markers(#[case] n: usize) {
    let stops = square_route(n);
    let provider = StubRouteProvider::straight_lines();

    let map = RouteMapBuilder::new()
        .render(&stops, &provider)
        .expect("should build map");

    assert_eq!(provider.calls(), n - 1);
    assert_eq!(map.polylines.len(), n - 1);
    assert_eq!(map.markers.len(), n - 1);
    // The final stop never receives a marker.
    let last = stops.last().expect("route is non-empty").location;
    assert!(map.markers.iter().all(|marker| marker.location != last));
}

#[rstest]
fn degenerate_routes_fail_before_any_lookup() {
    let provider = StubRouteProvider::straight_lines();

    let err = RouteMapBuilder::new()
        .render(&square_route(1), &provider)
        .expect_err("one stop is not a route");

    assert_eq!(err, MapBuildError::InsufficientStops { count: 1 });
    assert_eq!(provider.calls(), 0);
}

#[rstest]
fn routing_failure_stops_the_build() {
    let provider = StubRouteProvider::with_error(RouteError::Network {
        url: "http://router.example".to_string(),
        message: "connection refused".to_string(),
    });

    let err = RouteMapBuilder::new()
        .render(&square_route(3), &provider)
        .expect_err("should propagate the provider error");

    assert!(matches!(err, MapBuildError::Routing(RouteError::Network { .. })));
}

#[rstest]
fn mapped_roles_take_their_colour_and_unmapped_fall_back() {
    let mut stops = square_route(4);
    stops[1].role = Some("Delivery".to_string());
    stops[2].role = Some("Mystery".to_string());
    let style = MapStyle::default().with_role_colours(HashMap::from([
        ("Pickup".to_string(), Colour::Green),
        ("Delivery".to_string(), Colour::Blue),
    ]));
    let provider = StubRouteProvider::straight_lines();

    let map = RouteMapBuilder::with_style(style)
        .render(&stops, &provider)
        .expect("should build map");

    assert_eq!(
        map.markers[1].style,
        MarkerStyle::Pin {
            colour: Colour::Blue,
            icon: None,
        }
    );
    assert_eq!(
        map.markers[2].style,
        MarkerStyle::Pin {
            colour: Colour::Gray,
            icon: None,
        }
    );
}

#[rstest]
fn custom_sinks_receive_view_then_primitives() {
    let stops = vec![Stop::new(0.0, 0.0), Stop::new(0.0, 2.0)];
    let provider = StubRouteProvider::straight_lines();
    let mut sink = RecordingSink::default();

    RouteMapBuilder::new()
        .render_into(&stops, &provider, &mut sink)
        .expect("should render");

    let view = sink.view.expect("view should be set");
    assert_eq!(view.centre, Coord { x: 0.0, y: 1.0 });
    assert_eq!(sink.lines.len(), 1);
    assert_eq!(sink.markers.len(), 1);
}
