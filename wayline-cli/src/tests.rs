//! Unit tests for the CLI commands, driven through injected writers and
//! stub providers so no network or real map backend is needed.

use std::io::Write as _;
use std::path::PathBuf;

use rstest::rstest;
use tempfile::NamedTempFile;
use wayline_core::test_support::StubRouteProvider;
use wayline_core::{Colour, Stop, ViewPolicy};

use crate::CliError;
use crate::render::{RenderArgs, load_stops, overview_with, render_with, style_for};
use crate::solution::{OutputFormat, SolutionArgs, run_solution_with};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("should create temp file");
    file.write_all(contents.as_bytes())
        .expect("should write temp file");
    file
}

#[rstest]
fn load_stops_accepts_dataframe_style_records() {
    let file = write_temp(
        r#"[
            {"Latitude": 51.5, "Longitude": -0.1, "order_type": "DEPOT"},
            {"Latitude": 51.6, "Longitude": -0.2, "preferred_members": 1},
            {"latitude": 51.7, "longitude": -0.3, "preferred": false}
        ]"#,
    );

    let stops = load_stops(file.path()).expect("should load stops");

    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0].location.x, -0.1);
    assert_eq!(stops[0].location.y, 51.5);
    assert_eq!(stops[0].role.as_deref(), Some("DEPOT"));
    assert!(stops[1].preferred);
    assert!(!stops[2].preferred);
    assert!(stops[2].role.is_none());
}

#[rstest]
fn load_stops_reports_missing_files() {
    let err = load_stops(&PathBuf::from("/nonexistent/stops.json"))
        .expect_err("should fail for missing file");

    assert!(matches!(err, CliError::OpenInput { .. }));
}

#[rstest]
fn style_enables_role_pins_only_when_labels_are_present() {
    let unlabelled = vec![Stop::new(0.0, 0.0), Stop::new(1.0, 1.0)];
    let labelled = vec![
        Stop::new(0.0, 0.0).with_role("DEPOT"),
        Stop::new(1.0, 1.0),
    ];

    assert!(style_for(&unlabelled, false, &[]).role_colours.is_empty());
    assert!(!style_for(&labelled, false, &[]).role_colours.is_empty());
}

#[rstest]
fn style_honours_the_legacy_view_flag() {
    let stops = vec![Stop::new(0.0, 0.0), Stop::new(1.0, 1.0)];

    assert_eq!(style_for(&stops, false, &[]).view, ViewPolicy::Centroid);
    assert_eq!(style_for(&stops, true, &[]).view, ViewPolicy::Stop(1));
}

#[rstest]
fn command_line_palette_replaces_the_built_in_mapping() {
    let stops = vec![
        Stop::new(0.0, 0.0).with_role("DEPOT"),
        Stop::new(1.0, 1.0).with_role("Restaurant"),
    ];
    let palette = vec![
        ("DEPOT".to_string(), Colour::Red),
        ("Restaurant".to_string(), Colour::Green),
    ];

    let style = style_for(&stops, false, &palette);

    assert_eq!(style.role_colours.get("DEPOT"), Some(&Colour::Red));
    assert_eq!(style.role_colours.get("Restaurant"), Some(&Colour::Green));
    assert!(!style.role_colours.contains_key("Pickup"));
}

#[rstest]
fn render_writes_the_map_description_as_json() {
    let stops = vec![
        Stop::new(0.0, 0.0),
        Stop::new(1.0, 0.0),
        Stop::new(1.0, 1.0),
    ];
    let provider = StubRouteProvider::straight_lines();
    let mut output = Vec::new();

    render_with(&stops, style_for(&stops, false, &[]), &provider, &mut output)
        .expect("should render");

    let map: serde_json::Value =
        serde_json::from_slice(&output).expect("output should be JSON");
    assert_eq!(map["polylines"].as_array().map(Vec::len), Some(2));
    assert_eq!(map["markers"].as_array().map(Vec::len), Some(2));
    assert_eq!(provider.calls(), 2);
}

#[rstest]
fn overview_marks_every_stop_without_routing() {
    let stops = vec![
        Stop::new(0.0, 0.0).with_role("DEPOT"),
        Stop::new(1.0, 0.0),
        Stop::new(1.0, 1.0),
    ];
    let mut output = Vec::new();

    overview_with(&stops, style_for(&stops, false, &[]), &mut output)
        .expect("should render overview");

    let map: serde_json::Value =
        serde_json::from_slice(&output).expect("output should be JSON");
    assert_eq!(map["polylines"].as_array().map(Vec::len), Some(0));
    assert_eq!(map["markers"].as_array().map(Vec::len), Some(3));
    assert_eq!(map["markers"][0]["style"]["colour"], "gray");
    assert_eq!(map["markers"][1]["style"]["colour"], "gray");
}

#[rstest]
fn solution_table_output_lists_one_row_per_location() {
    let response = write_temp(
        r#"{"vehicle_data": {"v1": {"route": [1, 2, 3]}, "v2": {"route": [4, 5]}}}"#,
    );
    let args = SolutionArgs {
        response: response.path().to_path_buf(),
        locations: None,
        format: OutputFormat::Table,
    };
    let mut output = Vec::new();

    run_solution_with(&args, &mut output).expect("should format");

    let text = String::from_utf8(output).expect("output should be UTF-8");
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec!["truck_id,location", "v1,1", "v1,2", "v1,3", "v2,4", "v2,5"],
    );
}

#[rstest]
fn solution_table_output_includes_types_when_present() {
    let response = write_temp(
        r#"{"vehicle_data": {"v1": {"route": [1, 2], "type": ["Pickup", "Delivery"]}}}"#,
    );
    let args = SolutionArgs {
        response: response.path().to_path_buf(),
        locations: None,
        format: OutputFormat::Table,
    };
    let mut output = Vec::new();

    run_solution_with(&args, &mut output).expect("should format");

    let text = String::from_utf8(output).expect("output should be UTF-8");
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec!["truck_id,location,type", "v1,1,Pickup", "v1,2,Delivery"],
    );
}

#[rstest]
fn solution_text_output_joins_named_locations() {
    let response = write_temp(r#"{"vehicle_data": {"v1": {"route": [1, 2]}}}"#);
    let locations = write_temp(r#"{"1": "Depot", "2": "Cafe"}"#);
    let args = SolutionArgs {
        response: response.path().to_path_buf(),
        locations: Some(locations.path().to_path_buf()),
        format: OutputFormat::Text,
    };
    let mut output = Vec::new();

    run_solution_with(&args, &mut output).expect("should format");

    let text = String::from_utf8(output).expect("output should be UTF-8");
    assert_eq!(text, "For vehicle v1 route is: Depot->Cafe\n");
}

#[rstest]
fn inconsistent_types_surface_as_malformed_solution() {
    let response = write_temp(
        r#"{"vehicle_data": {
            "v1": {"route": [1], "type": ["Depot"]},
            "v2": {"route": [2]}
        }}"#,
    );
    let args = SolutionArgs {
        response: response.path().to_path_buf(),
        locations: None,
        format: OutputFormat::Table,
    };

    let mut output: Vec<u8> = Vec::new();
    let err = run_solution_with(&args, &mut output)
        .expect_err("should reject mixed type presence");

    assert!(matches!(err, CliError::MalformedSolution(_)));
}

#[rstest]
fn render_args_accept_the_documented_flags() {
    use clap::Parser as _;

    let args =
        RenderArgs::try_parse_from(["render", "stops.json", "--legacy-view", "--out", "map.json"])
            .expect("should parse");

    assert_eq!(args.stops, PathBuf::from("stops.json"));
    assert!(args.legacy_view);
    assert!(!args.overview);
    assert_eq!(args.out, Some(PathBuf::from("map.json")));
    assert!(args.osrm_url.is_none());
}

#[rstest]
fn render_args_collect_repeated_role_colours() {
    use clap::Parser as _;

    let args = RenderArgs::try_parse_from([
        "render",
        "stops.json",
        "--overview",
        "--role-colour",
        "DEPOT=red",
        "--role-colour",
        "Restaurant=green",
    ])
    .expect("should parse");

    assert!(args.overview);
    assert_eq!(
        args.role_colours,
        vec![
            ("DEPOT".to_string(), Colour::Red),
            ("Restaurant".to_string(), Colour::Green),
        ],
    );
}

#[rstest]
fn render_args_reject_malformed_role_colours() {
    use clap::Parser as _;

    RenderArgs::try_parse_from(["render", "stops.json", "--role-colour", "DEPOT"])
        .expect_err("should reject a mapping without a colour");
    RenderArgs::try_parse_from(["render", "stops.json", "--role-colour", "DEPOT=teal"])
        .expect_err("should reject an unknown colour");
}
