//! Render command: stop list in, route map description out.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Deserializer, de};
use wayline_core::{Colour, MapStyle, RouteMap, RouteMapBuilder, RouteProvider, Stop, ViewPolicy};
use wayline_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};

use crate::CliError;

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Load an ordered JSON stop list, query an OSRM service \
                 for each consecutive segment and emit the accumulated \
                 map description as JSON.",
    about = "Render an ordered stop list as a route map description"
)]
pub(crate) struct RenderArgs {
    /// Path to a JSON array of stop records.
    #[arg(value_name = "path")]
    pub(crate) stops: PathBuf,
    /// Base URL of the OSRM routing service.
    #[arg(long = "osrm-url", value_name = "url")]
    pub(crate) osrm_url: Option<String>,
    /// Centre the view on the second stop instead of the stop centroid,
    /// matching the legacy framing.
    #[arg(long = "legacy-view")]
    pub(crate) legacy_view: bool,
    /// Render a pre-solve overview instead of a routed map: one
    /// role-coloured marker per stop, no routing service calls.
    #[arg(long = "overview")]
    pub(crate) overview: bool,
    /// Add a role to pin colour mapping, e.g. `Restaurant=green`. May be
    /// repeated; when given, replaces the built-in palette.
    #[arg(long = "role-colour", value_name = "role=colour", value_parser = parse_role_colour)]
    pub(crate) role_colours: Vec<(String, Colour)>,
    /// Write the map JSON here instead of stdout.
    #[arg(long = "out", value_name = "path")]
    pub(crate) out: Option<PathBuf>,
}

/// Parse one `role=colour` mapping from the command line.
fn parse_role_colour(raw: &str) -> Result<(String, Colour), String> {
    let (role, colour) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected role=colour, got {raw:?}"))?;
    let colour = colour
        .trim()
        .parse::<Colour>()
        .map_err(|err| err.to_string())?;
    Ok((role.trim().to_string(), colour))
}

/// One stop record in the JSON input.
///
/// Field names mirror common dataframe columns; the capitalised aliases
/// accept dataframe exports unchanged.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StopRecord {
    /// Latitude in degrees.
    #[serde(alias = "Latitude")]
    pub(crate) latitude: f64,
    /// Longitude in degrees.
    #[serde(alias = "Longitude")]
    pub(crate) longitude: f64,
    /// Optional role label (e.g. DEPOT, Pickup, Delivery).
    #[serde(default)]
    pub(crate) order_type: Option<String>,
    /// Preferred-member flag; accepts booleans or 0/1 integers.
    #[serde(
        default,
        alias = "preferred_members",
        deserialize_with = "deserialize_flag"
    )]
    pub(crate) preferred: bool,
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        let mut stop = Self::new(record.longitude, record.latitude)
            .with_preferred(record.preferred);
        if let Some(role) = record.order_type {
            stop = stop.with_role(role);
        }
        stop
    }
}

/// Accept `true`/`false` as well as 0/1 integers, which dataframe
/// exports commonly carry.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl de::Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a boolean or a 0/1 integer")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            Ok(value != 0)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// Role label to pin colour mapping used when stop records carry
/// `order_type` labels.
fn default_role_colours() -> HashMap<String, Colour> {
    HashMap::from([
        ("DEPOT".to_string(), Colour::Gray),
        ("Pickup".to_string(), Colour::Green),
        ("Delivery".to_string(), Colour::Blue),
    ])
}

pub(crate) fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let stops = load_stops(&args.stops)?;
    let style = style_for(&stops, args.legacy_view, &args.role_colours);

    if args.overview {
        return with_output(args.out.as_deref(), |writer| {
            overview_with(&stops, style, writer)
        });
    }

    let base_url = args
        .osrm_url
        .clone()
        .unwrap_or_else(|| HttpRouteProviderConfig::default().base_url);
    let provider =
        HttpRouteProvider::new(base_url.clone()).map_err(|source| CliError::BuildRouteProvider {
            base_url,
            source,
        })?;
    with_output(args.out.as_deref(), |writer| {
        render_with(&stops, style, &provider, writer)
    })
}

/// Run `write` against the output file, or stdout when no path is given.
fn with_output(
    out: Option<&Path>,
    write: impl FnOnce(&mut dyn Write) -> Result<(), CliError>,
) -> Result<(), CliError> {
    if let Some(path) = out {
        let mut file = File::create(path).map_err(|source| CliError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        write(&mut file)
    } else {
        let mut stdout = std::io::stdout().lock();
        write(&mut stdout)
    }
}

/// Derive the map style from the loaded stops and flags.
///
/// Command-line `role=colour` mappings take precedence; otherwise role
/// pins are enabled only when at least one record carries a role label,
/// and routed maps without labels fall back to numbered badges.
pub(crate) fn style_for(
    stops: &[Stop],
    legacy_view: bool,
    palette: &[(String, Colour)],
) -> MapStyle {
    let mut style = MapStyle::default();
    if legacy_view {
        style = style.with_view(ViewPolicy::Stop(1));
    }
    if !palette.is_empty() {
        style = style.with_role_colours(palette.iter().cloned().collect());
    } else if stops.iter().any(|stop| stop.role.is_some()) {
        style = style.with_role_colours(default_role_colours());
    }
    style
}

/// Build the routed map and write it as pretty JSON.
pub(crate) fn render_with<P: RouteProvider>(
    stops: &[Stop],
    style: MapStyle,
    provider: &P,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let map = RouteMapBuilder::with_style(style).render(stops, provider)?;
    write_map(&map, writer)
}

/// Build the pre-solve overview map and write it as pretty JSON.
pub(crate) fn overview_with(
    stops: &[Stop],
    style: MapStyle,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let map = RouteMapBuilder::with_style(style).render_overview(stops);
    write_map(&map, writer)
}

fn write_map(map: &RouteMap, writer: &mut dyn Write) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(map).map_err(CliError::SerialiseMap)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Load an ordered stop list from a JSON file.
pub(crate) fn load_stops(path: &Path) -> Result<Vec<Stop>, CliError> {
    let file = File::open(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<StopRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| CliError::ParseInput {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records.into_iter().map(Stop::from).collect())
}
