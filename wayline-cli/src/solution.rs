//! Solution command: solver response in, table or route text out.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::de::DeserializeOwned;
use wayline_core::{SolutionTable, SolverResponse};

use crate::CliError;

/// CLI arguments for the `solution` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Load a routing solver's JSON response and reformat it \
                 as flat table rows or as one arrow-joined route line \
                 per vehicle.",
    about = "Reformat a solver response as a table or printable text"
)]
pub(crate) struct SolutionArgs {
    /// Path to the solver response JSON.
    #[arg(value_name = "path")]
    pub(crate) response: PathBuf,
    /// Path to a JSON object mapping location ids to display names.
    #[arg(long = "locations", value_name = "path")]
    pub(crate) locations: Option<PathBuf>,
    /// Output format.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

/// Output format of the `solution` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Comma-separated rows, one per visited location.
    Table,
    /// One arrow-joined route line per vehicle.
    Text,
}

pub(crate) fn run_solution(args: &SolutionArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solution_with(args, &mut stdout)
}

pub(crate) fn run_solution_with(
    args: &SolutionArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response: SolverResponse = read_json(&args.response)?;
    match args.format {
        OutputFormat::Table => write_table(&response.to_table()?, writer),
        OutputFormat::Text => {
            let locations: HashMap<u32, String> = match &args.locations {
                Some(path) => read_json(path)?,
                None => HashMap::new(),
            };
            write_text(&response.to_text(&locations), writer)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let file = File::open(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

fn write_table(table: &SolutionTable, writer: &mut dyn Write) -> Result<(), CliError> {
    let header = if table.has_types {
        "truck_id,location,type"
    } else {
        "truck_id,location"
    };
    writeln!(writer, "{header}").map_err(CliError::WriteOutput)?;
    for row in &table.rows {
        if table.has_types {
            let stop_type = row.stop_type.as_deref().unwrap_or_default();
            writeln!(writer, "{},{},{}", row.truck_id, row.location, stop_type)
                .map_err(CliError::WriteOutput)?;
        } else {
            writeln!(writer, "{},{}", row.truck_id, row.location)
                .map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

fn write_text(lines: &[String], writer: &mut dyn Write) -> Result<(), CliError> {
    for line in lines {
        writeln!(writer, "{line}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
