//! Command-line interface for the Wayline engine.
//!
//! Two subcommands cover the supported workflows:
//! `render` turns an ordered stop list into a route map description via
//! an OSRM service, and `solution` reformats a solver response as a
//! table or printable route text.

#![forbid(unsafe_code)]

mod error;
mod render;
mod solution;

#[cfg(test)]
mod tests;

pub use error::CliError;

use clap::{Parser, Subcommand};

/// Run the Wayline CLI with the current process arguments.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, input loading, routing
/// or output writing fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Render(args) => render::run_render(&args),
        Command::Solution(args) => solution::run_solution(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayline",
    about = "Route map and solution formatting tools for routing solvers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an ordered stop list as a route map description.
    Render(render::RenderArgs),
    /// Reformat a solver response as a table or printable text.
    Solution(solution::SolutionArgs),
}
