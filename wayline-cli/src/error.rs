//! Error types emitted by the Wayline CLI.

use std::path::PathBuf;

use thiserror::Error;
use wayline_core::{MalformedSolutionError, MapBuildError};
use wayline_data::routing::ProviderBuildError;

/// Errors emitted by the Wayline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Opening an input file failed.
    #[error("failed to open {path:?}: {source}")]
    OpenInput {
        /// The file that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Input JSON could not be decoded.
    #[error("failed to parse JSON in {path:?}: {source}")]
    ParseInput {
        /// The file that could not be parsed.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// The configured OSRM base URL.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// Building the route map failed.
    #[error(transparent)]
    BuildMap(#[from] MapBuildError),
    /// The solver response could not be tabulated.
    #[error(transparent)]
    MalformedSolution(#[from] MalformedSolutionError),
    /// Serialising the map description failed.
    #[error("failed to serialise map description: {0}")]
    SerialiseMap(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// The file that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
