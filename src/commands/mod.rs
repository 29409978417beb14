//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod extract_command;
pub mod batch_command;
pub mod link_command;
pub mod speakers_command;

pub use command_traits::{Command, CommandFactory};
pub use extract_command::ExtractCommand;
pub use batch_command::BatchCommand;
pub use link_command::LinkCommand;
pub use speakers_command::SpeakersCommand;

use std::path::PathBuf;
use clap::ArgMatches;
use log::info;

use crate::config::{AppConfig, ExtractionParams};
use crate::errors::{IllustError, IllustResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct IllustkitCommandFactory;

impl IllustkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        IllustkitCommandFactory
    }
}

impl Default for IllustkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for IllustkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> IllustResult<Box<dyn Command + 'a>> {
        let config = load_config(args)?;

        if args.get_flag("batch") {
            Ok(Box::new(BatchCommand::new(args, &config, logger)?))
        } else if args.get_flag("link-lessons") {
            Ok(Box::new(LinkCommand::new(args, &config, logger)?))
        } else if args.get_flag("rename-speakers") {
            Ok(Box::new(SpeakersCommand::new(args, logger)?))
        } else {
            // Default to single-page extraction
            Ok(Box::new(ExtractCommand::new(args, &config, logger)?))
        }
    }
}

/// Load the `--config` file, or defaults when none was given
pub(crate) fn load_config(args: &ArgMatches) -> IllustResult<AppConfig> {
    match args.get_one::<String>("config") {
        Some(path) => AppConfig::from_file(path),
        None => {
            info!("No configuration file given, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Extraction parameters from the config with `--min-area`/`--max-area` applied
pub(crate) fn extraction_params(args: &ArgMatches, config: &AppConfig) -> IllustResult<ExtractionParams> {
    let min_area = parse_optional_u32(args, "min-area")?;
    let max_area = parse_optional_u32(args, "max-area")?;
    config.extraction_params(min_area, max_area)
}

pub(crate) fn parse_optional_u32(args: &ArgMatches, name: &str) -> IllustResult<Option<u32>> {
    args.get_one::<String>(name)
        .map(|value| value.parse::<u32>()
            .map_err(|_| IllustError::InvalidParameters(format!("Invalid --{} value: {}", name, value))))
        .transpose()
}

pub(crate) fn required_path(args: &ArgMatches, name: &str, what: &str) -> IllustResult<PathBuf> {
    args.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| IllustError::GenericError(format!("Missing {}", what)))
}
