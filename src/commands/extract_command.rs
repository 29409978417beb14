//! Single-page extraction command
//!
//! Extracts the illustrations of one already-rasterized page image.

use std::fs;
use std::path::{Path, PathBuf};
use clap::ArgMatches;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::commands::command_traits::Command;
use crate::config::AppConfig;
use crate::detect::IllustrationExtractor;
use crate::errors::{IllustError, IllustResult};
use crate::utils::logger::Logger;

use super::{extraction_params, parse_optional_u32, required_path};

lazy_static! {
    static ref TRAILING_NUMBER: Regex = Regex::new(r"(\d+)$").expect("page number pattern is valid");
}

/// Page number from the trailing digits of a file stem, e.g. `part-12.png` -> 12
pub fn page_number_from_path(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    TRAILING_NUMBER.captures(stem)?.get(1)?.as_str().parse().ok()
}

/// Command for extracting the illustrations of one page image
pub struct ExtractCommand<'a> {
    /// Path to the page image
    input_file: PathBuf,
    /// Directory receiving the crops
    output_dir: PathBuf,
    /// Page number used in output names
    page_number: u32,
    extractor: IllustrationExtractor,
    /// Logger receiving the run report
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// The page number comes from `--page`, or from the input file name
    /// when it ends in digits.
    pub fn new(args: &ArgMatches, config: &AppConfig, logger: &'a Logger) -> IllustResult<Self> {
        let input_file = required_path(args, "input", "input page image")?;
        info!("Input file: {}", input_file.display());

        let output_dir = required_path(args, "output", "output directory for extraction")?;
        info!("Output directory: {}", output_dir.display());

        let page_number = match parse_optional_u32(args, "page")? {
            Some(page) => page,
            None => page_number_from_path(&input_file).ok_or_else(|| IllustError::InvalidParameters(
                format!("Cannot infer page number from {}; pass --page", input_file.display())))?,
        };
        info!("Page number: {}", page_number);

        let params = extraction_params(args, config)?;
        info!("Area bounds: {} < area < {}", params.min_area(), params.max_area());

        Ok(ExtractCommand {
            input_file,
            output_dir,
            page_number,
            extractor: IllustrationExtractor::new(params),
            logger,
        })
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> IllustResult<()> {
        fs::create_dir_all(&self.output_dir)?;

        info!("Page {}: {}", self.page_number, self.input_file.display());
        let written = self.extractor.extract_file(&self.input_file, &self.output_dir, self.page_number)?;

        let lines: Vec<String> = written.iter().map(|path| path.display().to_string()).collect();
        self.logger.log_report(
            &format!("Page {}: {} illustrations", self.page_number, written.len()),
            &lines,
        )?;
        println!("Extracted {} illustrations from page {}", written.len(), self.page_number);

        Ok(())
    }
}
