//! Batch extraction command
//!
//! Rasterizes every page document in a directory and extracts the
//! illustrations of each page into one flat output directory.

use std::path::PathBuf;
use clap::ArgMatches;
use log::{info, warn};

use crate::batch::{discover_pages, BatchDriver};
use crate::commands::command_traits::Command;
use crate::config::{AppConfig, ExtractionParams};
use crate::detect::IllustrationExtractor;
use crate::errors::IllustResult;
use crate::rasterize::PdftoppmRasterizer;
use crate::utils::logger::Logger;

use super::{extraction_params, parse_optional_u32, required_path};

/// Command for processing a directory of page documents
pub struct BatchCommand<'a> {
    /// Directory holding the page documents
    input_dir: PathBuf,
    /// Directory receiving the crops
    output_dir: PathBuf,
    /// File name pattern with the page number as first capture
    page_pattern: String,
    rasterizer: PdftoppmRasterizer,
    params: ExtractionParams,
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    pub fn new(args: &ArgMatches, config: &AppConfig, logger: &'a Logger) -> IllustResult<Self> {
        let input_dir = required_path(args, "input", "directory of page documents")?;
        let output_dir = required_path(args, "output", "output directory for extraction")?;
        let params = extraction_params(args, config)?;

        let mut rasterizer_config = config.rasterizer.clone();
        if let Some(dpi) = parse_optional_u32(args, "dpi")? {
            rasterizer_config.dpi = dpi;
        }
        info!("Rasterizer: {} at {} dpi", rasterizer_config.program, rasterizer_config.dpi);

        Ok(BatchCommand {
            input_dir,
            output_dir,
            page_pattern: config.batch.page_pattern.clone(),
            rasterizer: PdftoppmRasterizer::from_config(&rasterizer_config),
            params,
            logger,
        })
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> IllustResult<()> {
        let pages = discover_pages(&self.input_dir, &self.page_pattern)?;
        info!("Found {} pages to process", pages.len());
        info!("Output directory: {}", self.output_dir.display());
        if pages.is_empty() {
            warn!("No files in {} match {}", self.input_dir.display(), self.page_pattern);
        }

        let driver = BatchDriver::new(
            self.rasterizer.clone(),
            IllustrationExtractor::new(self.params),
            &self.output_dir,
        ).with_progress(true);
        let summary = driver.run(&pages)?;

        let lines = summary.report_lines();
        self.logger.log_report("EXTRACTION COMPLETE", &lines)?;

        println!("{}", "=".repeat(60));
        println!("EXTRACTION COMPLETE");
        for line in &lines {
            println!("  {}", line);
        }
        println!("{}", "=".repeat(60));

        Ok(())
    }
}
