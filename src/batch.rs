//! Batch processing of page documents
//!
//! Discovers per-page documents, rasterizes each into its own scratch
//! directory and extracts its illustrations. A page that cannot be
//! rasterized is skipped and a page whose illustrations cannot be written
//! is recorded as failed; either way the batch carries on to the next page.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{info, warn};
use regex::Regex;

use crate::detect::IllustrationExtractor;
use crate::errors::{IllustError, IllustResult};
use crate::rasterize::Rasterizer;
use crate::utils::ProgressTracker;

/// A single-page source document and its page number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    pub number: u32,
    pub path: PathBuf,
}

/// Find page documents in `dir` whose names match `pattern`
///
/// The first capture group of `pattern` must be the page number. Results
/// are sorted numerically by page number, so `part-10` follows `part-9`.
pub fn discover_pages(dir: &Path, pattern: &str) -> IllustResult<Vec<PageDocument>> {
    let regex = Regex::new(pattern)
        .map_err(|e| IllustError::ConfigError(format!("Invalid page pattern '{}': {}", pattern, e)))?;

    let mut pages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let number = regex.captures(name)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());

        if let Some(number) = number {
            pages.push(PageDocument { number, path });
        }
    }

    pages.sort_by_key(|page| page.number);
    Ok(pages)
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Illustration count per processed page
    pub counts: BTreeMap<u32, usize>,
    /// Pages that could not be rasterized
    pub skipped: Vec<u32>,
    /// Pages whose illustrations could not be written
    pub failed: Vec<u32>,
}

/// What happened to a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    Extracted(usize),
    Skipped,
    Failed,
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Human-readable per-page report lines
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total illustrations: {}", self.total()),
            format!("Pages processed: {}", self.counts.len()),
        ];
        if !self.skipped.is_empty() {
            lines.push(format!("Pages skipped: {}", join_numbers(&self.skipped)));
        }
        if !self.failed.is_empty() {
            lines.push(format!("Pages failed: {}", join_numbers(&self.failed)));
        }
        for (page, count) in &self.counts {
            lines.push(format!("Page {:3}: {} illustrations", page, count));
        }
        lines
    }
}

/// Runs rasterization and extraction over a list of pages
pub struct BatchDriver<R: Rasterizer> {
    rasterizer: R,
    extractor: IllustrationExtractor,
    output_dir: PathBuf,
    show_progress: bool,
}

impl<R: Rasterizer> BatchDriver<R> {
    pub fn new(rasterizer: R, extractor: IllustrationExtractor, output_dir: &Path) -> Self {
        BatchDriver {
            rasterizer,
            extractor,
            output_dir: output_dir.to_path_buf(),
            show_progress: false,
        }
    }

    /// Draw a progress bar while running
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Process `pages` in order
    ///
    /// Fails only if the output directory cannot be created.
    pub fn run(&self, pages: &[PageDocument]) -> IllustResult<BatchSummary> {
        fs::create_dir_all(&self.output_dir)?;

        let progress = if self.show_progress {
            ProgressTracker::new(pages.len() as u64, "Extracting illustrations")
        } else {
            ProgressTracker::hidden()
        };

        let mut summary = BatchSummary::default();
        for page in pages {
            progress.set_message(&format!("page {}", page.number));
            match self.process_page(page)? {
                PageOutcome::Extracted(count) => {
                    summary.counts.insert(page.number, count);
                }
                PageOutcome::Skipped => summary.skipped.push(page.number),
                PageOutcome::Failed => summary.failed.push(page.number),
            }
            progress.increment(1);
        }
        progress.finish();

        Ok(summary)
    }

    /// Rasterize and extract one page
    ///
    /// Only a scratch directory that cannot be created is an error.
    fn process_page(&self, page: &PageDocument) -> IllustResult<PageOutcome> {
        info!("Page {}: {}", page.number, page.path.display());

        // removed when dropped, whichever way this function returns
        let scratch = tempfile::Builder::new().prefix("illustkit-page-").tempdir()?;

        let raster = match self.rasterizer.rasterize(&page.path, scratch.path()) {
            Ok(Some(raster)) => raster,
            Ok(None) => {
                warn!("No image generated for {}", page.path.display());
                return Ok(PageOutcome::Skipped);
            }
            Err(e) => {
                warn!("Skipping {}: {}", page.path.display(), e);
                return Ok(PageOutcome::Skipped);
            }
        };

        match self.extractor.extract_file(&raster, &self.output_dir, page.number) {
            Ok(written) => Ok(PageOutcome::Extracted(written.len())),
            Err(e) => {
                warn!("Could not write illustrations for page {}: {}", page.number, e);
                Ok(PageOutcome::Failed)
            }
        }
    }
}
