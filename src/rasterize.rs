//! Page rasterization through an external converter
//!
//! The converter is treated as a black box that turns a single-page
//! document into one PNG inside a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::config::{RasterizerSection, DEFAULT_DPI, DEFAULT_RASTERIZER};
use crate::errors::{IllustError, IllustResult};

/// Prefix of the images the converter writes into the scratch directory
pub const RASTER_PREFIX: &str = "page";

lazy_static! {
    static ref RASTER_NAME: Regex =
        Regex::new(r"^page-\d+\.png$").expect("raster name pattern is valid");
}

/// Converts a page document into a raster image
pub trait Rasterizer {
    /// Rasterize `document` into `scratch_dir`
    ///
    /// # Returns
    /// Path of the produced image, or `None` if the converter produced nothing
    fn rasterize(&self, document: &Path, scratch_dir: &Path) -> IllustResult<Option<PathBuf>>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, document: &Path, scratch_dir: &Path) -> IllustResult<Option<PathBuf>> {
        (**self).rasterize(document, scratch_dir)
    }
}

/// Rasterizer backed by poppler's `pdftoppm`
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    program: String,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(program: &str, dpi: u32) -> Self {
        PdftoppmRasterizer {
            program: program.to_string(),
            dpi,
        }
    }

    pub fn from_config(section: &RasterizerSection) -> Self {
        Self::new(&section.program, section.dpi)
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_RASTERIZER, DEFAULT_DPI)
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, document: &Path, scratch_dir: &Path) -> IllustResult<Option<PathBuf>> {
        let output_root = scratch_dir.join(RASTER_PREFIX);
        debug!("Running {} on {} at {} dpi", self.program, document.display(), self.dpi);

        let output = Command::new(&self.program)
            .arg(document)
            .arg(&output_root)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .output()
            .map_err(|e| IllustError::RasterizeError(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(IllustError::RasterizeError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        find_raster(scratch_dir)
    }
}

/// Locate the first converter output (`page-N.png`) in a scratch directory
pub fn find_raster(scratch_dir: &Path) -> IllustResult<Option<PathBuf>> {
    let mut rasters: Vec<PathBuf> = fs::read_dir(scratch_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| RASTER_NAME.is_match(name))
        })
        .collect();

    rasters.sort();
    Ok(rasters.into_iter().next())
}
