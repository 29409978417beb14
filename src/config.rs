//! Configuration for extraction runs
//!
//! Extraction thresholds are always passed explicitly to the pipeline as
//! [`ExtractionParams`]. [`AppConfig`] is the optional TOML file the CLI
//! reads them from, together with rasterizer and lesson settings.

use std::fs;
use std::path::Path;
use serde::Deserialize;
use log::info;

use crate::errors::{IllustError, IllustResult};

/// Default lower area bound (exclusive), in pixels
pub const DEFAULT_MIN_AREA: u32 = 5000;
/// Default upper area bound (exclusive), in pixels
pub const DEFAULT_MAX_AREA: u32 = 500_000;
/// Default rasterization resolution
pub const DEFAULT_DPI: u32 = 150;
/// Default external rasterizer program
pub const DEFAULT_RASTERIZER: &str = "pdftoppm";
/// Default pattern for page documents; the first capture is the page number
pub const DEFAULT_PAGE_PATTERN: &str = r"^part-(\d+)\.pdf$";
/// Default URL prefix lessons use to reference extracted illustrations
pub const DEFAULT_IMAGE_URL_PREFIX: &str = "/illustrations-sorted";

/// Area bounds a contour must fall strictly between to count as an illustration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionParams {
    min_area: u32,
    max_area: u32,
}

impl ExtractionParams {
    /// Create validated extraction parameters
    ///
    /// # Arguments
    /// * `min_area` - Exclusive lower bound on contour area, must be positive
    /// * `max_area` - Exclusive upper bound on contour area, must exceed `min_area`
    pub fn new(min_area: u32, max_area: u32) -> IllustResult<Self> {
        if min_area == 0 {
            return Err(IllustError::InvalidParameters(
                "min_area must be positive".to_string()));
        }
        if min_area >= max_area {
            return Err(IllustError::InvalidParameters(format!(
                "min_area ({}) must be smaller than max_area ({})", min_area, max_area)));
        }
        Ok(ExtractionParams { min_area, max_area })
    }

    pub fn min_area(&self) -> u32 {
        self.min_area
    }

    pub fn max_area(&self) -> u32 {
        self.max_area
    }
}

impl Default for ExtractionParams {
    fn default() -> Self {
        ExtractionParams {
            min_area: DEFAULT_MIN_AREA,
            max_area: DEFAULT_MAX_AREA,
        }
    }
}

/// `[extraction]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    pub min_area: u32,
    pub max_area: u32,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        ExtractionSection {
            min_area: DEFAULT_MIN_AREA,
            max_area: DEFAULT_MAX_AREA,
        }
    }
}

/// `[rasterizer]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RasterizerSection {
    pub program: String,
    pub dpi: u32,
}

impl Default for RasterizerSection {
    fn default() -> Self {
        RasterizerSection {
            program: DEFAULT_RASTERIZER.to_string(),
            dpi: DEFAULT_DPI,
        }
    }
}

/// `[batch]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    pub page_pattern: String,
}

impl Default for BatchSection {
    fn default() -> Self {
        BatchSection {
            page_pattern: DEFAULT_PAGE_PATTERN.to_string(),
        }
    }
}

/// `[lessons]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LessonsSection {
    pub image_url_prefix: String,
}

impl Default for LessonsSection {
    fn default() -> Self {
        LessonsSection {
            image_url_prefix: DEFAULT_IMAGE_URL_PREFIX.to_string(),
        }
    }
}

/// Application configuration loaded from TOML
///
/// Every section and field is optional; missing values fall back to the
/// defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extraction: ExtractionSection,
    pub rasterizer: RasterizerSection,
    pub batch: BatchSection,
    pub lessons: LessonsSection,
}

impl AppConfig {
    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> IllustResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> IllustResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Validated extraction parameters, with optional overrides from the command line
    pub fn extraction_params(&self, min_area: Option<u32>, max_area: Option<u32>) -> IllustResult<ExtractionParams> {
        ExtractionParams::new(
            min_area.unwrap_or(self.extraction.min_area),
            max_area.unwrap_or(self.extraction.max_area),
        )
    }
}
