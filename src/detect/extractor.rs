//! Illustration extraction facade
//!
//! Ties binarization, contour detection, filtering and cropping together
//! for a single page. Pages are independent: nothing is shared between
//! calls besides the output directory.

use std::path::{Path, PathBuf};
use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};

use crate::config::ExtractionParams;
use crate::errors::IllustResult;
use crate::utils::naming::illustration_file_name;

use super::binarize::ink_mask;
use super::contours::outer_candidates;
use super::filter::select_illustrations;
use super::region::Region;

/// Margin added around each illustration before cropping, in pixels
pub const CROP_PADDING: u32 = 5;

/// A candidate that passed filtering, with its position in reading order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IllustrationBox {
    /// 1-based reading-order rank on the page
    pub rank: usize,
    /// Detected bounding box, without padding
    pub region: Region,
    /// Area enclosed by the component's outer border
    pub area: f64,
}

/// Detects and crops illustrations from page images
#[derive(Debug, Clone, Copy, Default)]
pub struct IllustrationExtractor {
    params: ExtractionParams,
}

impl IllustrationExtractor {
    pub fn new(params: ExtractionParams) -> Self {
        IllustrationExtractor { params }
    }

    /// Find illustration boxes on a page, ranked top-to-bottom then left-to-right
    pub fn detect(&self, page: &DynamicImage) -> Vec<IllustrationBox> {
        let mask = ink_mask(page);
        let candidates = outer_candidates(&mask);
        debug!("Found {} candidate components", candidates.len());

        select_illustrations(candidates, &self.params)
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| IllustrationBox {
                rank: index + 1,
                region: candidate.bounds,
                area: candidate.area,
            })
            .collect()
    }

    /// Crop every illustration on `page` into `output_dir`
    ///
    /// # Arguments
    /// * `page` - Decoded page image
    /// * `output_dir` - Directory receiving the PNG crops
    /// * `page_number` - Page number used in the output file names
    ///
    /// # Returns
    /// Paths of the written files in rank order, or an error if a file
    /// could not be written
    pub fn extract(&self, page: &DynamicImage, output_dir: &Path, page_number: u32) -> IllustResult<Vec<PathBuf>> {
        let (width, height) = (page.width(), page.height());
        let mut written = Vec::new();

        for illustration in self.detect(page) {
            let region = illustration.region;
            let crop = region.padded(CROP_PADDING, width, height);

            let output_path = output_dir.join(illustration_file_name(page_number, illustration.rank));
            page.crop_imm(crop.x, crop.y, crop.width, crop.height)
                .save_with_format(&output_path, ImageFormat::Png)?;

            info!("  [{}] {}x{} at y={}", illustration.rank, region.width, region.height, region.y);
            written.push(output_path);
        }

        Ok(written)
    }

    /// Load a page image from disk and extract its illustrations
    ///
    /// A page that cannot be opened or decoded is logged and yields no
    /// illustrations, so one bad page never stops a batch.
    pub fn extract_file(&self, page_path: &Path, output_dir: &Path, page_number: u32) -> IllustResult<Vec<PathBuf>> {
        let page = match image::open(page_path) {
            Ok(page) => page,
            Err(e) => {
                warn!("Could not read {}: {}", page_path.display(), e);
                return Ok(Vec::new());
            }
        };

        self.extract(&page, output_dir, page_number)
    }
}
