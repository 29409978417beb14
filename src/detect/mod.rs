//! Illustration detection on scanned pages
//!
//! Turns a page raster into ranked illustration boxes and writes each box
//! as its own cropped image.

mod region;
pub mod binarize;
pub mod contours;
pub mod filter;
mod extractor;
#[cfg(test)]
mod tests;

pub use region::Region;
pub use contours::Candidate;
pub use extractor::{IllustrationBox, IllustrationExtractor, CROP_PADDING};
