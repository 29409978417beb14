//! Output file naming
//!
//! Downstream lesson tooling finds illustrations purely by file name, so
//! the `page{N}_illust{rank:03}.png` layout must not change.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ILLUSTRATION_NAME: Regex =
        Regex::new(r"^page(\d+)_illust(\d+)\.png$").expect("illustration name pattern is valid");
}

/// File name for the illustration with the given 1-based rank on a page
pub fn illustration_file_name(page_number: u32, rank: usize) -> String {
    format!("page{}_illust{:03}.png", page_number, rank)
}

/// Recover `(page_number, rank)` from an illustration file name
pub fn parse_illustration_file_name(name: &str) -> Option<(u32, usize)> {
    let captures = ILLUSTRATION_NAME.captures(name)?;
    let page = captures.get(1)?.as_str().parse().ok()?;
    let rank = captures.get(2)?.as_str().parse().ok()?;
    Some((page, rank))
}
