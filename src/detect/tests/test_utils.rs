use image::{DynamicImage, Rgb, RgbImage};

use crate::detect::Region;

/// Creates a white page of the given size
pub fn blank_page(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

/// Paints a solid ink blob onto a page
pub fn paint(page: &mut RgbImage, region: Region, color: [u8; 3]) {
    for y in region.y..region.end_y() {
        for x in region.x..region.end_x() {
            page.put_pixel(x, y, Rgb(color));
        }
    }
}

/// Creates a page with a black blob in each region
pub fn page_with_blobs(width: u32, height: u32, blobs: &[Region]) -> DynamicImage {
    let mut page = blank_page(width, height);
    for blob in blobs {
        paint(&mut page, *blob, [0, 0, 0]);
    }
    DynamicImage::ImageRgb8(page)
}
