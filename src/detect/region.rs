//! Region structure for detected page areas
//!
//! Coordinates are in pixels with (0,0) at the top-left corner of the page.

/// Axis-aligned rectangle on a page (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Get the rightmost X coordinate (exclusive)
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    /// Width over height, 0 for a zero-height region
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// Expand the region by `padding` on every side, clamped to the page
    ///
    /// The result never extends outside `[0, page_width] x [0, page_height]`.
    ///
    /// # Arguments
    /// * `padding` - Margin added on each side, in pixels
    /// * `page_width` - Width of the page the region lies on
    /// * `page_height` - Height of the page the region lies on
    pub fn padded(&self, padding: u32, page_width: u32, page_height: u32) -> Region {
        let x1 = self.x.saturating_sub(padding).min(page_width);
        let y1 = self.y.saturating_sub(padding).min(page_height);
        let x2 = self.end_x().saturating_add(padding).min(page_width);
        let y2 = self.end_y().saturating_add(padding).min(page_height);

        Region {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }
}
