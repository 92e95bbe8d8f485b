//! Pure pixel math used by the quality checks.
//!
//! All functions here are pure and testable without any I/O or decoding.
//! Everything works on a grayscale luma plane derived with the BT.601 weights
//! `L = 0.299R + 0.587G + 0.114B`.

use super::raster::Raster;

/// BT.601 luma of one RGB pixel, in `[0, 255]`.
///
/// Weights are applied in integer per-mille so a gray pixel maps to exactly
/// its gray level.
pub fn luma([r, g, b]: [u8; 3]) -> f64 {
    (299 * r as u32 + 587 * g as u32 + 114 * b as u32) as f64 / 1000.0
}

/// Row-major grayscale view of a raster.
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
}

impl LumaPlane {
    pub fn from_raster(raster: &Raster) -> Self {
        Self {
            width: raster.width() as usize,
            height: raster.height() as usize,
            values: raster.rgb_pixels().map(luma).collect(),
        }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Mean luma over all pixels.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Variance-of-Laplacian focus score.
///
/// Convolves every interior pixel (1-pixel border excluded) with
/// `[[0,1,0],[1,-4,1],[0,1,0]]` and returns the mean squared response.
/// Returns `None` when the plane is smaller than the 3×3 kernel.
///
/// The score is relative: it grows with the amount of high-frequency content
/// in the frame, so it is only meaningful when compared against a threshold
/// calibrated on similar subjects.
pub fn laplacian_variance(plane: &LumaPlane) -> Option<f64> {
    let (w, h) = (plane.width, plane.height);
    if w < 3 || h < 3 {
        return None;
    }

    let mut sum_sq = 0.0;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let response = plane.at(x, y - 1)
                + plane.at(x - 1, y)
                + plane.at(x + 1, y)
                + plane.at(x, y + 1)
                - 4.0 * plane.at(x, y);
            sum_sq += response * response;
        }
    }

    let interior = ((w - 2) * (h - 2)) as f64;
    Some(sum_sq / interior)
}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Central region left after trimming `trim` (a fraction) of the width and
/// height from each side.
///
/// # Examples
/// ```
/// # use card_trust::imaging::calculations::{central_region, Region};
/// assert_eq!(
///     central_region(100, 50, 0.2),
///     Region { x0: 20, y0: 10, x1: 80, y1: 40 }
/// );
/// ```
pub fn central_region(width: usize, height: usize, trim: f64) -> Region {
    let dx = (width as f64 * trim).floor() as usize;
    let dy = (height as f64 * trim).floor() as usize;
    Region {
        x0: dx.min(width / 2),
        y0: dy.min(height / 2),
        x1: width.saturating_sub(dx).max(width / 2),
        y1: height.saturating_sub(dy).max(height / 2),
    }
}

/// Fraction of pixels in `region` whose horizontal or vertical luma gradient
/// to the next pixel exceeds `gradient_threshold`.
///
/// Gradients are taken between adjacent pixels inside the region; the last
/// column has no horizontal neighbour and the last row no vertical one.
/// Returns `None` when the region is narrower or shorter than two pixels.
pub fn edge_ratio(plane: &LumaPlane, region: Region, gradient_threshold: f64) -> Option<f64> {
    if region.width() < 2 || region.height() < 2 {
        return None;
    }

    let mut edges = 0usize;
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let here = plane.at(x, y);
            let gx = if x + 1 < region.x1 {
                (plane.at(x + 1, y) - here).abs()
            } else {
                0.0
            };
            let gy = if y + 1 < region.y1 {
                (plane.at(x, y + 1) - here).abs()
            } else {
                0.0
            };
            if gx > gradient_threshold || gy > gradient_threshold {
                edges += 1;
            }
        }
    }

    Some(edges as f64 / region.area() as f64)
}
