// src/cv/mod.rs

use crate::{FrameBuffer, Point2i};

/// Common trait for the pixel-level operations the hand pipeline is built
/// from. Kept behind a trait so the domain layer can be exercised against
/// alternative or mock implementations.
pub trait PixelOps {
    /// Per-pixel absolute difference between the current frame and a
    /// floating-point background accumulator. The accumulator is truncated
    /// to the frame's 8-bit precision before differencing.
    ///
    /// # Arguments
    /// * `src` - The current grayscale frame pixels.
    /// * `reference` - The background accumulator, same length as `src`.
    /// * `dst` - Destination for the absolute differences. Must be pre-allocated.
    fn absdiff(src: &[u8], reference: &[f32], dst: &mut [u8]);

    /// Applies a simple threshold to a grayscale image: 255 where the
    /// source pixel exceeds `threshold`, 0 otherwise.
    ///
    /// # Arguments
    /// * `src` - The source slice of grayscale pixels.
    /// * `dst` - The destination slice where thresholded binary pixels will be written.
    /// * `threshold` - The cutoff threshold limit (0-255).
    fn threshold(src: &[u8], dst: &mut [u8], threshold: u8);

    /// Blends a frame into a running weighted average:
    /// `acc = acc * (1 - alpha) + src * alpha`, per pixel.
    ///
    /// # Arguments
    /// * `src` - The observed grayscale frame pixels.
    /// * `acc` - The floating-point accumulator, same length as `src`.
    /// * `alpha` - Blend weight in (0, 1].
    fn accumulate_weighted(src: &[u8], acc: &mut [f32], alpha: f32);

    /// Computes a fast box blur using a stack algorithm.
    ///
    /// # Arguments
    /// * `src` - The source `FrameBuffer` containing pixels to blur.
    /// * `dst` - The destination buffer where the blurred image is placed.
    /// * `kernel_size` - Size of the internal blur stack window (< 16).
    fn stack_box_blur(src: &FrameBuffer, dst: &mut [u8], kernel_size: usize);

    /// Rasterizes a circle boundary (annulus of roughly one pixel
    /// thickness) onto `dst`, clipped to the buffer bounds. A radius of
    /// zero or less draws nothing.
    ///
    /// # Arguments
    /// * `dst` - Destination mask pixels, `width * height` long.
    /// * `width` - Mask width in pixels.
    /// * `height` - Mask height in pixels.
    /// * `center` - Circle center in pixel coordinates.
    /// * `radius` - Circle radius in pixels.
    fn fill_ring(dst: &mut [u8], width: u32, height: u32, center: Point2i, radius: i32);

    /// Per-pixel binary intersection: 255 where both inputs are non-zero.
    ///
    /// # Arguments
    /// * `a` - First binary mask.
    /// * `b` - Second binary mask, same length.
    /// * `dst` - Destination mask, same length.
    fn mask_and(a: &[u8], b: &[u8], dst: &mut [u8]);

    /// Counts non-zero pixels within a rectangular region. The region is
    /// clamped to the buffer bounds; a rectangle entirely outside the
    /// buffer counts nothing.
    ///
    /// # Arguments
    /// * `src` - The source `FrameBuffer`.
    /// * `rect` - The rectangular region to check.
    fn count_non_zero(src: &FrameBuffer, rect: &Rect) -> usize;
}

/// Axis-aligned rectangle with inclusive pixel extents
/// (`width = max_x - min_x + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The first row index below the rectangle (`y + height`).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

// Submodules for specific CV algorithms
pub mod contours;
pub mod geometry;
pub mod scalar;
