// Copyright (c) 2026 handcv contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
use nalgebra::Vector2;
use thiserror::Error;

/// 2D point with floating point precision.
pub type Point2f = Vector2<f32>;

/// 2D point in pixel coordinates.
pub type Point2i = Vector2<i32>;

/// Zero-copy view over a single-channel intensity frame.
///
/// # Fields
/// * `data` - A slice representing a 1D contiguous array of 8-bit pixels.
/// * `width` - The logical width of the frame in pixels.
/// * `height` - The logical height of the frame in pixels.
pub struct FrameBuffer<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Wraps a pixel slice. Panics if the slice length does not match the
    /// given dimensions; a mismatched frame is a caller bug, not a
    /// recoverable condition.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "frame buffer length must equal width * height"
        );
        FrameBuffer {
            data,
            width,
            height,
        }
    }
}

/// Owned binary mask: every pixel is either 0 or 255, same dimensions as
/// the frame it was derived from. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl BinaryMask {
    /// Borrows the mask as a [`FrameBuffer`] for pixel-level operations.
    pub fn view(&self) -> FrameBuffer<'_> {
        FrameBuffer {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }
}

/// Per-frame output of the full pipeline.
///
/// # Fields
/// * `mask` - The thresholded foreground silhouette.
/// * `contour` - The hand contour selected from the mask (largest by area).
/// * `finger_count` - Number of extended fingers detected.
/// * `defects` - Convexity defects of the hull against the contour, a
///   rendering aid for finger-valley markers. Never feeds the count.
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub mask: BinaryMask,
    pub contour: cv::contours::Contour,
    pub finger_count: u32,
    pub defects: Vec<cv::geometry::ConvexityDefect>,
}

/// Configuration errors, rejected once at pipeline construction.
/// Geometric degeneracies mid-stream never surface as errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("learning rate must be in (0, 1], got {0}")]
    LearningRateOutOfRange(f32),
    #[error("warm-up frame count must be at least 1")]
    WarmupFramesZero,
    #[error("{name} must be in (0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },
    #[error("wrist exclusion fraction must be finite and non-negative, got {0}")]
    WristExclusionOutOfRange(f32),
    #[error("smoothing kernel must be < 16, got {0}")]
    SmoothingKernelTooLarge(usize),
    #[error("frame dimensions must be non-zero")]
    ZeroDimensions,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub mod core;
pub mod cv;
