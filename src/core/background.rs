// src/core/background.rs

use crate::cv::PixelOps;
use crate::FrameBuffer;

/// Running weighted average of the static scene, used to detect the hand
/// by difference.
///
/// The accumulator is owned, explicitly passed state: created empty,
/// seeded from the first observed frame, blended on every observation
/// thereafter, and cleared only by an explicit [`reset`](Self::reset).
/// Enforcing the warm-up window is the caller's job, not this type's.
pub struct BackgroundModel {
    acc: Vec<f32>,
    width: u32,
    height: u32,
    initialized: bool,
}

impl BackgroundModel {
    pub fn new(width: u32, height: u32) -> Self {
        BackgroundModel {
            acc: vec![0.0; (width * height) as usize],
            width,
            height,
            initialized: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the model has been seeded with at least one frame.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Folds a frame into the running average. The first observation seeds
    /// the accumulator directly, with no blending; every later observation
    /// updates each pixel as `acc = acc*(1-rate) + frame*rate`.
    ///
    /// Panics if the frame's dimensions differ from the model's.
    pub fn observe<CV: PixelOps>(&mut self, frame: &FrameBuffer, learning_rate: f32) {
        assert_eq!(
            (frame.width, frame.height),
            (self.width, self.height),
            "frame dimensions must match the background model"
        );

        if !self.initialized {
            for (a, &p) in self.acc.iter_mut().zip(frame.data) {
                *a = p as f32;
            }
            self.initialized = true;
            return;
        }

        CV::accumulate_weighted(frame.data, &mut self.acc, learning_rate);
    }

    /// The raw floating-point accumulator, for differencing against a frame.
    pub fn accumulator(&self) -> &[f32] {
        &self.acc
    }

    /// Clears the model back to its uninitialized state. The surrounding
    /// state machine only returns to warm-up through this.
    pub fn reset(&mut self) {
        self.acc.fill(0.0);
        self.initialized = false;
    }
}
