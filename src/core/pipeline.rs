// src/core/pipeline.rs

use log::{debug, trace};

use crate::core::background::BackgroundModel;
use crate::core::counter::FingerCounter;
use crate::core::segmenter::HandSegmenter;
use crate::cv::{PixelOps, Rect};
use crate::{ConfigError, FrameBuffer, FrameResult, Result};

/// Tunable parameters for the full pipeline. Validated once, at
/// [`HandPipeline::new`]; out-of-range values never surface mid-stream.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub width: u32,
    pub height: u32,
    /// How fast the background model adapts, in (0, 1].
    pub learning_rate: f32,
    /// Absolute-difference cutoff for foreground, 0-255.
    pub diff_threshold: u8,
    /// Number of frames spent training the background model before
    /// segmentation begins. At least 1.
    pub warmup_frames: u32,
    /// Hand radius as a fraction of the farthest hull extreme, (0, 1].
    pub radius_fraction: f32,
    /// Vertical wrist-exclusion margin below the palm center, >= 0.
    pub wrist_exclusion_fraction: f32,
    /// Palm-band rejection cutoff as a fraction of the ROI circle's
    /// circumference, (0, 1].
    pub circumference_fraction: f32,
    /// Box-blur kernel applied to each frame before modeling and
    /// segmentation (< 16). `None` for callers feeding pre-smoothed frames.
    pub smoothing_kernel: Option<usize>,
}

impl PipelineConfig {
    pub fn new(width: u32, height: u32) -> Self {
        PipelineConfig {
            width,
            height,
            learning_rate: 0.5,
            diff_threshold: 25,
            warmup_frames: 30,
            radius_fraction: 0.8,
            wrist_exclusion_fraction: 0.25,
            circumference_fraction: 0.25,
            smoothing_kernel: None,
        }
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimensions);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::LearningRateOutOfRange(self.learning_rate));
        }
        if self.warmup_frames == 0 {
            return Err(ConfigError::WarmupFramesZero);
        }
        for (name, value) in [
            ("radius_fraction", self.radius_fraction),
            ("circumference_fraction", self.circumference_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::FractionOutOfRange { name, value });
            }
        }
        if !(self.wrist_exclusion_fraction >= 0.0 && self.wrist_exclusion_fraction.is_finite()) {
            return Err(ConfigError::WristExclusionOutOfRange(
                self.wrist_exclusion_fraction,
            ));
        }
        if let Some(kernel) = self.smoothing_kernel {
            if kernel >= 16 {
                return Err(ConfigError::SmoothingKernelTooLarge(kernel));
            }
        }
        Ok(())
    }
}

/// Frame-level state of the pipeline. The state never reverts to
/// `Warmup` without an explicit [`HandPipeline::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Training the background model; no segmentation runs.
    Warmup,
    /// Segmenting and counting every frame.
    Ready,
}

/// The full per-frame pipeline: background training during warm-up, then
/// segmentation and finger counting.
///
/// Owns the background model and processes one frame at a time; every
/// derived entity (mask, contour, hull, ROI) belongs to exactly one frame
/// and is handed back or dropped before the next one. The surrounding
/// capture loop drives it; the pipeline opens no camera and draws nothing.
pub struct HandPipeline<CV: PixelOps> {
    config: PipelineConfig,
    background: BackgroundModel,
    segmenter: HandSegmenter<CV>,
    counter: FingerCounter<CV>,
    frames_seen: u32,
    smooth_scratch: Vec<u8>,
}

impl<CV: PixelOps> HandPipeline<CV> {
    /// Builds a pipeline after validating `config`. Configuration errors
    /// are the only hard failures this type produces.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let segmenter = HandSegmenter::new(config.diff_threshold);
        let counter = FingerCounter::new(
            config.radius_fraction,
            config.wrist_exclusion_fraction,
            config.circumference_fraction,
        );
        let scratch_len = if config.smoothing_kernel.is_some() {
            (config.width * config.height) as usize
        } else {
            0
        };

        Ok(HandPipeline {
            background: BackgroundModel::new(config.width, config.height),
            segmenter,
            counter,
            frames_seen: 0,
            smooth_scratch: vec![0u8; scratch_len],
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        if self.frames_seen < self.config.warmup_frames {
            PipelineState::Warmup
        } else {
            PipelineState::Ready
        }
    }

    /// Read access to the background model, e.g. for debug overlays.
    pub fn background(&self) -> &BackgroundModel {
        &self.background
    }

    /// Processes one frame.
    ///
    /// During warm-up the frame only trains the background model and the
    /// result is `None`. Once ready, `None` means no foreground was
    /// detected in this frame; the caller simply skips counting for it.
    ///
    /// Panics if the frame's dimensions differ from the configured ones.
    pub fn process(&mut self, frame: &FrameBuffer) -> Option<FrameResult> {
        assert_eq!(
            (frame.width, frame.height),
            (self.config.width, self.config.height),
            "frame dimensions must match the pipeline configuration"
        );

        let smoothed;
        let frame = if let Some(kernel) = self.config.smoothing_kernel {
            CV::stack_box_blur(frame, &mut self.smooth_scratch, kernel);
            smoothed = FrameBuffer {
                data: &self.smooth_scratch,
                width: frame.width,
                height: frame.height,
            };
            &smoothed
        } else {
            frame
        };

        if self.state() == PipelineState::Warmup {
            self.background
                .observe::<CV>(frame, self.config.learning_rate);
            self.frames_seen += 1;
            if self.state() == PipelineState::Ready {
                debug!(
                    "background model trained over {} frames, pipeline ready",
                    self.config.warmup_frames
                );
            }
            return None;
        }
        self.frames_seen += 1;

        let segmentation = match self.segmenter.segment(frame, &self.background) {
            Some(s) => s,
            None => {
                trace!("frame {}: no foreground detected", self.frames_seen);
                return None;
            }
        };

        let full = Rect {
            x: 0,
            y: 0,
            width: frame.width as i32,
            height: frame.height as i32,
        };
        trace!(
            "frame {}: foreground coverage {} px, contour of {} points",
            self.frames_seen,
            CV::count_non_zero(&segmentation.mask.view(), &full),
            segmentation.contour.points.len()
        );

        let finger_count = self.counter.count(&segmentation.mask, &segmentation.contour);
        let defects = FingerCounter::<CV>::defects(&segmentation.contour);
        debug!("frame {}: {} fingers", self.frames_seen, finger_count);

        Some(FrameResult {
            mask: segmentation.mask,
            contour: segmentation.contour,
            finger_count,
            defects,
        })
    }

    /// Drops all learned state and returns to warm-up. The only way the
    /// state machine goes back.
    pub fn reset(&mut self) {
        self.background.reset();
        self.frames_seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::scalar::ScalarCV;

    fn uniform_frame(value: u8, len: usize) -> Vec<u8> {
        vec![value; len]
    }

    #[test]
    fn test_config_defaults_are_valid() {
        assert!(PipelineConfig::new(320, 240).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_out_of_range_parameters() {
        let mut config = PipelineConfig::new(320, 240);
        config.learning_rate = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LearningRateOutOfRange(0.0))
        );

        let mut config = PipelineConfig::new(320, 240);
        config.learning_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LearningRateOutOfRange(_))
        ));

        let mut config = PipelineConfig::new(320, 240);
        config.warmup_frames = 0;
        assert_eq!(config.validate(), Err(ConfigError::WarmupFramesZero));

        let mut config = PipelineConfig::new(320, 240);
        config.radius_fraction = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FractionOutOfRange {
                name: "radius_fraction",
                ..
            })
        ));

        let mut config = PipelineConfig::new(320, 240);
        config.circumference_fraction = 1.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FractionOutOfRange {
                name: "circumference_fraction",
                ..
            })
        ));

        let mut config = PipelineConfig::new(320, 240);
        config.wrist_exclusion_fraction = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WristExclusionOutOfRange(_))
        ));

        let mut config = PipelineConfig::new(320, 240);
        config.smoothing_kernel = Some(16);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SmoothingKernelTooLarge(16))
        );

        let config = PipelineConfig::new(0, 240);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDimensions));
    }

    #[test]
    fn test_construction_fails_once_on_bad_config() {
        let mut config = PipelineConfig::new(64, 64);
        config.learning_rate = -1.0;
        assert!(HandPipeline::<ScalarCV>::new(config).is_err());
    }

    #[test]
    fn test_warmup_produces_no_results_then_transitions() {
        let mut config = PipelineConfig::new(16, 16);
        config.warmup_frames = 5;
        let mut pipeline = HandPipeline::<ScalarCV>::new(config).unwrap();

        let data = uniform_frame(40, 256);
        for i in 0..5 {
            assert_eq!(pipeline.state(), PipelineState::Warmup, "frame {i}");
            let result = pipeline.process(&FrameBuffer::new(&data, 16, 16));
            assert!(result.is_none(), "no counting during warm-up");
        }

        assert_eq!(pipeline.state(), PipelineState::Ready);
        assert!(pipeline.background().is_initialized());
    }

    #[test]
    fn test_ready_uniform_frames_report_no_foreground() {
        let mut config = PipelineConfig::new(16, 16);
        config.warmup_frames = 3;
        let mut pipeline = HandPipeline::<ScalarCV>::new(config).unwrap();

        let data = uniform_frame(40, 256);
        for _ in 0..3 {
            pipeline.process(&FrameBuffer::new(&data, 16, 16));
        }

        // Steady state with an unchanged scene: segmentation finds nothing
        assert!(pipeline.process(&FrameBuffer::new(&data, 16, 16)).is_none());
        assert_eq!(pipeline.state(), PipelineState::Ready);
    }

    #[test]
    fn test_ready_frame_with_blob_yields_result() {
        let mut config = PipelineConfig::new(32, 32);
        config.warmup_frames = 3;
        let mut pipeline = HandPipeline::<ScalarCV>::new(config).unwrap();

        let bg = uniform_frame(40, 1024);
        for _ in 0..3 {
            pipeline.process(&FrameBuffer::new(&bg, 32, 32));
        }

        let mut data = bg.clone();
        for y in 10..20 {
            for x in 8..24 {
                data[y * 32 + x] = 250;
            }
        }
        let result = pipeline
            .process(&FrameBuffer::new(&data, 32, 32))
            .expect("blob must be segmented");

        assert_eq!(result.mask.data[12 * 32 + 10], 255);
        assert_eq!(result.mask.data[0], 0);
        assert!(!result.contour.points.is_empty());
    }

    #[test]
    fn test_reset_returns_to_warmup() {
        let mut config = PipelineConfig::new(16, 16);
        config.warmup_frames = 2;
        let mut pipeline = HandPipeline::<ScalarCV>::new(config).unwrap();

        let data = uniform_frame(40, 256);
        for _ in 0..3 {
            pipeline.process(&FrameBuffer::new(&data, 16, 16));
        }
        assert_eq!(pipeline.state(), PipelineState::Ready);

        pipeline.reset();

        assert_eq!(pipeline.state(), PipelineState::Warmup);
        assert!(!pipeline.background().is_initialized());
    }

    #[test]
    fn test_smoothing_suppresses_isolated_noise() {
        let mut config = PipelineConfig::new(16, 16);
        config.warmup_frames = 2;
        config.smoothing_kernel = Some(2);
        let mut smoothing = HandPipeline::<ScalarCV>::new(config.clone()).unwrap();
        config.smoothing_kernel = None;
        let mut raw = HandPipeline::<ScalarCV>::new(config).unwrap();

        let bg = uniform_frame(40, 256);
        for _ in 0..2 {
            smoothing.process(&FrameBuffer::new(&bg, 16, 16));
            raw.process(&FrameBuffer::new(&bg, 16, 16));
        }

        // Two isolated hot pixels, far apart and away from the borders
        let mut noisy = bg.clone();
        noisy[4 * 16 + 4] = 255;
        noisy[11 * 16 + 12] = 255;

        // The box blur dilutes single-pixel spikes below the threshold;
        // without it they segment as foreground.
        assert!(smoothing.process(&FrameBuffer::new(&noisy, 16, 16)).is_none());
        assert!(raw.process(&FrameBuffer::new(&noisy, 16, 16)).is_some());
    }
}
