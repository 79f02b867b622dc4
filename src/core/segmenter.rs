// src/core/segmenter.rs

use std::marker::PhantomData;

use crate::core::background::BackgroundModel;
use crate::cv::contours::{contour_area, find_contours, Contour};
use crate::cv::PixelOps;
use crate::{BinaryMask, FrameBuffer};

/// The foreground mask and hand contour extracted from one frame. All
/// derived entities of a frame are consistent with this single contour
/// and are discarded after the frame is processed.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub mask: BinaryMask,
    pub contour: Contour,
}

/// Segments the hand region out of a frame by differencing against the
/// background model.
///
/// Pipeline: absolute difference -> fixed threshold (255 iff diff exceeds
/// it) -> Suzuki contour extraction -> largest outer contour by enclosed
/// area, ties broken by scan order. An empty contour list is the
/// legitimate "no foreground detected" signal and comes back as `None`,
/// never as an error.
pub struct HandSegmenter<CV: PixelOps> {
    pub diff_threshold: u8,
    _cv: PhantomData<CV>,
}

impl<CV: PixelOps> HandSegmenter<CV> {
    pub fn new(diff_threshold: u8) -> Self {
        HandSegmenter {
            diff_threshold,
            _cv: PhantomData,
        }
    }

    /// Extracts the hand candidate from `frame`. The background model must
    /// already be seeded; frame and model dimensions must match.
    pub fn segment(
        &self,
        frame: &FrameBuffer,
        background: &BackgroundModel,
    ) -> Option<Segmentation> {
        assert!(
            background.is_initialized(),
            "background model must be seeded before segmentation"
        );
        assert_eq!(
            (frame.width, frame.height),
            (background.width(), background.height()),
            "frame dimensions must match the background model"
        );

        let width = frame.width;
        let height = frame.height;
        let len = (width * height) as usize;

        // 1. Difference against the background estimate
        let mut diff = vec![0u8; len];
        CV::absdiff(frame.data, background.accumulator(), &mut diff);

        // 2. Binarize
        let mut mask_data = vec![0u8; len];
        CV::threshold(&diff, &mut mask_data, self.diff_threshold);

        // 3. Trace external contours
        let mask_buf = FrameBuffer {
            data: &mask_data,
            width,
            height,
        };
        let mut scratch = vec![0i32; ((width + 2) * (height + 2)) as usize];
        let contours = find_contours(&mask_buf, &mut scratch);

        // 4. Largest outer contour wins; strict comparison keeps the first
        //    one found on ties.
        let mut best: Option<(Contour, f64)> = None;
        for contour in contours {
            if contour.hole {
                continue;
            }
            let area = contour_area(&contour.points);
            match &best {
                Some((_, best_area)) if area <= *best_area => {}
                _ => best = Some((contour, area)),
            }
        }

        let (contour, _) = best?;
        Some(Segmentation {
            mask: BinaryMask {
                data: mask_data,
                width,
                height,
            },
            contour,
        })
    }
}
