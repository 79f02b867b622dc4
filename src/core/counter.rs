// src/core/counter.rs

use std::f32::consts::PI;
use std::marker::PhantomData;

use crate::cv::contours::{bounding_box, find_contours, Contour};
use crate::cv::geometry::{
    convex_hull, convexity_defects, distance, extreme_points, hull_indices, ConvexityDefect,
};
use crate::cv::{PixelOps, Rect};
use crate::{BinaryMask, FrameBuffer, Point2i};

/// Counts extended fingers from a segmented hand contour.
///
/// The palm center is taken as the midpoint of the hull's horizontal and
/// vertical extremes, the hand radius as a fraction of the farthest
/// extreme. The circle of that radius is rasterized and intersected with
/// the hand silhouette; every crossing of the circle shows up as a small
/// arc, and arcs that sit above the wrist line and are short relative to
/// the circumference are counted as fingers. The wrist produces a low,
/// wide band and the palm edge a near-circular one; both fail the tests.
///
/// Counting is pure: no state is carried between calls.
pub struct FingerCounter<CV: PixelOps> {
    /// Fraction of the farthest extreme-point distance used as the hand
    /// radius (0, 1].
    pub radius_fraction: f32,
    /// Arcs whose bounding box reaches below
    /// `centerY + wrist_exclusion_fraction * centerY` are discarded as wrist.
    pub wrist_exclusion_fraction: f32,
    /// Arcs with at least this fraction of the circle's circumference in
    /// contour points are discarded as palm band (0, 1].
    pub circumference_fraction: f32,
    _cv: PhantomData<CV>,
}

impl<CV: PixelOps> FingerCounter<CV> {
    pub fn new(
        radius_fraction: f32,
        wrist_exclusion_fraction: f32,
        circumference_fraction: f32,
    ) -> Self {
        FingerCounter {
            radius_fraction,
            wrist_exclusion_fraction,
            circumference_fraction,
            _cv: PhantomData,
        }
    }

    /// Counts extended fingers in the segmented hand.
    ///
    /// Degenerate geometry resolves to zero, never to an error: a contour
    /// with fewer than 3 points has no hull, and a hand radius that
    /// truncates to zero leaves an empty region of interest.
    pub fn count(&self, mask: &BinaryMask, contour: &Contour) -> u32 {
        if contour.points.len() < 3 {
            return 0;
        }

        let hull = convex_hull(&contour.points);
        if hull.len() < 3 {
            return 0;
        }

        let ex = extreme_points(&hull);
        let center = Point2i::new(
            (ex.left.x + ex.right.x) / 2,
            (ex.top.y + ex.bottom.y) / 2,
        );

        let max_extent = distance(center, ex.top)
            .max(distance(center, ex.bottom))
            .max(distance(center, ex.left))
            .max(distance(center, ex.right));
        let radius = (self.radius_fraction * max_extent) as i32;
        if radius <= 0 {
            return 0;
        }

        let width = mask.width;
        let height = mask.height;
        let len = (width * height) as usize;

        // Circle boundary intersected with the hand silhouette: one arc
        // per crossing.
        let mut ring = vec![0u8; len];
        CV::fill_ring(&mut ring, width, height, center, radius);
        let mut roi = vec![0u8; len];
        CV::mask_and(&ring, &mask.data, &mut roi);

        let roi_buf = FrameBuffer {
            data: &roi,
            width,
            height,
        };
        let full = Rect {
            x: 0,
            y: 0,
            width: width as i32,
            height: height as i32,
        };
        if CV::count_non_zero(&roi_buf, &full) == 0 {
            return 0;
        }

        let mut scratch = vec![0i32; ((width + 2) * (height + 2)) as usize];
        let arcs = find_contours(&roi_buf, &mut scratch);

        let circumference = 2.0 * PI * radius as f32;
        let wrist_line = center.y as f32 + self.wrist_exclusion_fraction * center.y as f32;
        let max_arc_points = self.circumference_fraction * circumference;

        let mut fingers = 0;
        for arc in &arcs {
            if arc.hole {
                continue;
            }
            let bbox = bounding_box(&arc.points);
            let above_wrist = (bbox.bottom() as f32) < wrist_line;
            let short_arc = (arc.points.len() as f32) < max_arc_points;
            if above_wrist && short_arc {
                fingers += 1;
            }
        }

        fingers
    }

    /// Convexity defects of the hand contour against its hull, one
    /// candidate finger-valley marker each. Rendering aid only; the count
    /// never consults them.
    pub fn defects(contour: &Contour) -> Vec<ConvexityDefect> {
        if contour.points.len() < 3 {
            return Vec::new();
        }
        let idx = hull_indices(&contour.points);
        convexity_defects(&contour.points, &idx)
    }
}
