// src/cv/scalar.rs
#![allow(clippy::needless_range_loop)]

use crate::cv::{PixelOps, Rect};
use crate::{FrameBuffer, Point2i};

/// Scalar (portable) implementation of the pixel operations.
pub struct ScalarCV;

impl PixelOps for ScalarCV {
    /// Absolute difference against a floating-point accumulator.
    /// The accumulator is truncated to u8 first so the difference is taken
    /// at the frame's own precision.
    fn absdiff(src: &[u8], reference: &[f32], dst: &mut [u8]) {
        let len = src.len();
        for i in 0..len {
            let bg = reference[i] as u8;
            dst[i] = src[i].abs_diff(bg);
        }
    }

    /// Applies a simple threshold to a grayscale image.
    fn threshold(src: &[u8], dst: &mut [u8], threshold: u8) {
        let len = src.len();
        let mut tab = [0u8; 256];

        // Build lookup table
        for i in 0..256 {
            tab[i] = if (i as u8) <= threshold { 0 } else { 255 };
        }

        // Apply threshold using lookup
        for i in 0..len {
            dst[i] = tab[src[i] as usize];
        }
    }

    /// Running weighted average update. On the first observation the caller
    /// seeds the accumulator directly; this op only blends.
    fn accumulate_weighted(src: &[u8], acc: &mut [f32], alpha: f32) {
        let len = src.len();
        let keep = 1.0 - alpha;
        for i in 0..len {
            acc[i] = acc[i] * keep + (src[i] as f32) * alpha;
        }
    }

    /// Computes a fast box blur using a stack algorithm.
    fn stack_box_blur(src: &FrameBuffer, dst: &mut [u8], kernel_size: usize) {
        assert!(kernel_size < 16, "kernel_size must be < 16");

        const STACK_BOX_BLUR_MULT: [u32; 16] = [
            1, 171, 205, 293, 57, 373, 79, 137, 241, 27, 391, 357, 41, 19, 283, 265,
        ];
        const STACK_BOX_BLUR_SHIFT: [u32; 16] =
            [0, 9, 10, 11, 9, 12, 10, 11, 12, 9, 13, 13, 10, 9, 13, 13];

        let src_data = src.data;
        let height = src.height as usize;
        let width = src.width as usize;
        let height_minus_1 = height.saturating_sub(1);
        let width_minus_1 = width.saturating_sub(1);
        let size = kernel_size * 2 + 1;
        let radius = kernel_size + 1;
        let mult = STACK_BOX_BLUR_MULT[kernel_size];
        let shift = STACK_BOX_BLUR_SHIFT[kernel_size];

        let mut stack = [0u8; 31]; // Max size is 15 * 2 + 1 = 31

        // Horizontal pass
        let mut pos = 0;
        for _y in 0..height {
            let start = pos;

            let color = src_data[pos] as u32;
            let mut sum = (radius as u32) * color;

            let mut sp = 0;
            for _ in 0..radius {
                stack[sp] = color as u8;
                sp = (sp + 1) % size;
            }
            for i in 1..radius {
                let c = src_data[pos + i];
                stack[sp] = c;
                sum += c as u32;
                sp = (sp + 1) % size;
            }

            let mut stack_start = 0;
            for x in 0..width {
                dst[pos] = ((sum * mult) >> shift) as u8;
                pos += 1;

                let mut p = x + radius;
                p = start + if p < width_minus_1 { p } else { width_minus_1 };

                sum -= stack[stack_start] as u32;
                let c = src_data[p];
                sum += c as u32;

                stack[stack_start] = c;
                stack_start = (stack_start + 1) % size;
            }
        }

        // Vertical pass
        for x in 0..width {
            let mut pos = x;
            let mut start = pos + width;

            let color = dst[pos] as u32;
            let mut sum = (radius as u32) * color;

            let mut sp = 0;
            for _ in 0..radius {
                stack[sp] = color as u8;
                sp = (sp + 1) % size;
            }
            for _ in 1..radius {
                let c = dst[start];
                stack[sp] = c;
                sum += c as u32;
                sp = (sp + 1) % size;
                start += width;
            }

            let mut stack_start = 0;
            for y in 0..height {
                dst[pos] = ((sum * mult) >> shift) as u8;

                let mut p = y + radius;
                p = x
                    + (if p < height_minus_1 {
                        p
                    } else {
                        height_minus_1
                    }) * width;

                sum -= stack[stack_start] as u32;
                let c = dst[p];
                sum += c as u32;

                stack[stack_start] = c;
                stack_start = (stack_start + 1) % size;

                pos += width;
            }
        }
    }

    /// Rasterizes the circle boundary as the annulus `|d - radius| <= 1`,
    /// which stays 4-connected for any radius >= 2.
    fn fill_ring(dst: &mut [u8], width: u32, height: u32, center: Point2i, radius: i32) {
        if radius <= 0 {
            return;
        }

        let w = width as i32;
        let h = height as i32;
        let inner_sq = (radius - 1) * (radius - 1);
        let outer_sq = (radius + 1) * (radius + 1);

        let y0 = (center.y - radius - 1).max(0);
        let y1 = (center.y + radius + 1).min(h - 1);
        let x0 = (center.x - radius - 1).max(0);
        let x1 = (center.x + radius + 1).min(w - 1);

        for y in y0..=y1 {
            let dy = y - center.y;
            let row = (y * w) as usize;
            for x in x0..=x1 {
                let dx = x - center.x;
                let d_sq = dx * dx + dy * dy;
                if d_sq >= inner_sq && d_sq <= outer_sq {
                    dst[row + x as usize] = 255;
                }
            }
        }
    }

    /// Per-pixel binary intersection.
    fn mask_and(a: &[u8], b: &[u8], dst: &mut [u8]) {
        let len = a.len();
        for i in 0..len {
            dst[i] = if a[i] != 0 && b[i] != 0 { 255 } else { 0 };
        }
    }

    /// Counts non-zero pixels within a rectangular region, clamped to the
    /// buffer bounds.
    fn count_non_zero(src: &FrameBuffer, rect: &Rect) -> usize {
        let src_data = src.data;
        let width = src.width as i32;
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.width).min(width);
        let y1 = (rect.y + rect.height).min(src.height as i32);
        let mut nz = 0;

        for y in y0..y1 {
            let row = (y * width) as usize;
            for x in x0..x1 {
                if src_data[row + x as usize] != 0 {
                    nz += 1;
                }
            }
        }

        nz
    }
}
