// src/cv/contours.rs

use crate::cv::Rect;
use crate::{FrameBuffer, Point2i};

/// Fills the destination array with a 1-pixel padded zero-border around the
/// source mask, and compresses source pixels (0 -> 0, anything else -> 1).
/// The padding lets the border tracer probe neighbors without bounds checks.
///
/// # Arguments
/// * `src` - The source binary mask.
/// * `dst` - The destination scratch slice, which MUST be dynamically
///   allocated to accommodate the `(width + 2) * (height + 2)` padded size.
///
/// # Returns
/// A reference to the modified destination slice.
pub fn binary_border<'a>(src: &FrameBuffer, dst: &'a mut [i32]) -> &'a [i32] {
    let src_data = src.data;
    let height = src.height as usize;
    let width = src.width as usize;
    let mut pos_src = 0;
    let mut pos_dst = 0;

    // Top border padding (-2 to width)
    for _ in -2..(width as isize) {
        dst[pos_dst] = 0;
        pos_dst += 1;
    }

    for _ in 0..height {
        // Left border
        dst[pos_dst] = 0;
        pos_dst += 1;

        // Copy row with 0/1 compression
        for _ in 0..width {
            dst[pos_dst] = if src_data[pos_src] == 0 { 0 } else { 1 };
            pos_dst += 1;
            pos_src += 1;
        }

        // Right border
        dst[pos_dst] = 0;
        pos_dst += 1;
    }

    // Bottom border padding
    for _ in -2..(width as isize) {
        dst[pos_dst] = 0;
        pos_dst += 1;
    }

    dst
}

/// Constant offsets for 8-directional sweeping (x, y).
pub const NEIGHBORHOOD: [[i32; 2]; 8] = [
    [1, 0],
    [1, -1],
    [0, -1],
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// Calculates flattened sequence offsets for 8-directional sweeps given a
/// known padded row width. Returns an array of exactly 16 offsets (the 8
/// offsets duplicated twice sequentially) so sweeps can wrap without a
/// modulo on every probe.
pub fn neighborhood_deltas(width: i32) -> [i32; 16] {
    let mut deltas = [0i32; 16];
    for i in 0..8 {
        let delta = NEIGHBORHOOD[i][0] + NEIGHBORHOOD[i][1] * width;
        deltas[i] = delta;
        deltas[i + 8] = delta;
    }
    deltas
}

/// A single extracted boundary contour: an ordered, closed sequence of
/// pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Coordinates of each vertex in the contour, in traversal order.
    pub points: Vec<Point2i>,
    /// Whether this contour bounds a hole inside another contour.
    pub hole: bool,
}

/// Suzuki contour tracing (single border trace, 8-connected).
///
/// # Arguments
/// * `src` - Flat array representing the padded binary mask. Overwritten
///   with border labels during execution.
/// * `pos` - Current index position in the flat array.
/// * `nbd` - The "contour number" tracking sequence label.
/// * `point` - The base (x, y) coordinates of the starting `pos`.
/// * `hole` - True if tracing the border of a hole.
/// * `deltas` - Generated offsets to locate 8-connected neighbors radially.
///
/// # Returns
/// A single `Contour` encapsulating the points forming the traced border.
pub fn border_following(
    src: &mut [i32],
    pos: usize,
    nbd: i32,
    mut point: Point2i,
    hole: bool,
    deltas: &[i32; 16],
) -> Contour {
    let mut contour = Contour {
        points: Vec::new(),
        hole,
    };

    let mut s: usize = if hole { 0 } else { 4 };
    let mut s_end = s;
    let mut pos1;
    let mut pos3;
    let mut pos4;

    loop {
        s = s.wrapping_sub(1) & 7;
        pos1 = (pos as isize + deltas[s] as isize) as usize;
        if src[pos1] != 0 {
            break;
        }
        if s == s_end {
            break;
        }
    }

    if s == s_end {
        // Isolated single pixel: a valid one-point contour.
        src[pos] = -nbd;
        contour.points.push(Point2i::new(point.x, point.y));
    } else {
        pos3 = pos;

        loop {
            s_end = s;

            loop {
                s = (s + 1) & 15;
                pos4 = (pos3 as isize + deltas[s] as isize) as usize;
                if src[pos4] != 0 {
                    break;
                }
            }

            s &= 7;

            // Outer vs inner border transition check via wrapped unsigned
            // comparison.
            let s_minus_1 = s.wrapping_sub(1) as u32;
            let s_end_u32 = s_end as u32;
            if s_minus_1 < s_end_u32 {
                src[pos3] = -nbd;
            } else if src[pos3] == 1 {
                src[pos3] = nbd;
            }

            contour.points.push(Point2i::new(point.x, point.y));

            point.x += NEIGHBORHOOD[s][0];
            point.y += NEIGHBORHOOD[s][1];

            if pos4 == pos && pos3 == pos1 {
                break;
            }

            pos3 = pos4;
            s = (s + 4) & 7;
        }
    }

    contour
}

/// Applies Suzuki's find-contours algorithm to a binary mask.
///
/// The scan is strictly row-major from the top-left pixel, so the order of
/// the returned contours (and therefore every "first found" tie-break
/// downstream) is deterministic.
///
/// # Arguments
/// * `src_img` - The binary mask to trace.
/// * `binary` - A dynamically allocated scratch array of `i32`, sized
///   `(width + 2) * (height + 2)`.
///
/// # Returns
/// All boundary chains of the mask, outer borders and holes both, with
/// coordinates in the unpadded mask frame.
pub fn find_contours(src_img: &FrameBuffer, binary: &mut [i32]) -> Vec<Contour> {
    let width = src_img.width as usize;
    let height = src_img.height as usize;
    let mut contours = Vec::new();

    // Fill buffer with 0/1 compression surrounded by an empty border 0
    binary_border(src_img, binary);

    // Flat distance offsets to fetch neighborhood jumps
    let deltas = neighborhood_deltas((width + 2) as i32);

    let mut pos = width + 3; // Skips initial padding corner pixel
    let mut nbd = 1;

    for i in 0..height {
        for j in 0..width {
            let pix = binary[pos];

            if pix != 0 {
                let mut outer = false;
                let mut hole = false;

                if pix == 1 && binary[pos - 1] == 0 {
                    outer = true;
                } else if pix >= 1 && binary[pos + 1] == 0 {
                    hole = true;
                }

                if outer || hole {
                    nbd += 1;
                    let point = Point2i::new(j as i32, i as i32);
                    let contour = border_following(binary, pos, nbd, point, hole, &deltas);
                    contours.push(contour);
                }
            }

            pos += 1; // Slide to next inner pixel
        }
        pos += 2; // Jump across right border, newline, left border
    }

    contours
}

/// Enclosed polygon area of a contour via the shoelace formula, absolute
/// value. Degenerate contours (fewer than 3 points) have zero area.
pub fn contour_area(points: &[Point2i]) -> f64 {
    let len = points.len();
    if len < 3 {
        return 0.0;
    }

    let mut acc: i64 = 0;
    let mut j = len - 1;
    for i in 0..len {
        let pj = points[j];
        let pi = points[i];
        acc += (pj.x as i64) * (pi.y as i64) - (pi.x as i64) * (pj.y as i64);
        j = i;
    }
    (acc.abs() as f64) / 2.0
}

/// Axis-aligned bounding box of a contour, with inclusive pixel extents.
/// Panics on an empty contour.
pub fn bounding_box(points: &[Point2i]) -> Rect {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    }
}
