// src/cv/geometry.rs

use crate::Point2i;

/// A concavity between two consecutive convex hull vertices along the
/// contour: the geometric signature of a finger valley.
///
/// # Fields
/// * `start` - Hull vertex where the concavity begins, in contour order.
/// * `end` - Hull vertex where the concavity ends.
/// * `farthest` - The contour point deepest inside the concavity.
/// * `depth` - Perpendicular distance from `farthest` to the hull chord.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexityDefect {
    pub start: Point2i,
    pub end: Point2i,
    pub farthest: Point2i,
    pub depth: f32,
}

fn cross(o: Point2i, a: Point2i, b: Point2i) -> i64 {
    let oa_x = (a.x - o.x) as i64;
    let oa_y = (a.y - o.y) as i64;
    let ob_x = (b.x - o.x) as i64;
    let ob_y = (b.y - o.y) as i64;
    oa_x * ob_y - oa_y * ob_x
}

/// Convex hull of a point set via Andrew's monotone chain.
///
/// Duplicates are collapsed and collinear boundary points dropped. The
/// hull vertices come back in a fixed winding starting from the
/// lexicographically smallest point, so vertex order is deterministic for
/// a given input set. Fewer than 3 distinct input points yield the
/// distinct points themselves.
pub fn convex_hull(points: &[Point2i]) -> Vec<Point2i> {
    let mut sorted: Vec<Point2i> = points.to_vec();
    sorted.sort_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    sorted.dedup();

    let n = sorted.len();
    if n < 3 {
        return sorted;
    }

    let mut hull: Vec<Point2i> = Vec::with_capacity(n * 2);

    // Lower chain
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    hull.pop(); // last point repeats the first
    hull
}

/// Indices of the contour vertices that lie on the convex hull, sorted in
/// contour-traversal order. Each hull vertex maps to its first occurrence
/// in the contour.
pub fn hull_indices(contour: &[Point2i]) -> Vec<usize> {
    let hull = convex_hull(contour);
    let mut indices: Vec<usize> = hull
        .iter()
        .filter_map(|hp| contour.iter().position(|cp| cp == hp))
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
/// Falls back to point distance when the chord is degenerate.
fn distance_to_chord(p: Point2i, a: Point2i, b: Point2i) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    let chord_len = (dx * dx + dy * dy).sqrt();
    if chord_len == 0.0 {
        let px = (p.x - a.x) as f32;
        let py = (p.y - a.y) as f32;
        return (px * px + py * py).sqrt();
    }
    let num = ((p.y - a.y) as f32 * dx - (p.x - a.x) as f32 * dy).abs();
    num / chord_len
}

/// Convexity defects of a contour against its hull.
///
/// For every pair of consecutive hull vertices (in contour order), the
/// intermediate contour point farthest from the hull chord is reported
/// together with its depth. Sub-pixel deviations (depth <= 1) are raster
/// noise on straight runs and are skipped.
pub fn convexity_defects(contour: &[Point2i], hull_idx: &[usize]) -> Vec<ConvexityDefect> {
    let n = contour.len();
    if n < 4 || hull_idx.len() < 3 {
        return Vec::new();
    }

    let mut defects = Vec::new();

    for (k, &start_idx) in hull_idx.iter().enumerate() {
        let end_idx = hull_idx[(k + 1) % hull_idx.len()];
        let start = contour[start_idx];
        let end = contour[end_idx];

        // Walk the contour strictly between the two hull vertices, wrapping
        // at the end of the traversal.
        let mut deepest: Option<(Point2i, f32)> = None;
        let mut i = (start_idx + 1) % n;
        while i != end_idx {
            let d = distance_to_chord(contour[i], start, end);
            match deepest {
                Some((_, best)) if d <= best => {}
                _ => deepest = Some((contour[i], d)),
            }
            i = (i + 1) % n;
        }

        if let Some((farthest, depth)) = deepest {
            if depth > 1.0 {
                defects.push(ConvexityDefect {
                    start,
                    end,
                    farthest,
                    depth,
                });
            }
        }
    }

    defects
}

/// The four extreme points of a hull (or any point sequence).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremePoints {
    pub top: Point2i,
    pub bottom: Point2i,
    pub left: Point2i,
    pub right: Point2i,
}

/// Resolves the minimum-y, maximum-y, minimum-x and maximum-x vertices of
/// a hull. Ties break to the first occurrence in the hull's vertex order,
/// which [`convex_hull`] makes deterministic. Panics on an empty slice.
pub fn extreme_points(hull: &[Point2i]) -> ExtremePoints {
    let mut top = hull[0];
    let mut bottom = hull[0];
    let mut left = hull[0];
    let mut right = hull[0];

    for &p in &hull[1..] {
        if p.y < top.y {
            top = p;
        }
        if p.y > bottom.y {
            bottom = p;
        }
        if p.x < left.x {
            left = p;
        }
        if p.x > right.x {
            right = p;
        }
    }

    ExtremePoints {
        top,
        bottom,
        left,
        right,
    }
}

/// Euclidean distance between two pixel coordinates.
pub fn distance(a: Point2i, b: Point2i) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}
