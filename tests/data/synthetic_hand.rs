// tests/data/synthetic_hand.rs
//
// Shared synthetic silhouette fixtures, pulled in via include!. The
// including scope must provide `BinaryMask`, `FrameBuffer`, `Contour` and
// `find_contours`.

/// Scratch canvas for rasterizing binary silhouettes.
#[allow(dead_code)]
pub struct Raster {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[allow(dead_code)]
impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Raster {
            data: vec![0u8; (width * height) as usize],
            width,
            height,
        }
    }

    /// Fills a disk of radius `r` centered at (`cx`, `cy`), clipped to
    /// the canvas.
    pub fn fill_disk(&mut self, cx: i32, cy: i32, r: i32) {
        let w = self.width as i32;
        let h = self.height as i32;
        for y in (cy - r).max(0)..=(cy + r).min(h - 1) {
            let dy = y - cy;
            for x in (cx - r).max(0)..=(cx + r).min(w - 1) {
                let dx = x - cx;
                if dx * dx + dy * dy <= r * r {
                    self.data[(y * w + x) as usize] = 255;
                }
            }
        }
    }

    /// Fills an inclusive rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let w = self.width as i32;
        let h = self.height as i32;
        for y in y0.max(0)..=y1.min(h - 1) {
            for x in x0.max(0)..=x1.min(w - 1) {
                self.data[(y * w + x) as usize] = 255;
            }
        }
    }

    /// Renders the silhouette as a grayscale frame over a uniform
    /// background: foreground pixels stay 255, the rest become `bg`.
    pub fn frame_with_background(&self, bg: u8) -> Vec<u8> {
        self.data
            .iter()
            .map(|&p| if p == 0 { bg } else { 255 })
            .collect()
    }

    /// Interprets the raster as a binary mask and traces its largest
    /// outer contour with the real border follower.
    pub fn into_mask_and_contour(self) -> (BinaryMask, Option<Contour>) {
        let buf = FrameBuffer {
            data: &self.data,
            width: self.width,
            height: self.height,
        };
        let mut scratch = vec![0i32; ((self.width + 2) * (self.height + 2)) as usize];
        let contours = find_contours(&buf, &mut scratch);

        let contour = contours
            .into_iter()
            .filter(|c| !c.hole)
            .max_by_key(|c| c.points.len());

        (
            BinaryMask {
                data: self.data,
                width: self.width,
                height: self.height,
            },
            contour,
        )
    }
}

/// A 200x200 hand-like silhouette: a palm disk at (100, 130) with radius
/// 35 and up to five finger bars rooted in the palm. The center fingertip
/// is the unique topmost point and the bar tips arch downward to the
/// sides, so every tip is a hull vertex and the derived hand radius is
/// the same for every non-zero finger count.
#[allow(dead_code)]
pub fn hand_raster(fingers: usize) -> Raster {
    assert!(fingers <= 5, "fixture supports at most five fingers");

    // (center x, tip y), ordered center-out
    const BARS: [(i32, i32); 5] = [(100, 40), (85, 43), (115, 43), (70, 48), (130, 48)];

    let mut raster = Raster::new(200, 200);
    raster.fill_disk(100, 130, 35);
    for &(cx, top) in BARS.iter().take(fingers) {
        raster.fill_rect(cx - 3, top, cx + 3, 115);
    }
    raster
}
