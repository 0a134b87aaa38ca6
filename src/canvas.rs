use image::{Rgba, RgbaImage};

/// Edge length of the default placeholder canvas.
pub const DEFAULT_SIZE: u32 = 64;
/// Number of checkerboard blocks along each edge of the default canvas.
const CHECKER_BLOCKS: u32 = 8;

/// Guard against absurd allocations from a hostile width × height
/// (max ~256 megapixels).
const MAX_PIXELS: u64 = 256_000_000;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

// ============================================================================
// PIXIMAGE — the bitmap editing model
// ============================================================================

/// A mutable RGBA raster plus the raster algorithms that edit it.
///
/// Coordinates are `(x, y)` with `0 <= x < width`, `0 <= y < height`.
/// Mutating operations expect in-bounds coordinates; the session layer
/// bounds-checks pointer positions before calling in, and flood fill
/// re-checks bounds only while expanding neighbors.
#[derive(Clone)]
pub struct PixImage {
    image: RgbaImage,
}

impl Default for PixImage {
    fn default() -> Self {
        Self::new()
    }
}

impl PixImage {
    // ---- construction -------------------------------------------------------

    /// Default 64×64 canvas pre-filled with an 8×8-block white/black
    /// checkerboard. A visible placeholder, nothing more.
    pub fn new() -> Self {
        let block = DEFAULT_SIZE / CHECKER_BLOCKS;
        let image = RgbaImage::from_fn(DEFAULT_SIZE, DEFAULT_SIZE, |x, y| {
            if (x / block + y / block) % 2 == 0 {
                WHITE
            } else {
                BLACK
            }
        });
        Self { image }
    }

    /// Blank canvas of the given size, uniformly filled with `color`.
    /// Degenerate dimensions (zero, or past the pixel-count ceiling) are
    /// clamped to 1×1.
    pub fn blank(width: u32, height: u32, color: Rgba<u8>) -> Self {
        let (width, height) =
            if width == 0 || height == 0 || (width as u64) * (height as u64) > MAX_PIXELS {
                crate::log_warn!(
                    "PixImage::blank: dimensions {}×{} out of range, clamped to 1×1",
                    width,
                    height
                );
                (1, 1)
            } else {
                (width, height)
            };
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    /// Adopt a decoded image wholesale (the Open action).
    pub fn from_rgba_image(image: RgbaImage) -> Self {
        Self { image }
    }

    // ---- accessors ----------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when `(x, y)` addresses a pixel of this canvas.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Borrow the backing raster (for encoding or display upload).
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        self.image
    }

    // ---- editing operations -------------------------------------------------

    /// Replace the color at `(x, y)`. Base primitive of the pencil tool and
    /// of the two operations below.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        self.image.put_pixel(x, y, color);
    }

    /// Classic 4-connected flood fill.
    ///
    /// The color at the seed becomes the *target*; every pixel 4-connected to
    /// the seed through target-colored pixels is repainted with `color`.
    /// A fill whose new color equals the target is still performed in full —
    /// every region pixel is visited and rewritten exactly once (the visited
    /// mask is what bounds the traversal in that case, since repainted pixels
    /// keep matching the target).
    ///
    /// O(region size): a DFS Vec-stack over packed flat indices, with the
    /// mask doubling as the already-enqueued set.
    pub fn flood_fill(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let w = self.width() as usize;
        let h = self.height() as usize;
        if x as usize >= w || y as usize >= h {
            return;
        }

        let target = self.get_pixel(x, y);

        // A flat index = y * width + x; canvases are capped well below
        // u32::MAX pixels so the packing never overflows.
        let mut visited = vec![false; w * h];
        let mut stack: Vec<u32> = Vec::with_capacity(1024);

        let seed = y as usize * w + x as usize;
        visited[seed] = true;
        stack.push(seed as u32);

        while let Some(idx) = stack.pop() {
            let idx = idx as usize;
            let px = (idx % w) as u32;
            let py = (idx / w) as u32;
            self.image.put_pixel(px, py, color);

            // Left
            if px > 0 {
                let ni = idx - 1;
                if !visited[ni] && self.get_pixel(px - 1, py) == target {
                    visited[ni] = true;
                    stack.push(ni as u32);
                }
            }
            // Right
            if ((px + 1) as usize) < w {
                let ni = idx + 1;
                if !visited[ni] && self.get_pixel(px + 1, py) == target {
                    visited[ni] = true;
                    stack.push(ni as u32);
                }
            }
            // Up
            if py > 0 {
                let ni = idx - w;
                if !visited[ni] && self.get_pixel(px, py - 1) == target {
                    visited[ni] = true;
                    stack.push(ni as u32);
                }
            }
            // Down
            if ((py + 1) as usize) < h {
                let ni = idx + w;
                if !visited[ni] && self.get_pixel(px, py + 1) == target {
                    visited[ni] = true;
                    stack.push(ni as u32);
                }
            }
        }
    }

    /// Parametric line interpolation, kept bit-for-bit compatible with the
    /// editor's historical pencil stroke.
    ///
    /// Known quirks, preserved deliberately (see DESIGN.md):
    /// * `steps = max(dx, dy)` on *signed* deltas — strokes whose larger
    ///   delta is negative get `steps <= 0` and draw nothing;
    /// * the loop runs `0..steps`, so the `(x2, y2)` endpoint itself is never
    ///   plotted (the next stroke segment starts there anyway).
    ///
    /// Both endpoints must be in bounds; interpolated points stay within the
    /// endpoints' bounding box. For a direction-independent, endpoint-
    /// inclusive line use [`PixImage::draw_line_symmetric`].
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba<u8>) {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let steps = dx.max(dy);

        for s in 0..steps {
            let x = x1 + s * dx / steps;
            let y = y1 + s * dy / steps;
            self.set_pixel(x as u32, y as u32, color);
        }
    }

    /// Pixel-perfect Bresenham line, symmetric in direction and inclusive of
    /// both endpoints. Out-of-bounds points along the line are skipped, so
    /// the endpoints themselves may lie outside the canvas.
    pub fn draw_line_symmetric(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba<u8>) {
        let mut x0 = x1;
        let mut y0 = y1;
        let dx = (x2 - x0).abs();
        let dy = (y2 - y0).abs();
        let sx = if x0 < x2 { 1 } else { -1 };
        let sy = if y0 < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            if self.contains(x0 as i64, y0 as i64) {
                self.set_pixel(x0 as u32, y0 as u32, color);
            }

            if x0 == x2 && y0 == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}
