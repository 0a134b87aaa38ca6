use std::path::Path;

use image::Rgba;

use crate::canvas::{PixImage, WHITE};
use crate::io::{self, IoError};
use crate::tools::{LineMode, PointerButton, PointerEvent, Tool};

pub const MIN_ZOOM: f64 = 0.125;
pub const MAX_ZOOM: f64 = 64.0;

/// Tells the embedding shell whether the widget tree needs a refresh after an
/// event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    Needed,
    None,
}

impl Repaint {
    pub fn is_needed(self) -> bool {
        self == Repaint::Needed
    }
}

// ============================================================================
// VIEWPORT — zoom-and-pan bookkeeping
// ============================================================================

/// Maps between screen space (pixels relative to the canvas widget origin)
/// and canvas space. Zoom steps double/halve the ratio, clamped so the
/// magnifier cannot zoom into oblivion.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    /// Screen pixels per canvas pixel.
    pub ratio: f64,
    /// Screen-space offset of the canvas origin.
    pub pan: (f32, f32),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            pan: (0.0, 0.0),
        }
    }
}

impl Viewport {
    /// Screen position to canvas coordinates. May land outside the canvas;
    /// callers bounds-check against the image before mutating it.
    pub fn to_canvas(&self, x: f32, y: f32) -> (i64, i64) {
        let cx = ((x - self.pan.0) as f64 / self.ratio).floor() as i64;
        let cy = ((y - self.pan.1) as f64 / self.ratio).floor() as i64;
        (cx, cy)
    }

    pub fn zoom_in(&mut self) {
        self.ratio = (self.ratio * 2.0).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.ratio = (self.ratio / 2.0).max(MIN_ZOOM);
    }

    /// Pan the viewport by a screen-space delta (Move tool drag).
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// EDITOR SESSION — tool dispatch state machine
// ============================================================================

/// All transient editor state in one place: the canvas, the selected tool,
/// the current color, the viewport, and in-progress drag bookkeeping.
///
/// The GUI shell forwards raw pointer events; the session decides what they
/// mean for the current tool and reports whether a repaint is due. Pointer
/// positions that map outside the canvas never reach the bitmap model.
pub struct EditorSession {
    pub image: PixImage,
    pub tool: Tool,
    /// Color applied by Fill and Pencil. Starts fully transparent until the
    /// shell's color picker sets it, as the original editor did.
    pub color: Rgba<u8>,
    pub line_mode: LineMode,
    pub viewport: Viewport,
    dragging: bool,
    /// Previous sampled canvas position of a pencil drag.
    last_pos: Option<(u32, u32)>,
    /// Previous screen position of a move drag.
    last_screen: Option<(f32, f32)>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Fresh session on the default checkerboard canvas.
    pub fn new() -> Self {
        Self {
            image: PixImage::new(),
            tool: Tool::default(),
            color: Rgba([0, 0, 0, 0]),
            line_mode: LineMode::default(),
            viewport: Viewport::default(),
            dragging: false,
            last_pos: None,
            last_screen: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // ---- pointer handling ---------------------------------------------------

    pub fn pointer_down(&mut self, event: PointerEvent) -> Repaint {
        let (cx, cy) = self.viewport.to_canvas(event.x, event.y);
        let contains = self.image.contains(cx, cy);

        match self.tool {
            Tool::Move => {
                self.dragging = true;
                self.last_screen = Some((event.x, event.y));
                Repaint::None
            }
            Tool::Magnifier => {
                match event.button {
                    PointerButton::Primary => self.viewport.zoom_in(),
                    PointerButton::Secondary => self.viewport.zoom_out(),
                }
                Repaint::Needed
            }
            Tool::Fill => {
                if !contains {
                    return Repaint::None;
                }
                self.image.flood_fill(cx as u32, cy as u32, self.color);
                Repaint::Needed
            }
            Tool::Pencil => {
                if !contains {
                    return Repaint::None;
                }
                self.image.set_pixel(cx as u32, cy as u32, self.color);
                self.last_pos = Some((cx as u32, cy as u32));
                self.dragging = true;
                Repaint::Needed
            }
        }
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> Repaint {
        if !self.dragging {
            return Repaint::None;
        }

        match self.tool {
            Tool::Move => {
                let Some((px, py)) = self.last_screen else {
                    return Repaint::None;
                };
                self.viewport.pan_by(event.x - px, event.y - py);
                self.last_screen = Some((event.x, event.y));
                Repaint::Needed
            }
            Tool::Pencil => {
                let (cx, cy) = self.viewport.to_canvas(event.x, event.y);
                // Samples outside the canvas are dropped without advancing
                // the stroke, exactly like screening them at the widget edge.
                if !self.image.contains(cx, cy) {
                    return Repaint::None;
                }
                if let Some((px, py)) = self.last_pos {
                    match self.line_mode {
                        LineMode::Legacy => {
                            self.image
                                .draw_line(px as i32, py as i32, cx as i32, cy as i32, self.color)
                        }
                        LineMode::Symmetric => self.image.draw_line_symmetric(
                            px as i32, py as i32, cx as i32, cy as i32, self.color,
                        ),
                    }
                }
                self.last_pos = Some((cx as u32, cy as u32));
                Repaint::Needed
            }
            Tool::Magnifier | Tool::Fill => Repaint::None,
        }
    }

    pub fn pointer_up(&mut self, _event: PointerEvent) -> Repaint {
        self.dragging = false;
        self.last_screen = None;
        Repaint::None
    }

    // ---- actions ------------------------------------------------------------

    /// The New action: replace the canvas with a blank white image of the
    /// given size. Any in-progress drag is abandoned.
    pub fn new_image(&mut self, width: u32, height: u32) {
        self.replace_image(PixImage::blank(width, height, WHITE));
    }

    /// Adopt `image` as the active canvas wholesale.
    pub fn replace_image(&mut self, image: PixImage) {
        self.image = image;
        self.dragging = false;
        self.last_pos = None;
        self.last_screen = None;
    }

    /// The Open action. On error the current canvas stays untouched.
    pub fn open(&mut self, path: &Path) -> Result<(), IoError> {
        let image = io::open_image(path)?;
        crate::log_info!(
            "opened {} ({}×{})",
            path.display(),
            image.width(),
            image.height()
        );
        self.replace_image(image);
        Ok(())
    }

    /// The Save action: encode the canvas as PNG at `path`.
    pub fn save(&self, path: &Path) -> Result<(), IoError> {
        io::save_png(&self.image, path)?;
        crate::log_info!("saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BLACK, WHITE};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn session_on_blank(w: u32, h: u32) -> EditorSession {
        let mut s = EditorSession::new();
        s.replace_image(PixImage::blank(w, h, WHITE));
        s.color = RED;
        s
    }

    fn press(x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(x, y, PointerButton::Primary)
    }

    #[test]
    fn pencil_press_sets_one_pixel() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        assert!(s.pointer_down(press(3.0, 4.0)).is_needed());
        assert_eq!(s.image.get_pixel(3, 4), RED);
        assert!(s.is_dragging());
    }

    #[test]
    fn pencil_drag_bridges_samples_with_a_line() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        s.pointer_down(press(0.0, 0.0));
        assert!(s.pointer_move(press(4.0, 0.0)).is_needed());
        // Legacy line: endpoint-exclusive, so (4,0) is pending until the
        // next segment starts there.
        for x in 0..4 {
            assert_eq!(s.image.get_pixel(x, 0), RED, "x = {x}");
        }
        assert_eq!(s.image.get_pixel(4, 0), WHITE);

        assert!(s.pointer_move(press(7.0, 0.0)).is_needed());
        for x in 4..7 {
            assert_eq!(s.image.get_pixel(x, 0), RED, "x = {x}");
        }
    }

    #[test]
    fn pencil_symmetric_mode_plots_endpoints() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        s.line_mode = LineMode::Symmetric;
        s.pointer_down(press(4.0, 0.0));
        s.pointer_move(press(0.0, 0.0));
        // Symmetric mode handles the leftward stroke the legacy one drops.
        for x in 0..=4 {
            assert_eq!(s.image.get_pixel(x, 0), RED, "x = {x}");
        }
    }

    #[test]
    fn pencil_ignores_out_of_bounds_samples_without_advancing_stroke() {
        let mut s = session_on_blank(4, 4);
        s.tool = Tool::Pencil;
        s.pointer_down(press(1.0, 1.0));
        assert_eq!(s.pointer_move(press(40.0, 1.0)), Repaint::None);
        // Re-entering continues from the last in-bounds sample (1,1).
        s.pointer_move(press(3.0, 1.0));
        assert_eq!(s.image.get_pixel(2, 1), RED);
    }

    #[test]
    fn pencil_does_not_draw_after_release() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        s.pointer_down(press(0.0, 0.0));
        s.pointer_up(press(0.0, 0.0));
        assert_eq!(s.pointer_move(press(5.0, 0.0)), Repaint::None);
        assert_eq!(s.image.get_pixel(3, 0), WHITE);
    }

    #[test]
    fn fill_press_floods_region_and_respects_bounds() {
        let mut s = session_on_blank(4, 4);
        s.tool = Tool::Fill;
        assert_eq!(s.pointer_down(press(100.0, 0.0)), Repaint::None);
        assert!(s.pointer_down(press(0.0, 0.0)).is_needed());
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(s.image.get_pixel(x, y), RED);
            }
        }
    }

    #[test]
    fn magnifier_doubles_and_halves_with_clamping() {
        let mut s = session_on_blank(4, 4);
        s.tool = Tool::Magnifier;
        s.pointer_down(press(0.0, 0.0));
        assert_eq!(s.viewport.ratio, 2.0);

        for _ in 0..32 {
            s.pointer_down(press(0.0, 0.0));
        }
        assert_eq!(s.viewport.ratio, MAX_ZOOM);

        for _ in 0..32 {
            s.pointer_down(PointerEvent::new(0.0, 0.0, PointerButton::Secondary));
        }
        assert_eq!(s.viewport.ratio, MIN_ZOOM);
    }

    #[test]
    fn zoomed_pointer_maps_to_canvas_pixels() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        s.viewport.ratio = 4.0;
        // Screen (13, 7) at 4× lands on canvas pixel (3, 1).
        s.pointer_down(press(13.0, 7.0));
        assert_eq!(s.image.get_pixel(3, 1), RED);
    }

    #[test]
    fn move_drag_pans_the_viewport() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Move;
        assert_eq!(s.pointer_down(press(10.0, 10.0)), Repaint::None);
        assert!(s.pointer_move(press(15.0, 12.0)).is_needed());
        assert_eq!(s.viewport.pan, (5.0, 2.0));
        s.pointer_move(press(16.0, 12.0));
        assert_eq!(s.viewport.pan, (6.0, 2.0));
        s.pointer_up(press(16.0, 12.0));
        assert_eq!(s.pointer_move(press(30.0, 30.0)), Repaint::None);
    }

    #[test]
    fn pan_shifts_pointer_mapping() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        s.viewport.pan = (5.0, 0.0);
        s.pointer_down(press(2.0, 0.0));
        // (2 - 5) / 1.0 = -3: off-canvas, nothing drawn.
        assert_eq!(s.image.get_pixel(2, 0), WHITE);
        s.pointer_down(press(7.0, 0.0));
        assert_eq!(s.image.get_pixel(2, 0), RED);
    }

    #[test]
    fn new_image_replaces_canvas_and_cancels_drag() {
        let mut s = session_on_blank(8, 8);
        s.tool = Tool::Pencil;
        s.pointer_down(press(0.0, 0.0));
        s.new_image(3, 2);
        assert_eq!((s.image.width(), s.image.height()), (3, 2));
        assert_eq!(s.image.get_pixel(0, 0), WHITE);
        assert!(!s.is_dragging());
    }

    #[test]
    fn fill_uses_black_wall_as_boundary() {
        let mut s = session_on_blank(5, 5);
        for y in 0..5 {
            s.image.set_pixel(2, y, BLACK);
        }
        s.tool = Tool::Fill;
        s.pointer_down(press(0.0, 0.0));
        assert_eq!(s.image.get_pixel(1, 4), RED);
        assert_eq!(s.image.get_pixel(2, 2), BLACK);
        assert_eq!(s.image.get_pixel(3, 0), WHITE);
    }
}
