// ============================================================================
// Tool taxonomy and toolkit-neutral pointer events
// ============================================================================

/// The editor's tool palette. Selection lives on the session; each tool gets
/// uniform pointer-down/move/up handling there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    /// Drag to pan the viewport.
    #[default]
    Move,
    /// Primary click zooms in, secondary click zooms out.
    Magnifier,
    /// Flood-fill the clicked region with the current color.
    Fill,
    /// Freehand pixel strokes; dragging connects samples with lines.
    Pencil,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Move      => "Move",
            Tool::Magnifier => "Magnifier",
            Tool::Fill      => "Fill",
            Tool::Pencil    => "Pencil",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[Tool::Move, Tool::Magnifier, Tool::Fill, Tool::Pencil]
    }
}

/// Which line algorithm the pencil uses to bridge sampled drag positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineMode {
    /// The editor's historical parametric interpolation (endpoint-exclusive,
    /// direction-sensitive). Default, for stroke-for-stroke compatibility.
    #[default]
    Legacy,
    /// Bresenham: direction-independent, both endpoints plotted.
    Symmetric,
}

impl LineMode {
    pub fn label(&self) -> &'static str {
        match self {
            LineMode::Legacy    => "Legacy",
            LineMode::Symmetric => "Symmetric",
        }
    }

    pub fn all() -> &'static [LineMode] {
        &[LineMode::Legacy, LineMode::Symmetric]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// A mouse event as the GUI shell forwards it: position in screen pixels
/// relative to the canvas widget's origin, plus the button involved
/// (the button is that of the originating press for move events).
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, button: PointerButton) -> Self {
        Self { x, y, button }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_is_listed_once() {
        assert_eq!(Tool::all().len(), 4);
        for tool in Tool::all() {
            assert!(!tool.label().is_empty());
        }
        assert_eq!(Tool::default(), Tool::Move);
    }

    #[test]
    fn line_mode_defaults_to_legacy() {
        assert_eq!(LineMode::default(), LineMode::Legacy);
        assert_eq!(LineMode::all().len(), 2);
    }
}
