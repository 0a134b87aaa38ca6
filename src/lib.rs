//! Bitmap editing core for a pixel-art editor.
//!
//! The crate owns everything that is not the GUI shell: the RGBA canvas model
//! ([`canvas::PixImage`]) with its raster algorithms (pixel set, 4-connected
//! flood fill, line drawing), the editor session state machine
//! ([`session::EditorSession`]) that turns pointer events into canvas edits,
//! viewport zoom/pan bookkeeping, image load/save through the `image` codecs,
//! and the validated new-image form.
//!
//! The embedding shell is expected to:
//! * forward pointer events (already in screen coordinates relative to the
//!   canvas widget) to the session's `pointer_down` / `pointer_move` /
//!   `pointer_up` handlers and repaint when asked to,
//! * run its own file/color dialogs and hand the chosen paths/colors to the
//!   session,
//! * call [`logger::init`] once at startup if it wants a session log.

pub mod canvas;
pub mod dialogs;
pub mod io;
pub mod logger;
pub mod session;
pub mod tools;

pub use canvas::PixImage;
pub use session::{EditorSession, Repaint, Viewport};
pub use tools::{LineMode, PointerButton, PointerEvent, Tool};
