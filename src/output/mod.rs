//! Output backends: the terminal-facing side the differential
//! renderer writes escape sequences through.

mod dummy;
mod hybrid;
mod legacy_win32;
mod plain_text;
mod vt100;

pub use dummy::DummyOutput;
pub use hybrid::{HybridKind, HybridOutput};
pub use legacy_win32::LegacyWin32Output;
pub use plain_text::PlainTextOutput;
pub use vt100::{Vt100Output, SYNC_OUTPUT_BEGIN, SYNC_OUTPUT_END};

use crate::color::ColorDepth;
use crate::error::Result;
use crate::geometry::Size;
use crate::style::ResolvedStyle;

/// The shape the cursor is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CursorShape {
    /// A solid block.
    Block,
    /// A thin underline.
    Underline,
    /// A thin vertical bar (the common "I-beam" insertion caret).
    Bar,
}

/// The terminal-facing side of the renderer: buffers or directly emits the
/// escape sequences a frame requires.
///
/// Implementors choose their own buffering policy; the renderer only relies
/// on writes appearing in call order within one `flush`, and on `flush`
/// itself being a single underlying stream write when buffered.
pub trait Output: Send {
    /// Appends `s` to the output's buffer (or writes it immediately, for
    /// unbuffered backends). Never fails: buffering is in-memory.
    fn write(&mut self, s: &str);

    /// Writes `bytes` directly, bypassing any buffer.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flushes any buffered content to the underlying stream as a single
    /// write, wrapped in a synchronized-output bracket if the flag is set
    /// and the buffer is non-empty. IO errors here are swallowed: the
    /// sync-output end marker is considered logically emitted regardless.
    fn flush(&mut self);

    /// Sets the terminal/window title.
    fn set_title(&mut self, title: &str);

    /// Clears the terminal/window title.
    fn clear_title(&mut self);

    /// Rings the terminal bell.
    fn bell(&mut self);

    /// Moves the cursor to an absolute `(row, col)`, both 0-based.
    fn cursor_goto(&mut self, row: u16, col: u16);
    /// Moves the cursor up `n` rows.
    fn cursor_up(&mut self, n: u16);
    /// Moves the cursor down `n` rows.
    fn cursor_down(&mut self, n: u16);
    /// Moves the cursor forward `n` columns.
    fn cursor_forward(&mut self, n: u16);
    /// Moves the cursor backward `n` columns.
    fn cursor_backward(&mut self, n: u16);
    /// Hides the cursor.
    fn hide_cursor(&mut self);
    /// Shows the cursor.
    fn show_cursor(&mut self);
    /// Sets the cursor's shape.
    fn set_cursor_shape(&mut self, shape: CursorShape);

    /// Emits the SGR sequence for `style`, resolved at this backend's
    /// declared colour depth.
    fn set_attributes(&mut self, style: ResolvedStyle);
    /// Resets all attributes to the terminal default (`ESC[0m`).
    fn reset_attributes(&mut self);

    /// Erases the entire screen.
    fn erase_screen(&mut self);
    /// Erases from the cursor to the end of the screen.
    fn erase_down(&mut self);
    /// Erases from the cursor to the end of the current line.
    fn erase_end_of_line(&mut self);

    /// Switches to the alternate screen buffer.
    fn enter_alternate_screen(&mut self);
    /// Leaves the alternate screen buffer.
    fn quit_alternate_screen(&mut self);

    /// Enables mouse tracking.
    fn enable_mouse(&mut self);
    /// Disables mouse tracking.
    fn disable_mouse(&mut self);

    /// Enables bracketed-paste mode.
    fn enable_bracketed_paste(&mut self);
    /// Disables bracketed-paste mode.
    fn disable_bracketed_paste(&mut self);

    /// Resets cursor-key mode to normal (as opposed to application mode).
    fn reset_cursor_key_mode(&mut self);

    /// Enables autowrap.
    fn enable_autowrap(&mut self);
    /// Disables autowrap.
    fn disable_autowrap(&mut self);

    /// Requests a cursor position report from the terminal.
    fn request_cursor_position_report(&mut self);

    /// Opens a synchronized-output region. Re-entrant: repeated calls keep
    /// the flag set.
    fn begin_synchronized_output(&mut self);
    /// Closes a synchronized-output region. Re-entrant: repeated calls keep
    /// the flag clear.
    fn end_synchronized_output(&mut self);

    /// The terminal's current size.
    fn size(&self) -> Result<Size>;
    /// The number of rows below the cursor's current position.
    fn rows_below_cursor(&self) -> Result<u16>;

    /// The colour depth this backend declares support for.
    fn color_depth(&self) -> ColorDepth;
}
