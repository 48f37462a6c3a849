//! The plain-text output backend: writes printable content only and never
//! emits any control sequence, including synchronized-output brackets — this
//! backend exists so rendering into a file or pipe doesn't contaminate it
//! with escape codes.

use std::io::Write;

use crate::color::ColorDepth;
use crate::error::Result;
use crate::geometry::Size;
use crate::style::ResolvedStyle;

use super::{CursorShape, Output};

/// Emits only the text content written via [`Output::write`]; every control
/// operation (cursor movement, colour, alternate screen, sync-output, ...)
/// is a no-op.
pub struct PlainTextOutput<W: Write + Send> {
    writer: W,
    buffer: String,
    size: Size,
}

impl<W: Write + Send> PlainTextOutput<W> {
    /// Builds a plain-text backend writing to `writer`.
    pub fn new(writer: W, size: Size) -> Self {
        Self {
            writer,
            buffer: String::new(),
            size,
        }
    }
}

impl<W: Write + Send> Output for PlainTextOutput<W> {
    fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let content = std::mem::take(&mut self.buffer);
        let _ = self.writer.write_all(content.as_bytes());
        let _ = self.writer.flush();
    }

    fn set_title(&mut self, _title: &str) {}
    fn clear_title(&mut self) {}
    fn bell(&mut self) {}
    fn cursor_goto(&mut self, _row: u16, _col: u16) {}
    fn cursor_up(&mut self, _n: u16) {}
    fn cursor_down(&mut self, _n: u16) {}
    fn cursor_forward(&mut self, _n: u16) {}
    fn cursor_backward(&mut self, _n: u16) {}
    fn hide_cursor(&mut self) {}
    fn show_cursor(&mut self) {}
    fn set_cursor_shape(&mut self, _shape: CursorShape) {}
    fn set_attributes(&mut self, _style: ResolvedStyle) {}
    fn reset_attributes(&mut self) {}
    fn erase_screen(&mut self) {}
    fn erase_down(&mut self) {}
    fn erase_end_of_line(&mut self) {}
    fn enter_alternate_screen(&mut self) {}
    fn quit_alternate_screen(&mut self) {}
    fn enable_mouse(&mut self) {}
    fn disable_mouse(&mut self) {}
    fn enable_bracketed_paste(&mut self) {}
    fn disable_bracketed_paste(&mut self) {}
    fn reset_cursor_key_mode(&mut self) {}
    fn enable_autowrap(&mut self) {}
    fn disable_autowrap(&mut self) {}
    fn request_cursor_position_report(&mut self) {}
    // No sync-output sequences ever: this backend never emits them even
    // though the renderer still believes it opened a region.
    fn begin_synchronized_output(&mut self) {}
    fn end_synchronized_output(&mut self) {}

    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn rows_below_cursor(&self) -> Result<u16> {
        Ok(self.size.height)
    }

    fn color_depth(&self) -> ColorDepth {
        ColorDepth::NoColor
    }
}
