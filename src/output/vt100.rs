//! The VT100/ANSI output backend: buffers escape sequences and flushes them
//! as a single underlying write.

use std::io::Write;
use std::sync::Mutex;

use crate::color::ColorDepth;
use crate::error::Result;
use crate::geometry::Size;
use crate::style::ResolvedStyle;

use super::{CursorShape, Output};

/// Sync-output begin sequence (DEC private mode 2026).
pub const SYNC_OUTPUT_BEGIN: &str = "\x1b[?2026h";
/// Sync-output end sequence.
pub const SYNC_OUTPUT_END: &str = "\x1b[?2026l";

struct BufferState {
    buffer: String,
    synchronized_output: bool,
}

/// Emits ANSI/VT100 escape sequences to any `Write` sink. Buffered: nothing
/// reaches `writer` until [`Output::flush`].
pub struct Vt100Output<W: Write + Send> {
    writer: W,
    state: Mutex<BufferState>,
    color_depth: ColorDepth,
    size: Size,
}

impl<W: Write + Send> Vt100Output<W> {
    /// Builds a VT100 backend writing to `writer`, declaring `color_depth`
    /// and reporting a fixed `size` (this backend does not itself query the
    /// terminal — callers own that and report it here, e.g. from a CPR
    /// response or a prior `ioctl`).
    pub fn new(writer: W, color_depth: ColorDepth, size: Size) -> Self {
        Self {
            writer,
            state: Mutex::new(BufferState {
                buffer: String::new(),
                synchronized_output: false,
            }),
            color_depth,
            size,
        }
    }

    /// Updates the size this backend reports (e.g. after a resize).
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn push(&self, s: &str) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.buffer.push_str(s);
    }
}

impl<W: Write + Send> Output for Vt100Output<W> {
    fn write(&mut self, s: &str) {
        self.push(s);
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) {
        let (content, wrap) = {
            let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            let content = std::mem::take(&mut state.buffer);
            (content, state.synchronized_output)
        };
        if content.is_empty() {
            return;
        }
        if wrap {
            let _ = self.writer.write_all(SYNC_OUTPUT_BEGIN.as_bytes());
            let _ = self.writer.write_all(content.as_bytes());
            let _ = self.writer.write_all(SYNC_OUTPUT_END.as_bytes());
        } else {
            let _ = self.writer.write_all(content.as_bytes());
        }
        let _ = self.writer.flush();
    }

    fn set_title(&mut self, title: &str) {
        self.push(&format!("\x1b]0;{title}\x07"));
    }

    fn clear_title(&mut self) {
        self.push("\x1b]0;\x07");
    }

    fn bell(&mut self) {
        self.push("\x07");
    }

    fn cursor_goto(&mut self, row: u16, col: u16) {
        self.push(&format!("\x1b[{};{}H", row + 1, col + 1));
    }

    fn cursor_up(&mut self, n: u16) {
        if n > 0 {
            self.push(&format!("\x1b[{n}A"));
        }
    }

    fn cursor_down(&mut self, n: u16) {
        if n > 0 {
            self.push(&format!("\x1b[{n}B"));
        }
    }

    fn cursor_forward(&mut self, n: u16) {
        if n > 0 {
            self.push(&format!("\x1b[{n}C"));
        }
    }

    fn cursor_backward(&mut self, n: u16) {
        if n > 0 {
            self.push(&format!("\x1b[{n}D"));
        }
    }

    fn hide_cursor(&mut self) {
        self.push("\x1b[?25l");
    }

    fn show_cursor(&mut self) {
        self.push("\x1b[?25h");
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) {
        let code = match shape {
            CursorShape::Block => 2,
            CursorShape::Underline => 4,
            CursorShape::Bar => 6,
        };
        self.push(&format!("\x1b[{code} q"));
    }

    fn set_attributes(&mut self, style: ResolvedStyle) {
        let mut params: Vec<u8> = Vec::new();
        if style.bold {
            params.push(1);
        }
        if style.dim {
            params.push(2);
        }
        if style.italic {
            params.push(3);
        }
        if style.underline {
            params.push(4);
        }
        if style.blink {
            params.push(5);
        }
        if style.reverse {
            params.push(7);
        }
        if style.hidden {
            params.push(8);
        }
        if style.strike {
            params.push(9);
        }
        if let Some(fg) = style.fg {
            params.extend(fg.to_sgr_params(self.color_depth, true));
        }
        if let Some(bg) = style.bg {
            params.extend(bg.to_sgr_params(self.color_depth, false));
        }
        if params.is_empty() {
            self.reset_attributes();
            return;
        }
        let joined = params.iter().map(u8::to_string).collect::<Vec<_>>().join(";");
        self.push(&format!("\x1b[{joined}m"));
    }

    fn reset_attributes(&mut self) {
        self.push("\x1b[0m");
    }

    fn erase_screen(&mut self) {
        self.push("\x1b[2J");
    }

    fn erase_down(&mut self) {
        self.push("\x1b[J");
    }

    fn erase_end_of_line(&mut self) {
        self.push("\x1b[K");
    }

    fn enter_alternate_screen(&mut self) {
        self.push("\x1b[?1049h");
    }

    fn quit_alternate_screen(&mut self) {
        self.push("\x1b[?1049l");
    }

    fn enable_mouse(&mut self) {
        self.push("\x1b[?1000h\x1b[?1006h");
    }

    fn disable_mouse(&mut self) {
        self.push("\x1b[?1000l\x1b[?1006l");
    }

    fn enable_bracketed_paste(&mut self) {
        self.push("\x1b[?2004h");
    }

    fn disable_bracketed_paste(&mut self) {
        self.push("\x1b[?2004l");
    }

    fn reset_cursor_key_mode(&mut self) {
        self.push("\x1b[?1l");
    }

    fn enable_autowrap(&mut self) {
        self.push("\x1b[?7h");
    }

    fn disable_autowrap(&mut self) {
        self.push("\x1b[?7l");
    }

    fn request_cursor_position_report(&mut self) {
        self.push("\x1b[6n");
    }

    fn begin_synchronized_output(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.synchronized_output = true;
    }

    fn end_synchronized_output(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.synchronized_output = false;
    }

    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn rows_below_cursor(&self) -> Result<u16> {
        Ok(self.size.height)
    }

    fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> Vt100Output<Vec<u8>> {
        Vt100Output::new(Vec::new(), ColorDepth::TrueColor, Size::new(80, 24))
    }

    #[test]
    fn sync_output_wraps_exact_bytes() {
        let mut out = output();
        out.begin_synchronized_output();
        out.write("hello");
        out.flush();
        assert_eq!(out.writer, b"\x1b[?2026hhello\x1b[?2026l");
        out.end_synchronized_output();

        out.writer.clear();
        out.write("x");
        out.flush();
        assert_eq!(out.writer, b"x");
    }

    #[test]
    fn flush_of_empty_buffer_writes_nothing() {
        let mut out = output();
        out.flush();
        assert!(out.writer.is_empty());
    }

    #[test]
    fn begin_end_is_idempotent() {
        let mut out = output();
        out.begin_synchronized_output();
        out.begin_synchronized_output();
        out.write("a");
        out.flush();
        assert_eq!(out.writer, b"\x1b[?2026ha\x1b[?2026l");
    }

    #[test]
    fn set_attributes_empty_falls_back_to_reset() {
        let mut out = output();
        out.set_attributes(ResolvedStyle::default());
        out.flush();
        assert_eq!(out.writer, b"\x1b[0m");
    }
}
