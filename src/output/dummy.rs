//! A no-op output backend: every method is a no-op. Useful as a placeholder
//! when no terminal is attached (headless tests, non-interactive contexts).

use crate::color::ColorDepth;
use crate::error::Result;
use crate::geometry::Size;
use crate::style::ResolvedStyle;

use super::{CursorShape, Output};

/// Swallows every operation; reports a fixed size and no colour support.
#[derive(Debug, Default)]
pub struct DummyOutput {
    size: Size,
}

impl DummyOutput {
    /// Builds a dummy backend reporting `size`.
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Output for DummyOutput {
    fn write(&mut self, _s: &str) {}
    fn write_raw(&mut self, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }
    fn flush(&mut self) {}
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
