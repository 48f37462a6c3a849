//! Hybrid backends: Windows 10's console host and ConEmu both understand
//! ANSI/VT100 escape sequences, so both delegate almost everything to an
//! inner [`Vt100Output`] rather than re-implementing escape generation.
//!
//! Lock ordering: this type's outer lock is always acquired before the
//! inner `Vt100Output`'s buffer lock, never the other way around, and the
//! outer lock is never held across a call into the inner backend's `flush`
//! (which performs the actual stream write) — avoiding a deadlock between a
//! hybrid's outer lock and its inner VT100 instance's lock.

use std::io::Write;
use std::sync::Mutex;

use crate::color::ColorDepth;
use crate::error::Result;
use crate::geometry::Size;
use crate::style::ResolvedStyle;

use super::vt100::Vt100Output;
use super::{CursorShape, Output};

/// Which concrete hybrid console this instance models. Both currently behave
/// identically (full ANSI passthrough); kept distinct since a future
/// divergence (e.g. ConEmu-specific quirks) would hang off this
/// discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HybridKind {
    /// The modern Windows 10+ console host (conhost with VT support, or
    /// Windows Terminal).
    Windows10,
    /// The ConEmu terminal emulator.
    ConEmu,
}

/// Delegates every operation to an inner VT100 backend; `kind` only
/// distinguishes which hybrid console this is for callers that branch on it.
pub struct HybridOutput<W: Write + Send> {
    kind: HybridKind,
    inner: Mutex<Vt100Output<W>>,
}

impl<W: Write + Send> HybridOutput<W> {
    /// Wraps `inner` as a hybrid backend of the given `kind`.
    pub fn new(kind: HybridKind, inner: Vt100Output<W>) -> Self {
        Self {
            kind,
            inner: Mutex::new(inner),
        }
    }

    /// Which hybrid console this instance models.
    pub fn kind(&self) -> HybridKind {
        self.kind
    }

    fn inner(&self) -> std::sync::MutexGuard<'_, Vt100Output<W>> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl<W: Write + Send> Output for HybridOutput<W> {
    fn write(&mut self, s: &str) {
        self.inner().write(s);
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner().write_raw(bytes)
    }

    fn flush(&mut self) {
        self.inner().flush();
    }

    fn set_title(&mut self, title: &str) {
        self.inner().set_title(title);
    }

    fn clear_title(&mut self) {
        self.inner().clear_title();
    }

    fn bell(&mut self) {
        self.inner().bell();
    }

    fn cursor_goto(&mut self, row: u16, col: u16) {
        self.inner().cursor_goto(row, col);
    }

    fn cursor_up(&mut self, n: u16) {
        self.inner().cursor_up(n);
    }

    fn cursor_down(&mut self, n: u16) {
        self.inner().cursor_down(n);
    }

    fn cursor_forward(&mut self, n: u16) {
        self.inner().cursor_forward(n);
    }

    fn cursor_backward(&mut self, n: u16) {
        self.inner().cursor_backward(n);
    }

    fn hide_cursor(&mut self) {
        self.inner().hide_cursor();
    }

    fn show_cursor(&mut self) {
        self.inner().show_cursor();
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.inner().set_cursor_shape(shape);
    }

    fn set_attributes(&mut self, style: ResolvedStyle) {
        self.inner().set_attributes(style);
    }

    fn reset_attributes(&mut self) {
        self.inner().reset_attributes();
    }

    fn erase_screen(&mut self) {
        self.inner().erase_screen();
    }

    fn erase_down(&mut self) {
        self.inner().erase_down();
    }

    fn erase_end_of_line(&mut self) {
        self.inner().erase_end_of_line();
    }

    fn enter_alternate_screen(&mut self) {
        self.inner().enter_alternate_screen();
    }

    fn quit_alternate_screen(&mut self) {
        self.inner().quit_alternate_screen();
    }

    fn enable_mouse(&mut self) {
        self.inner().enable_mouse();
    }

    fn disable_mouse(&mut self) {
        self.inner().disable_mouse();
    }

    fn enable_bracketed_paste(&mut self) {
        self.inner().enable_bracketed_paste();
    }

    fn disable_bracketed_paste(&mut self) {
        self.inner().disable_bracketed_paste();
    }

    fn reset_cursor_key_mode(&mut self) {
        self.inner().reset_cursor_key_mode();
    }

    fn enable_autowrap(&mut self) {
        self.inner().enable_autowrap();
    }

    fn disable_autowrap(&mut self) {
        self.inner().disable_autowrap();
    }

    fn request_cursor_position_report(&mut self) {
        self.inner().request_cursor_position_report();
    }

    fn begin_synchronized_output(&mut self) {
        self.inner().begin_synchronized_output();
    }

    fn end_synchronized_output(&mut self) {
        self.inner().end_synchronized_output();
    }

    fn size(&self) -> Result<Size> {
        self.inner().size()
    }

    fn rows_below_cursor(&self) -> Result<u16> {
        self.inner().rows_below_cursor()
    }

    fn color_depth(&self) -> ColorDepth {
        self.inner().color_depth()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap_or_else(|p| p.into_inner()).extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn hybrid(kind: HybridKind) -> (HybridOutput<SharedSink>, SharedSink) {
        let sink = SharedSink::default();
        let out = HybridOutput::new(
            kind,
            Vt100Output::new(sink.clone(), ColorDepth::TrueColor, Size::new(80, 24)),
        );
        (out, sink)
    }

    #[test]
    fn delegates_sync_output_to_inner_vt100() {
        let (mut out, sink) = hybrid(HybridKind::Windows10);
        out.begin_synchronized_output();
        out.write("hi");
        out.flush();
        assert_eq!(
            sink.0.lock().unwrap().as_slice(),
            b"\x1b[?2026hhi\x1b[?2026l"
        );
        assert_eq!(out.kind(), HybridKind::Windows10);
    }

    #[test]
    fn conemu_kind_is_distinct() {
        let (out, _sink) = hybrid(HybridKind::ConEmu);
        assert_eq!(out.kind(), HybridKind::ConEmu);
    }
}
