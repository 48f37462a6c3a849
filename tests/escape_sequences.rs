//! Black-box scenario tests driving the public API the way an embedding
//! application would: build a screen/layout, run it through the renderer or
//! a backend directly, and assert on the bytes that would reach the
//! terminal.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use termscreen_core::collab::MouseHandlers;
use termscreen_core::color::ColorDepth;
use termscreen_core::geometry::{Size, WritePosition};
use termscreen_core::output::{CursorShape, DummyOutput, Output, Vt100Output};
use termscreen_core::renderer::RenderRequest;
use termscreen_core::screen::{Screen, WindowId};
use termscreen_core::style::StyleString;
use termscreen_core::{Char, Layout, Renderer};

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap_or_else(|p| p.into_inner()).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedSink {
    fn taken(&self) -> Vec<u8> {
        std::mem::take(&mut self.0.lock().unwrap_or_else(|p| p.into_inner()))
    }
}

#[test]
fn sync_output_wraps_exactly_the_bytes_written_under_it() {
    let sink = SharedSink::default();
    let mut out = Vt100Output::new(sink.clone(), ColorDepth::TrueColor, Size::new(80, 24));

    out.begin_synchronized_output();
    out.write("hello");
    out.flush();
    out.end_synchronized_output();

    let captured = String::from_utf8(sink.taken()).expect("utf8 output");
    insta::assert_snapshot!(captured, @"\u{1b}[?2026hhello\u{1b}[?2026l");

    // A subsequent write with no new `begin_synchronized_output` call is
    // unwrapped: the flag only lasts the one flush.
    out.write("x");
    out.flush();
    assert_eq!(sink.taken(), b"x");
}

struct EmptyLayout;

impl Layout for EmptyLayout {
    fn focus_next(&self) {}
    fn focus_previous(&self) {}
    fn write_to_screen(&self, _screen: &Screen, _write_position: WritePosition) {}
    fn visible_focusable_windows(&self) -> Vec<WindowId> {
        Vec::new()
    }
}

fn request(layout: &dyn Layout) -> RenderRequest<'_> {
    RenderRequest {
        layout,
        focused_window: None,
        title: None,
        enter_alternate_screen: false,
        mouse_support: false,
        bracketed_paste: false,
        cursor_shape: CursorShape::Block,
        finishing: false,
        mouse_handlers: Some(MouseHandlers::new()),
    }
}

#[test]
fn first_frame_is_a_full_redraw_wrapped_in_synchronized_output() {
    let sink = SharedSink::default();
    let out = Vt100Output::new(sink.clone(), ColorDepth::TrueColor, Size::new(20, 3));
    let mut renderer = Renderer::new(out);
    let layout = EmptyLayout;

    renderer.render(request(&layout)).expect("render succeeds");

    let bytes = sink.taken();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.starts_with("\x1b[?2026h"), "frame must open a sync-output region: {text:?}");
    assert!(text.ends_with("\x1b[?2026l"), "frame must close the sync-output region: {text:?}");
    assert!(text.contains("\x1b[H"), "full redraw homes the cursor first: {text:?}");
    assert!(text.contains("\x1b[J"), "full redraw erases downward: {text:?}");
}

#[test]
fn unchanged_second_frame_emits_no_cell_writes() {
    let sink = SharedSink::default();
    let out = Vt100Output::new(sink.clone(), ColorDepth::TrueColor, Size::new(20, 3));
    let mut renderer = Renderer::new(out);
    let layout = EmptyLayout;

    renderer.render(request(&layout)).expect("first render");
    sink.taken();

    renderer.render(request(&layout)).expect("second render");
    let bytes = sink.taken();
    let text = String::from_utf8_lossy(&bytes);
    assert!(!text.contains("\x1b[J"), "unchanged frame must not re-erase: {text:?}");
}

#[test]
fn reset_for_resize_performs_zero_writes() {
    let sink = SharedSink::default();
    let out = Vt100Output::new(sink.clone(), ColorDepth::TrueColor, Size::new(20, 3));
    let mut renderer = Renderer::new(out);
    let layout = EmptyLayout;
    renderer.render(request(&layout)).expect("first render");
    sink.taken();

    renderer.reset_for_resize();

    assert!(sink.taken().is_empty());
}

#[test]
fn fill_area_with_empty_style_leaves_the_screen_untouched() {
    let blank = Char::new(" ", StyleString::new("[Transparent]"));
    let screen = Screen::new(4, 2, blank.clone(), true);
    screen.set(0, 0, Char::new("x", StyleString::new("bold")));

    let before: Vec<_> = (0..4).map(|c| screen.get(0, c)).collect();
    screen.fill_area(WritePosition::new(0, 0, 4, 2), &StyleString::empty(), true);
    let after: Vec<_> = (0..4).map(|c| screen.get(0, c)).collect();

    assert_eq!(before, after);
}

#[test]
fn dummy_output_never_reaches_a_real_sink_but_still_reports_size() {
    let out = DummyOutput::new(Size::new(80, 24));
    let mut renderer = Renderer::new(out);
    let layout = EmptyLayout;
    renderer.render(request(&layout)).expect("render against a dummy backend");
    assert_eq!(renderer.output().size().expect("size"), Size::new(80, 24));
}
