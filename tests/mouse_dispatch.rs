//! Drives the VT100 mouse decoder through a real [`Renderer`], exactly as an
//! embedding application's input loop would: feed a raw escape-sequence body
//! and observe which handler position/event/button/modifiers it dispatches.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use termscreen_core::collab::MouseHandlers;
use termscreen_core::event::{MouseButton, MouseEvent, MouseEventKind, Modifiers};
use termscreen_core::geometry::WritePosition;
use termscreen_core::mouse::vt100_mouse_handler;
use termscreen_core::output::DummyOutput;
use termscreen_core::screen::{Screen, WindowId};
use termscreen_core::{Handled, Layout, Renderer};

struct EmptyLayout;

impl Layout for EmptyLayout {
    fn focus_next(&self) {}
    fn focus_previous(&self) {}
    fn write_to_screen(&self, _screen: &Screen, _write_position: WritePosition) {}
    fn visible_focusable_windows(&self) -> Vec<WindowId> {
        Vec::new()
    }
}

/// Builds a renderer with a known height (rows_above_layout = 0) and a single
/// mouse handler registered at `(x, y)` that records the event it receives.
fn renderer_with_handler_at(
    x: u16,
    y: u16,
) -> (Renderer<DummyOutput>, Arc<Mutex<Option<MouseEvent>>>) {
    use termscreen_core::renderer::RenderRequest;
    use termscreen_core::output::CursorShape;

    let captured: Arc<Mutex<Option<MouseEvent>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let mut handlers = MouseHandlers::new();
    handlers.register(
        x,
        y,
        Arc::new(move |event: MouseEvent| {
            *sink.lock().unwrap_or_else(|p| p.into_inner()) = Some(event);
        }),
    );

    let mut renderer = Renderer::new(DummyOutput::new(termscreen_core::geometry::Size::new(80, 24)));
    let layout = EmptyLayout;
    renderer
        .render(RenderRequest {
            layout: &layout,
            focused_window: None,
            title: None,
            enter_alternate_screen: false,
            mouse_support: false,
            bracketed_paste: false,
            cursor_shape: CursorShape::Block,
            finishing: false,
            mouse_handlers: Some(handlers),
        })
        .expect("initial render");
    renderer.report_absolute_cursor_row(0);

    (renderer, captured)
}

#[test]
fn xterm_sgr_left_click_dispatches_to_the_decoded_cell() {
    let (renderer, captured) = renderer_with_handler_at(9, 4);

    let handled = vt100_mouse_handler("\x1b[<0;10;5M", &renderer);

    assert!(matches!(handled, Handled::Yes(())));
    let event = captured.lock().unwrap().take().expect("handler fired");
    assert_eq!(event.position.x, 9);
    assert_eq!(event.position.y, 4);
    assert_eq!(event.button, MouseButton::Left);
    assert_eq!(event.kind, MouseEventKind::MouseDown);
    assert_eq!(event.modifiers, Modifiers::none());
}

#[test]
fn typical_protocol_bytes_decode_to_the_same_cell() {
    let (renderer, captured) = renderer_with_handler_at(9, 4);

    // Typical/X10 report: ESC [ M <code+32> <x+32> <y+32>; code 0 (left
    // button press), x=10, y=5 pre-offset, matching the SGR case above.
    let data = "\x1b[M \x2a\x25";
    let handled = vt100_mouse_handler(data, &renderer);

    assert!(matches!(handled, Handled::Yes(())));
    let event = captured.lock().unwrap().take().expect("handler fired");
    assert_eq!(event.position.x, 9);
    assert_eq!(event.position.y, 4);
    assert_eq!(event.button, MouseButton::Left);
    assert_eq!(event.kind, MouseEventKind::MouseDown);
}

#[test]
fn unknown_urxvt_code_degrades_to_unknown_button_move_rather_than_declining() {
    let (renderer, captured) = renderer_with_handler_at(13, 12);

    // URXVT report with a code absent from the 4-entry table (only 32, 35,
    // 96, 97 are known).
    let handled = vt100_mouse_handler("\x1b[99;14;13M", &renderer);

    assert!(matches!(handled, Handled::Yes(())));
    let event = captured.lock().unwrap().take().expect("handler fired");
    assert_eq!(event.position.x, 13);
    assert_eq!(event.position.y, 12);
    assert_eq!(event.button, MouseButton::Unknown);
    assert_eq!(event.kind, MouseEventKind::MouseMove);
}

#[test]
fn declines_before_the_first_cpr_response() {
    let mut renderer = Renderer::new(DummyOutput::new(termscreen_core::geometry::Size::new(80, 24)));
    let layout = EmptyLayout;
    {
        use termscreen_core::output::CursorShape;
        use termscreen_core::renderer::RenderRequest;
        renderer
            .render(RenderRequest {
                layout: &layout,
                focused_window: None,
                title: None,
                enter_alternate_screen: false,
                mouse_support: false,
                bracketed_paste: false,
                cursor_shape: CursorShape::Block,
                finishing: false,
                mouse_handlers: Some(MouseHandlers::new()),
            })
            .expect("render");
    }

    assert!(!renderer.height_is_known());
    let handled = vt100_mouse_handler("\x1b[<0;10;5M", &renderer);
    assert!(matches!(handled, Handled::Not));
}

#[test]
fn cpr_response_transitions_height_from_unknown_to_known() {
    let mut renderer = Renderer::new(DummyOutput::new(termscreen_core::geometry::Size::new(80, 24)));
    assert!(!renderer.height_is_known());
    renderer.report_absolute_cursor_row(35);
    assert!(renderer.height_is_known());
    assert_eq!(renderer.rows_above_layout().expect("known"), 35);
}
