//! Key and mouse event types exchanged between the VT100/Windows decoders,
//! the mouse-handler registry, and the external key processor.

use crate::geometry::Position;

/// A raw key-press as produced by the upstream VT100/console parser.
///
/// The parser itself (turning terminal bytes into `KeyPress`es) is out of
/// scope; this crate only consumes the `data` field for escape sequences it
/// must decode itself (mouse reports, CPR responses).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPress {
    /// The logical key, when the parser could classify one.
    pub key: Key,
    /// The raw escape-sequence body, for keys the parser passes through
    /// verbatim (mouse reports, CPR responses).
    pub data: String,
}

impl KeyPress {
    /// Builds a `KeyPress` that only carries raw escape data (the shape the
    /// mouse/CPR handlers receive).
    pub fn from_data(data: impl Into<String>) -> Self {
        Self {
            key: Key::Escape,
            data: data.into(),
        }
    }
}

/// A logical key, independent of the byte sequence that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Key {
    /// Any printable character key.
    Char(char),
    /// The up arrow (what the scroll-without-position handler synthesises).
    Up,
    /// The down arrow.
    Down,
    /// Escape or the start of an escape sequence.
    Escape,
    /// Ctrl-C.
    CtrlC,
    /// Ctrl-D.
    CtrlD,
}

/// A mouse button, as decoded from any of the three mouse protocols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// No button involved (a move or scroll event).
    NoButton,
    /// The protocol could not identify the button.
    Unknown,
}

/// The kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MouseEventKind {
    /// Button pressed.
    MouseDown,
    /// Button released.
    MouseUp,
    /// Pointer moved (possibly with a button held, i.e. drag).
    MouseMove,
    /// Wheel scrolled up.
    ScrollUp,
    /// Wheel scrolled down.
    ScrollDown,
}

/// Keyboard modifiers accompanying a mouse event.
///
/// "Unknown" is distinct in *intent* from "no modifiers": the protocol could
/// not report modifiers at all, versus reporting that none were held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
    /// Alt held.
    pub alt: bool,
    /// Control held.
    pub control: bool,
    /// `true` if the protocol cannot report modifiers (Typical/URXVT).
    pub unknown: bool,
}

impl Modifiers {
    /// No modifiers, and the protocol *can* report that ("no modifier").
    pub fn none() -> Self {
        Self::default()
    }

    /// The protocol cannot report modifiers at all ("unknown modifier").
    pub fn unknown() -> Self {
        Self {
            unknown: true,
            ..Self::default()
        }
    }
}

/// A fully decoded mouse event, in layout-local (0-based, rows-above-layout
/// subtracted) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// Layout-local position.
    pub position: Position,
    /// What kind of event this is.
    pub kind: MouseEventKind,
    /// Which button, if any.
    pub button: MouseButton,
    /// Modifiers held, or unknown.
    pub modifiers: Modifiers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_none_is_not_unknown() {
        let m = Modifiers::none();
        assert!(!m.unknown);
        assert!(!m.shift && !m.alt && !m.control);
    }

    #[test]
    fn modifiers_unknown_distinct_from_none() {
        let unknown = Modifiers::unknown();
        let none = Modifiers::none();
        assert_ne!(unknown, none);
    }
}
