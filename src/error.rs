//! Error taxonomy for the rendering and interaction engine.
//!
//! `NotHandled` from the spec's mouse/key dispatch is deliberately *not* a variant
//! here — it is a normal return value ([`Handled`]), never raised as an exception.
//! See the Design Notes on exceptions-as-sentinel.

use std::io;

/// Errors raised by the rendering and interaction engine.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    /// Underlying transport (terminal write/flush) failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `rows_above_layout` (or any quantity derived from it) was requested before a
    /// CPR response arrived. Caught at the single boundary in the mouse handler,
    /// which converts it to [`Handled::Not`].
    #[error("terminal height not yet known (no CPR response received)")]
    HeightUnknown,

    /// The legacy Win32 backend was constructed while the process is not attached
    /// to a console.
    #[error("no console screen buffer attached; try a VT100-capable terminal")]
    NoConsoleScreenBuffer,

    /// A platform-specific backend was constructed on the wrong platform.
    #[error("backend unsupported on this platform")]
    PlatformUnsupported,

    /// The prompt driver observed Ctrl-C.
    #[error("keyboard interrupt")]
    KeyboardInterrupt,

    /// The prompt driver observed Ctrl-D on an empty buffer.
    #[error("end of input")]
    EndOfInput,
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// The outcome of a handler that may decline to handle an event.
///
/// This is the sum type the Design Notes call for in place of a
/// exceptions-as-sentinel `NotImplemented`/`NotHandled` value: handlers that decline
/// return [`Handled::Not`] rather than raising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled<T> {
    /// The event was consumed; carries the handler's result.
    Yes(T),
    /// The handler declined; the event is not its concern.
    Not,
}

impl<T> Handled<T> {
    /// Returns `true` if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, Handled::Yes(_))
    }

    /// Extracts the handled value, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Handled::Yes(v) => Some(v),
            Handled::Not => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_unknown_display() {
        let err = ScreenError::HeightUnknown;
        assert_eq!(
            err.to_string(),
            "terminal height not yet known (no CPR response received)"
        );
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: ScreenError = io_err.into();
        assert!(matches!(err, ScreenError::Io(_)));
    }

    #[test]
    fn handled_is_not_an_error() {
        let h: Handled<u8> = Handled::Not;
        assert!(!h.is_handled());
        assert_eq!(h.into_option(), None);
        let y: Handled<u8> = Handled::Yes(3);
        assert!(y.is_handled());
        assert_eq!(y.into_option(), Some(3));
    }
}
