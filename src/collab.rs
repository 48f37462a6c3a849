//! Interfaces to the external collaborators this crate does not implement:
//! the editable document buffer and the container layout. Only the shapes the
//! core touches are covered here; buffer text algorithms, completion,
//! and layout/CSS resolution live upstream of this crate.

use crate::event::{KeyPress, MouseEvent};
use crate::geometry::WritePosition;
use crate::screen::{Screen, WindowId};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// A read-only snapshot of a buffer's text and cursor/selection/search state,
/// as handed to a [`crate::processors::Processor`]. Coordinates are local to
/// the line the processor is currently transforming.
#[derive(Clone, Debug, Default)]
pub struct DocumentSnapshot {
    /// The line's text.
    pub text: String,
    /// Cursor offset, in characters, from the start of `text`.
    pub cursor: usize,
    /// An active selection's `(start, end)` character offsets on this line,
    /// if any, with `start <= end`.
    pub selection: Option<(usize, usize)>,
    /// The active search buffer's text, if a search is in progress.
    pub search_text: Option<String>,
    /// `true` while an incremental search is in progress (as opposed to a
    /// completed/committed one).
    pub incremental_search_active: bool,
    /// `true` once the owning application has finished (accepted or aborted).
    pub is_done: bool,
    /// The current auto-suggestion text, if any.
    pub suggestion: Option<String>,
}

impl DocumentSnapshot {
    /// `true` if the cursor sits at the end of `text`.
    pub fn cursor_at_end(&self) -> bool {
        self.cursor == self.text.chars().count()
    }

    /// `true` if `selection` is present and non-empty.
    pub fn has_selection(&self) -> bool {
        matches!(self.selection, Some((start, end)) if start < end)
    }
}

/// Invoked after the buffer's text changes.
pub type TextChangedHandler = Box<dyn FnMut(&DocumentSnapshot) + Send>;

/// Invoked when the buffer is accepted (e.g. Enter pressed); returns whether
/// the prompt should keep running.
pub type AcceptHandler = Box<dyn FnMut(&DocumentSnapshot) -> bool + Send>;

/// The editable document this crate reads from and dispatches validation
/// against, but never mutates the text of directly.
pub trait Buffer: Send {
    /// A snapshot of the current text and cursor/selection state.
    fn document(&self) -> DocumentSnapshot;

    /// Replaces the buffer's document wholesale.
    fn reset(&mut self, document: DocumentSnapshot);

    /// Runs validation; returns whether the current text is acceptable.
    fn validate_and_handle(&mut self) -> bool;

    /// Whether completion should trigger automatically as the user types.
    fn complete_while_typing(&self) -> bool;

    /// Registers a callback fired after every text change.
    fn on_text_changed(&mut self, handler: TextChangedHandler);
}

/// The declarative container tree the renderer writes the screen through.
pub trait Layout: Send + Sync {
    /// Moves focus to the next focusable window, wrapping around. A no-op
    /// when there are zero visible focusable windows.
    fn focus_next(&self);

    /// Moves focus to the previous focusable window, wrapping around.
    fn focus_previous(&self);

    /// Renders this layout (and its children) into `screen` within
    /// `write_position`.
    fn write_to_screen(&self, screen: &Screen, write_position: WritePosition);

    /// A snapshot, taken atomically at the start of the traversal, of every
    /// currently visible and focusable window.
    fn visible_focusable_windows(&self) -> Vec<WindowId>;
}

/// The modular-arithmetic focus-cycling behaviour a [`Layout`] delegates to:
/// tracks which of a snapshot of visible focusable windows currently holds
/// focus, and advances forward or backward with wraparound.
#[derive(Debug, Default)]
pub struct FocusRing {
    windows: Vec<WindowId>,
    focused: Option<usize>,
}

impl FocusRing {
    /// Builds a ring over `windows`, with none focused.
    pub fn new(windows: Vec<WindowId>) -> Self {
        Self {
            windows,
            focused: None,
        }
    }

    /// Marks `window` as focused, if present in the ring.
    pub fn set_focused(&mut self, window: WindowId) {
        self.focused = self.windows.iter().position(|&w| w == window);
    }

    /// The currently focused window, if any.
    pub fn focused(&self) -> Option<WindowId> {
        self.focused.map(|i| self.windows[i])
    }

    /// Advances focus forward, wrapping around. A no-op with zero windows.
    pub fn focus_next(&mut self) {
        if self.windows.is_empty() {
            return;
        }
        self.focused = Some(match self.focused {
            Some(i) => (i + 1) % self.windows.len(),
            None => 0,
        });
    }

    /// Advances focus backward, wrapping around. A no-op with zero windows.
    pub fn focus_previous(&mut self) {
        if self.windows.is_empty() {
            return;
        }
        self.focused = Some(match self.focused {
            Some(i) => (i + self.windows.len() - 1) % self.windows.len(),
            None => 0,
        });
    }
}

/// A registered click handler, dispatched by screen coordinate.
pub type MouseHandlerFn = Arc<dyn Fn(MouseEvent) + Send + Sync>;

/// A 2-D registry of mouse handlers, keyed by the coordinates a fragment's
/// click span covers.
#[derive(Default)]
pub struct MouseHandlers {
    handlers: HashMap<(u16, u16), MouseHandlerFn>,
}

impl MouseHandlers {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` at `(x, y)`, replacing any previous registration.
    pub fn register(&mut self, x: u16, y: u16, handler: MouseHandlerFn) {
        self.handlers.insert((x, y), handler);
    }

    /// The handler at `(x, y)`; a no-op for out-of-range or unregistered
    /// coordinates (negative coordinates are always out of range).
    pub fn get_handler(&self, x: i32, y: i32) -> MouseHandlerFn {
        let Ok(x) = u16::try_from(x) else {
            return no_op_handler();
        };
        let Ok(y) = u16::try_from(y) else {
            return no_op_handler();
        };
        self.handlers
            .get(&(x, y))
            .cloned()
            .unwrap_or_else(no_op_handler)
    }
}

fn no_op_handler() -> MouseHandlerFn {
    Arc::new(|_event| {})
}

/// Consumes decoded key-presses, in the order the application should act on
/// them.
pub trait KeyProcessor: Send {
    /// Feeds `key_press` in; `first=true` inserts it at the front of the
    /// processor's queue so it is the next event consumed (used by the
    /// scroll-without-position mouse handler).
    fn feed(&mut self, key_press: KeyPress, first: bool);
}

/// A minimal FIFO/deque-backed [`KeyProcessor`], useful as a reference
/// implementation and in tests.
#[derive(Default)]
pub struct QueueKeyProcessor {
    queue: VecDeque<KeyPress>,
}

impl QueueKeyProcessor {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the next key-press, if any.
    pub fn pop(&mut self) -> Option<KeyPress> {
        self.queue.pop_front()
    }

    /// The number of queued key-presses.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl KeyProcessor for QueueKeyProcessor {
    fn feed(&mut self, key_press: KeyPress, first: bool) {
        if first {
            self.queue.push_front(key_press);
        } else {
            self.queue.push_back(key_press);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::event::Key;

    fn ids(n: u64) -> Vec<WindowId> {
        let allocator = crate::screen::WindowIdAllocator::new();
        (0..n).map(|_| allocator.next()).collect()
    }

    #[test]
    fn focus_cycle_wraps_in_both_directions() {
        let windows = ids(3);
        let (a, b, c) = (windows[0], windows[1], windows[2]);
        let mut ring = FocusRing::new(windows.clone());
        ring.set_focused(a);
        ring.focus_next();
        assert_eq!(ring.focused(), Some(b));
        ring.focus_next();
        assert_eq!(ring.focused(), Some(c));
        ring.focus_next();
        assert_eq!(ring.focused(), Some(a));

        ring.set_focused(a);
        ring.focus_previous();
        assert_eq!(ring.focused(), Some(c));
    }

    #[test]
    fn focus_cycle_empty_ring_is_noop() {
        let mut ring = FocusRing::new(Vec::new());
        ring.focus_next();
        assert_eq!(ring.focused(), None);
    }

    #[test]
    fn mouse_handlers_out_of_range_is_noop() {
        let registry = MouseHandlers::new();
        let handler = registry.get_handler(-1, 5);
        handler(MouseEvent {
            position: crate::geometry::Position::origin(),
            kind: crate::event::MouseEventKind::MouseDown,
            button: crate::event::MouseButton::Left,
            modifiers: crate::event::Modifiers::none(),
        });
    }

    #[test]
    fn key_processor_front_insertion() {
        let mut processor = QueueKeyProcessor::new();
        processor.feed(KeyPress::from_data("a"), false);
        processor.feed(
            KeyPress {
                key: Key::Up,
                data: String::new(),
            },
            true,
        );
        assert_eq!(processor.pop().unwrap().key, Key::Up);
        assert_eq!(processor.len(), 1);
    }
}
