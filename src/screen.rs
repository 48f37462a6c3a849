//! `Screen`: the sparse styled 2-D character grid with cursor/menu tracking,
//! zero-width-escape attachment, and the z-indexed deferred-draw ("float")
//! queue.
//!
//! All mutating operations lock the screen's single internal mutex for their
//! whole duration, so each one is atomic; there are no ordering guarantees
//! *across* separate calls beyond the caller's own sequencing.

use crate::char_cell::Char;
use crate::geometry::{Position, WritePosition};
use crate::style::StyleString;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// An opaque identity token for a window/control, issued by the layout.
///
/// Stands in for the "marker interface used as a dictionary key" pattern the
/// Design Notes call out: a small monotonically-assigned integer, compared
/// only by equality/hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

/// Issues fresh, distinct [`WindowId`]s.
#[derive(Debug, Default)]
pub struct WindowIdAllocator(AtomicU64);

impl WindowIdAllocator {
    /// Creates a fresh allocator.
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Issues the next distinct window identity.
    pub fn next(&self) -> WindowId {
        WindowId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// A deferred drawing closure, executed against the screen's mutable interior
/// during [`Screen::draw_all_floats`], in z-index order.
pub type Float = Box<dyn FnOnce(&mut ScreenSurface, WritePosition) + Send>;

/// The screen's mutable interior: every primitive drawing operation lives
/// here so a running [`Float`] can call back into it (via
/// [`Screen::draw_all_floats`], which holds the lock for its entire drain
/// loop) without re-acquiring a lock it already holds.
pub struct ScreenSurface {
    grid: HashMap<u16, HashMap<u16, Char>>,
    width: u16,
    height: u16,
    construction_width: u16,
    construction_height: u16,
    default_char: Char,
    show_cursor: bool,
    cursor_positions: HashMap<WindowId, Position>,
    menu_positions: HashMap<WindowId, Position>,
    visible_windows: HashMap<WindowId, WritePosition>,
    zero_width_escapes: HashMap<u16, HashMap<u16, String>>,
    float_queue: Vec<(i64, WritePosition, Float)>,
}

impl ScreenSurface {
    fn new(width: u16, height: u16, default_char: Char, show_cursor: bool) -> Self {
        Self {
            grid: HashMap::new(),
            width,
            height,
            construction_width: width,
            construction_height: height,
            default_char,
            show_cursor,
            cursor_positions: HashMap::new(),
            menu_positions: HashMap::new(),
            visible_windows: HashMap::new(),
            zero_width_escapes: HashMap::new(),
            float_queue: Vec::new(),
        }
    }

    /// Reads the char at `(row, col)`: stored value, or `default_char`.
    pub fn get(&self, row: u16, col: u16) -> Char {
        self.grid
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .cloned()
            .unwrap_or_else(|| self.default_char.clone())
    }

    /// Writes `ch` at `(row, col)`, growing `width`/`height` monotonically.
    pub fn set(&mut self, row: u16, col: u16, ch: Char) {
        self.width = self.width.max(col.saturating_add(1));
        self.height = self.height.max(row.saturating_add(1));
        self.grid.entry(row).or_default().insert(col, ch);
    }

    /// Current width; reading never grows it.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Current height; reading never grows it.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The default char new cells read as.
    pub fn default_char(&self) -> &Char {
        &self.default_char
    }

    /// Whether the cursor should be shown after the next diff.
    pub fn show_cursor(&self) -> bool {
        self.show_cursor
    }

    /// Sets cursor visibility.
    pub fn set_show_cursor(&mut self, show: bool) {
        self.show_cursor = show;
    }

    /// Records `window`'s cursor position.
    pub fn set_cursor_position(&mut self, window: WindowId, pt: Position) {
        self.cursor_positions.insert(window, pt);
    }

    /// `window`'s cursor position, or the origin if never set.
    pub fn get_cursor_position(&self, window: WindowId) -> Position {
        self.cursor_positions
            .get(&window)
            .copied()
            .unwrap_or(Position::origin())
    }

    /// Records `window`'s menu position.
    pub fn set_menu_position(&mut self, window: WindowId, pt: Position) {
        self.menu_positions.insert(window, pt);
    }

    /// `window`'s menu position, falling back to its cursor position, then
    /// the origin.
    pub fn get_menu_position(&self, window: WindowId) -> Position {
        self.menu_positions
            .get(&window)
            .copied()
            .or_else(|| self.cursor_positions.get(&window).copied())
            .unwrap_or(Position::origin())
    }

    /// Records `window`'s granted write-position.
    pub fn set_visible_window(&mut self, window: WindowId, wp: WritePosition) {
        self.visible_windows.insert(window, wp);
    }

    /// The write-position granted to `window`, if visible this frame.
    pub fn get_visible_window(&self, window: WindowId) -> Option<WritePosition> {
        self.visible_windows.get(&window).copied()
    }

    /// Appends `s` to any zero-width escape already attached at `(row, col)`.
    /// Appending an empty string is a no-op.
    pub fn add_zero_width_escape(&mut self, row: u16, col: u16, s: &str) {
        if s.is_empty() {
            return;
        }
        self.zero_width_escapes
            .entry(row)
            .or_default()
            .entry(col)
            .or_default()
            .push_str(s);
    }

    /// The zero-width escape string attached at `(row, col)`, or `""`.
    pub fn get_zero_width_escapes(&self, row: u16, col: u16) -> String {
        self.zero_width_escapes
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .cloned()
            .unwrap_or_default()
    }

    /// Enqueues a deferred draw at `z_index`, to run against `position` during
    /// [`Screen::draw_all_floats`].
    pub fn draw_with_z_index(&mut self, z_index: i64, position: WritePosition, float: Float) {
        self.float_queue.push((z_index, position, float));
    }

    /// Composes `new_style` over every cell in `region`. `after=false` makes
    /// `new_style` win conflicts (`"{new} {existing}"`); `after=true` makes the
    /// existing style win (`"{existing} {new}"`). A no-op when `new_style` is
    /// empty or whitespace-only, or `region` is empty.
    pub fn fill_area(&mut self, region: WritePosition, new_style: &StyleString, after: bool) {
        if new_style.is_empty() || region.is_empty() {
            return;
        }
        for (x, y) in region.cells() {
            let (Ok(col), Ok(row)) = (u16::try_from(x), u16::try_from(y)) else {
                continue;
            };
            let existing = self.get(row, col);
            let composed = if after {
                new_style.compose_under(existing.style())
            } else {
                new_style.compose_over(existing.style())
            };
            let new_char = Char::new(existing.character(), composed);
            self.set(row, col, new_char);
        }
    }

    /// Composes `style` under every *stored* cell's existing style
    /// (`"{existing} {style}"`). A no-op when `style` is empty or the screen
    /// has no stored cells.
    pub fn append_style_to_content(&mut self, style: &StyleString) {
        if style.is_empty() {
            return;
        }
        let coords: Vec<(u16, u16)> = self
            .grid
            .iter()
            .flat_map(|(&row, cols)| cols.keys().map(move |&col| (row, col)))
            .collect();
        for (row, col) in coords {
            let existing = self.get(row, col);
            let composed = style.compose_under(existing.style());
            let new_char = Char::new(existing.character(), composed);
            self.set(row, col, new_char);
        }
    }

    fn clear(&mut self) {
        self.grid.clear();
        self.cursor_positions.clear();
        self.menu_positions.clear();
        self.visible_windows.clear();
        self.zero_width_escapes.clear();
        self.float_queue.clear();
        self.width = self.construction_width;
        self.height = self.construction_height;
    }
}

/// The sparse styled screen. See module docs for the atomicity contract.
pub struct Screen(Mutex<ScreenSurface>);

impl Screen {
    /// Creates a new screen with the given construction size, default char,
    /// and initial cursor visibility.
    pub fn new(width: u16, height: u16, default_char: Char, show_cursor: bool) -> Self {
        Self(Mutex::new(ScreenSurface::new(
            width,
            height,
            default_char,
            show_cursor,
        )))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScreenSurface> {
        self.0.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Reads the char at `(row, col)`.
    pub fn get(&self, row: u16, col: u16) -> Char {
        self.lock().get(row, col)
    }

    /// Writes `ch` at `(row, col)`.
    pub fn set(&self, row: u16, col: u16, ch: Char) {
        self.lock().set(row, col, ch);
    }

    /// Current width.
    pub fn width(&self) -> u16 {
        self.lock().width()
    }

    /// Current height.
    pub fn height(&self) -> u16 {
        self.lock().height()
    }

    /// The default char.
    pub fn default_char(&self) -> Char {
        self.lock().default_char().clone()
    }

    /// Whether the cursor should be shown.
    pub fn show_cursor(&self) -> bool {
        self.lock().show_cursor()
    }

    /// Sets cursor visibility.
    pub fn set_show_cursor(&self, show: bool) {
        self.lock().set_show_cursor(show);
    }

    /// Records `window`'s cursor position.
    pub fn set_cursor_position(&self, window: WindowId, pt: Position) {
        self.lock().set_cursor_position(window, pt);
    }

    /// `window`'s cursor position, or the origin.
    pub fn get_cursor_position(&self, window: WindowId) -> Position {
        self.lock().get_cursor_position(window)
    }

    /// Records `window`'s menu position.
    pub fn set_menu_position(&self, window: WindowId, pt: Position) {
        self.lock().set_menu_position(window, pt);
    }

    /// `window`'s menu position, falling back to cursor, then origin.
    pub fn get_menu_position(&self, window: WindowId) -> Position {
        self.lock().get_menu_position(window)
    }

    /// Records `window`'s granted write-position.
    pub fn set_visible_window(&self, window: WindowId, wp: WritePosition) {
        self.lock().set_visible_window(window, wp);
    }

    /// The write-position granted to `window`, if visible.
    pub fn get_visible_window(&self, window: WindowId) -> Option<WritePosition> {
        self.lock().get_visible_window(window)
    }

    /// Appends a zero-width escape at `(row, col)`.
    pub fn add_zero_width_escape(&self, row: u16, col: u16, s: &str) {
        self.lock().add_zero_width_escape(row, col, s);
    }

    /// The zero-width escape string at `(row, col)`.
    pub fn get_zero_width_escapes(&self, row: u16, col: u16) -> String {
        self.lock().get_zero_width_escapes(row, col)
    }

    /// Enqueues a deferred draw.
    pub fn draw_with_z_index(&self, z_index: i64, position: WritePosition, float: Float) {
        self.lock().draw_with_z_index(z_index, position, float);
    }

    /// Drains the float queue, executing each entry in ascending z-index order
    /// (FIFO within equal z), iteratively — a float may enqueue more floats,
    /// which are picked up in the same drain. On panic, the queue is cleared
    /// and the panic is propagated (mirrors "on exception, clear the queue and
    /// propagate").
    pub fn draw_all_floats(&self) {
        let mut guard = self.lock();
        loop {
            if guard.float_queue.is_empty() {
                break;
            }
            guard.float_queue.sort_by_key(|(z, _, _)| *z);
            let (_, position, float) = guard.float_queue.remove(0);
            let result = panic::catch_unwind(AssertUnwindSafe(|| float(&mut *guard, position)));
            if let Err(payload) = result {
                guard.float_queue.clear();
                panic::resume_unwind(payload);
            }
        }
    }

    /// Composes `new_style` over `region`.
    pub fn fill_area(&self, region: WritePosition, new_style: &StyleString, after: bool) {
        self.lock().fill_area(region, new_style, after);
    }

    /// Composes `style` under every stored cell.
    pub fn append_style_to_content(&self, style: &StyleString) {
        self.lock().append_style_to_content(style);
    }

    /// Drops all grid/escape/cursor/menu/float/visible-window state, resets
    /// `width`/`height` to construction values, and preserves `default_char`
    /// and `show_cursor`.
    pub fn clear(&self) {
        self.lock().clear();
    }
}
