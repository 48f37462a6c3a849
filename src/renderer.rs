//! `Renderer`: owns the last-rendered [`Screen`], drives a layout's
//! write-to-screen pass through [`ScreenDiff`], and brackets each frame's
//! output in a synchronized-output region.
//!
//! Generalizes a single-shot render-loop shape (own previous state, diff,
//! flush) to a float draw queue, resize/CPR bookkeeping, and a
//! finally-guaranteed sync-output close across a long-lived terminal
//! session.

use std::panic::{self, AssertUnwindSafe};

use crate::char_cell::Char;
use crate::collab::{Layout, MouseHandlers};
use crate::diff::{DiffState, RedrawReason, ScreenDiff};
use crate::error::{Result, ScreenError};
use crate::geometry::{Position, Size, WritePosition};
use crate::output::{CursorShape, Output};
use crate::screen::{Screen, WindowId};
use crate::style::StyleString;

/// Per-frame parameters a caller supplies to [`Renderer::render`].
pub struct RenderRequest<'a> {
    /// The layout to write into this frame's screen.
    pub layout: &'a dyn Layout,
    /// Which window's cursor position to place the terminal cursor at.
    pub focused_window: Option<WindowId>,
    /// The terminal/window title to set, if any.
    pub title: Option<String>,
    /// Whether the alternate screen buffer should be active.
    pub enter_alternate_screen: bool,
    /// Whether mouse tracking should be enabled.
    pub mouse_support: bool,
    /// Whether bracketed-paste mode should be enabled.
    pub bracketed_paste: bool,
    /// The cursor shape to draw.
    pub cursor_shape: CursorShape,
    /// `true` on the application's last frame (forces a full redraw so the
    /// terminal is left in a clean, fully-drawn state).
    pub finishing: bool,
    /// A fresh mouse-handler registry for this frame, if the layout built
    /// one; `None` leaves the renderer's existing registry untouched.
    pub mouse_handlers: Option<MouseHandlers>,
}

/// Owns the renderer's cross-frame state and drives render/erase/
/// clear cycles against an [`Output`] backend.
pub struct Renderer<O: Output> {
    output: O,
    cursor_pos: Position,
    last_screen: Option<Screen>,
    last_size: Option<Size>,
    last_style: Option<crate::style::ResolvedStyle>,
    last_cursor_shape: Option<CursorShape>,
    mouse_handlers: MouseHandlers,
    min_available_height: u16,
    cursor_key_mode_reset_flag: bool,
    mouse_support_enabled: bool,
    height_is_known: bool,
    rows_above_layout: Option<u16>,
    rows_above_cursor: u16,
    alternate_screen_entered: bool,
    bracketed_paste_enabled: bool,
    title: Option<String>,
}

impl<O: Output> Renderer<O> {
    /// Builds a renderer over `output`, with no prior frame and an empty
    /// mouse-handler registry.
    pub fn new(output: O) -> Self {
        Self {
            output,
            cursor_pos: Position::origin(),
            last_screen: None,
            last_size: None,
            last_style: None,
            last_cursor_shape: None,
            mouse_handlers: MouseHandlers::new(),
            min_available_height: 0,
            cursor_key_mode_reset_flag: false,
            mouse_support_enabled: false,
            height_is_known: false,
            rows_above_layout: None,
            rows_above_cursor: 0,
            alternate_screen_entered: false,
            bracketed_paste_enabled: false,
            title: None,
        }
    }

    /// The output backend this renderer drives.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// The output backend, mutably (for callers that need direct access,
    /// e.g. to query `size()` before constructing a [`RenderRequest`]).
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// `true` once a CPR response has told the renderer how many rows sit
    /// above its drawing region.
    pub fn height_is_known(&self) -> bool {
        self.height_is_known
    }

    /// The number of terminal rows above the application's drawing region.
    /// Errors with [`ScreenError::HeightUnknown`] before the first CPR
    /// response following construction or a resize.
    pub fn rows_above_layout(&self) -> Result<u16> {
        self.rows_above_layout.ok_or(ScreenError::HeightUnknown)
    }

    /// The number of rows above the cursor as last reported by the Windows
    /// console screen buffer info. Not reset by [`Renderer::reset_for_resize`].
    pub fn rows_above_cursor(&self) -> u16 {
        self.rows_above_cursor
    }

    /// Records a fresh rows-above-cursor reading (Windows console path).
    pub fn set_rows_above_cursor(&mut self, rows: u16) {
        self.rows_above_cursor = rows;
    }

    /// The mouse-handler registry currently in effect.
    pub fn mouse_handlers(&self) -> &MouseHandlers {
        &self.mouse_handlers
    }

    /// Handles a CPR response: records the absolute cursor row as
    /// `rows_above_layout` and marks the height known.
    pub fn report_absolute_cursor_row(&mut self, row: u16) {
        self.rows_above_layout = Some(row);
        self.height_is_known = true;
    }

    /// Resets the renderer's per-session state (everything but
    /// `rows_above_cursor`) to its construction values, in memory only —
    /// performs zero I/O. The next `render()` call will take
    /// the full-redraw branch because `last_screen` is now `None`.
    pub fn reset_for_resize(&mut self) {
        self.cursor_pos = Position::origin();
        self.last_screen = None;
        self.last_size = None;
        self.last_style = None;
        self.last_cursor_shape = None;
        self.mouse_handlers = MouseHandlers::new();
        self.min_available_height = 0;
        self.cursor_key_mode_reset_flag = false;
        self.mouse_support_enabled = false;
        self.height_is_known = false;
        self.rows_above_layout = None;
    }

    fn clear_render_memory(&mut self) {
        self.cursor_pos = Position::origin();
        self.last_screen = None;
        self.last_size = None;
        self.last_style = None;
        self.last_cursor_shape = None;
    }

    fn apply_output_level_setup(&mut self, request: &RenderRequest<'_>) {
        if request.enter_alternate_screen && !self.alternate_screen_entered {
            self.output.enter_alternate_screen();
            self.alternate_screen_entered = true;
        } else if !request.enter_alternate_screen && self.alternate_screen_entered {
            self.output.quit_alternate_screen();
            self.alternate_screen_entered = false;
        }

        if request.bracketed_paste && !self.bracketed_paste_enabled {
            self.output.enable_bracketed_paste();
            self.bracketed_paste_enabled = true;
        } else if !request.bracketed_paste && self.bracketed_paste_enabled {
            self.output.disable_bracketed_paste();
            self.bracketed_paste_enabled = false;
        }

        if request.mouse_support && !self.mouse_support_enabled {
            self.output.enable_mouse();
            self.mouse_support_enabled = true;
        } else if !request.mouse_support && self.mouse_support_enabled {
            self.output.disable_mouse();
            self.mouse_support_enabled = false;
        }

        if !self.cursor_key_mode_reset_flag {
            self.output.reset_cursor_key_mode();
            self.cursor_key_mode_reset_flag = true;
        }

        if request.title != self.title {
            match &request.title {
                Some(title) => self.output.set_title(title),
                None => self.output.clear_title(),
            }
            self.title = request.title.clone();
        }
    }

    /// Runs one full render cycle: applies output-level setup, opens a
    /// synchronized-output region, draws the layout and diffs it against
    /// the previous frame, places the cursor, and flushes — closing the
    /// sync-output region even if drawing panics.
    pub fn render(&mut self, mut request: RenderRequest<'_>) -> Result<()> {
        if let Some(handlers) = request.mouse_handlers.take() {
            self.mouse_handlers = handlers;
        }
        self.apply_output_level_setup(&request);
        self.output.begin_synchronized_output();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.render_body(&request)));

        self.output.end_synchronized_output();

        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    fn render_body(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        let size = self.output.size()?;
        let rows_above = self.rows_above_layout.unwrap_or(0);
        self.min_available_height = size.height.saturating_sub(rows_above);

        let blank = Char::new(" ", StyleString::new("[Transparent]"));
        let screen = Screen::new(size.width, self.min_available_height, blank, true);

        let write_position = WritePosition::new(
            0,
            0,
            i32::from(size.width),
            i32::from(self.min_available_height),
        );
        request.layout.write_to_screen(&screen, write_position);
        screen.draw_all_floats();

        let reason = RedrawReason {
            width_changed: self.last_size.map(|s| s.width) != Some(size.width),
            finishing: request.finishing,
        };
        let diff_state = DiffState {
            cursor: Some(self.cursor_pos),
            last_style: self.last_style,
        };
        let new_state = ScreenDiff::render(
            self.last_screen.as_ref(),
            &screen,
            request.focused_window,
            reason,
            diff_state,
            &mut self.output,
        );

        if Some(request.cursor_shape) != self.last_cursor_shape {
            self.output.set_cursor_shape(request.cursor_shape);
            self.last_cursor_shape = Some(request.cursor_shape);
        }

        self.output.flush();

        self.cursor_pos = new_state.cursor.unwrap_or(Position::origin());
        self.last_style = new_state.last_style;
        self.last_size = Some(size);
        self.last_screen = Some(screen);
        Ok(())
    }

    /// Moves the cursor back to the drawn region's known origin, erases
    /// downward, and resets attributes/autowrap — all inside one
    /// synchronized-output region. Callers must call
    /// [`Renderer::reset_for_resize`] first if a resize may have occurred,
    /// since this never performs relative movement from stale state.
    pub fn erase(&mut self, leave_alternate_screen: bool) {
        self.output.begin_synchronized_output();
        self.output.write("\x1b[H");
        self.output.erase_down();
        self.output.reset_attributes();
        self.output.enable_autowrap();
        if leave_alternate_screen && self.alternate_screen_entered {
            self.output.quit_alternate_screen();
            self.alternate_screen_entered = false;
        }
        self.output.flush();
        self.output.end_synchronized_output();
        self.clear_render_memory();
    }

    /// Clears the screen entirely: inlines the erase sequence (never
    /// delegates to [`Renderer::erase`], which would nest synchronized-output
    /// regions), then performs a full-screen erase and cursor home, flushes,
    /// resets render memory, and requests a fresh CPR so height is
    /// rediscovered on the next response.
    pub fn clear(&mut self) {
        self.output.begin_synchronized_output();
        self.output.write("\x1b[H");
        self.output.erase_down();
        self.output.reset_attributes();
        self.output.enable_autowrap();
        self.output.erase_screen();
        self.output.write("\x1b[H");
        self.output.flush();
        self.output.end_synchronized_output();
        self.clear_render_memory();
        self.height_is_known = false;
        self.rows_above_layout = None;
        self.output.request_cursor_position_report();
    }
}
