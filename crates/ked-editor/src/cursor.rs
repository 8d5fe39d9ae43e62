//! Cursor motion and viewport scrolling.
//!
//! All directional movement funnels through one entry point,
//! [`Buffer::move_cursor`]. Arrow keys are `(±1, 0)` and `(0, ±1)`;
//! Home/End decompose into horizontal moves to column zero or the row
//! end; Page Up/Down are `(0, ∓viewport_height)`. Keeping a single path
//! means every caller gets the same clamping, wrapping, and scrolling —
//! the editing methods in [`crate::buffer`] finish through the same
//! tail via [`Buffer::finish_motion`].
//!
//! # Sticky column
//!
//! Vertical motion tries to keep the cursor at the rendered column the
//! user last chose horizontally. That column is remembered in
//! `sticky_rx` and only rewritten by horizontal motion (and by edits,
//! which place the cursor deliberately), so a run of up/down presses
//! through short lines snaps back out on a long one.
//!
//! # Clamping, not failing
//!
//! User-reachable motion never errors. Moving past an edge clamps; left
//! at column zero unwraps to the previous line end; right at the line
//! end wraps to the next line start (including onto the virtual line
//! past the last row). The viewport follows with minimal motion: each
//! offset moves only as far as needed to keep the cursor on screen.

use crate::buffer::Buffer;
use crate::row::Row;

impl Buffer {
    /// Move the cursor by `dx` raw columns and `dy` rows.
    ///
    /// The vertical step lands first, clamped to `[0, line_count()]`.
    /// A pure vertical move then re-derives the raw column from the
    /// sticky rendered column on the new row; a horizontal move applies
    /// `dx` with wrapping at the line ends. `render_x` and the viewport
    /// offsets are re-established before returning.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let line_count = self.rows.len();

        self.cursor_y = (self.cursor_y as isize + dy).clamp(0, line_count as isize) as usize;

        if dx == 0 {
            self.cursor_x = self
                .current_row()
                .map_or(0, |row| row.rendered_to_raw(self.sticky_rx, self.tab_width));
        } else {
            let max_x = self.current_row().map_or(0, Row::len);
            let new_x = self.cursor_x as isize + dx;
            if new_x < 0 {
                if self.cursor_y > 0 {
                    self.cursor_y -= 1;
                    self.cursor_x = self.current_row().map_or(0, Row::len);
                } else {
                    self.cursor_x = 0;
                }
            } else if new_x as usize > max_x {
                if self.cursor_y < line_count {
                    self.cursor_y += 1;
                    self.cursor_x = 0;
                } else {
                    self.cursor_x = max_x;
                }
            } else {
                self.cursor_x = new_x as usize;
            }
        }

        self.finish_motion(dx != 0);
    }

    /// Push a new viewport size into the engine (startup and resize).
    /// Offsets re-clamp immediately so the cursor stays visible.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.clamp_viewport();
    }

    /// Shared tail of every cursor-affecting operation: re-derive the
    /// rendered column, remember it as the sticky column when the
    /// motion was deliberate (horizontal or an edit), and scroll the
    /// viewport after the cursor.
    pub(crate) fn finish_motion(&mut self, horizontal: bool) {
        self.render_x = self
            .current_row()
            .map_or(0, |row| row.raw_to_rendered(self.cursor_x, self.tab_width));
        if horizontal {
            self.sticky_rx = self.render_x;
        }
        self.clamp_viewport();
    }

    /// Minimal-motion scroll: each offset moves just far enough that
    /// `row_offset <= cursor_y < row_offset + viewport_height`, and the
    /// same for columns against `render_x`.
    fn clamp_viewport(&mut self) {
        self.row_offset = self
            .row_offset
            .min(self.cursor_y)
            .max((self.cursor_y + 1).saturating_sub(self.viewport_height));
        self.col_offset = self
            .col_offset
            .min(self.render_x)
            .max((self.render_x + 1).saturating_sub(self.viewport_width));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
