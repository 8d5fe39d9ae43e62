// SPDX-License-Identifier: MIT
//
// Per-frame staging buffer.
//
// The editor paints a whole frame — escape sequences and text — into a
// `Screen`, then the event loop hands the accumulated bytes to the
// terminal in a single `write_all`. Building the frame off-screen and
// flushing it at once is what prevents flicker: the terminal never sees
// a half-painted state.
//
// `Screen` implements `io::Write`, so the `ansi` helpers and `write!`
// compose directly into it. Writes are infallible (the backing store is
// a Vec); the `io::Result` signatures exist to satisfy the trait.

use std::io::{self, Write};

use crate::terminal::Size;

/// Staging buffer for one frame of terminal output.
///
/// Holds the terminal size the frame is being painted for, so painting
/// code can lay out rows and truncate columns without carrying the size
/// separately.
#[derive(Debug)]
pub struct Screen {
    size: Size,
    buf: Vec<u8>,
}

impl Screen {
    /// Create a screen for the given terminal size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        // One byte per cell is the floor; escape sequences ride on top,
        // but the Vec grows past it once and then stays.
        Self {
            size,
            buf: Vec::with_capacity(size.area() as usize),
        }
    }

    /// The terminal size this frame targets.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.size.cols
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.size.rows
    }

    /// Adopt a new terminal size (after SIGWINCH).
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Discard the staged bytes, keeping the allocation for the next frame.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The staged frame bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Whether nothing has been staged since the last [`clear`](Self::clear).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Write for Screen {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
