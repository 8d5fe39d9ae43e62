//! A single line of text and its tab-expanded rendering.
//!
//! A `Row` owns one line's literal bytes (`raw`, no trailing newline) and a
//! derived form (`rendered`) in which every tab is expanded to spaces up to
//! the next multiple of the tab width (clamped to at least one). The
//! rendered bytes are what the screen shows; the raw bytes are what the
//! file stores.
//!
//! # Design choices
//!
//! - **The rendered form is a cache, not a view.** Every mutation of `raw`
//!   regenerates `rendered` before returning, so readers never observe the
//!   two out of sync. Regeneration is O(line length), which is fine for a
//!   line editor — lines are short and edits touch one row at a time.
//!
//! - **Two column spaces.** A *raw* column indexes `raw`; a *rendered*
//!   column indexes `rendered`. [`raw_to_rendered`](Row::raw_to_rendered)
//!   and [`rendered_to_raw`](Row::rendered_to_raw) convert between them.
//!   Tabs make the mapping non-invertible point-for-point: a rendered
//!   column strictly inside a tab's expansion maps to the raw column just
//!   past the tab.
//!
//! - **Bytes, not chars.** The model operates on single-byte, single-column
//!   characters; tab is the only byte with a rendered width other than one.

use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One line of the document: raw content plus its rendered expansion.
#[derive(Clone, PartialEq, Eq)]
pub struct Row {
    raw: Vec<u8>,
    rendered: Vec<u8>,
}

impl Row {
    // -- Construction -------------------------------------------------------

    /// Create a row from line content (without a trailing newline),
    /// computing the rendered form.
    #[must_use]
    pub fn new(content: &[u8], tab_width: usize) -> Self {
        Self::from_vec(content.to_vec(), tab_width)
    }

    /// Create an empty row.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            raw: Vec::new(),
            rendered: Vec::new(),
        }
    }

    fn from_vec(raw: Vec<u8>, tab_width: usize) -> Self {
        let mut row = Self {
            raw,
            rendered: Vec::new(),
        };
        row.update_rendered(tab_width);
        row
    }

    // -- Access -------------------------------------------------------------

    /// The literal line content.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The tab-expanded content, as shown on screen.
    #[inline]
    #[must_use]
    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    /// Length of the raw content in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the row holds no content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Length of the rendered content — the row's total width on screen.
    #[inline]
    #[must_use]
    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    // -- Editing ------------------------------------------------------------

    /// Splice `content` into the raw bytes at `at` and regenerate the
    /// rendered form.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `at > len()`.
    pub fn insert(&mut self, at: usize, content: &[u8], tab_width: usize) -> Result<()> {
        if at > self.raw.len() {
            return Err(Error::out_of_range(at, self.raw.len()));
        }
        self.raw.splice(at..at, content.iter().copied());
        self.update_rendered(tab_width);
        Ok(())
    }

    /// Remove `count` bytes starting at `at` and regenerate the rendered
    /// form.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `at + count > len()`.
    pub fn delete(&mut self, at: usize, count: usize, tab_width: usize) -> Result<()> {
        let end = at.saturating_add(count);
        if end > self.raw.len() {
            return Err(Error::out_of_range(end, self.raw.len()));
        }
        self.raw.drain(at..end);
        self.update_rendered(tab_width);
        Ok(())
    }

    /// Split the row at `at`, keeping `[0, at)` here and returning the
    /// tail as a new row. Both rows end up freshly rendered.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `at > len()`.
    pub fn split_off(&mut self, at: usize, tab_width: usize) -> Result<Self> {
        if at > self.raw.len() {
            return Err(Error::out_of_range(at, self.raw.len()));
        }
        let tail = self.raw.split_off(at);
        self.update_rendered(tab_width);
        Ok(Self::from_vec(tail, tab_width))
    }

    /// Append `content` to the end of the row (line merge).
    pub fn append(&mut self, content: &[u8], tab_width: usize) {
        self.raw.extend_from_slice(content);
        self.update_rendered(tab_width);
    }

    // -- Column mapping -----------------------------------------------------

    /// Convert a raw column to its rendered column.
    ///
    /// Walks `raw[0..cx]` accumulating one column per byte, except tabs,
    /// which advance to the next multiple of `tab_width`. `cx` beyond the
    /// end of the row is treated as the end of the row.
    #[must_use]
    pub fn raw_to_rendered(&self, cx: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut rx = 0;
        for &byte in &self.raw[..cx.min(self.raw.len())] {
            if byte == b'\t' {
                rx += tab_width - rx % tab_width;
            } else {
                rx += 1;
            }
        }
        rx
    }

    /// Convert a rendered column back to a raw column: the first raw
    /// index whose accumulated rendered column reaches `rx`, or `len()`
    /// when `rx` lies beyond the row's total rendered width.
    ///
    /// Inverse of [`raw_to_rendered`](Self::raw_to_rendered) everywhere
    /// except strictly inside a tab's expansion, where the result lands
    /// just past the tab.
    #[must_use]
    pub fn rendered_to_raw(&self, rx: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut cur = 0;
        let mut cx = 0;
        while cur < rx && cx < self.raw.len() {
            if self.raw[cx] == b'\t' {
                cur += tab_width - cur % tab_width;
            } else {
                cur += 1;
            }
            cx += 1;
        }
        cx
    }

    // -- Rendering ----------------------------------------------------------

    /// Regenerate `rendered` from `raw`. Called by every mutation.
    fn update_rendered(&mut self, tab_width: usize) {
        let tab_width = tab_width.max(1);
        self.rendered.clear();
        for &byte in &self.raw {
            if byte == b'\t' {
                let pad = tab_width - self.rendered.len() % tab_width;
                let target = self.rendered.len() + pad;
                self.rendered.resize(target, b' ');
            } else {
                self.rendered.push(byte);
            }
        }
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row({:?})", String::from_utf8_lossy(&self.raw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
