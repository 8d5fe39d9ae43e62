//! Document buffer — rows, cursor, viewport, and file identity.
//!
//! A `Buffer` owns the ordered [`Row`]s of one document together with the
//! cursor and viewport state that the engine in [`crate::cursor`] keeps
//! consistent, the optional filename, and the modified flag. It splits a
//! byte stream into rows on load, joins rows back into a byte stream on
//! save, and applies character-level edits at the cursor.
//!
//! # Invariants
//!
//! After every public operation:
//!
//! - `cursor_y <= line_count()`; equality is the virtual empty line past
//!   the last row, used only for appending.
//! - `cursor_x <= current row length` (zero on the virtual line).
//! - `render_x` equals the cursor's rendered column on the current row.
//! - The cursor lies inside the viewport:
//!   `row_offset <= cursor_y < row_offset + viewport_height`, and the
//!   same for `col_offset`/`render_x`/`viewport_width`.
//!
//! The editing methods here end by re-deriving `render_x` and re-clamping
//! the viewport through the same path cursor motion uses, so the
//! invariants cannot drift between the two.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::row::Row;

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// One open document: rows, cursor, viewport, and file identity.
pub struct Buffer {
    pub(crate) filename: Option<PathBuf>,
    pub(crate) rows: Vec<Row>,

    /// Cursor position: raw column into the current row, and row index.
    pub(crate) cursor_x: usize,
    pub(crate) cursor_y: usize,
    /// The cursor's rendered column, derived from `cursor_x`.
    pub(crate) render_x: usize,

    /// Document coordinates of the viewport's top-left corner.
    pub(crate) row_offset: usize,
    pub(crate) col_offset: usize,
    pub(crate) viewport_width: usize,
    pub(crate) viewport_height: usize,

    /// The last explicitly chosen rendered column; vertical motion
    /// restores the cursor toward it (see [`crate::cursor`]).
    pub(crate) sticky_rx: usize,

    pub(crate) tab_width: usize,
    pub(crate) modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no filename.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tab_width(Options::TAB_WIDTH)
    }

    /// Create an empty buffer with a specific tab stop width.
    #[must_use]
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            filename: None,
            rows: Vec::new(),
            cursor_x: 0,
            cursor_y: 0,
            render_x: 0,
            row_offset: 0,
            col_offset: 0,
            // Real dimensions arrive via set_viewport once the terminal
            // size is known.
            viewport_width: 80,
            viewport_height: 24,
            sticky_rx: 0,
            tab_width: tab_width.max(1),
            modified: false,
        }
    }

    /// Create a buffer from in-memory text. Lines split exactly as
    /// [`load`](Self::load) splits them.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.rows = split_lines(text.as_bytes(), buffer.tab_width);
        buffer
    }

    /// Open `path` and load its contents into a fresh buffer. The
    /// buffer's filename is set and it starts unmodified.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be opened or read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut buffer = Self::new();
        let file = fs::File::open(path)?;
        buffer.load(file)?;
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    // -- File I/O -----------------------------------------------------------

    /// Replace the buffer's contents with the stream's, splitting on
    /// `\n` and stripping a trailing `\r` from each line. Resets the
    /// cursor and viewport to the origin and clears the modified flag.
    /// The filename is left untouched.
    ///
    /// # Errors
    ///
    /// `Io` if the stream cannot be read; the buffer is unchanged then.
    pub fn load<R: Read>(&mut self, mut source: R) -> Result<()> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;

        self.rows = split_lines(&bytes, self.tab_width);
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.render_x = 0;
        self.row_offset = 0;
        self.col_offset = 0;
        self.sticky_rx = 0;
        self.modified = false;
        Ok(())
    }

    /// The document as a byte stream: every row's raw content followed
    /// by `\n`. A document loaded without a trailing newline serializes
    /// with one added.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let len = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::with_capacity(len);
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        out
    }

    /// Serialize and write the document to `sink`. Clears the modified
    /// flag and returns the byte count on full success.
    ///
    /// # Errors
    ///
    /// `Io` carrying the bytes written so far when the sink fails or
    /// stops accepting bytes; the modified flag is left set.
    pub fn save<W: Write>(&mut self, mut sink: W) -> Result<usize> {
        let bytes = self.serialize();
        let mut written = 0;
        while written < bytes.len() {
            match sink.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(Error::short_write(
                        io::Error::new(io::ErrorKind::WriteZero, "sink accepted no more bytes"),
                        written,
                    ));
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::short_write(e, written)),
            }
        }
        if let Err(e) = sink.flush() {
            return Err(Error::short_write(e, written));
        }
        self.modified = false;
        Ok(written)
    }

    /// Create (or truncate) `path` and save into it. The buffer's
    /// filename is updated only after the write fully succeeds.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be created or the write fails.
    pub fn save_as(&mut self, path: &Path) -> Result<usize> {
        let file = fs::File::create(path)?;
        let written = self.save(file)?;
        self.filename = Some(path.to_path_buf());
        Ok(written)
    }

    // -- Rows ---------------------------------------------------------------

    /// All rows in document order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows. The cursor may additionally sit on the virtual
    /// empty line at index `line_count()`.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    /// The row under the cursor, or `None` on the virtual line.
    #[inline]
    #[must_use]
    pub fn current_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor_y)
    }

    /// Insert `row` at index `at`, shifting later rows down.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `at > line_count()`.
    pub fn insert_row(&mut self, at: usize, row: Row) -> Result<()> {
        if at > self.rows.len() {
            return Err(Error::out_of_range(at, self.rows.len()));
        }
        self.rows.insert(at, row);
        self.modified = true;
        Ok(())
    }

    /// Remove and return the row at index `at`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `at >= line_count()`.
    pub fn delete_row(&mut self, at: usize) -> Result<Row> {
        if at >= self.rows.len() {
            return Err(Error::out_of_range(at, self.rows.len()));
        }
        self.modified = true;
        Ok(self.rows.remove(at))
    }

    // -- Editing at the cursor ----------------------------------------------

    /// Insert one byte at the cursor and advance it. On the virtual line
    /// an empty row is appended first.
    pub fn insert_char(&mut self, byte: u8) {
        if self.cursor_y == self.rows.len() {
            self.rows.push(Row::empty());
        }
        let tab_width = self.tab_width;
        self.rows[self.cursor_y]
            .insert(self.cursor_x, &[byte], tab_width)
            .expect("cursor column within row");
        self.cursor_x += 1;
        self.modified = true;
        self.finish_motion(true);
    }

    /// Split the current line at the cursor; the cursor moves to column
    /// zero of the new line. At column zero (including the virtual line)
    /// an empty row is inserted above instead.
    pub fn insert_newline(&mut self) {
        if self.cursor_x == 0 {
            self.rows.insert(self.cursor_y, Row::empty());
        } else {
            let tab_width = self.tab_width;
            let tail = self.rows[self.cursor_y]
                .split_off(self.cursor_x, tab_width)
                .expect("cursor column within row");
            self.rows.insert(self.cursor_y + 1, tail);
        }
        self.cursor_y += 1;
        self.cursor_x = 0;
        self.modified = true;
        self.finish_motion(true);
    }

    /// Delete the byte before the cursor. At column zero the current
    /// row merges into the previous one and the cursor lands at the
    /// join. At the origin, and on the virtual line, this is a no-op.
    pub fn delete_char(&mut self) {
        if self.cursor_y == self.rows.len() {
            return;
        }
        if self.cursor_x == 0 && self.cursor_y == 0 {
            return;
        }

        if self.cursor_x > 0 {
            let tab_width = self.tab_width;
            self.rows[self.cursor_y]
                .delete(self.cursor_x - 1, 1, tab_width)
                .expect("cursor column within row");
            self.cursor_x -= 1;
        } else {
            let removed = self.rows.remove(self.cursor_y);
            self.cursor_y -= 1;
            self.cursor_x = self.rows[self.cursor_y].len();
            let tab_width = self.tab_width;
            self.rows[self.cursor_y].append(removed.raw(), tab_width);
        }
        self.modified = true;
        self.finish_motion(true);
    }

    // -- Cursor & viewport state --------------------------------------------

    /// Raw column of the cursor.
    #[inline]
    #[must_use]
    pub const fn cursor_x(&self) -> usize {
        self.cursor_x
    }

    /// Row index of the cursor (`line_count()` on the virtual line).
    #[inline]
    #[must_use]
    pub const fn cursor_y(&self) -> usize {
        self.cursor_y
    }

    /// Rendered column of the cursor.
    #[inline]
    #[must_use]
    pub const fn render_x(&self) -> usize {
        self.render_x
    }

    /// First visible row.
    #[inline]
    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible rendered column.
    #[inline]
    #[must_use]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Viewport width in columns.
    #[inline]
    #[must_use]
    pub const fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    /// Viewport height in rows.
    #[inline]
    #[must_use]
    pub const fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    // -- Metadata -----------------------------------------------------------

    /// The file this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Associate the buffer with a file without saving.
    #[inline]
    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// True after any mutation since the last successful save or load.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// The tab stop width rows render with.
    #[inline]
    #[must_use]
    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.rows.len())
            .field("cursor", &(self.cursor_x, self.cursor_y))
            .field("modified", &self.modified)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split a byte stream into rows on `\n`, stripping one trailing `\r`
/// per line. A trailing newline does not produce an empty final row, so
/// serializing the result reproduces the input exactly.
fn split_lines(bytes: &[u8], tab_width: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = bytes
        .split(|&byte| byte == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            Row::new(line, tab_width)
        })
        .collect();

    // split() yields one trailing empty fragment for input ending in
    // `\n`, and a single empty fragment for empty input. Neither is a
    // document row.
    if bytes.last().is_none_or(|&byte| byte == b'\n') {
        rows.pop();
    }
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_lines(buffer: &Buffer) -> Vec<&[u8]> {
        buffer.rows().iter().map(Row::raw).collect()
    }

    // -- Construction & line splitting --------------------------------------

    #[test]
    fn new_buffer_is_empty() {
        let buffer = Buffer::new();
        assert_eq!(buffer.line_count(), 0);
        assert_eq!(buffer.cursor_x(), 0);
        assert_eq!(buffer.cursor_y(), 0);
        assert!(!buffer.is_modified());
        assert!(buffer.filename().is_none());
    }

    #[test]
    fn from_text_splits_lines() {
        let buffer = Buffer::from_text("abc\nde");
        assert_eq!(raw_lines(&buffer), vec![&b"abc"[..], b"de"]);
    }

    #[test]
    fn trailing_newline_adds_no_empty_row() {
        let buffer = Buffer::from_text("abc\nde\n");
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert_eq!(Buffer::from_text("").line_count(), 0);
    }

    #[test]
    fn blank_lines_become_empty_rows() {
        let buffer = Buffer::from_text("a\n\nb\n");
        assert_eq!(raw_lines(&buffer), vec![&b"a"[..], b"", b"b"]);
    }

    #[test]
    fn crlf_is_stripped() {
        let buffer = Buffer::from_text("a\r\nb\r\n");
        assert_eq!(raw_lines(&buffer), vec![&b"a"[..], b"b"]);
    }

    // -- load ---------------------------------------------------------------

    #[test]
    fn load_replaces_contents_and_resets_cursor() {
        let mut buffer = Buffer::from_text("one\ntwo\nthree\n");
        buffer.move_cursor(2, 2);
        buffer.insert_char(b'!');
        assert!(buffer.is_modified());

        buffer.load(&b"fresh\n"[..]).unwrap();
        assert_eq!(raw_lines(&buffer), vec![&b"fresh"[..]]);
        assert_eq!(buffer.cursor_x(), 0);
        assert_eq!(buffer.cursor_y(), 0);
        assert_eq!(buffer.row_offset(), 0);
        assert_eq!(buffer.col_offset(), 0);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn load_keeps_filename() {
        let mut buffer = Buffer::new();
        buffer.set_filename(PathBuf::from("kept.txt"));
        buffer.load(&b"x\n"[..]).unwrap();
        assert_eq!(buffer.filename(), Some(Path::new("kept.txt")));
    }

    // -- serialize ----------------------------------------------------------

    #[test]
    fn serialize_round_trips_trailing_newline() {
        let doc = b"alpha\nbeta\n";
        let mut buffer = Buffer::new();
        buffer.load(&doc[..]).unwrap();
        assert_eq!(buffer.serialize(), doc);
    }

    #[test]
    fn serialize_appends_missing_trailing_newline() {
        let mut buffer = Buffer::new();
        buffer.load(&b"alpha\nbeta"[..]).unwrap();
        assert_eq!(buffer.serialize(), b"alpha\nbeta\n");
    }

    #[test]
    fn serialize_empty_buffer() {
        assert_eq!(Buffer::new().serialize(), b"");
    }

    // -- save ---------------------------------------------------------------

    #[test]
    fn save_writes_all_bytes_and_clears_modified() {
        let mut buffer = Buffer::from_text("hello\nworld\n");
        buffer.insert_char(b'!');
        assert!(buffer.is_modified());

        let mut sink = Vec::new();
        let written = buffer.save(&mut sink).unwrap();
        assert_eq!(sink, b"!hello\nworld\n");
        assert_eq!(written, sink.len());
        assert!(!buffer.is_modified());
    }

    /// A sink that accepts a fixed number of bytes, then fails.
    struct ChokingSink {
        accept: usize,
    }

    impl Write for ChokingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accept == 0 {
                return Err(io::Error::other("sink choked"));
            }
            let n = buf.len().min(self.accept);
            self.accept -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn save_reports_partial_write_count() {
        let mut buffer = Buffer::from_text("hello\nworld\n");
        buffer.insert_char(b'!');

        let err = buffer.save(ChokingSink { accept: 5 }).unwrap_err();
        match err {
            Error::Io { written, .. } => assert_eq!(written, Some(5)),
            Error::OutOfRange { .. } => panic!("wrong error kind"),
        }
        // A failed save must not pretend the document is clean.
        assert!(buffer.is_modified());
    }

    #[test]
    fn save_as_and_from_file_round_trip() {
        let dir = std::env::temp_dir().join("ked_editor_test");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("roundtrip.txt");

        let mut buffer = Buffer::from_text("hello\nworld");
        buffer.insert_char(b'>');
        let written = buffer.save_as(&path).unwrap();
        assert_eq!(written, b">hello\nworld\n".len());
        assert_eq!(buffer.filename(), Some(path.as_path()));
        assert!(!buffer.is_modified());

        let loaded = Buffer::from_file(&path).unwrap();
        assert_eq!(loaded.serialize(), b">hello\nworld\n");
        assert_eq!(loaded.filename(), Some(path.as_path()));
        assert!(!loaded.is_modified());

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = Buffer::from_file(Path::new("/nonexistent/ked/file")).unwrap_err();
        assert!(err.is_io());
    }

    // -- Row operations -----------------------------------------------------

    #[test]
    fn insert_row_orders_and_marks_modified() {
        let mut buffer = Buffer::from_text("a\nc\n");
        buffer.insert_row(1, Row::new(b"b", 4)).unwrap();
        assert_eq!(raw_lines(&buffer), vec![&b"a"[..], b"b", b"c"]);
        assert!(buffer.is_modified());
    }

    #[test]
    fn insert_row_at_end() {
        let mut buffer = Buffer::from_text("a\n");
        buffer.insert_row(1, Row::new(b"z", 4)).unwrap();
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn insert_row_out_of_range() {
        let mut buffer = Buffer::from_text("a\n");
        assert!(buffer.insert_row(2, Row::empty()).is_err());
        assert!(!buffer.is_modified());
    }

    #[test]
    fn delete_row_returns_row() {
        let mut buffer = Buffer::from_text("a\nb\nc\n");
        let removed = buffer.delete_row(1).unwrap();
        assert_eq!(removed.raw(), b"b");
        assert_eq!(raw_lines(&buffer), vec![&b"a"[..], b"c"]);
        assert!(buffer.is_modified());
    }

    #[test]
    fn delete_row_out_of_range() {
        let mut buffer = Buffer::from_text("a\n");
        assert!(buffer.delete_row(1).is_err());
    }

    #[test]
    fn current_row_on_virtual_line_is_none() {
        let mut buffer = Buffer::from_text("a\n");
        assert!(buffer.current_row().is_some());
        buffer.move_cursor(0, 1);
        assert_eq!(buffer.cursor_y(), 1);
        assert!(buffer.current_row().is_none());
    }

    // -- Editing at the cursor ----------------------------------------------

    #[test]
    fn insert_char_advances_cursor() {
        let mut buffer = Buffer::from_text("ac\n");
        buffer.move_cursor(1, 0);
        buffer.insert_char(b'b');
        assert_eq!(raw_lines(&buffer), vec![&b"abc"[..]]);
        assert_eq!(buffer.cursor_x(), 2);
        assert!(buffer.is_modified());
    }

    #[test]
    fn insert_char_on_virtual_line_appends_row() {
        let mut buffer = Buffer::new();
        buffer.insert_char(b'x');
        assert_eq!(raw_lines(&buffer), vec![&b"x"[..]]);
        assert_eq!(buffer.cursor_x(), 1);
        assert_eq!(buffer.cursor_y(), 0);
    }

    #[test]
    fn insert_char_updates_render_x_through_tabs() {
        let mut buffer = Buffer::from_text("\t\n");
        buffer.move_cursor(1, 0);
        buffer.insert_char(b'a');
        assert_eq!(buffer.cursor_x(), 2);
        assert_eq!(buffer.render_x(), 5);
    }

    #[test]
    fn enter_splits_line_at_cursor() {
        let mut buffer = Buffer::from_text("hello world\n");
        buffer.move_cursor(5, 0);
        buffer.insert_newline();
        assert_eq!(raw_lines(&buffer), vec![&b"hello"[..], b" world"]);
        assert_eq!(buffer.cursor_x(), 0);
        assert_eq!(buffer.cursor_y(), 1);
    }

    #[test]
    fn enter_at_column_zero_inserts_line_above() {
        let mut buffer = Buffer::from_text("abc\n");
        buffer.insert_newline();
        assert_eq!(raw_lines(&buffer), vec![&b""[..], b"abc"]);
        assert_eq!(buffer.cursor_y(), 1);
        assert_eq!(buffer.cursor_x(), 0);
    }

    #[test]
    fn enter_on_virtual_line_appends_row() {
        let mut buffer = Buffer::from_text("abc\n");
        buffer.move_cursor(0, 1);
        buffer.insert_newline();
        assert_eq!(raw_lines(&buffer), vec![&b"abc"[..], b""]);
        assert_eq!(buffer.cursor_y(), 2);
    }

    #[test]
    fn backspace_deletes_before_cursor() {
        let mut buffer = Buffer::from_text("abc\n");
        buffer.move_cursor(2, 0);
        buffer.delete_char();
        assert_eq!(raw_lines(&buffer), vec![&b"ac"[..]]);
        assert_eq!(buffer.cursor_x(), 1);
    }

    #[test]
    fn backspace_at_column_zero_merges_lines() {
        let mut buffer = Buffer::from_text("abc\nde\n");
        buffer.move_cursor(0, 1);
        buffer.delete_char();
        assert_eq!(raw_lines(&buffer), vec![&b"abcde"[..]]);
        assert_eq!(buffer.cursor_x(), 3);
        assert_eq!(buffer.cursor_y(), 0);
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut buffer = Buffer::from_text("abc\n");
        buffer.delete_char();
        assert_eq!(raw_lines(&buffer), vec![&b"abc"[..]]);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn backspace_on_virtual_line_is_noop() {
        let mut buffer = Buffer::from_text("abc\n");
        buffer.move_cursor(0, 1);
        buffer.delete_char();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.cursor_y(), 1);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn merge_rerenders_joined_row() {
        let mut buffer = Buffer::from_text("ab\n\tc\n");
        buffer.move_cursor(0, 1);
        buffer.delete_char();
        assert_eq!(buffer.rows()[0].raw(), b"ab\tc");
        assert_eq!(buffer.rows()[0].rendered(), b"ab  c");
    }

    // -- Debug --------------------------------------------------------------

    #[test]
    fn debug_summarizes_state() {
        let debug = format!("{:?}", Buffer::from_text("a\nb\n"));
        assert!(debug.contains("lines: 2"));
        assert!(debug.contains("modified: false"));
    }
}
