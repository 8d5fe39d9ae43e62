//! Errors for row and buffer operations.
//!
//! Two failure classes exist in the core. `OutOfRange` means a caller
//! handed a low-level row or buffer operation an index outside its
//! documented bound — a programming error, surfaced loudly rather than
//! silently repaired. `Io` means a load or save failed at the byte-stream
//! boundary — a runtime condition reported on the editor's message line.
//! Cursor motion produces neither: motions clamp.

use std::error;
use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// An error from a row or buffer operation.
#[derive(Debug)]
pub enum Error {
    /// An index violated a documented precondition, e.g. inserting past
    /// the end of a row or deleting a range that overruns it.
    OutOfRange {
        /// The offending index (for ranges, the end of the range).
        index: usize,
        /// The largest value the index was allowed to take.
        limit: usize,
    },

    /// A load or save failed at the byte-stream boundary.
    Io {
        /// The underlying I/O error.
        source: io::Error,
        /// Bytes successfully written before a save failed. `None` for
        /// load failures, where partial progress is discarded anyway.
        written: Option<usize>,
    },
}

impl Error {
    /// Build an `OutOfRange` error for `index` against `limit`.
    #[inline]
    #[must_use]
    pub const fn out_of_range(index: usize, limit: usize) -> Self {
        Self::OutOfRange { index, limit }
    }

    /// Wrap an I/O error from a save, recording how many bytes made it
    /// out before the failure.
    #[inline]
    #[must_use]
    pub const fn short_write(source: io::Error, written: usize) -> Self {
        Self::Io {
            source,
            written: Some(written),
        }
    }

    /// True when this error is recoverable by the user re-issuing the
    /// command (I/O failures are; out-of-range indices are bugs).
    #[inline]
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, limit } => {
                write!(f, "index {index} out of range (limit {limit})")
            }
            Self::Io {
                source,
                written: Some(n),
            } => write!(f, "{source} ({n} bytes written)"),
            Self::Io {
                source,
                written: None,
            } => source.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::OutOfRange { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Self::Io {
            source,
            written: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
