//! # ked-editor — Editor core for ked
//!
//! This crate contains the in-memory text model of the editor:
//!
//! - **[`row`]** — `Row`, one line of text plus its tab-expanded rendering
//! - **[`buffer`]** — `Buffer`, the ordered rows of a document with cursor,
//!   viewport, and file identity, plus load/serialize/save and editing
//! - **[`cursor`]** — the cursor/viewport engine: directional movement with
//!   a sticky column, and minimal-motion scrolling
//! - **[`options`]** — editor defaults (tab width, quit confirmation, ...)
//! - **[`error`]** — the error type shared by row and buffer operations
//!
//! The crate knows nothing about terminals. Input decoding and screen
//! painting live in `ked-term` and the binary; they drive the model through
//! logical commands and read back rendered rows and offsets.

pub mod buffer;
pub mod cursor;
pub mod error;
pub mod options;
pub mod row;
