// SPDX-License-Identifier: MIT
//
// ked-term — Terminal backend for ked.
//
// Raw-mode control, ANSI escape output, and incremental input parsing
// for a line-oriented terminal editor. The crate talks to the terminal
// directly via termios and escape sequences rather than going through a
// TUI framework: the editor repaints whole lines into a staging buffer
// and flushes each frame with a single write, so the machinery here
// stays small and every byte sent is visible in one place.
//
// Layering, bottom to top: `ansi` knows the escape encodings, `terminal`
// owns raw mode and restore-on-panic, `screen` is the per-frame staging
// buffer, `input` turns stdin bytes into key events, `reader` feeds it
// from a background thread, and `event_loop` ties them together behind
// the `App` trait.

pub mod ansi;
pub mod event_loop;
pub mod input;
pub mod reader;
pub mod screen;
pub mod terminal;
