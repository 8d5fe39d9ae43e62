// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into structured key events. Handles the input
// the editor's terminal setup can produce:
//
// - Legacy CSI sequences (arrows, Home/End, Delete, Page Up/Down)
// - SS3 sequences (arrow and Home/End alternate encoding)
// - Control characters (Ctrl+letter as a single byte)
// - Alt+key (ESC followed by a printable or control character)
//
// Bytes outside this alphabet — unrecognized escape sequences, bytes
// above 0x7F — are consumed and dropped rather than surfaced as garbage
// keystrokes.
//
// # Design
//
// The parser maintains a small internal byte buffer because escape
// sequences can span multiple `read()` calls. Feed bytes with
// [`Parser::advance`], retrieve events from the returned `Vec`.
// After a timeout with no new bytes, call [`Parser::flush`] to
// emit any pending lone ESC as a real Escape keypress.
//
// Number parsing is done directly on `&[u8]` — no intermediate
// `String` allocation for CSI parameter decoding.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A keyboard event with key identity and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys (Shift, Alt, Ctrl).
    pub modifiers: Modifiers,
}

/// Identity of a key.
///
/// Named keys have dedicated variants; printable characters use
/// [`Char`](KeyCode::Char).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Matches the xterm CSI modifier encoding (`param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Terminal input parser.
///
/// Feed raw bytes via [`advance`](Parser::advance) and collect
/// structured [`KeyEvent`]s. The parser buffers incomplete sequences
/// internally and resumes parsing when more bytes arrive.
///
/// # Escape vs escape-sequence ambiguity
///
/// A bare `ESC` byte (0x1B) could be either a standalone Escape
/// keypress or the start of a multi-byte escape sequence. The parser
/// holds a lone ESC as pending. The caller should wait a short timeout
/// and then call [`flush`](Parser::flush) to emit the pending ESC as a
/// real Escape key event.
pub struct Parser {
    /// Accumulated raw bytes waiting to be parsed.
    buf: Vec<u8>,
}

impl Parser {
    /// Create a new parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw bytes from stdin and return all events that can be parsed.
    ///
    /// Bytes that form an incomplete sequence are kept in the internal
    /// buffer and will be combined with future
    /// [`advance`](Parser::advance) calls. Call
    /// [`flush`](Parser::flush) after a timeout to emit any pending
    /// lone ESC.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf, pos) {
                Parsed::Key(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        // Compact: remove consumed bytes, keep unconsumed remainder.
        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Are there unconsumed bytes that might complete with more data?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush pending bytes as literal key events.
    ///
    /// Called after a timeout to resolve the ESC ambiguity: a lone ESC
    /// byte becomes an Escape key event, and any other leftover bytes
    /// become the events they would have been on their own.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        for &byte in &self.buf {
            let event = match byte {
                0x1B => press(KeyCode::Escape),
                0x00 => ctrl_key(KeyCode::Char('@')),
                0x08 | 0x7F => press(KeyCode::Backspace),
                0x09 => press(KeyCode::Tab),
                0x0A | 0x0D => press(KeyCode::Enter),
                b @ 0x01..=0x1A => ctrl_key(KeyCode::Char((b + b'a' - 1) as char)),
                b @ 0x20..=0x7E => press(KeyCode::Char(b as char)),
                _ => continue,
            };
            events.push(event);
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────
//
// All parse functions are pure — they read from `buf[pos..]` and return
// what they found plus how many bytes to consume. No mutable state.

/// Result of trying to parse one event from the buffer.
enum Parsed {
    /// Successfully parsed a key event, consuming `usize` bytes.
    Key(KeyEvent, usize),
    /// Sequence is incomplete — need more bytes.
    Incomplete,
    /// Unrecognized byte(s), skip `usize` bytes.
    Skip(usize),
}

/// Try to parse a single event starting at `buf[pos]`.
fn try_parse(buf: &[u8], pos: usize) -> Parsed {
    let remaining = &buf[pos..];
    let Some(&first) = remaining.first() else {
        return Parsed::Incomplete;
    };

    match first {
        // ESC — could be escape sequence or standalone Escape key.
        0x1B => parse_escape(remaining),
        // Control characters.
        0x00 => Parsed::Key(ctrl_key(KeyCode::Char('@')), 1),
        b @ (0x01..=0x07 | 0x0B..=0x0C | 0x0E..=0x1A) => {
            Parsed::Key(ctrl_key(KeyCode::Char((b + b'a' - 1) as char)), 1)
        }
        0x08 | 0x7F => Parsed::Key(press(KeyCode::Backspace), 1),
        0x09 => Parsed::Key(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(press(KeyCode::Enter), 1),
        // ASCII printable.
        b @ 0x20..=0x7E => Parsed::Key(press(KeyCode::Char(b as char)), 1),
        // Bytes above ASCII — outside the editor's alphabet, drop.
        _ => Parsed::Skip(1),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    debug_assert_eq!(buf[0], 0x1B);

    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        // CSI: ESC [
        b'[' => parse_csi(buf),
        // SS3: ESC O
        b'O' => parse_ss3(buf),
        // Alt+ESC.
        0x1B => Parsed::Key(
            KeyEvent {
                code: KeyCode::Escape,
                modifiers: Modifiers::ALT,
            },
            2,
        ),
        // Alt+printable character.
        b @ 0x20..=0x7E => Parsed::Key(
            KeyEvent {
                code: KeyCode::Char(b as char),
                modifiers: Modifiers::ALT,
            },
            2,
        ),
        // Alt+control character (e.g., ESC Ctrl+A).
        b @ 0x01..=0x1A => Parsed::Key(
            KeyEvent {
                code: KeyCode::Char((b + b'a' - 1) as char),
                modifiers: Modifiers::ALT | Modifiers::CTRL,
            },
            2,
        ),
        // Unknown byte after ESC — emit standalone Escape.
        _ => Parsed::Key(press(KeyCode::Escape), 1),
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'[');

    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    // Scan for the final byte (0x40..=0x7E).
    // CSI parameter bytes are in 0x30..=0x3F, intermediate in 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            // Invalid byte in CSI sequence — abort.
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_csi_params(&buf[2..end]);
    let consumed = end + 1;

    let modifiers = params
        .get(1)
        .copied()
        .map_or(Modifiers::empty(), decode_modifiers);

    // ── Tilde-terminated sequences (editing keys) ────────────────────
    if final_byte == b'~' {
        let first = params.first().copied().unwrap_or(0);
        return match first {
            1 | 7 => Parsed::Key(key_with(KeyCode::Home, modifiers), consumed),
            3 => Parsed::Key(key_with(KeyCode::Delete, modifiers), consumed),
            4 | 8 => Parsed::Key(key_with(KeyCode::End, modifiers), consumed),
            5 => Parsed::Key(key_with(KeyCode::PageUp, modifiers), consumed),
            6 => Parsed::Key(key_with(KeyCode::PageDown, modifiers), consumed),
            _ => Parsed::Skip(consumed),
        };
    }

    // ── Standard CSI sequences with letter final bytes ──────────────
    let event = match final_byte {
        b'A' => key_with(KeyCode::Up, modifiers),
        b'B' => key_with(KeyCode::Down, modifiers),
        b'C' => key_with(KeyCode::Right, modifiers),
        b'D' => key_with(KeyCode::Left, modifiers),
        b'H' => key_with(KeyCode::Home, modifiers),
        b'F' => key_with(KeyCode::End, modifiers),
        b'Z' => KeyEvent {
            code: KeyCode::Tab,
            modifiers: Modifiers::SHIFT,
        },
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Key(event, consumed)
}

// ── SS3 (Single Shift 3) ───────────────────────────────────────────────────

fn parse_ss3(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'O');

    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let event = match buf[2] {
        b'A' => press(KeyCode::Up),
        b'B' => press(KeyCode::Down),
        b'C' => press(KeyCode::Right),
        b'D' => press(KeyCode::Left),
        b'H' => press(KeyCode::Home),
        b'F' => press(KeyCode::End),
        _ => return Parsed::Skip(3),
    };

    Parsed::Key(event, 3)
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Create a simple key press event with no modifiers.
const fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: Modifiers::empty(),
    }
}

/// Create a Ctrl+key press event.
const fn ctrl_key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: Modifiers::CTRL,
    }
}

/// Create a key press event with specific modifiers.
const fn key_with(code: KeyCode, modifiers: Modifiers) -> KeyEvent {
    KeyEvent { code, modifiers }
}

/// Parse semicolon-separated CSI parameters.
///
/// Examples:
/// - `1;2` → `[1, 2]`
/// - `5` → `[5]`
/// - (empty) → `[]`
fn parse_csi_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut params = Vec::with_capacity(2);
    let mut pos = 0;

    while pos <= raw.len() {
        let (val, next) = parse_u16_at(raw, pos);
        pos = next;
        params.push(val);

        // Skip semicolon separator.
        if pos < raw.len() && raw[pos] == b';' {
            pos += 1;
        } else {
            break;
        }
    }

    params
}

/// Parse a u16 from bytes starting at `start`, stopping at non-digit.
/// Returns `(value, next_position)`.
fn parse_u16_at(buf: &[u8], start: usize) -> (u16, usize) {
    let mut val: u16 = 0;
    let mut pos = start;
    while pos < buf.len() && buf[pos].is_ascii_digit() {
        val = val
            .saturating_mul(10)
            .saturating_add(u16::from(buf[pos] - b'0'));
        pos += 1;
    }
    (val, pos)
}

/// Decode the CSI modifier parameter into `Modifiers` bitflags.
///
/// The xterm encoding is `1 + bitmask`; a parameter of 0 or 1 means no
/// modifiers. The truncation to u8 is intentional: only the low bits
/// carry the flags we track (Shift, Alt, Ctrl).
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Helper: parse bytes and return all events.
    fn parse(data: &[u8]) -> Vec<KeyEvent> {
        Parser::new().advance(data)
    }

    /// Helper: parse bytes, return exactly one event.
    fn parse_one(data: &[u8]) -> KeyEvent {
        let events = parse(data);
        assert_eq!(
            events.len(),
            1,
            "expected 1 event, got {}: {:?}",
            events.len(),
            events
        );
        events[0]
    }

    /// Helper: build a simple key press event.
    fn key(code: KeyCode) -> KeyEvent {
        press(code)
    }

    /// Helper: build a key event with modifiers.
    fn key_mod(code: KeyCode, modifiers: Modifiers) -> KeyEvent {
        key_with(code, modifiers)
    }

    // ── ASCII Printable ─────────────────────────────────────────────────

    #[test]
    fn ascii_single_char() {
        assert_eq!(parse_one(b"a"), key(KeyCode::Char('a')));
    }

    #[test]
    fn ascii_multiple_chars() {
        let events = parse(b"abc");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], key(KeyCode::Char('a')));
        assert_eq!(events[1], key(KeyCode::Char('b')));
        assert_eq!(events[2], key(KeyCode::Char('c')));
    }

    #[test]
    fn ascii_space() {
        assert_eq!(parse_one(b" "), key(KeyCode::Char(' ')));
    }

    #[test]
    fn ascii_tilde() {
        assert_eq!(parse_one(b"~"), key(KeyCode::Char('~')));
    }

    // ── Control Characters ──────────────────────────────────────────────

    #[test]
    fn ctrl_a() {
        assert_eq!(
            parse_one(b"\x01"),
            key_mod(KeyCode::Char('a'), Modifiers::CTRL)
        );
    }

    #[test]
    fn ctrl_s() {
        assert_eq!(
            parse_one(b"\x13"),
            key_mod(KeyCode::Char('s'), Modifiers::CTRL)
        );
    }

    #[test]
    fn ctrl_q() {
        assert_eq!(
            parse_one(b"\x11"),
            key_mod(KeyCode::Char('q'), Modifiers::CTRL)
        );
    }

    #[test]
    fn ctrl_at() {
        assert_eq!(
            parse_one(b"\x00"),
            key_mod(KeyCode::Char('@'), Modifiers::CTRL)
        );
    }

    #[test]
    fn enter_cr() {
        assert_eq!(parse_one(b"\x0D"), key(KeyCode::Enter));
    }

    #[test]
    fn enter_lf() {
        assert_eq!(parse_one(b"\x0A"), key(KeyCode::Enter));
    }

    #[test]
    fn tab_byte() {
        assert_eq!(parse_one(b"\x09"), key(KeyCode::Tab));
    }

    #[test]
    fn backspace_del_byte() {
        assert_eq!(parse_one(b"\x7F"), key(KeyCode::Backspace));
    }

    #[test]
    fn backspace_ctrl_h() {
        assert_eq!(parse_one(b"\x08"), key(KeyCode::Backspace));
    }

    // ── CSI Arrows ──────────────────────────────────────────────────────

    #[test]
    fn csi_arrow_up() {
        assert_eq!(parse_one(b"\x1b[A"), key(KeyCode::Up));
    }

    #[test]
    fn csi_arrow_down() {
        assert_eq!(parse_one(b"\x1b[B"), key(KeyCode::Down));
    }

    #[test]
    fn csi_arrow_right() {
        assert_eq!(parse_one(b"\x1b[C"), key(KeyCode::Right));
    }

    #[test]
    fn csi_arrow_left() {
        assert_eq!(parse_one(b"\x1b[D"), key(KeyCode::Left));
    }

    // ── CSI Navigation ──────────────────────────────────────────────────

    #[test]
    fn csi_home_letter() {
        assert_eq!(parse_one(b"\x1b[H"), key(KeyCode::Home));
    }

    #[test]
    fn csi_end_letter() {
        assert_eq!(parse_one(b"\x1b[F"), key(KeyCode::End));
    }

    #[test]
    fn csi_home_tilde_1() {
        assert_eq!(parse_one(b"\x1b[1~"), key(KeyCode::Home));
    }

    #[test]
    fn csi_home_tilde_7() {
        assert_eq!(parse_one(b"\x1b[7~"), key(KeyCode::Home));
    }

    #[test]
    fn csi_end_tilde_4() {
        assert_eq!(parse_one(b"\x1b[4~"), key(KeyCode::End));
    }

    #[test]
    fn csi_end_tilde_8() {
        assert_eq!(parse_one(b"\x1b[8~"), key(KeyCode::End));
    }

    #[test]
    fn csi_delete() {
        assert_eq!(parse_one(b"\x1b[3~"), key(KeyCode::Delete));
    }

    #[test]
    fn csi_page_up() {
        assert_eq!(parse_one(b"\x1b[5~"), key(KeyCode::PageUp));
    }

    #[test]
    fn csi_page_down() {
        assert_eq!(parse_one(b"\x1b[6~"), key(KeyCode::PageDown));
    }

    #[test]
    fn csi_shift_tab() {
        assert_eq!(
            parse_one(b"\x1b[Z"),
            key_mod(KeyCode::Tab, Modifiers::SHIFT)
        );
    }

    // ── CSI Modifiers ───────────────────────────────────────────────────

    #[test]
    fn csi_ctrl_right() {
        assert_eq!(
            parse_one(b"\x1b[1;5C"),
            key_mod(KeyCode::Right, Modifiers::CTRL)
        );
    }

    #[test]
    fn csi_shift_up() {
        assert_eq!(
            parse_one(b"\x1b[1;2A"),
            key_mod(KeyCode::Up, Modifiers::SHIFT)
        );
    }

    #[test]
    fn csi_alt_left() {
        assert_eq!(
            parse_one(b"\x1b[1;3D"),
            key_mod(KeyCode::Left, Modifiers::ALT)
        );
    }

    #[test]
    fn csi_ctrl_home() {
        assert_eq!(
            parse_one(b"\x1b[1;5H"),
            key_mod(KeyCode::Home, Modifiers::CTRL)
        );
    }

    #[test]
    fn csi_ctrl_delete() {
        assert_eq!(
            parse_one(b"\x1b[3;5~"),
            key_mod(KeyCode::Delete, Modifiers::CTRL)
        );
    }

    // ── SS3 ─────────────────────────────────────────────────────────────

    #[test]
    fn ss3_arrow_up() {
        assert_eq!(parse_one(b"\x1bOA"), key(KeyCode::Up));
    }

    #[test]
    fn ss3_arrow_left() {
        assert_eq!(parse_one(b"\x1bOD"), key(KeyCode::Left));
    }

    #[test]
    fn ss3_home() {
        assert_eq!(parse_one(b"\x1bOH"), key(KeyCode::Home));
    }

    #[test]
    fn ss3_end() {
        assert_eq!(parse_one(b"\x1bOF"), key(KeyCode::End));
    }

    #[test]
    fn ss3_unknown_is_skipped() {
        let mut parser = Parser::new();
        let events = parser.advance(b"\x1bOZa");
        assert_eq!(events, vec![key(KeyCode::Char('a'))]);
    }

    // ── Alt Combinations ────────────────────────────────────────────────

    #[test]
    fn alt_char() {
        assert_eq!(
            parse_one(b"\x1ba"),
            key_mod(KeyCode::Char('a'), Modifiers::ALT)
        );
    }

    #[test]
    fn alt_escape() {
        assert_eq!(
            parse_one(b"\x1b\x1b"),
            key_mod(KeyCode::Escape, Modifiers::ALT)
        );
    }

    #[test]
    fn alt_ctrl_char() {
        assert_eq!(
            parse_one(b"\x1b\x01"),
            key_mod(KeyCode::Char('a'), Modifiers::ALT | Modifiers::CTRL)
        );
    }

    // ── Incremental Parsing ─────────────────────────────────────────────

    #[test]
    fn lone_esc_is_held_pending() {
        let mut parser = Parser::new();
        let events = parser.advance(b"\x1b");
        assert!(events.is_empty());
        assert!(parser.has_pending());
    }

    #[test]
    fn flush_resolves_lone_esc() {
        let mut parser = Parser::new();
        parser.advance(b"\x1b");
        let events = parser.flush();
        assert_eq!(events, vec![key(KeyCode::Escape)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn split_csi_across_two_calls() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[").is_empty());
        let events = parser.advance(b"A");
        assert_eq!(events, vec![key(KeyCode::Up)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn split_csi_across_three_calls() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b").is_empty());
        assert!(parser.advance(b"[").is_empty());
        let events = parser.advance(b"3");
        assert!(events.is_empty());
        let events = parser.advance(b"~");
        assert_eq!(events, vec![key(KeyCode::Delete)]);
    }

    #[test]
    fn flush_spells_out_partial_sequence() {
        let mut parser = Parser::new();
        parser.advance(b"\x1b[");
        let events = parser.flush();
        assert_eq!(
            events,
            vec![key(KeyCode::Escape), key(KeyCode::Char('['))]
        );
    }

    #[test]
    fn sequence_then_text_in_one_chunk() {
        let events = parse(b"\x1b[Cab");
        assert_eq!(
            events,
            vec![
                key(KeyCode::Right),
                key(KeyCode::Char('a')),
                key(KeyCode::Char('b')),
            ]
        );
    }

    // ── Garbage Tolerance ───────────────────────────────────────────────

    #[test]
    fn unknown_tilde_sequence_is_skipped() {
        let events = parse(b"\x1b[99~a");
        assert_eq!(events, vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn unknown_csi_final_is_skipped() {
        let events = parse(b"\x1b[Xa");
        assert_eq!(events, vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn invalid_csi_byte_aborts_sequence() {
        let events = parse(b"\x1b[\x07a");
        assert_eq!(events, vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn high_bytes_are_dropped() {
        // Multi-byte encodings are outside the editor's alphabet.
        let events = parse(b"\xC3\xA9a");
        assert_eq!(events, vec![key(KeyCode::Char('a'))]);
    }

    #[test]
    fn esc_then_unknown_control_emits_escape() {
        let events = parse(b"\x1b\x00");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], key(KeyCode::Escape));
        assert_eq!(events[1], key_mod(KeyCode::Char('@'), Modifiers::CTRL));
    }

    // ── CSI Parameter Decoding ──────────────────────────────────────────

    #[test]
    fn params_empty() {
        assert!(parse_csi_params(b"").is_empty());
    }

    #[test]
    fn params_single() {
        assert_eq!(parse_csi_params(b"5"), vec![5]);
    }

    #[test]
    fn params_pair() {
        assert_eq!(parse_csi_params(b"1;5"), vec![1, 5]);
    }

    #[test]
    fn params_multi_digit() {
        assert_eq!(parse_csi_params(b"12;34"), vec![12, 34]);
    }

    #[test]
    fn params_missing_value_is_zero() {
        assert_eq!(parse_csi_params(b";5"), vec![0, 5]);
    }

    #[test]
    fn modifiers_param_none() {
        assert_eq!(decode_modifiers(0), Modifiers::empty());
        assert_eq!(decode_modifiers(1), Modifiers::empty());
    }

    #[test]
    fn modifiers_param_shift() {
        assert_eq!(decode_modifiers(2), Modifiers::SHIFT);
    }

    #[test]
    fn modifiers_param_alt() {
        assert_eq!(decode_modifiers(3), Modifiers::ALT);
    }

    #[test]
    fn modifiers_param_ctrl() {
        assert_eq!(decode_modifiers(5), Modifiers::CTRL);
    }

    #[test]
    fn modifiers_param_ctrl_shift() {
        assert_eq!(decode_modifiers(6), Modifiers::CTRL | Modifiers::SHIFT);
    }
}
