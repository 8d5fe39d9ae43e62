// SPDX-License-Identifier: MIT
//
// ked — a small terminal text editor in the kilo tradition.
//
// This is the main binary that wires together the two crates:
//
//   ked-term   → terminal control, input parsing, event loop
//   ked-editor → rows, buffer, cursor, viewport
//
// The Editor struct implements ked-term's App trait, connecting the
// event loop to the text model. Each keypress flows through:
//
//   stdin → parser → on_key → buffer/cursor mutation
//   paint → rows + status + message → staging screen → one write
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← h - 2 rows
//   ├──────────────────────────────┤
//   │ status bar (inverted)        │  ← 1 row
//   ├──────────────────────────────┤
//   │ message bar / save-as prompt │  ← 1 row
//   └──────────────────────────────┘

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use ked_editor::buffer::Buffer;
use ked_editor::options::Options;
use ked_editor::row::Row;

use ked_term::ansi;
use ked_term::event_loop::{Action, App, EventLoop};
use ked_term::input::{KeyCode, KeyEvent, Modifiers};
use ked_term::screen::Screen;
use ked_term::terminal::Size;

/// Centered banner shown on an empty, nameless buffer.
const WELCOME: &str = concat!("Welcome to ked! -- ", env!("CARGO_PKG_VERSION"));

// ─── Message line ───────────────────────────────────────────────────────────

/// A transient message on the bottom line.
///
/// Timestamped at creation; [`Editor::on_tick`] clears it once it
/// outlives [`Options::message_timeout`].
struct Message {
    text: String,
    since: Instant,
}

/// The save-as prompt, active when saving a buffer that has no filename.
///
/// While active it owns the bottom line and captures all keys.
#[derive(Default)]
struct Prompt {
    /// The filename typed so far.
    input: String,
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The editor application state.
///
/// Holds everything needed to edit a file: the text buffer (which
/// carries its own cursor and viewport), the option set, the message
/// line, the save-as prompt, and the quit confirmation countdown.
struct Editor {
    buffer: Buffer,
    options: Options,

    /// A message to display on the bottom line, if any.
    message: Option<Message>,

    /// Active save-as prompt. When `Some`, the bottom line shows the
    /// prompt and all keys go to [`handle_prompt`](Self::handle_prompt).
    prompt: Option<Prompt>,

    /// Remaining quit confirmations for an unsaved buffer. Reset to
    /// [`Options::quit_confirm_times`] by any key other than `Ctrl-Q`.
    quit_times: u32,
}

impl Editor {
    /// Create an editor with an empty buffer.
    fn new() -> Self {
        let options = Options::new();
        Self {
            buffer: Buffer::with_tab_width(options.tab_width),
            message: None,
            prompt: None,
            quit_times: options.quit_confirm_times,
            options,
        }
    }

    /// Create an editor with a file loaded from disk.
    fn from_file(path: &str) -> Self {
        let buffer = Buffer::from_file(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("ked: {path}: {e}");
            process::exit(1);
        });
        let options = Options::new();
        Self {
            buffer,
            message: None,
            prompt: None,
            quit_times: options.quit_confirm_times,
            options,
        }
    }

    /// Set a message on the bottom line, restarting its lifetime.
    fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            since: Instant::now(),
        });
    }

    /// Resize the text area to the terminal, minus the two bottom bars.
    fn apply_size(&mut self, size: Size) {
        let text_height = (size.rows as usize).saturating_sub(2);
        self.buffer.set_viewport(size.cols as usize, text_height);
    }

    // ── Key handling ────────────────────────────────────────────────────

    /// Handle a key in normal editing (no prompt active).
    fn handle_key(&mut self, key: &KeyEvent) {
        if key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
            // Ctrl-S saves; every other chord (Ctrl-L among them) is
            // deliberately ignored.
            if key.code == KeyCode::Char('s') && key.modifiers == Modifiers::CTRL {
                self.save();
            }
            return;
        }

        match key.code {
            KeyCode::Char(ch) => {
                if let Ok(byte) = u8::try_from(ch) {
                    self.buffer.insert_char(byte);
                }
            }
            KeyCode::Tab => self.buffer.insert_char(b'\t'),
            KeyCode::Enter => self.buffer.insert_newline(),
            KeyCode::Backspace => self.buffer.delete_char(),
            KeyCode::Delete => {
                // Forward delete is "step right, then rub out backwards".
                self.buffer.move_cursor(1, 0);
                self.buffer.delete_char();
            }
            KeyCode::Up => self.buffer.move_cursor(0, -1),
            KeyCode::Down => self.buffer.move_cursor(0, 1),
            KeyCode::Left => self.buffer.move_cursor(-1, 0),
            KeyCode::Right => self.buffer.move_cursor(1, 0),
            KeyCode::Home => {
                self.buffer.move_cursor(-(self.buffer.cursor_x() as isize), 0);
            }
            KeyCode::End => {
                let end = self.buffer.current_row().map_or(0, Row::len) as isize;
                self.buffer.move_cursor(end - self.buffer.cursor_x() as isize, 0);
            }
            KeyCode::PageUp => {
                self.buffer.move_cursor(0, -(self.buffer.viewport_height() as isize));
            }
            KeyCode::PageDown => {
                self.buffer.move_cursor(0, self.buffer.viewport_height() as isize);
            }
            KeyCode::Escape => {}
        }
    }

    /// Handle a key while the save-as prompt is active.
    fn handle_prompt(&mut self, key: &KeyEvent) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };
        match key.code {
            KeyCode::Escape => {
                self.set_message("Save aborted");
                return;
            }
            KeyCode::Enter if !prompt.input.is_empty() => {
                self.save_to(&PathBuf::from(prompt.input));
                return;
            }
            KeyCode::Backspace | KeyCode::Delete => {
                prompt.input.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                prompt.input.push(ch);
            }
            // Enter on an empty name, motion keys, chords: keep prompting.
            _ => {}
        }
        self.prompt = Some(prompt);
    }

    /// `Ctrl-Q`: quit, demanding confirmation while changes are unsaved.
    fn handle_quit(&mut self) -> Action {
        if self.buffer.is_modified() && self.quit_times > 0 {
            self.set_message(format!(
                "Unsaved changes! Press Ctrl-Q {} more time(s) to quit",
                self.quit_times
            ));
            self.quit_times -= 1;
            return Action::Continue;
        }
        Action::Quit
    }

    // ── Saving ──────────────────────────────────────────────────────────

    /// `Ctrl-S`: save to the buffer's file, or open the save-as prompt
    /// when it has none.
    fn save(&mut self) {
        let Some(path) = self.buffer.filename().map(Path::to_path_buf) else {
            self.prompt = Some(Prompt::default());
            return;
        };
        self.save_to(&path);
    }

    /// Write the buffer to `path` and report the outcome on the
    /// message line.
    fn save_to(&mut self, path: &Path) {
        match self.buffer.save_as(path) {
            Ok(_) => self.set_message(format!("Saved file {}", path.display())),
            Err(e) => self.set_message(format!("Save failed: {e}")),
        }
    }

    // ── Painting ────────────────────────────────────────────────────────

    /// True when the banner row should replace the middle `~` row.
    fn show_welcome(&self) -> bool {
        self.buffer.filename().is_none() && self.buffer.rows().is_empty()
    }

    /// Draw the text area: visible row slices, `~` filler, and the
    /// welcome banner on a pristine buffer.
    fn draw_rows(&self, screen: &mut Screen, width: usize, text_height: usize) -> io::Result<()> {
        let top = self.buffer.row_offset();
        for y in 0..text_height {
            if let Some(row) = self.buffer.rows().get(top + y) {
                let rendered = row.rendered();
                let visible = rendered.get(self.buffer.col_offset()..).unwrap_or(&[]);
                screen.write_all(&visible[..visible.len().min(width)])?;
            } else if self.show_welcome() && y == text_height / 2 {
                let text = &WELCOME.as_bytes()[..WELCOME.len().min(width)];
                let padding = width.saturating_sub(text.len()) / 2;
                for i in 0..padding {
                    screen.write_all(if i == 0 { b"~" } else { b" " })?;
                }
                screen.write_all(text)?;
            } else {
                screen.write_all(b"~")?;
            }
            ansi::clear_line(screen)?;
            screen.write_all(b"\r\n")?;
        }
        Ok(())
    }

    /// Draw the inverted status bar: filename, modified marker, and
    /// line count on the left; `line:column` pinned to the right edge.
    fn draw_status_bar(&self, screen: &mut Screen, width: usize) -> io::Result<()> {
        ansi::invert(screen)?;

        let display = self.buffer.filename().map_or_else(
            || "[NO NAME]".to_string(),
            |path| path.display().to_string(),
        );
        let modified = if self.buffer.is_modified() { "(modified) " } else { "" };
        let left = format!("{display} {modified}-- {} lines", self.buffer.line_count());
        let right = format!("{}:{}", self.buffer.cursor_y() + 1, self.buffer.render_x() + 1);

        let mut line = vec![b' '; width];
        let left_len = left.len().min(width);
        line[..left_len].copy_from_slice(&left.as_bytes()[..left_len]);
        if right.len() <= width {
            line[width - right.len()..].copy_from_slice(right.as_bytes());
        }
        screen.write_all(&line)?;

        ansi::reset(screen)?;
        screen.write_all(b"\r\n")?;
        Ok(())
    }

    /// Draw the bottom line: the save-as prompt when active, otherwise
    /// the current message (if any).
    fn draw_message_bar(&self, screen: &mut Screen, width: usize) -> io::Result<()> {
        ansi::clear_line(screen)?;
        if let Some(ref prompt) = self.prompt {
            let line = format!("Save as: {} (ESC to cancel)", prompt.input);
            screen.write_all(&line.as_bytes()[..line.len().min(width)])?;
        } else if let Some(ref message) = self.message {
            let text = message.text.as_bytes();
            screen.write_all(&text[..text.len().min(width)])?;
        }
        Ok(())
    }
}

// ─── App implementation ─────────────────────────────────────────────────────

impl App for Editor {
    fn on_key(&mut self, key: &KeyEvent) -> Action {
        if self.prompt.is_some() {
            self.handle_prompt(key);
            self.quit_times = self.options.quit_confirm_times;
            return Action::Continue;
        }

        if key.code == KeyCode::Char('q') && key.modifiers == Modifiers::CTRL {
            return self.handle_quit();
        }

        self.handle_key(key);
        // Any key that is not the quit chord cancels the countdown.
        self.quit_times = self.options.quit_confirm_times;
        Action::Continue
    }

    fn on_resize(&mut self, size: Size) {
        self.apply_size(size);
    }

    fn on_tick(&mut self) -> bool {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|m| m.since.elapsed() >= self.options.message_timeout);
        if expired {
            self.message = None;
        }
        expired
    }

    fn paint(&mut self, screen: &mut Screen) -> io::Result<()> {
        let width = screen.width() as usize;
        let text_height = (screen.height() as usize).saturating_sub(2);

        self.draw_rows(screen, width, text_height)?;
        self.draw_status_bar(screen, width)?;
        self.draw_message_bar(screen, width)?;
        Ok(())
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        // The viewport clamp keeps the cursor inside the text area, so
        // both differences fit the screen.
        let x = self.buffer.render_x().saturating_sub(self.buffer.col_offset());
        let y = self.buffer.cursor_y().saturating_sub(self.buffer.row_offset());
        Some((x as u16, y as u16))
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut editor = if args.len() > 1 {
        Editor::from_file(&args[1])
    } else {
        Editor::new()
    };
    editor.set_message("HELP: Ctrl-S = save | Ctrl-Q = quit");

    let mut event_loop = EventLoop::new().unwrap_or_else(|e| {
        eprintln!("ked: failed to initialize terminal: {e}");
        process::exit(1);
    });
    editor.apply_size(event_loop.size());

    if let Err(e) = event_loop.run(&mut editor) {
        eprintln!("ked: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
