// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the heartbeat of the editor.
//
// This is the module that wires everything together: stdin bytes flow
// in from the background reader, get parsed into key events, the
// application handles them, paints a frame into the staging screen, and
// the whole frame goes to the terminal in one write.
//
// # The Hybrid Model
//
// The loop blocks on the stdin channel with a short timeout. This gives
// three behaviors in one:
//
//   1. **Instant response**: When the user types, bytes arrive on the
//      channel immediately. No polling latency.
//
//   2. **Zero CPU idle**: When nothing happens, `recv_timeout` blocks
//      the thread. The OS schedules us out.
//
//   3. **Tick-driven timeouts**: The timeout fires regularly, resolving
//      the lone-ESC ambiguity and letting the application expire
//      time-based state (the message line). We only repaint when
//      something changed (the dirty flag), so idle ticks cost nothing.
//
// # SIGWINCH Handling
//
// Terminal resize is detected via a SIGWINCH handler that sets an
// `AtomicBool`. The loop checks this flag each iteration and triggers
// a full repaint when the terminal size changes.
//
// # Escape Sequence Timeout
//
// A lone ESC byte is ambiguous: it could be the Escape key or the start
// of a CSI sequence. The parser holds it as "pending." On the next loop
// iteration where no new bytes arrive (timeout fires), we flush pending
// bytes as literal events. The user experiences at most one tick of lag
// on Escape — imperceptible.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::ansi;
use crate::input::{KeyEvent, Parser};
use crate::reader::StdinReader;
use crate::screen::Screen;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

/// Global flag set by the SIGWINCH handler. Checked each loop iteration.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install a signal handler for SIGWINCH (terminal resize).
///
/// The handler simply sets the [`SIGWINCH_RECEIVED`] flag. This is
/// async-signal-safe: writing to an atomic is one of the few operations
/// permitted inside signal handlers.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {
    // No-op on non-unix platforms.
}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue running.
    Continue,
    /// Exit the event loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// Implement this trait to drive the editor. The event loop calls the
/// methods in this order each iteration:
///
/// 1. [`on_key`](App::on_key) — for each parsed key event
/// 2. [`on_resize`](App::on_resize) — when the terminal size changes
/// 3. [`on_tick`](App::on_tick) — every loop iteration
/// 4. [`paint`](App::paint) — when the frame is dirty and needs redrawing
/// 5. [`cursor`](App::cursor) — after paint, to position the hardware cursor
///
/// [`on_key`](App::on_key) and [`paint`](App::paint) are required;
/// everything else has default no-op implementations.
pub trait App {
    /// Handle a parsed key event.
    ///
    /// Return [`Action::Quit`] to exit the event loop.
    fn on_key(&mut self, key: &KeyEvent) -> Action;

    /// Handle terminal resize.
    ///
    /// Called with the new terminal dimensions. The screen has already
    /// been resized before this is called.
    fn on_resize(&mut self, _size: Size) {}

    /// Called every loop iteration, even when no input arrived.
    ///
    /// Use this for time-based state — expiring the message line, for
    /// example. Return `true` if state changed and a repaint is needed.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the current application state into the staging screen.
    ///
    /// Called only when the frame is dirty (input arrived, resize
    /// happened, or `on_tick` returned `true`). The screen has been
    /// cleared and the cursor parked at the origin before this call —
    /// paint everything you want visible.
    ///
    /// # Errors
    ///
    /// Writes to the screen cannot fail in practice; the `Result` is
    /// the `io::Write` signature showing through.
    fn paint(&mut self, screen: &mut Screen) -> io::Result<()>;

    /// The terminal cursor position after painting, 0-indexed.
    ///
    /// Return `Some((x, y))` to show the hardware cursor at the given
    /// screen position, or `None` to keep it hidden. Called after every
    /// [`paint`](App::paint).
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Frame Loop Config ───────────────────────────────────────────────────────

/// Configuration for the event loop timing.
///
/// The default is designed for an editor: a tick rate fast enough that
/// the escape-sequence timeout is imperceptible, slow enough to cost
/// nothing when idle.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Timeout for the channel `recv_timeout` call (microseconds).
    ///
    /// This controls both the tick rate and the escape sequence
    /// timeout. Default: 8333μs (120 Hz).
    pub tick_interval_us: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_us: 8333, // 120 Hz
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// Owns the terminal, parser, and stdin reader. Call
/// [`run`](Self::run) to enter the loop — it returns when the
/// application signals [`Action::Quit`].
///
/// # Example
///
/// ```no_run
/// use std::io;
///
/// use ked_term::event_loop::{Action, App, EventLoop};
/// use ked_term::input::{KeyCode, KeyEvent};
/// use ked_term::screen::Screen;
///
/// struct MyApp;
///
/// impl App for MyApp {
///     fn on_key(&mut self, key: &KeyEvent) -> Action {
///         if key.code == KeyCode::Char('q') {
///             return Action::Quit;
///         }
///         Action::Continue
///     }
///
///     fn paint(&mut self, screen: &mut Screen) -> io::Result<()> {
///         // Paint your UI here...
///         Ok(())
///     }
/// }
///
/// let mut event_loop = EventLoop::new()?;
/// event_loop.run(&mut MyApp)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    config: LoopConfig,
}

impl EventLoop {
    /// Create a new event loop with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// Create a new event loop with custom timing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            config,
        })
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run the event loop until the application returns [`Action::Quit`].
    ///
    /// This method:
    /// 1. Enters editor mode (raw mode, alternate screen)
    /// 2. Installs the SIGWINCH handler
    /// 3. Spawns the background stdin reader
    /// 4. Runs the hybrid loop
    /// 5. Restores the terminal on exit (even on error)
    ///
    /// # Errors
    ///
    /// Returns an error if terminal enter/leave or frame output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let (mut reader, rx) = StdinReader::spawn();

        let result = self.run_inner(app, &rx);

        // Always clean up, even if the loop errored.
        reader.stop();
        self.terminal.leave()?;

        result
    }

    /// The inner loop, separated so cleanup runs regardless of outcome.
    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let mut screen = Screen::new(self.terminal.size());
        let mut dirty = true; // First frame always paints.
        let timeout = Duration::from_micros(self.config.tick_interval_us);

        loop {
            // ── Receive stdin bytes ──────────────────────────────
            match rx.recv_timeout(timeout) {
                Ok(bytes) => {
                    let events = self.parser.advance(&bytes);
                    for event in &events {
                        if app.on_key(event) == Action::Quit {
                            return Ok(());
                        }
                    }
                    if !events.is_empty() {
                        dirty = true;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    // Flush pending escape sequences (lone ESC → Escape key).
                    if self.parser.has_pending() {
                        let events = self.parser.flush();
                        for event in &events {
                            if app.on_key(event) == Action::Quit {
                                return Ok(());
                            }
                        }
                        if !events.is_empty() {
                            dirty = true;
                        }
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    // Reader thread died — exit gracefully.
                    return Ok(());
                }
            }

            // ── Check for terminal resize ────────────────────────
            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                screen.resize(new_size);
                app.on_resize(new_size);
                dirty = true;
            }

            // ── Tick (time-based state) ──────────────────────────
            if app.on_tick() {
                dirty = true;
            }

            // ── Paint if dirty ───────────────────────────────────
            if dirty {
                screen.clear();
                ansi::cursor_hide(&mut screen)?;
                ansi::cursor_to(&mut screen, 0, 0)?;
                app.paint(&mut screen)?;
                if let Some((x, y)) = app.cursor() {
                    ansi::cursor_to(&mut screen, x, y)?;
                    ansi::cursor_show(&mut screen)?;
                }

                // One write: the terminal never sees a partial frame.
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                lock.write_all(screen.bytes())?;
                lock.flush()?;

                dirty = false;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
