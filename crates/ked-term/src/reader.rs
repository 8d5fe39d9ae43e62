// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Stdin reader thread.
//
// Raw-mode input is a byte stream, and reading it blocks. The event
// loop cannot sit in `read()` — it also owes the screen repaints, has
// to notice resizes, and runs the escape-sequence timeout — so reads
// happen on a dedicated thread that forwards each chunk over an mpsc
// channel. `recv_timeout()` on that channel is what gives the loop its
// tick.
//
// Shutdown works by polling rather than blocking: the thread waits on
// `poll()` with a short timeout and re-checks a shared stop flag every
// time the poll wakes, so `stop()` is honored within one poll interval
// instead of waiting out a keypress that may never come.

#[cfg(unix)]
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Upper bound on a single forwarded chunk.
///
/// A keypress is a handful of bytes and fast auto-repeat still fits
/// with room to spare; a larger paste simply arrives as several chunks.
const CHUNK_SIZE: usize = 1024;

/// Poll timeout on the stdin descriptor, in milliseconds.
///
/// Doubles as the stop-flag check interval, so it bounds how long
/// [`StdinReader::stop`] can go unnoticed.
const POLL_MS: i32 = 50;

/// Owns the stdin-reading thread.
///
/// [`spawn`](Self::spawn) starts the thread and hands back the channel
/// it feeds. Dropping the handle, or calling [`stop`](Self::stop),
/// signals the thread and joins it.
///
/// ```no_run
/// use ked_term::reader::StdinReader;
///
/// let (mut reader, rx) = StdinReader::spawn();
/// if let Ok(bytes) = rx.recv() {
///     assert!(!bytes.is_empty());
/// }
/// reader.stop();
/// ```
pub struct StdinReader {
    /// Joined on `stop()`; `None` once the thread is gone.
    handle: Option<JoinHandle<()>>,
    /// Set to ask the thread to exit.
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    /// Start the reader thread.
    ///
    /// The returned receiver yields non-empty chunks of raw stdin
    /// bytes in arrival order. It disconnects when the thread exits:
    /// after [`stop`](Self::stop), on stdin EOF, or on a read error.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn a thread.
    #[must_use]
    pub fn spawn() -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || pump(&tx, &thread_stop))
            .expect("could not spawn the stdin reader thread");

        let reader = Self {
            handle: Some(handle),
            stop,
        };
        (reader, rx)
    }

    /// Ask the thread to exit and wait for it.
    ///
    /// Safe to call more than once; later calls find no thread left to
    /// join.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Thread body: poll stdin, forward whatever arrives, watch the flag.
///
/// Exits on the stop flag, stdin EOF, a read error, or a dropped
/// receiver.
#[cfg(unix)]
fn pump(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::os::unix::io::AsRawFd;

    let stdin_fd = io::stdin().as_raw_fd();
    let mut buf = [0u8; CHUNK_SIZE];

    while !stop.load(Ordering::Relaxed) {
        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd: stdin_fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, POLL_MS)
        };

        // Timed out, or poll itself failed: go around and look at the
        // flag again.
        if ready <= 0 {
            continue;
        }

        let n = unsafe { libc::read(stdin_fd, buf.as_mut_ptr().cast(), buf.len()) };

        // EOF or read error: nothing more will ever arrive.
        if n <= 0 {
            break;
        }

        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        let chunk = buf[..n as usize].to_vec();

        // A send error means the loop went away; stop reading.
        if tx.send(chunk).is_err() {
            break;
        }
    }
}

/// Fallback for platforms without `poll()`: plain blocking reads. The
/// stop flag is only seen after a read returns, so shutdown can lag
/// until the next keypress.
#[cfg(not(unix))]
fn pump(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
    use std::io::Read;

    let stdin = std::io::stdin();
    let mut buf = [0u8; CHUNK_SIZE];

    while !stop.load(Ordering::Relaxed) {
        match stdin.lock().read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Stdin is a pipe or /dev/null under the test harness, so these
    // exercise the thread lifecycle, not terminal input.

    #[test]
    fn stop_joins_the_thread() {
        let (mut reader, _rx) = StdinReader::spawn();
        reader.stop();
        assert!(reader.handle.is_none());
    }

    #[test]
    fn stop_twice_is_harmless() {
        let (mut reader, _rx) = StdinReader::spawn();
        reader.stop();
        reader.stop();
    }

    #[test]
    fn drop_does_not_hang() {
        let (reader, _rx) = StdinReader::spawn();
        drop(reader);
    }

    #[test]
    fn receiver_disconnects_after_stop() {
        let (mut reader, rx) = StdinReader::spawn();
        reader.stop();

        // Chunks that landed before the stop are still delivered; once
        // drained, the channel reports disconnect rather than blocking.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn reader_thread_is_named() {
        let (mut reader, _rx) = StdinReader::spawn();
        let name = reader
            .handle
            .as_ref()
            .and_then(|h| h.thread().name().map(String::from));
        reader.stop();
        assert_eq!(name.as_deref(), Some("stdin-reader"));
    }
}
