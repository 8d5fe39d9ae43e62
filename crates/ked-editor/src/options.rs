//! Editor options.
//!
//! There is no option-file or `:set` layer — these are the compile-time
//! defaults the editor starts with, collected in one place so the binary
//! and the model agree on them.

use std::time::Duration;

/// Tunable editor behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Width a tab stop expands to in rendered columns.
    pub tab_width: usize,
    /// How many extra quit presses an unsaved buffer demands.
    pub quit_confirm_times: u32,
    /// How long a message stays on the message bar.
    pub message_timeout: Duration,
}

impl Options {
    /// Default tab stop width.
    pub const TAB_WIDTH: usize = 4;
    /// Default number of confirmations before quitting with unsaved changes.
    pub const QUIT_CONFIRM_TIMES: u32 = 3;
    /// Default message lifetime on the message bar.
    pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

    /// The standard option set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tab_width: Self::TAB_WIDTH,
            quit_confirm_times: Self::QUIT_CONFIRM_TIMES,
            message_timeout: Self::MESSAGE_TIMEOUT,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.tab_width, 4);
        assert_eq!(opts.quit_confirm_times, 3);
        assert_eq!(opts.message_timeout, Duration::from_secs(5));
    }
}
