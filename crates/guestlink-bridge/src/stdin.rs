//! Synthetic stdin: a character FIFO behind a blocking-style poll interface.
//!
//! The embedding runtime's input driver interprets a `None` return as "no
//! more input will ever come" and enters EOF handling. That would be wrong
//! here, since more input may arrive later, so while the queue is idle the
//! emulator returns an alternating `None, Some(0), None, Some(0), ...`
//! heartbeat. The driver observes spurious null/zero bytes it must itself
//! ignore; that is the documented trade-off. Two consecutive `None`s mean
//! permanent stream closure and must never be produced.

use std::collections::VecDeque;
use std::time::Duration;

/// Carriage-return code appended after each submitted command.
pub const CARRIAGE_RETURN: i32 = 13;

/// Default pause between injected character codes.
///
/// Trades input latency for guest-side line-buffer safety; must be at least
/// as large as the guest's input-polling interval.
pub const DEFAULT_INJECT_DELAY: Duration = Duration::from_millis(10);

/// What the emulator returns on the next poll of an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdlePhase {
    /// Fresh, or the last return was a real code: the next idle return is
    /// `None`.
    AwaitingReal,
    /// The last return was `None`: force a `Some(0)` next.
    ForceZero,
    /// The last return was the forced zero: back to `None`.
    ForceNull,
}

/// FIFO of pending character codes plus the stall-avoidance state machine.
#[derive(Debug)]
pub struct StdinEmulator {
    queue: VecDeque<i32>,
    idle: IdlePhase,
}

impl Default for StdinEmulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinEmulator {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            idle: IdlePhase::AwaitingReal,
        }
    }

    /// Append one character code.
    pub fn push_code(&mut self, code: i32) {
        self.queue.push_back(code);
    }

    /// Non-blocking, per-call access to the character stream.
    ///
    /// Returns the oldest pending code if one exists; otherwise alternates
    /// `None` and `Some(0)` so the driver's polling loop stays alive without
    /// ever seeing true end-of-input.
    pub fn poll(&mut self) -> Option<i32> {
        if let Some(code) = self.queue.pop_front() {
            self.idle = IdlePhase::AwaitingReal;
            return Some(code);
        }

        match self.idle {
            IdlePhase::AwaitingReal | IdlePhase::ForceNull => {
                self.idle = IdlePhase::ForceZero;
                None
            }
            IdlePhase::ForceZero => {
                self.idle = IdlePhase::ForceNull;
                Some(0)
            }
        }
    }

    /// Number of pending codes.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Local producer feeding the stdin queue one code per step.
///
/// A submitted command is injected character by character, with the embedder
/// sleeping [`inject_delay`](Self::inject_delay) between steps to avoid
/// overflowing the guest's internal line buffer, and a single carriage
/// return after the last character. Injection runs to completion: a second
/// command only begins after the prior command's terminator, so commands
/// never interleave at the character level.
#[derive(Debug)]
pub struct CommandInjector {
    pending: VecDeque<VecDeque<i32>>,
    delay: Duration,
}

impl Default for CommandInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInjector {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_INJECT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            delay,
        }
    }

    /// Pause the embedder should observe between steps.
    pub fn inject_delay(&self) -> Duration {
        self.delay
    }

    /// Queue a command line for injection. The terminator is queued with it.
    pub fn submit(&mut self, command: &str) {
        let mut codes: VecDeque<i32> = command.chars().map(|ch| ch as i32).collect();
        codes.push_back(CARRIAGE_RETURN);
        tracing::debug!(chars = codes.len() - 1, "queued command for injection");
        self.pending.push_back(codes);
    }

    /// Transfer exactly one code into the stdin queue.
    ///
    /// Returns `true` while injection work remains.
    pub fn step(&mut self, stdin: &mut StdinEmulator) -> bool {
        let Some(current) = self.pending.front_mut() else {
            return false;
        };

        if let Some(code) = current.pop_front() {
            stdin.push_code(code);
        }

        if current.is_empty() {
            self.pending.pop_front();
        }

        !self.pending.is_empty()
    }

    /// Whether any injection work remains.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
