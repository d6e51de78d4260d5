//! Status-line progress parsing and UI update throttling.
//!
//! A free-text status line optionally encodes a fractional progress
//! indicator matching `<label>(<num>/<num>)`. Progress updates are throttled
//! to at most one per 30 ms so a fast producer cannot saturate the
//! presentation layer; plain text updates pass through unthrottled.

use std::time::{Duration, Instant};

/// Minimum interval between admitted progress updates.
pub const PROGRESS_THROTTLE: Duration = Duration::from_millis(30);

/// A parsed `<label>(<value>/<total>)` indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub label: String,
    pub value: u32,
    pub total: u32,
}

/// An admitted status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Plain status text.
    Text(String),
    /// A progress indicator extracted from the text.
    Progress(Progress),
}

/// Parse a progress indicator out of a status line.
///
/// The value may carry a fractional part, which is truncated. Returns `None`
/// when the line doesn't match the pattern.
pub fn parse_progress(text: &str) -> Option<Progress> {
    let open = text.find('(')?;
    let label = &text[..open];
    if label.is_empty() {
        return None;
    }

    let rest = &text[open + 1..];
    let slash = rest.find('/')?;
    let close = rest.find(')')?;
    if slash >= close {
        return None;
    }

    let value = parse_numeric(&rest[..slash])?;
    let total = parse_integer(&rest[slash + 1..close])?;

    Some(Progress {
        label: label.to_string(),
        value,
        total,
    })
}

/// Digits with an optional fractional part, truncated to the integer part.
fn parse_numeric(text: &str) -> Option<u32> {
    let integer = match text.split_once('.') {
        Some((integer, fraction)) => {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            integer
        }
        None => text,
    };
    parse_integer(integer)
}

fn parse_integer(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Decides which status texts reach the presentation layer.
#[derive(Debug, Default)]
pub struct StatusThrottle {
    last_text: Option<String>,
    last_admitted: Option<Instant>,
}

impl StatusThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit or suppress a status text, using the current time.
    pub fn admit(&mut self, text: &str) -> Option<StatusUpdate> {
        self.admit_at(text, Instant::now())
    }

    /// Admit or suppress a status text at an explicit instant.
    ///
    /// Duplicates of the last admitted text are always suppressed. Progress
    /// updates arriving within [`PROGRESS_THROTTLE`] of the last admitted
    /// update are suppressed; non-progress texts are never time-throttled.
    pub fn admit_at(&mut self, text: &str, now: Instant) -> Option<StatusUpdate> {
        if self.last_text.as_deref() == Some(text) {
            return None;
        }

        let progress = parse_progress(text);

        if progress.is_some() {
            if let Some(last) = self.last_admitted {
                if now.duration_since(last) < PROGRESS_THROTTLE {
                    return None;
                }
            }
        }

        self.last_text = Some(text.to_string());
        self.last_admitted = Some(now);

        Some(match progress {
            Some(progress) => StatusUpdate::Progress(progress),
            None => StatusUpdate::Text(text.to_string()),
        })
    }
}
