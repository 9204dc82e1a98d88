//! JSONL parser for recorded touch traces.
//!
//! One event per line:
//!
//! ```text
//! {"action":"down","x":200.0,"y":100.0,"t":0}
//! {"action":"move","x":150.0,"y":100.0,"t":10}
//! ```
//!
//! Blank lines are skipped. A malformed line yields a [`ParseError`] but does
//! not stop the rest of the trace from parsing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{ParseError, Timestamp, TouchAction, TouchEvent};

/// Wire form of one trace line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceRecord {
    /// `down`, `move`, `up` or `cancel`.
    pub action: TouchAction,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Milliseconds on the recording's monotonic clock.
    pub t: u64,
}

impl TraceRecord {
    /// Validate and convert into a [`TouchEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NonFiniteCoordinate`] if `x` or `y` is NaN or
    /// infinite.
    pub fn into_event(self, line_number: usize) -> Result<TouchEvent, ParseError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ParseError::NonFiniteCoordinate { line: line_number });
        }
        Ok(TouchEvent::new(
            self.action,
            self.x,
            self.y,
            Timestamp::from_millis(self.t),
        ))
    }
}

impl From<TouchEvent> for TraceRecord {
    fn from(event: TouchEvent) -> Self {
        Self {
            action: event.action,
            x: event.sample.x,
            y: event.sample.y,
            t: event.sample.t.as_millis(),
        }
    }
}

/// Parse one trace line. Returns `Ok(None)` for blank lines.
///
/// # Errors
///
/// Returns [`ParseError`] for invalid JSON, unknown actions or fields, and
/// non-finite coordinates.
pub fn parse_trace_line(raw: &str, line_number: usize) -> Result<Option<TouchEvent>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let record: TraceRecord =
        serde_json::from_str(trimmed).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    record.into_event(line_number).map(Some)
}

/// Parse every line of a trace, numbering lines from 1.
///
/// Malformed lines are logged, collected into the second vector, and
/// skipped.
pub fn parse_trace<I, S>(lines: I) -> (Vec<TouchEvent>, Vec<ParseError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut events = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        match parse_trace_line(line.as_ref(), index + 1) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(error) => {
                warn!(line = error.line(), %error, "skipping malformed trace line");
                errors.push(error);
            }
        }
    }

    (events, errors)
}

/// Render an event as a single trace line (no trailing newline).
///
/// # Errors
///
/// Fails only if serialization fails, which cannot happen for finite
/// coordinates.
pub fn format_trace_line(event: TouchEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&TraceRecord::from(event))
}
