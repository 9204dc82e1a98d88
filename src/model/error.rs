//! Error types for pageswipe.
//!
//! Errors are `thiserror` enums composed via `From` so the binary can use `?`
//! all the way up to `main`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error of the replay binary
//!   - [`ConfigurationError`] - Invalid controller construction parameters
//!   - [`InputError`] - Trace file/stdin reading failures
//!   - [`ParseError`] - Malformed trace lines
//!
//! # Error Recovery Strategy
//!
//! The gesture core only fails at construction. Once a
//! [`GestureController`](crate::controller::GestureController) exists, every
//! event, tick and navigation request succeeds: invalid pages clamp, empty
//! layouts turn navigation into a no-op, and bad layout input is sanitised.
//!
//! Trace parse errors are non-fatal: malformed lines are logged and skipped,
//! so a partially corrupted recording still replays.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the replay binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Controller parameters were rejected.
    #[error("Invalid controller configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Failed to read the trace from file or stdin. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// A trace line could not be parsed.
    ///
    /// Normally logged and skipped; surfaced only when the caller asks for
    /// strict parsing.
    #[error("Failed to parse trace: {0}")]
    Parse(#[from] ParseError),

    /// Writing replay output failed (broken pipe, closed stdout, ...).
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Parameters rejected when constructing a controller.
///
/// This is the only failure the gesture core can report. It is raised by
/// [`ControllerConfig::validate`](crate::config::ControllerConfig::validate)
/// and by [`GestureController::new`](crate::controller::GestureController::new),
/// never during event processing.
///
/// # Examples
///
/// ```
/// use pageswipe::model::error::ConfigurationError;
///
/// let err = ConfigurationError::FlingRangeInverted { min: 900.0, max: 100.0 };
/// assert!(err.to_string().contains("900"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// `min_fling_velocity` is greater than `max_fling_velocity`, which would
    /// leave no velocity that counts as a fling.
    #[error("Minimum fling velocity {min} exceeds maximum fling velocity {max}")]
    FlingRangeInverted {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },

    /// A threshold was negative.
    #[error("Threshold '{name}' must be non-negative (got {value})")]
    NegativeThreshold {
        /// Name of the offending threshold, as spelled in the config file.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A threshold was NaN or infinite.
    #[error("Threshold '{name}' must be finite")]
    NonFiniteThreshold {
        /// Name of the offending threshold.
        name: &'static str,
    },

    /// The viewport had a negative or non-finite size.
    #[error("Viewport size must be finite and non-negative (got {width}x{height})")]
    InvalidViewport {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// A page extent was negative or non-finite.
    #[error("Page {index} has invalid extent {extent}")]
    InvalidPageExtent {
        /// Index of the page in display order.
        index: usize,
        /// The rejected extent.
        extent: f64,
    },

    /// Settle durations are inverted or the rate is unusable.
    #[error("Invalid settle timing: {reason}")]
    InvalidSettleTiming {
        /// Human readable description of what is wrong.
        reason: String,
    },
}

/// Errors encountered when reading a touch trace.
#[derive(Debug, Error)]
pub enum InputError {
    /// The trace file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use pageswipe::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No file argument was given and stdin is an interactive terminal.
    #[error("No input source: provide a trace file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while reading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing trace lines.
///
/// All variants carry the 1-based line number so a recording can be fixed
/// by hand.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Syntactically invalid JSON, an unknown action, or a missing field.
    #[error("Invalid trace event at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Deserializer message.
        message: String,
    },

    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate at line {line}")]
    NonFiniteCoordinate {
        /// 1-based line number.
        line: usize,
    },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. } | ParseError::NonFiniteCoordinate { line } => {
                *line
            }
        }
    }
}
