//! Touch input value types.
//!
//! Samples arrive from the host's input dispatch already reduced to a single
//! pointer position plus a monotonic timestamp. Nothing here knows about
//! devices.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::Point;

/// Monotonic time in milliseconds.
///
/// The origin is arbitrary (host uptime, trace start, ...). Only differences
/// are meaningful. Velocities are normalised over 1000 of these units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero instant.
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from raw milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the raw millisecond value.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Advance by `millis`, saturating at `u64::MAX`.
    pub fn saturating_add(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds elapsed since `earlier`, or 0 if `earlier` is later.
    pub fn saturating_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// One pointer position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// When the position was observed.
    pub t: Timestamp,
}

impl TouchSample {
    /// Create a sample.
    pub fn new(x: f64, y: f64, t: Timestamp) -> Self {
        Self { x, y, t }
    }

    /// Position without the timestamp.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Discrete pointer action kinds delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchAction {
    /// Pointer went down. Starts a gesture.
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer lifted. Ends a gesture normally.
    Up,
    /// Gesture aborted by the host. Treated like `Up` by the controller.
    Cancel,
}

impl TouchAction {
    /// True for the actions that terminate a gesture.
    pub fn ends_gesture(&self) -> bool {
        matches!(self, TouchAction::Up | TouchAction::Cancel)
    }
}

impl fmt::Display for TouchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TouchAction::Down => "down",
            TouchAction::Move => "move",
            TouchAction::Up => "up",
            TouchAction::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// A pointer action together with the sample it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// What the pointer did.
    pub action: TouchAction,
    /// Where and when it did it.
    pub sample: TouchSample,
}

impl TouchEvent {
    /// Create an event from its parts.
    pub fn new(action: TouchAction, x: f64, y: f64, t: Timestamp) -> Self {
        Self {
            action,
            sample: TouchSample::new(x, y, t),
        }
    }

    /// `Down` at (`x`, `y`), `t` milliseconds.
    pub fn down(x: f64, y: f64, t: u64) -> Self {
        Self::new(TouchAction::Down, x, y, Timestamp::from_millis(t))
    }

    /// `Move` at (`x`, `y`), `t` milliseconds.
    pub fn moved(x: f64, y: f64, t: u64) -> Self {
        Self::new(TouchAction::Move, x, y, Timestamp::from_millis(t))
    }

    /// `Up` at (`x`, `y`), `t` milliseconds.
    pub fn up(x: f64, y: f64, t: u64) -> Self {
        Self::new(TouchAction::Up, x, y, Timestamp::from_millis(t))
    }

    /// `Cancel` at (`x`, `y`), `t` milliseconds.
    pub fn cancel(x: f64, y: f64, t: u64) -> Self {
        Self::new(TouchAction::Cancel, x, y, Timestamp::from_millis(t))
    }

    /// Timestamp of the carried sample.
    pub fn time(&self) -> Timestamp {
        self.sample.t
    }

    /// Position of the carried sample.
    pub fn point(&self) -> Point {
        self.sample.point()
    }
}
