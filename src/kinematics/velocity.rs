//! Release velocity estimation.
//!
//! Keeps a short history of touch samples and fits a least-squares line
//! through it. The slope of that line is the pointer velocity.

use std::collections::VecDeque;

use tracing::trace;

use crate::axis::{Axis, AxisStrategy};
use crate::model::TouchSample;

/// Maximum number of samples retained.
pub const HISTORY_SIZE: usize = 20;

/// Only samples this recent (relative to the newest one) contribute.
pub const VELOCITY_WINDOW_MS: u64 = 100;

/// Velocities are reported per this many time units (milliseconds → seconds).
pub const VELOCITY_UNITS: f64 = 1000.0;

/// Pointer velocity in units per second on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

/// Bounded sample history with a regression-based velocity estimate.
///
/// Owned by exactly one controller. Cleared on every Down, fed on every
/// processed event, cleared again when the gesture ends.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<TouchSample>,
}

impl VelocityTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Append a sample and trim the history to the velocity window.
    ///
    /// Samples older than the newest retained one are ignored: the host
    /// guarantees ordering, so a regression here is a host bug and must not
    /// corrupt the fit.
    pub fn record_sample(&mut self, sample: TouchSample) {
        if let Some(last) = self.samples.back() {
            if sample.t < last.t {
                trace!(
                    sample_t = sample.t.as_millis(),
                    last_t = last.t.as_millis(),
                    "ignoring out-of-order touch sample"
                );
                return;
            }
        }

        self.samples.push_back(sample);
        self.trim(sample);
    }

    fn trim(&mut self, newest: TouchSample) {
        while self.samples.len() > HISTORY_SIZE {
            self.samples.pop_front();
        }
        while let Some(first) = self.samples.front() {
            if newest.t.saturating_since(first.t) <= VELOCITY_WINDOW_MS {
                break;
            }
            self.samples.pop_front();
        }
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Velocity on both axes, in units per second.
    pub fn velocity(&self) -> Velocity {
        Velocity {
            x: self.fit_slope(|s| s.x) * VELOCITY_UNITS,
            y: self.fit_slope(|s| s.y) * VELOCITY_UNITS,
        }
    }

    /// Velocity along `axis`, in units per second.
    pub fn estimate_velocity(&self, axis: Axis) -> f64 {
        axis.velocity_component(self.velocity())
    }

    /// Least-squares slope of `position` over time, per millisecond.
    fn fit_slope(&self, position: impl Fn(&TouchSample) -> f64) -> f64 {
        let Some(newest) = self.samples.back() else {
            return 0.0;
        };
        if self.samples.len() < 2 {
            return 0.0;
        }

        // Times relative to the newest sample keep the sums small.
        let n = self.samples.len() as f64;
        let age = |s: &TouchSample| -(newest.t.saturating_since(s.t) as f64);
        let mean_t = self.samples.iter().map(age).sum::<f64>() / n;
        let mean_p = self.samples.iter().map(&position).sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for sample in &self.samples {
            let dt = age(sample) - mean_t;
            covariance += dt * (position(sample) - mean_p);
            variance += dt * dt;
        }

        if variance == 0.0 {
            0.0
        } else {
            covariance / variance
        }
    }
}

#[cfg(test)]
#[path = "velocity_tests.rs"]
mod tests;
