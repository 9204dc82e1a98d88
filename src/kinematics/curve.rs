//! Settle animation curves.
//!
//! A settle moves the live offset onto a page boundary. The curve is fixed
//! when it starts and sampled by absolute time, so identical tick timestamps
//! always produce identical offsets.

use serde::{Deserialize, Serialize};

use crate::model::Timestamp;

/// Interpolation shape for a settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Quadratic ease-out: `1 - (1 - t)^2`.
    DecelerateQuad,
    /// The platform scroller's viscous-fluid curve: a short exponential
    /// acceleration followed by an exponential decay.
    #[default]
    ViscousFluid,
}

/// Sharpness of the viscous-fluid curve.
const VISCOUS_FLUID_SCALE: f64 = 8.0;

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Both shapes are monotonic, start at 0 and end at 1.
    pub fn apply(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::DecelerateQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::ViscousFluid => {
                let normalize = 1.0 / viscous_fluid(1.0);
                let offset = 1.0 - normalize * viscous_fluid(1.0);
                let eased = normalize * viscous_fluid(t);
                if eased > 0.0 {
                    (eased + offset).min(1.0)
                } else {
                    eased
                }
            }
        }
    }
}

fn viscous_fluid(t: f64) -> f64 {
    let x = t * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e: value of the first segment at x == 1
        let start = 0.367_879_441_171_442_3;
        let decayed = 1.0 - (1.0 - x).exp();
        start + decayed * (1.0 - start)
    }
}

/// How settle durations are derived from distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleTiming {
    /// Milliseconds of animation per unit of distance.
    pub ms_per_unit: f64,
    /// Lower bound on any settle's duration.
    pub min_duration_ms: u64,
    /// Upper bound on any settle's duration.
    pub max_duration_ms: u64,
    /// Interpolation shape.
    pub easing: Easing,
}

impl Default for SettleTiming {
    fn default() -> Self {
        Self {
            ms_per_unit: 1.0,
            min_duration_ms: 100,
            max_duration_ms: 600,
            easing: Easing::default(),
        }
    }
}

impl SettleTiming {
    /// Duration for a settle covering `distance` units.
    pub fn duration_for(&self, distance: f64) -> u64 {
        let raw = (distance.abs() * self.ms_per_unit).round();
        let raw = if raw.is_finite() && raw > 0.0 {
            raw.min(u64::MAX as f64) as u64
        } else {
            0
        };
        raw.clamp(self.min_duration_ms, self.max_duration_ms)
    }
}

/// An immutable settle from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCurve {
    start_offset: f64,
    end_offset: f64,
    start_time: Timestamp,
    duration_ms: u64,
    easing: Easing,
}

/// Result of sampling a curve at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Offset at the sampled instant.
    pub offset: f64,
    /// Whether the curve has reached its end offset.
    pub finished: bool,
}

impl AnimationCurve {
    /// Curve from `start_offset` to `end_offset` over `duration_ms`,
    /// beginning at `start_time`.
    pub fn new(
        start_offset: f64,
        end_offset: f64,
        start_time: Timestamp,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            start_offset,
            end_offset,
            start_time,
            duration_ms,
            easing,
        }
    }

    /// Offset at the start time.
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Offset the curve settles on.
    pub fn end_offset(&self) -> f64 {
        self.end_offset
    }

    /// Instant the curve begins.
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Length of the animation in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Instant at which the curve reaches its end offset.
    pub fn end_time(&self) -> Timestamp {
        self.start_time.saturating_add(self.duration_ms)
    }

    /// Offset at `now`.
    ///
    /// Before the start time this is the start offset; at or after the end
    /// time it is exactly the end offset and `finished` is set.
    pub fn sample(&self, now: Timestamp) -> CurveSample {
        if now >= self.end_time() {
            return CurveSample {
                offset: self.end_offset,
                finished: true,
            };
        }

        let elapsed = now.saturating_since(self.start_time) as f64;
        let progress = elapsed / self.duration_ms as f64;
        let eased = self.easing.apply(progress);
        CurveSample {
            offset: self.start_offset + (self.end_offset - self.start_offset) * eased,
            finished: false,
        }
    }
}

/// Build the curve that settles `from` onto `to`, starting at `now`.
pub fn build_settle_curve(
    from: f64,
    to: f64,
    now: Timestamp,
    timing: &SettleTiming,
) -> AnimationCurve {
    let duration = timing.duration_for(to - from);
    AnimationCurve::new(from, to, now, duration, timing.easing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn easings_hit_both_endpoints() {
        for easing in [Easing::DecelerateQuad, Easing::ViscousFluid] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} must start at 0");
            assert!(
                (easing.apply(1.0) - 1.0).abs() < 1e-9,
                "{easing:?} must end at 1"
            );
        }
    }

    #[test]
    fn easings_are_monotonic() {
        for easing in [Easing::DecelerateQuad, Easing::ViscousFluid] {
            let mut previous = 0.0;
            for step in 0..=200 {
                let value = easing.apply(step as f64 / 200.0);
                assert!(value >= previous, "{easing:?} decreased at step {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn decelerate_quad_midpoint() {
        assert!((Easing::DecelerateQuad.apply(0.5) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn duration_scales_with_distance_within_bounds() {
        let timing = SettleTiming::default();
        assert_eq!(timing.duration_for(300.0), 300);
        assert_eq!(timing.duration_for(-300.0), 300);
        assert_eq!(timing.duration_for(10.0), 100, "clamped to minimum");
        assert_eq!(timing.duration_for(5000.0), 600, "clamped to maximum");
        assert_eq!(timing.duration_for(0.0), 100);
    }

    #[test]
    fn curve_samples_start_and_end_exactly() {
        let timing = SettleTiming::default();
        let curve = build_settle_curve(0.0, 300.0, ms(1000), &timing);
        assert_eq!(curve.duration_ms(), 300);

        let start = curve.sample(ms(1000));
        assert_eq!(start.offset, 0.0);
        assert!(!start.finished);

        let end = curve.sample(ms(1300));
        assert_eq!(end.offset, 300.0);
        assert!(end.finished);

        let after = curve.sample(ms(5000));
        assert_eq!(after, end);
    }

    #[test]
    fn curve_before_start_holds_start_offset() {
        let curve = AnimationCurve::new(50.0, 0.0, ms(100), 200, Easing::DecelerateQuad);
        let sample = curve.sample(ms(10));
        assert_eq!(sample.offset, 50.0);
        assert!(!sample.finished);
    }

    #[test]
    fn backward_curve_moves_monotonically_down() {
        let curve = AnimationCurve::new(600.0, 300.0, ms(0), 300, Easing::ViscousFluid);
        let mut previous = f64::INFINITY;
        for t in (0..=300).step_by(10) {
            let offset = curve.sample(ms(t)).offset;
            assert!(offset <= previous);
            assert!((300.0..=600.0).contains(&offset));
            previous = offset;
        }
    }

    #[test]
    fn zero_duration_curve_is_finished_immediately() {
        let curve = AnimationCurve::new(0.0, 10.0, ms(5), 0, Easing::DecelerateQuad);
        let sample = curve.sample(ms(5));
        assert!(sample.finished);
        assert_eq!(sample.offset, 10.0);
    }
}
