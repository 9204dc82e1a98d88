//! Controller configuration.
//!
//! [`ControllerConfig`] is what the gesture core consumes. The [`loader`]
//! module resolves it from defaults, a TOML file, environment variables and
//! CLI flags.

pub mod loader;

use crate::axis::Axis;
use crate::kinematics::SettleTiming;
use crate::model::ConfigurationError;

/// Gesture classification thresholds, in axis units and axis units per
/// second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Distance a pointer must travel along the axis before a drag locks.
    pub touch_slop: f64,
    /// Slowest release that still counts as a fling.
    pub min_fling_velocity: f64,
    /// Fastest release that still counts as a fling.
    pub max_fling_velocity: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
        }
    }
}

impl Thresholds {
    /// Check that every threshold is finite, non-negative and that the fling
    /// band is not inverted.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("touch_slop", self.touch_slop),
            ("min_fling_velocity", self.min_fling_velocity),
            ("max_fling_velocity", self.max_fling_velocity),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteThreshold { name });
            }
            if value < 0.0 {
                return Err(ConfigurationError::NegativeThreshold { name, value });
            }
        }

        if self.min_fling_velocity > self.max_fling_velocity {
            return Err(ConfigurationError::FlingRangeInverted {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        Ok(())
    }
}

/// Everything a [`GestureController`](crate::controller::GestureController)
/// needs besides the page layout and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerConfig {
    /// Scroll direction.
    pub axis: Axis,
    /// Slop and fling limits.
    pub thresholds: Thresholds,
    /// Settle animation timing.
    pub settle: SettleTiming,
    /// Page shown at construction. Clamped to the page collection.
    pub initial_page: usize,
}

impl ControllerConfig {
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for invalid thresholds or settle timing.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.thresholds.validate()?;

        let settle = &self.settle;
        if !settle.ms_per_unit.is_finite() || settle.ms_per_unit < 0.0 {
            return Err(ConfigurationError::InvalidSettleTiming {
                reason: format!(
                    "ms_per_unit must be finite and non-negative (got {})",
                    settle.ms_per_unit
                ),
            });
        }
        if settle.min_duration_ms > settle.max_duration_ms {
            return Err(ConfigurationError::InvalidSettleTiming {
                reason: format!(
                    "min duration {}ms exceeds max duration {}ms",
                    settle.min_duration_ms, settle.max_duration_ms
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ControllerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.axis, Axis::Horizontal);
        assert_eq!(config.thresholds.touch_slop, 8.0);
        assert_eq!(config.initial_page, 0);
    }

    #[test]
    fn inverted_fling_band_is_rejected() {
        let config = ControllerConfig {
            thresholds: Thresholds {
                min_fling_velocity: 900.0,
                max_fling_velocity: 100.0,
                ..Thresholds::default()
            },
            ..ControllerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::FlingRangeInverted {
                min: 900.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn negative_slop_is_rejected_by_name() {
        let thresholds = Thresholds {
            touch_slop: -1.0,
            ..Thresholds::default()
        };
        assert_eq!(
            thresholds.validate(),
            Err(ConfigurationError::NegativeThreshold {
                name: "touch_slop",
                value: -1.0
            })
        );
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let thresholds = Thresholds {
            max_fling_velocity: f64::NAN,
            ..Thresholds::default()
        };
        assert_eq!(
            thresholds.validate(),
            Err(ConfigurationError::NonFiniteThreshold {
                name: "max_fling_velocity"
            })
        );
    }

    #[test]
    fn inverted_settle_durations_are_rejected() {
        let config = ControllerConfig {
            settle: SettleTiming {
                min_duration_ms: 700,
                max_duration_ms: 600,
                ..SettleTiming::default()
            },
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidSettleTiming { .. })
        ));
    }

    #[test]
    fn zero_thresholds_are_allowed() {
        let thresholds = Thresholds {
            touch_slop: 0.0,
            min_fling_velocity: 0.0,
            max_fling_velocity: 0.0,
        };
        assert_eq!(thresholds.validate(), Ok(()));
    }
}
