//! Motion tracking and settle physics (pure).
//!
//! - [`velocity`]: release velocity from a short sample history
//! - [`curve`]: eased, time-sampled settle curves

pub mod curve;
pub mod velocity;

pub use curve::{build_settle_curve, AnimationCurve, CurveSample, Easing, SettleTiming};
pub use velocity::{Velocity, VelocityTracker, VELOCITY_UNITS, VELOCITY_WINDOW_MS};
