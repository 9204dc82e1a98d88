//! Domain model types (pure).
//!
//! Value types shared by every layer: timestamps, touch samples, viewport
//! geometry, and the error taxonomy.

pub mod error;
pub mod geometry;
pub mod touch;

// Re-export for convenience
pub use error::{AppError, ConfigurationError, InputError, ParseError};
pub use geometry::{Point, Viewport};
pub use touch::{Timestamp, TouchAction, TouchEvent, TouchSample};
