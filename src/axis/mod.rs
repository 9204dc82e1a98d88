//! Axis-specific gesture geometry.
//!
//! The controller is written once against [`AxisStrategy`]. [`Axis`] is the
//! only implementor: a two-variant enum chosen at construction. Everything
//! that differs between horizontal and vertical paging reduces to
//! [`AxisStrategy::primary`] and [`AxisStrategy::cross`]; the rest of the
//! capability set is provided methods built on those two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kinematics::Velocity;
use crate::model::{Point, Viewport};

/// tan(30°). A drag whose cross/primary ratio reaches this is too diagonal
/// to count as a page swipe.
pub const TAN_30: f64 = 0.577_350_269_189_625_8;

/// Drag response factor past the content bounds.
pub const RUBBER_BAND_DAMPING: f64 = 3.0;

/// Scroll direction of a paged container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Pages laid out left to right; scrolling follows `x`.
    #[default]
    Horizontal,
    /// Pages laid out top to bottom; scrolling follows `y`.
    Vertical,
}

/// Error returned when an axis name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown axis '{0}' (expected 'horizontal' or 'vertical')")]
pub struct UnknownAxis(pub String);

impl FromStr for Axis {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Axis::Horizontal),
            "vertical" => Ok(Axis::Vertical),
            _ => Err(UnknownAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Scroll state needed to clamp a drag delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBounds {
    /// Live scroll offset.
    pub offset: f64,
    /// Last fully arrived-at page.
    pub current_page: usize,
    /// Number of pages in the layout.
    pub page_count: usize,
    /// Sum of all page extents.
    pub content_extent: f64,
    /// Visible size along the axis.
    pub viewport_extent: f64,
}

/// Outcome of clamping a drag delta against the content bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClampedDelta {
    /// Apply this delta to the live offset.
    Scroll(f64),
    /// Forward drag on the last page. Nothing moves; the controller reports
    /// an end-of-pages signal instead.
    PastLastPage,
}

/// Where one page lands in the content strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PagePlacement {
    /// Position of the page in display order.
    pub index: usize,
    /// Top-left corner of the page in content coordinates.
    pub origin: Point,
    /// Extent the page consumes along the axis.
    pub extent: f64,
}

/// Axis-specific projection and page geometry.
pub trait AxisStrategy {
    /// Component of `point` along the scroll axis.
    fn primary(&self, point: Point) -> f64;

    /// Component of `point` across the scroll axis.
    fn cross(&self, point: Point) -> f64;

    /// Point in content space whose primary component is `along`.
    fn point_along(&self, along: f64) -> Point;

    /// Whether a drag of (`dx`, `dy`) commits to this axis.
    ///
    /// Requires the primary displacement to exceed `slop` and the drag to be
    /// within 30° of the axis.
    fn should_lock_axis(&self, dx: f64, dy: f64, slop: f64) -> bool {
        let displacement = Point::new(dx.abs(), dy.abs());
        let primary = self.primary(displacement);
        let cross = self.cross(displacement);
        primary > slop && primary > 0.0 && cross / primary < TAN_30
    }

    /// Scroll delta produced by moving the pointer from `prev` to `curr`.
    ///
    /// Positive when the pointer moves toward lower coordinates, which
    /// scrolls toward higher-indexed pages.
    fn project_delta(&self, prev: Point, curr: Point) -> f64 {
        self.primary(prev) - self.primary(curr)
    }

    /// Clamp a requested drag delta against the content bounds.
    ///
    /// Inside the content the delta passes through, trimmed so it cannot
    /// cross an edge. At the start edge (offset ≤ 0) a backward delta is
    /// damped to a third. Past the end a forward delta is damped too, except
    /// on the last page where it is blocked outright.
    fn clamped_scroll_delta(&self, requested: f64, bounds: ScrollBounds) -> ClampedDelta {
        if bounds.page_count == 0 {
            return ClampedDelta::Scroll(0.0);
        }
        if requested > 0.0 && bounds.current_page + 1 == bounds.page_count {
            return ClampedDelta::PastLastPage;
        }

        if requested < 0.0 {
            if bounds.offset > 0.0 {
                ClampedDelta::Scroll(requested.max(-bounds.offset))
            } else {
                ClampedDelta::Scroll(requested / RUBBER_BAND_DAMPING)
            }
        } else if requested > 0.0 {
            let available = bounds.content_extent - bounds.offset - bounds.viewport_extent;
            if available > 0.0 {
                ClampedDelta::Scroll(requested.min(available))
            } else {
                ClampedDelta::Scroll(requested / RUBBER_BAND_DAMPING)
            }
        } else {
            ClampedDelta::Scroll(0.0)
        }
    }

    /// Velocity component along the axis.
    fn velocity_component(&self, velocity: Velocity) -> f64 {
        self.primary(Point::new(velocity.x, velocity.y))
    }

    /// Offset at which `page` fills the viewport (uniform page size).
    fn target_offset_for_page(&self, page: usize, viewport_extent: f64) -> f64 {
        page as f64 * viewport_extent
    }

    /// Page whose start is nearest `offset`; ties go to the higher page.
    fn nearest_page_from_offset(&self, offset: f64, viewport_extent: f64) -> usize {
        if viewport_extent.is_nan() || viewport_extent <= 0.0 || !offset.is_finite() {
            return 0;
        }
        let page = ((offset + viewport_extent / 2.0) / viewport_extent).floor();
        if page <= 0.0 {
            0
        } else {
            page as usize
        }
    }

    /// Place page `index` directly after `prior_extent` units of content.
    fn layout_page(&self, index: usize, prior_extent: f64, page_extent: f64) -> PagePlacement {
        PagePlacement {
            index,
            origin: self.point_along(prior_extent),
            extent: page_extent,
        }
    }

    /// Visible size of `viewport` along the axis.
    fn viewport_extent(&self, viewport: &Viewport) -> f64 {
        self.primary(Point::new(viewport.width, viewport.height))
    }
}

impl AxisStrategy for Axis {
    fn primary(&self, point: Point) -> f64 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    fn cross(&self, point: Point) -> f64 {
        match self {
            Axis::Horizontal => point.y,
            Axis::Vertical => point.x,
        }
    }

    fn point_along(&self, along: f64) -> Point {
        match self {
            Axis::Horizontal => Point::new(along, 0.0),
            Axis::Vertical => Point::new(0.0, along),
        }
    }
}

#[cfg(test)]
#[path = "axis_tests.rs"]
mod tests;
