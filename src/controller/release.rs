//! Fling classification on release.

use crate::config::Thresholds;

/// Where a released drag should settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// Fling back one page.
    Previous,
    /// Fling forward one page.
    Next,
    /// Not a fling; settle on whichever page is nearest the live offset.
    Nearest,
}

/// Classify a release by its axis velocity (units per second).
///
/// Positive velocity means the pointer moved toward higher coordinates,
/// which scrolls back toward page 0. A backward fling on page 0 has
/// nowhere to go and falls through to [`ReleaseTarget::Nearest`].
pub fn decide_release(
    velocity: f64,
    current_page: usize,
    thresholds: &Thresholds,
) -> ReleaseTarget {
    let band = thresholds.min_fling_velocity..=thresholds.max_fling_velocity;

    if band.contains(&velocity) && current_page > 0 {
        ReleaseTarget::Previous
    } else if band.contains(&-velocity) {
        ReleaseTarget::Next
    } else {
        ReleaseTarget::Nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn forward_fling_goes_to_next_page() {
        let velocity = -(thresholds().min_fling_velocity + 1.0);
        assert_eq!(
            decide_release(velocity, 2, &thresholds()),
            ReleaseTarget::Next
        );
    }

    #[test]
    fn backward_fling_goes_to_previous_page() {
        assert_eq!(
            decide_release(1200.0, 2, &thresholds()),
            ReleaseTarget::Previous
        );
    }

    #[test]
    fn backward_fling_on_first_page_settles_nearest() {
        let velocity = thresholds().min_fling_velocity + 1.0;
        assert_eq!(
            decide_release(velocity, 0, &thresholds()),
            ReleaseTarget::Nearest
        );
    }

    #[test]
    fn slow_release_settles_nearest() {
        assert_eq!(decide_release(10.0, 2, &thresholds()), ReleaseTarget::Nearest);
        assert_eq!(decide_release(-10.0, 2, &thresholds()), ReleaseTarget::Nearest);
        assert_eq!(decide_release(0.0, 2, &thresholds()), ReleaseTarget::Nearest);
    }

    #[test]
    fn release_faster_than_max_fling_settles_nearest() {
        assert_eq!(
            decide_release(-9000.0, 1, &thresholds()),
            ReleaseTarget::Nearest
        );
        assert_eq!(
            decide_release(9000.0, 1, &thresholds()),
            ReleaseTarget::Nearest
        );
    }

    #[test]
    fn band_edges_are_inclusive() {
        let t = thresholds();
        assert_eq!(
            decide_release(-t.min_fling_velocity, 1, &t),
            ReleaseTarget::Next
        );
        assert_eq!(
            decide_release(t.max_fling_velocity, 1, &t),
            ReleaseTarget::Previous
        );
    }
}
