//! Tests for velocity estimation.

use super::*;
use crate::model::Timestamp;

fn sample(x: f64, y: f64, t: u64) -> TouchSample {
    TouchSample::new(x, y, Timestamp::from_millis(t))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn empty_tracker_reports_zero() {
    let tracker = VelocityTracker::new();
    assert_eq!(tracker.velocity(), Velocity::default());
}

#[test]
fn single_sample_reports_zero() {
    let mut tracker = VelocityTracker::new();
    tracker.record_sample(sample(10.0, 10.0, 0));
    assert_eq!(tracker.estimate_velocity(Axis::Horizontal), 0.0);
}

#[test]
fn two_samples_give_exact_delta_over_time() {
    // GIVEN a pointer moving 50 units in 10ms
    let mut tracker = VelocityTracker::new();
    tracker.record_sample(sample(100.0, 0.0, 0));
    tracker.record_sample(sample(50.0, 0.0, 10));

    // THEN velocity is -5 units/ms = -5000 units/s
    assert_close(tracker.estimate_velocity(Axis::Horizontal), -5000.0);
}

#[test]
fn constant_speed_is_recovered_exactly() {
    let mut tracker = VelocityTracker::new();
    for i in 0..5u64 {
        tracker.record_sample(sample(0.0, 2.0 * i as f64 * 8.0, i * 8));
    }
    let velocity = tracker.velocity();
    assert_close(velocity.x, 0.0);
    assert_close(velocity.y, 2000.0);
    assert_close(tracker.estimate_velocity(Axis::Vertical), 2000.0);
}

#[test]
fn samples_outside_window_are_dropped() {
    let mut tracker = VelocityTracker::new();
    // Fast motion long ago
    tracker.record_sample(sample(0.0, 0.0, 0));
    tracker.record_sample(sample(500.0, 0.0, 10));
    // Slow motion recently
    tracker.record_sample(sample(500.0, 0.0, 200));
    tracker.record_sample(sample(510.0, 0.0, 210));

    assert_eq!(tracker.len(), 2, "samples older than the window must go");
    assert_close(tracker.estimate_velocity(Axis::Horizontal), 1000.0);
}

#[test]
fn history_is_bounded() {
    let mut tracker = VelocityTracker::new();
    for i in 0..(HISTORY_SIZE as u64 * 2) {
        tracker.record_sample(sample(i as f64, 0.0, i));
    }
    assert_eq!(tracker.len(), HISTORY_SIZE);
}

#[test]
fn out_of_order_samples_are_ignored() {
    let mut tracker = VelocityTracker::new();
    tracker.record_sample(sample(0.0, 0.0, 50));
    tracker.record_sample(sample(100.0, 0.0, 40));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn identical_timestamps_report_zero() {
    let mut tracker = VelocityTracker::new();
    tracker.record_sample(sample(0.0, 0.0, 5));
    tracker.record_sample(sample(90.0, 0.0, 5));
    assert_eq!(tracker.estimate_velocity(Axis::Horizontal), 0.0);
}

#[test]
fn clear_empties_history() {
    let mut tracker = VelocityTracker::new();
    tracker.record_sample(sample(0.0, 0.0, 0));
    tracker.record_sample(sample(10.0, 0.0, 5));
    tracker.clear();
    assert!(tracker.is_empty());
    assert_eq!(tracker.velocity(), Velocity::default());
}
