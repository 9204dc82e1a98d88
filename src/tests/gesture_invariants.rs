//! Invariants that must hold after every event and tick, whatever the
//! gesture stream looks like.

use crate::config::ControllerConfig;
use crate::controller::{GestureController, GestureState};
use crate::model::{Timestamp, TouchEvent, Viewport};
use proptest::prelude::*;

const PAGE: f64 = 300.0;
const PAGES: usize = 5;
const FRAME_MS: u64 = 16;

/// One finger-down .. finger-up gesture.
#[derive(Debug, Clone)]
struct Gesture {
    x: f64,
    y: f64,
    /// Pointer displacement per 10 ms step.
    steps: Vec<(f64, f64)>,
    /// Idle time before the gesture starts.
    gap_ms: u64,
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    (
        0.0..PAGE,
        0.0..480.0f64,
        prop::collection::vec((-80.0..80.0f64, -25.0..25.0f64), 0..8),
        0u64..400,
    )
        .prop_map(|(x, y, steps, gap_ms)| Gesture {
            x,
            y,
            steps,
            gap_ms,
        })
}

fn events_for(gestures: &[Gesture]) -> Vec<TouchEvent> {
    let mut events = Vec::new();
    let mut t = 0;
    for gesture in gestures {
        t += gesture.gap_ms;
        let (mut x, mut y) = (gesture.x, gesture.y);
        events.push(TouchEvent::down(x, y, t));
        for (dx, dy) in &gesture.steps {
            t += 10;
            x += dx;
            y += dy;
            events.push(TouchEvent::moved(x, y, t));
        }
        t += 10;
        events.push(TouchEvent::up(x, y, t));
    }
    events
}

fn controller(initial_page: usize) -> GestureController {
    let config = ControllerConfig {
        initial_page,
        ..ControllerConfig::default()
    };
    GestureController::new(config, vec![PAGE; PAGES], Viewport::sized(PAGE, 480.0))
        .expect("valid controller")
}

fn assert_bookkeeping(controller: &GestureController) -> Result<(), TestCaseError> {
    prop_assert!(controller.current_page() < PAGES);
    prop_assert!(controller.destination_page() < PAGES);
    if let Some(next) = controller.next_page() {
        prop_assert!(next < PAGES);
        prop_assert_eq!(next, controller.destination_page());
    }
    prop_assert_eq!(
        controller.has_more_ticks(),
        controller.next_page().is_some(),
        "a settle and its pending arrival live and die together"
    );
    prop_assert!(controller.current_offset().is_finite());
    Ok(())
}

/// Tick every frame strictly before `until`.
fn run_frames(
    controller: &mut GestureController,
    clock: &mut u64,
    until: u64,
) -> Result<(), TestCaseError> {
    while controller.has_more_ticks() && *clock + FRAME_MS < until {
        *clock += FRAME_MS;
        controller.tick(Timestamp::from_millis(*clock));
        assert_bookkeeping(controller)?;
    }
    *clock = (*clock).max(until);
    Ok(())
}

proptest! {
    #[test]
    fn bookkeeping_holds_throughout_any_gesture_stream(
        initial_page in 0usize..PAGES,
        gestures in prop::collection::vec(arb_gesture(), 1..6),
    ) {
        let mut controller = controller(initial_page);
        let mut clock = 0;

        for event in events_for(&gestures) {
            run_frames(&mut controller, &mut clock, event.time().as_millis())?;
            controller.route(event);
            assert_bookkeeping(&controller)?;
        }
        prop_assert_eq!(controller.state(), GestureState::Rest);

        controller.tick(Timestamp::from_millis(clock + 10_000));
        assert_bookkeeping(&controller)?;
        prop_assert!(!controller.has_more_ticks());
    }

    #[test]
    fn completed_settle_rests_exactly_on_a_page(
        initial_page in 0usize..PAGES,
        gestures in prop::collection::vec(arb_gesture(), 1..6),
    ) {
        let mut controller = controller(initial_page);
        let mut clock = 0;

        for event in events_for(&gestures) {
            run_frames(&mut controller, &mut clock, event.time().as_millis())?;
            controller.route(event);
        }
        controller.tick(Timestamp::from_millis(clock + 10_000));

        let offset = controller.current_offset();
        prop_assert!(offset >= 0.0 && offset <= controller.max_offset());
        prop_assert_eq!(offset, controller.current_page() as f64 * PAGE);
    }
}
