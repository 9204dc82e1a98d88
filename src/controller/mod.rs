//! The paged-scrolling gesture controller.
//!
//! [`GestureController`] turns an ordered stream of [`TouchEvent`]s into a
//! scroll offset. It is driven two ways:
//!
//! - **Events.** The host either calls [`GestureController::route`], which
//!   models a container's intercept-then-capture dispatch, or calls
//!   [`on_intercept_event`](GestureController::on_intercept_event) and
//!   [`on_event`](GestureController::on_event) itself.
//! - **Ticks.** While a settle animation is running the host polls
//!   [`tick`](GestureController::tick) once per frame and applies the
//!   returned offset.
//!
//! The controller never fails after construction.

mod release;

pub use release::{decide_release, ReleaseTarget};

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::axis::{Axis, AxisStrategy, ClampedDelta, ScrollBounds};
use crate::config::ControllerConfig;
use crate::kinematics::{build_settle_curve, AnimationCurve, VelocityTracker};
use crate::model::{ConfigurationError, Point, Timestamp, TouchAction, TouchEvent, Viewport};
use crate::paging::{PageChangeListener, PagingModel};

/// Whether the controller currently owns the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureState {
    /// Not dragging. Events belong to the pages.
    #[default]
    Rest,
    /// Drag locked to the scroll axis.
    Scrolling,
}

/// Who receives an event under container dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRoute {
    /// The controller handled the event.
    Controller,
    /// The event passes through to the page under the pointer.
    Children,
    /// The controller took over mid-gesture. Children must be sent a cancel;
    /// this event is consumed by the takeover itself.
    StolenFromChildren,
}

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    /// Live offset after the tick.
    pub offset: f64,
    /// Whether the settle needs more ticks.
    pub still_animating: bool,
}

/// Touch state machine for a paged container.
pub struct GestureController {
    config: ControllerConfig,
    viewport: Viewport,
    paging: PagingModel,
    state: GestureState,
    offset: f64,
    anchor: Option<Point>,
    tracker: VelocityTracker,
    curve: Option<AnimationCurve>,
    captured: bool,
    listener: Box<dyn PageChangeListener>,
}

impl fmt::Debug for GestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureController")
            .field("axis", &self.config.axis)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("current_page", &self.paging.current_page())
            .field("destination_page", &self.paging.destination_page())
            .field("next_page", &self.paging.next_page())
            .field("animating", &self.curve.is_some())
            .finish_non_exhaustive()
    }
}

impl GestureController {
    /// Build a controller resting on `config.initial_page`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the thresholds or settle timing
    /// are invalid, the viewport has a negative or non-finite size, or a page
    /// extent is negative or non-finite.
    pub fn new(
        config: ControllerConfig,
        page_extents: Vec<f64>,
        viewport: Viewport,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        if !viewport.is_valid() {
            return Err(ConfigurationError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let paging = PagingModel::new(page_extents, config.initial_page)?;

        let mut controller = Self {
            config,
            viewport,
            paging,
            state: GestureState::Rest,
            offset: 0.0,
            anchor: None,
            tracker: VelocityTracker::new(),
            curve: None,
            captured: false,
            listener: Box::new(()),
        };
        controller.offset = controller.page_offset(controller.paging.current_page());
        debug!(
            axis = %controller.config.axis,
            pages = controller.paging.page_count(),
            page = controller.paging.current_page(),
            "gesture controller created"
        );
        Ok(controller)
    }

    /// Replace the page-change observer.
    pub fn set_listener(&mut self, listener: Box<dyn PageChangeListener>) {
        self.listener = listener;
    }

    // ===== Event handling =====

    /// Decide whether the controller should take the gesture away from the
    /// pages. Returns `true` once the gesture belongs to the controller.
    pub fn on_intercept_event(&mut self, event: TouchEvent) -> bool {
        if event.action == TouchAction::Move && self.state != GestureState::Rest {
            return true;
        }

        let point = event.point();
        match event.action {
            TouchAction::Down => {
                self.anchor = Some(point);
                self.tracker.clear();
                // A Down during a settle grabs the page mid-flight.
                self.state = if self.curve.is_some() {
                    GestureState::Scrolling
                } else {
                    GestureState::Rest
                };
            }
            TouchAction::Move => match self.anchor {
                None => {
                    trace!("move without down; adopting as anchor");
                    self.anchor = Some(point);
                }
                Some(anchor) => {
                    let dx = point.x - anchor.x;
                    let dy = point.y - anchor.y;
                    if self.paging.page_count() > 0
                        && self
                            .axis()
                            .should_lock_axis(dx, dy, self.config.thresholds.touch_slop)
                    {
                        debug!(dx, dy, "drag locked to axis");
                        self.state = GestureState::Scrolling;
                        self.anchor = Some(point);
                    }
                }
            },
            TouchAction::Up | TouchAction::Cancel => {
                self.state = GestureState::Rest;
            }
        }

        self.state != GestureState::Rest
    }

    /// Handle an event the controller owns. Returns whether it was consumed.
    pub fn on_event(&mut self, event: TouchEvent) -> bool {
        match event.action {
            TouchAction::Down => {
                self.tracker.clear();
                self.tracker.record_sample(event.sample);
                self.abort_settle();
                self.listener.on_request_disallow_intercept();
                self.anchor = Some(event.point());
                true
            }
            TouchAction::Move => {
                self.tracker.record_sample(event.sample);
                if self.state != GestureState::Scrolling {
                    return false;
                }
                if self.viewport.contains(event.point()) {
                    self.drag_to(event.point());
                }
                true
            }
            TouchAction::Up | TouchAction::Cancel => {
                self.tracker.record_sample(event.sample);
                let was_scrolling = self.state == GestureState::Scrolling;
                if was_scrolling {
                    self.release(event.time());
                }
                self.tracker.clear();
                self.state = GestureState::Rest;
                self.anchor = None;
                was_scrolling
            }
        }
    }

    /// Dispatch `event` the way a container would: ask the intercept hook
    /// first, then hand the rest of the gesture to the controller once it
    /// says yes.
    pub fn route(&mut self, event: TouchEvent) -> EventRoute {
        if event.action == TouchAction::Down {
            self.captured = false;
        }

        if self.captured {
            self.on_event(event);
            if event.action.ends_gesture() {
                self.captured = false;
            }
            return EventRoute::Controller;
        }

        let intercepted = self.on_intercept_event(event);
        let route = match (intercepted, event.action) {
            (false, _) => EventRoute::Children,
            (true, TouchAction::Down) => {
                self.on_event(event);
                EventRoute::Controller
            }
            (true, _) => EventRoute::StolenFromChildren,
        };
        self.captured = intercepted && !event.action.ends_gesture();
        trace!(action = %event.action, ?route, "routed touch event");
        route
    }

    fn drag_to(&mut self, point: Point) {
        let Some(anchor) = self.anchor else {
            self.anchor = Some(point);
            return;
        };

        let requested = self.axis().project_delta(anchor, point);
        match self.axis().clamped_scroll_delta(requested, self.bounds()) {
            ClampedDelta::PastLastPage => {
                let page_count = self.paging.page_count();
                trace!(requested, "forward drag past the last page");
                self.listener.on_page_change_end(page_count);
            }
            ClampedDelta::Scroll(delta) => {
                self.offset += delta;
                self.anchor = Some(point);
            }
        }
    }

    fn release(&mut self, now: Timestamp) {
        let velocity = self.tracker.estimate_velocity(self.axis());
        let current = self.paging.current_page();
        let target = match decide_release(velocity, current, &self.config.thresholds) {
            ReleaseTarget::Previous => current - 1,
            ReleaseTarget::Next => current + 1,
            ReleaseTarget::Nearest => self.paging.destination_from_offset(
                self.offset,
                self.viewport_extent(),
                self.axis(),
            ),
        };
        debug!(velocity, current, target, "released drag");
        self.start_settle(target, now);
    }

    // ===== Animation =====

    /// Advance the settle animation to `now`.
    ///
    /// Once the curve finishes the offset is exactly the target page's and
    /// the arrival is recorded; later ticks keep returning that offset.
    pub fn tick(&mut self, now: Timestamp) -> Tick {
        let Some(curve) = self.curve else {
            self.paging.complete_arrival(self.listener.as_mut());
            return Tick {
                offset: self.offset,
                still_animating: false,
            };
        };

        let sample = curve.sample(now);
        self.offset = sample.offset;
        if sample.finished {
            self.curve = None;
            self.paging.complete_arrival(self.listener.as_mut());
        }
        Tick {
            offset: self.offset,
            still_animating: !sample.finished,
        }
    }

    /// True while a settle is running or an arrival is still to be recorded.
    pub fn has_more_ticks(&self) -> bool {
        self.curve.is_some() || self.paging.next_page().is_some()
    }

    /// Settle onto `page` (clamped), starting from the live offset at `now`.
    ///
    /// Does nothing when there are no pages.
    pub fn snap_to(&mut self, page: usize, now: Timestamp) {
        self.start_settle(page, now);
    }

    /// Abort any settle and drop the current gesture.
    ///
    /// The offset stays wherever the last tick left it. A pending arrival is
    /// recorded immediately.
    pub fn cancel(&mut self) {
        self.abort_settle();
        self.state = GestureState::Rest;
        self.anchor = None;
        self.captured = false;
        self.tracker.clear();
    }

    fn start_settle(&mut self, page: usize, now: Timestamp) {
        let Some(target) = self.paging.snap_to(page, self.listener.as_mut()) else {
            trace!(page, "snap ignored without pages");
            return;
        };
        let to = self.page_offset(target);
        let curve = build_settle_curve(self.offset, to, now, &self.config.settle);
        debug!(
            from = self.offset,
            to,
            duration_ms = curve.duration_ms(),
            page = target,
            "settle started"
        );
        self.curve = Some(curve);
    }

    fn abort_settle(&mut self) {
        if self.curve.take().is_some() {
            debug!(offset = self.offset, "settle aborted");
        }
        self.paging.complete_arrival(self.listener.as_mut());
    }

    // ===== Layout =====

    /// New viewport from a layout pass. Invalid sizes are clamped to zero.
    ///
    /// When idle the offset is realigned to the current page.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            warn!(
                width = viewport.width,
                height = viewport.height,
                "clamping invalid viewport size"
            );
        }
        self.viewport = viewport.sanitized();
        self.realign_if_idle();
    }

    /// New page collection from a layout pass. Invalid extents are clamped
    /// to zero.
    ///
    /// When idle the offset is realigned to the (re-clamped) current page.
    pub fn set_page_extents(&mut self, extents: Vec<f64>) {
        self.paging.set_page_extents(extents);
        self.realign_if_idle();
    }

    fn realign_if_idle(&mut self) {
        if self.curve.is_none() && self.state == GestureState::Rest {
            self.offset = self.page_offset(self.paging.current_page());
        }
    }

    // ===== Accessors =====

    /// Live scroll offset along the axis.
    pub fn current_offset(&self) -> f64 {
        self.offset
    }

    /// Whether a drag is in progress.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Page the content last arrived at.
    pub fn current_page(&self) -> usize {
        self.paging.current_page()
    }

    /// Page the latest settle is heading to.
    pub fn destination_page(&self) -> usize {
        self.paging.destination_page()
    }

    /// Arrival still to be recorded, if any.
    pub fn next_page(&self) -> Option<usize> {
        self.paging.next_page()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.paging.page_count()
    }

    /// Scroll axis chosen at construction.
    pub fn axis(&self) -> Axis {
        self.config.axis
    }

    /// Current (sanitised) viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Page bookkeeping.
    pub fn paging(&self) -> &PagingModel {
        &self.paging
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Largest offset a completed settle can produce.
    pub fn max_offset(&self) -> f64 {
        (self.paging.total_extent() - self.viewport_extent()).max(0.0)
    }

    fn viewport_extent(&self) -> f64 {
        self.axis().viewport_extent(&self.viewport)
    }

    fn page_offset(&self, page: usize) -> f64 {
        self.axis().target_offset_for_page(page, self.viewport_extent())
    }

    fn bounds(&self) -> ScrollBounds {
        ScrollBounds {
            offset: self.offset,
            current_page: self.paging.current_page(),
            page_count: self.paging.page_count(),
            content_extent: self.paging.total_extent(),
            viewport_extent: self.viewport_extent(),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
