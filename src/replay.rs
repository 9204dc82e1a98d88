//! Trace replay.
//!
//! Feeds recorded [`TouchEvent`]s through a [`GestureController`] and ticks
//! any settle animation at a fixed frame cadence, the way a host's frame
//! clock would. Everything observable is captured as [`ReplayRecord`]s in
//! time order.

use std::io::Write;
use std::sync::mpsc::{self, Receiver};

use serde::Serialize;
use tracing::debug;

use crate::controller::{EventRoute, GestureController, GestureState};
use crate::model::{Timestamp, TouchAction, TouchEvent};
use crate::paging::PagerNotification;

/// Frame interval used when none is configured (about 60 fps).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// One line of replay output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayRecord {
    /// A trace event and the controller's state right after handling it.
    Event {
        /// Event time in milliseconds.
        t: u64,
        /// Touch action from the trace.
        action: TouchAction,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
        /// Who received the event.
        route: EventRoute,
        /// Live offset after the event.
        offset: f64,
        /// Gesture state after the event.
        state: GestureState,
        /// Current page after the event.
        page: usize,
    },
    /// An animation tick.
    Frame {
        /// Frame time in milliseconds.
        t: u64,
        /// Live offset after the tick.
        offset: f64,
        /// Whether more frames follow.
        still_animating: bool,
        /// Current page after the tick.
        page: usize,
    },
    /// A page-change callback fired while handling the preceding record.
    Notification {
        /// Time of the event or frame that fired it.
        t: u64,
        /// The callback.
        notification: PagerNotification,
    },
}

/// Drives one controller through a trace.
#[derive(Debug)]
pub struct Replay {
    controller: GestureController,
    notifications: Receiver<PagerNotification>,
    frame_interval_ms: u64,
    next_frame: Option<Timestamp>,
}

impl Replay {
    /// Take over `controller`, installing a listener that records callbacks.
    ///
    /// A zero frame interval is treated as 1 ms.
    pub fn new(mut controller: GestureController, frame_interval_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        controller.set_listener(Box::new(tx));
        Self {
            controller,
            notifications: rx,
            frame_interval_ms: frame_interval_ms.max(1),
            next_frame: None,
        }
    }

    /// The controller being driven.
    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    /// Run frames due at or before `event`, then route the event.
    pub fn feed(&mut self, event: TouchEvent) -> Vec<ReplayRecord> {
        let mut records = Vec::new();
        self.run_frames(Some(event.time()), &mut records);

        let route = self.controller.route(event);
        records.push(ReplayRecord::Event {
            t: event.time().as_millis(),
            action: event.action,
            x: event.sample.x,
            y: event.sample.y,
            route,
            offset: self.controller.current_offset(),
            state: self.controller.state(),
            page: self.controller.current_page(),
        });
        self.drain_notifications(event.time(), &mut records);

        if self.controller.has_more_ticks() && self.next_frame.is_none() {
            self.next_frame = Some(event.time().saturating_add(self.frame_interval_ms));
        }
        records
    }

    /// Run the remaining frames until the controller is idle.
    pub fn finish(&mut self) -> Vec<ReplayRecord> {
        let mut records = Vec::new();
        self.run_frames(None, &mut records);
        records
    }

    fn run_frames(&mut self, until: Option<Timestamp>, records: &mut Vec<ReplayRecord>) {
        while let Some(frame_time) = self.next_frame {
            if !self.controller.has_more_ticks() {
                self.next_frame = None;
                break;
            }
            if until.is_some_and(|limit| frame_time > limit) {
                break;
            }

            let tick = self.controller.tick(frame_time);
            records.push(ReplayRecord::Frame {
                t: frame_time.as_millis(),
                offset: tick.offset,
                still_animating: tick.still_animating,
                page: self.controller.current_page(),
            });
            self.drain_notifications(frame_time, records);

            self.next_frame = if self.controller.has_more_ticks() {
                Some(frame_time.saturating_add(self.frame_interval_ms))
            } else {
                None
            };
        }
    }

    fn drain_notifications(&mut self, at: Timestamp, records: &mut Vec<ReplayRecord>) {
        for notification in self.notifications.try_iter() {
            records.push(ReplayRecord::Notification {
                t: at.as_millis(),
                notification,
            });
        }
    }
}

/// Replay `events` in order and run the trailing settle to completion.
pub fn replay_trace(
    controller: GestureController,
    events: &[TouchEvent],
    frame_interval_ms: u64,
) -> (Vec<ReplayRecord>, GestureController) {
    let mut replay = Replay::new(controller, frame_interval_ms);
    let mut records = Vec::new();
    for event in events {
        records.extend(replay.feed(*event));
    }
    records.extend(replay.finish());

    debug!(
        events = events.len(),
        records = records.len(),
        "replay finished"
    );
    (records, replay.controller)
}

/// Write records as JSONL.
///
/// # Errors
///
/// Returns the underlying I/O error (a closed pipe, for instance).
pub fn write_records<W: Write>(mut writer: W, records: &[ReplayRecord]) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
