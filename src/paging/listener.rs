//! Page change notifications.

use std::sync::mpsc::Sender;

use serde::Serialize;

/// Observer for paging events.
///
/// Callbacks run synchronously inside `on_event`/`tick`/`snap_to`. They
/// receive no controller handle, so they cannot re-enter it.
pub trait PageChangeListener {
    /// A settle toward a new destination page began.
    fn on_page_change_start(&mut self, _page: usize) {}

    /// A settle arrived on `page`.
    ///
    /// Also fired with `page == page_count` when the user drags forward on
    /// the last page.
    fn on_page_change_end(&mut self, _page: usize) {}

    /// The controller took a Down and asks ancestors to stop intercepting
    /// the rest of the gesture. Emitted once per Down.
    fn on_request_disallow_intercept(&mut self) {}
}

impl PageChangeListener for () {}

/// A listener callback captured as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PagerNotification {
    /// `on_page_change_start(page)`.
    ChangeStart(usize),
    /// `on_page_change_end(page)`.
    ChangeEnd(usize),
    /// `on_request_disallow_intercept()`.
    DisallowIntercept,
}

/// Forwards every callback over a channel. A closed receiver is ignored.
impl PageChangeListener for Sender<PagerNotification> {
    fn on_page_change_start(&mut self, page: usize) {
        let _ = self.send(PagerNotification::ChangeStart(page));
    }

    fn on_page_change_end(&mut self, page: usize) {
        let _ = self.send(PagerNotification::ChangeEnd(page));
    }

    fn on_request_disallow_intercept(&mut self) {
        let _ = self.send(PagerNotification::DisallowIntercept);
    }
}
