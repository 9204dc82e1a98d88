//! Page layout and current/destination/next page bookkeeping.

use tracing::{debug, warn};

use super::listener::PageChangeListener;
use crate::axis::{Axis, AxisStrategy, PagePlacement};
use crate::model::ConfigurationError;

/// Page collection plus the controller's notion of which page it is on.
///
/// # Invariants
/// - `current_page` and `destination_page` are `< page_count()`, or both 0
///   when there are no pages.
/// - `next_page` is `Some` only between a [`snap_to`](Self::snap_to) and the
///   matching [`complete_arrival`](Self::complete_arrival).
#[derive(Debug, Clone, PartialEq)]
pub struct PagingModel {
    extents: Vec<f64>,
    current_page: usize,
    destination_page: usize,
    next_page: Option<usize>,
}

impl PagingModel {
    /// Build a model over `extents`, starting on `initial_page` (clamped).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidPageExtent`] for a negative or
    /// non-finite extent.
    pub fn new(extents: Vec<f64>, initial_page: usize) -> Result<Self, ConfigurationError> {
        if let Some((index, &extent)) = extents
            .iter()
            .enumerate()
            .find(|(_, e)| !e.is_finite() || **e < 0.0)
        {
            return Err(ConfigurationError::InvalidPageExtent { index, extent });
        }

        let mut model = Self {
            extents,
            current_page: 0,
            destination_page: 0,
            next_page: None,
        };
        let start = model.clamp_page(initial_page).unwrap_or(0);
        model.current_page = start;
        model.destination_page = start;
        Ok(model)
    }

    /// `count` pages of identical `extent`.
    pub fn uniform(
        count: usize,
        extent: f64,
        initial_page: usize,
    ) -> Result<Self, ConfigurationError> {
        Self::new(vec![extent; count], initial_page)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.extents.len()
    }

    /// Extent of page `index`, if it exists.
    pub fn page_extent(&self, index: usize) -> Option<f64> {
        self.extents.get(index).copied()
    }

    /// Page extents in display order.
    pub fn pages(&self) -> impl Iterator<Item = f64> + '_ {
        self.extents.iter().copied()
    }

    /// Sum of all page extents.
    pub fn total_extent(&self) -> f64 {
        self.extents.iter().sum()
    }

    /// Page the content last arrived at.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page the most recent snap is heading to.
    pub fn destination_page(&self) -> usize {
        self.destination_page
    }

    /// Arrival still to be recorded, if a settle is pending.
    pub fn next_page(&self) -> Option<usize> {
        self.next_page
    }

    /// Sequential placement of every page along `axis`.
    pub fn layout(&self, axis: Axis) -> Vec<PagePlacement> {
        let mut prior = 0.0;
        self.extents
            .iter()
            .enumerate()
            .map(|(index, &extent)| {
                let placement = axis.layout_page(index, prior, extent);
                prior += placement.extent;
                placement
            })
            .collect()
    }

    /// Replace the page collection.
    ///
    /// Invalid extents become 0 rather than failing: layout passes happen
    /// after construction, where the controller must not error.
    pub fn set_page_extents(&mut self, extents: Vec<f64>) {
        self.extents = extents
            .into_iter()
            .enumerate()
            .map(|(index, extent)| {
                if extent.is_finite() && extent >= 0.0 {
                    extent
                } else {
                    warn!(index, extent, "clamping invalid page extent to 0");
                    0.0
                }
            })
            .collect();

        self.current_page = self.clamp_page(self.current_page).unwrap_or(0);
        self.destination_page = self.clamp_page(self.destination_page).unwrap_or(0);
        self.next_page = self.next_page.and_then(|page| self.clamp_page(page));
    }

    /// Clamp `page` into `[0, page_count - 1]`; `None` without pages.
    pub fn clamp_page(&self, page: usize) -> Option<usize> {
        let last = self.page_count().checked_sub(1)?;
        Some(page.min(last))
    }

    /// Aim at `page` (clamped).
    ///
    /// Fires `on_page_change_start` only when the destination actually
    /// changes. Always records the page as the pending arrival and returns
    /// it; the caller must start a settle toward it. Returns `None` without
    /// pages.
    pub fn snap_to(&mut self, page: usize, listener: &mut dyn PageChangeListener) -> Option<usize> {
        let target = self.clamp_page(page)?;

        if self.destination_page != target {
            debug!(from = self.destination_page, to = target, "page change start");
            self.destination_page = target;
            listener.on_page_change_start(target);
        }
        self.next_page = Some(target);
        Some(target)
    }

    /// Record arrival on the pending page and fire `on_page_change_end`.
    ///
    /// Does nothing when no arrival is pending.
    pub fn complete_arrival(&mut self, listener: &mut dyn PageChangeListener) {
        let Some(next) = self.next_page.take() else {
            return;
        };
        let arrived = self.clamp_page(next).unwrap_or(0);
        self.current_page = arrived;
        self.destination_page = arrived;
        debug!(page = arrived, "page change end");
        listener.on_page_change_end(arrived);
    }

    /// Page nearest the live `offset`, clamped to the collection.
    pub fn destination_from_offset(&self, offset: f64, viewport_extent: f64, axis: Axis) -> usize {
        let nearest = axis.nearest_page_from_offset(offset, viewport_extent);
        self.clamp_page(nearest).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
