//! Page collection state and the page-change observer contract.

pub mod listener;
pub mod model;

pub use listener::{PageChangeListener, PagerNotification};
pub use model::PagingModel;
