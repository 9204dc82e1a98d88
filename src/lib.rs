//! pageswipe
//!
//! Toolkit-independent paged scrolling: a touch state machine that turns
//! pointer samples into a scroll offset, decides between drag, fling and
//! tap, and settles onto page boundaries with an eased animation.
//!
//! Pure core: [`model`], [`kinematics`], [`axis`], [`paging`],
//! [`controller`]. Impure shell for the replay binary: [`config`],
//! [`logging`], [`parser`], [`source`], [`replay`].

pub mod axis;
pub mod config;
pub mod controller;
pub mod kinematics;
pub mod logging;
pub mod model;
pub mod paging;
pub mod parser;
pub mod replay;
pub mod source;

#[cfg(test)]
mod tests;
