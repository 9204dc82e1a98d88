//! Internal test modules - whitebox tests with crate access
//!
//! Randomised gesture streams checked against the controller's bookkeeping
//! invariants after every step.

mod gesture_invariants;
