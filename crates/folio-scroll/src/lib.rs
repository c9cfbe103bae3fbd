//! Smooth scrolling for Folio-RS
//!
//! [`SmoothScroller`] turns wheel input and programmatic scrolls into
//! damped, frame-driven motion of the viewport offset. Components talk to it
//! through the [`ScrollController`] seam so tests can substitute a recorder.

mod anchor;
mod config;
mod controller;
mod smooth;

pub use anchor::scroll_to_anchor;
pub use config::{damp, lenis_easing, SmoothScrollConfig};
pub use controller::{ScrollBehavior, ScrollController};
pub use smooth::SmoothScroller;

#[cfg(test)]
#[path = "tests/smooth_tests.rs"]
mod smooth_tests;
