//! Core runtime for Folio-RS
//!
//! A single-threaded, frame-driven runtime plus the pieces every page
//! component builds on: observable state, scoped disposal, a one-shot
//! completion signal, the viewport and the element tree.

pub mod collections;
pub mod document;
pub mod effect;
pub mod frame_clock;
pub mod layout;
pub mod platform;
pub mod runtime;
pub mod signal;
pub mod state;
pub mod viewport;

pub use document::{Document, DocumentError, ElementId};
pub use effect::{Disposer, DisposerList};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use layout::{Columns, Layout};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use signal::{completion, Canceled, CompletionFuture, CompletionSender};
pub use state::{MutableState, State, Subscription};
pub use viewport::{Viewport, ViewportMetrics, MOBILE_BREAKPOINT};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::document::{Document, ElementId};
    pub use crate::effect::DisposerList;
    pub use crate::layout::{Columns, Layout};
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::state::{MutableState, State};
    pub use crate::viewport::Viewport;
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod document_tests;
