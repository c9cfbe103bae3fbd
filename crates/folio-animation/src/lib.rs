//! Animation engine for Folio-RS
//!
//! Tweens describe how element visual state changes over time; timelines
//! place tweens and callbacks relative to each other; an [`Animation`] plays
//! a timeline off the frame clock. [`ScrollTriggers`] defer playback until an
//! element scrolls into view and [`AnimationContext`] groups registrations so
//! a component can revert all of them at once.

mod context;
mod easing;
mod player;
mod scroll_trigger;
mod spec;
mod timeline;
mod tween;

pub use context::{AnimationContext, Animator};
pub use easing::Easing;
pub use player::{Animation, PlaybackStatus};
pub use scroll_trigger::{ScrollTriggers, TriggerId, TriggerStart};
pub use spec::{AnimationSpec, Lerp, Repeat};
pub use timeline::{Position, Timeline};
pub use tween::{Target, Tween};

pub mod prelude {
    pub use crate::context::{AnimationContext, Animator};
    pub use crate::easing::Easing;
    pub use crate::player::Animation;
    pub use crate::scroll_trigger::TriggerStart;
    pub use crate::spec::Repeat;
    pub use crate::timeline::{Position, Timeline};
    pub use crate::tween::{Target, Tween};
    pub use folio_ui_graphics::VisualProps;
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod easing_tests;

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod animation_tests;

#[cfg(test)]
#[path = "tests/scroll_trigger_tests.rs"]
mod scroll_trigger_tests;
