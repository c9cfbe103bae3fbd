use folio_ui_graphics::{VisualProps, VisualState};

use crate::easing::Easing;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for VisualState {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        VisualState {
            x: self.x.lerp(&target.x, fraction),
            y: self.y.lerp(&target.y, fraction),
            opacity: self.opacity.lerp(&target.opacity, fraction),
            scale: self.scale.lerp(&target.scale, fraction),
            blur: self.blur.lerp(&target.blur, fraction),
            width_percent: self.width_percent.lerp(&target.width_percent, fraction),
        }
    }
}

/// Interpolates the properties present on both sides.
///
/// Fractions of exactly 0 and 1 return the end points untouched so finished
/// tweens land on their declared values.
impl Lerp for VisualProps {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        if fraction == 0.0 {
            return *self;
        }
        if fraction == 1.0 {
            return *target;
        }
        let mix = |from: Option<f32>, to: Option<f32>| match (from, to) {
            (Some(from), Some(to)) => Some(from.lerp(&to, fraction)),
            (None, to) => to,
            (from, None) => from,
        };
        VisualProps {
            x: mix(self.x, target.x),
            y: mix(self.y, target.y),
            opacity: mix(self.opacity, target.opacity),
            scale: mix(self.scale, target.scale),
            blur: mix(self.blur, target.blur),
            width_percent: mix(self.width_percent, target.width_percent),
        }
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// How many extra cycles a tween plays after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    Count(u32),
    Infinite,
}

impl Repeat {
    /// Total number of cycles, `None` when the tween never ends.
    pub fn cycles(&self) -> Option<u32> {
        match self {
            Repeat::Once => Some(1),
            Repeat::Count(extra) => Some(extra.saturating_add(1)),
            Repeat::Infinite => None,
        }
    }
}
