/// Animatable presentation properties of an element.
///
/// `x`/`y` are translation offsets in pixels, `blur` is a filter radius in
/// pixels and `width_percent` is the element's width relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
    pub blur: f32,
    pub width_percent: f32,
}

impl VisualState {
    /// Resting state: no offset, fully opaque, unscaled, sharp, full width.
    pub const IDENTITY: VisualState = VisualState {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale: 1.0,
        blur: 0.0,
        width_percent: 100.0,
    };

    pub fn is_at_rest(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.opacity == 1.0 && self.scale == 1.0 && self.blur == 0.0
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Partial set of [`VisualState`] properties.
///
/// Tweens describe their start and end states with this type; properties left
/// as `None` are taken from the element when the tween resolves them.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct VisualProps {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    pub blur: Option<f32>,
    pub width_percent: Option<f32>,
}

impl VisualProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Props that bring every transform property back to rest.
    pub fn identity() -> Self {
        Self::new().x(0.0).y(0.0).opacity(1.0).scale(1.0).blur(0.0)
    }

    pub fn x(mut self, value: f32) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f32) -> Self {
        self.y = Some(value);
        self
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn blur(mut self, value: f32) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn width_percent(mut self, value: f32) -> Self {
        self.width_percent = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fills the unspecified properties from `base`.
    pub fn resolve(&self, base: VisualState) -> VisualState {
        VisualState {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            opacity: self.opacity.unwrap_or(base.opacity),
            scale: self.scale.unwrap_or(base.scale),
            blur: self.blur.unwrap_or(base.blur),
            width_percent: self.width_percent.unwrap_or(base.width_percent),
        }
    }

    /// Keeps only the properties that are set in `mask`.
    ///
    /// Used to decide which channels a tween owns: values for properties the
    /// tween does not animate are dropped so overlapping tweens do not fight.
    pub fn masked_by(&self, mask: &VisualProps) -> VisualProps {
        VisualProps {
            x: mask.x.and(self.x),
            y: mask.y.and(self.y),
            opacity: mask.opacity.and(self.opacity),
            scale: mask.scale.and(self.scale),
            blur: mask.blur.and(self.blur),
            width_percent: mask.width_percent.and(self.width_percent),
        }
    }

    /// Captures the properties named by `mask` from a full state.
    pub fn capture(state: &VisualState, mask: &VisualProps) -> VisualProps {
        VisualProps {
            x: mask.x.map(|_| state.x),
            y: mask.y.map(|_| state.y),
            opacity: mask.opacity.map(|_| state.opacity),
            scale: mask.scale.map(|_| state.scale),
            blur: mask.blur.map(|_| state.blur),
            width_percent: mask.width_percent.map(|_| state.width_percent),
        }
    }

    /// Union of two masks; properties set in `other` win.
    pub fn merge(&self, other: &VisualProps) -> VisualProps {
        VisualProps {
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            opacity: other.opacity.or(self.opacity),
            scale: other.scale.or(self.scale),
            blur: other.blur.or(self.blur),
            width_percent: other.width_percent.or(self.width_percent),
        }
    }
}
