/// Tuning of the smooth scroller. The defaults match the Lenis library.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothScrollConfig {
    /// Fraction of the remaining distance covered per 60 Hz frame of wheel motion.
    pub lerp: f32,
    /// Length of a programmatic smooth scroll.
    pub duration_millis: u64,
    pub wheel_multiplier: f32,
    /// Motion stops once the offset is this close to its target.
    pub settle_threshold: f32,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.1,
            duration_millis: 1200,
            wheel_multiplier: 1.0,
            settle_threshold: 0.5,
        }
    }
}

impl SmoothScrollConfig {
    pub fn with_lerp(mut self, lerp: f32) -> Self {
        self.lerp = lerp;
        self
    }

    pub fn with_duration(mut self, duration_millis: u64) -> Self {
        self.duration_millis = duration_millis;
        self
    }

    pub fn with_wheel_multiplier(mut self, multiplier: f32) -> Self {
        self.wheel_multiplier = multiplier;
        self
    }
}

/// Exponential ease-out used for programmatic scrolls.
pub fn lenis_easing(t: f32) -> f32 {
    (1.001 - 2f32.powf(-10.0 * t)).min(1.0)
}

/// Frame-rate independent interpolation from `current` towards `target`.
///
/// `dt_seconds` is the time since the previous frame.
pub fn damp(current: f32, target: f32, lerp: f32, dt_seconds: f32) -> f32 {
    let fraction = 1.0 - (-lerp * 60.0 * dt_seconds).exp();
    current + (target - current) * fraction
}
