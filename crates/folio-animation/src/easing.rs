/// Easing curves.
///
/// The cubic-bezier family follows the Material/CSS definitions; the
/// `Power*` and `BackOut` curves follow the classic web animation
/// vocabulary (`power2.out`, `back.out(1.7)`, ...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    LinearOutSlowInEasing,
    FastOutLinearEasing,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    /// Overshoots past the end by `overshoot` before settling.
    BackOut(f32),
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    ///
    /// The end points map exactly onto themselves.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        match *self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::Power1In => power_in(fraction, 2),
            Easing::Power1Out => power_out(fraction, 2),
            Easing::Power1InOut => power_in_out(fraction, 2),
            Easing::Power2In => power_in(fraction, 3),
            Easing::Power2Out => power_out(fraction, 3),
            Easing::Power2InOut => power_in_out(fraction, 3),
            Easing::Power3In => power_in(fraction, 4),
            Easing::Power3Out => power_out(fraction, 4),
            Easing::Power3InOut => power_in_out(fraction, 4),
            Easing::BackOut(overshoot) => {
                let t = fraction - 1.0;
                1.0 + (overshoot + 1.0) * t * t * t + overshoot * t * t
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::FastOutSlowInEasing
    }
}

fn power_in(t: f32, exponent: i32) -> f32 {
    t.powi(exponent)
}

fn power_out(t: f32, exponent: i32) -> f32 {
    1.0 - (1.0 - t).powi(exponent)
}

fn power_in_out(t: f32, exponent: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(exponent) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
    }
}

/// Evaluates a CSS-style cubic bezier easing at horizontal position `x`.
///
/// Newton-Raphson on the x polynomial, with bisection when the slope is too
/// flat to converge.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let bezier = |p1: f32, p2: f32, t: f32| {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
    };
    let slope = |p1: f32, p2: f32, t: f32| {
        let mt = 1.0 - t;
        3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    };

    let mut t = x;
    for _ in 0..8 {
        let error = bezier(x1, x2, t) - x;
        if error.abs() < 1e-6 {
            return bezier(y1, y2, t);
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= error / d;
    }

    let (mut low, mut high) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..32 {
        let value = bezier(x1, x2, t);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) / 2.0;
    }
    bezier(y1, y2, t)
}
