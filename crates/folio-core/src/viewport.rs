use std::rc::Rc;

use crate::runtime::RuntimeHandle;
use crate::state::{MutableState, State, Subscription};

/// Width below which the page uses its mobile layout (the `md` breakpoint).
pub const MOBILE_BREAKPOINT: f32 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl ViewportMetrics {
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}

/// The visible window onto the page.
///
/// The scroll controller is the only writer of `scroll_y`; the shell writes
/// the size on resize. Everything else observes through [`Viewport::subscribe`].
#[derive(Clone)]
pub struct Viewport {
    metrics: Rc<MutableState<ViewportMetrics>>,
}

impl Viewport {
    pub fn new(metrics: ViewportMetrics, runtime: RuntimeHandle) -> Self {
        Self {
            metrics: Rc::new(MutableState::with_runtime(metrics, runtime)),
        }
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics.value()
    }

    pub fn scroll_y(&self) -> f32 {
        self.metrics.with(|metrics| metrics.scroll_y)
    }

    pub fn height(&self) -> f32 {
        self.metrics.with(|metrics| metrics.height)
    }

    pub fn is_mobile(&self) -> bool {
        self.metrics.with(ViewportMetrics::is_mobile)
    }

    /// Returns whether the offset changed.
    pub fn set_scroll_y(&self, scroll_y: f32) -> bool {
        self.metrics.update(|metrics| {
            let changed = metrics.scroll_y != scroll_y;
            metrics.scroll_y = scroll_y;
            changed
        })
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.metrics.update(|metrics| {
            metrics.width = width;
            metrics.height = height;
        });
    }

    pub fn state(&self) -> State<ViewportMetrics> {
        self.metrics.as_state()
    }

    pub fn subscribe(&self, listener: impl FnMut(&ViewportMetrics) + 'static) -> Subscription {
        self.metrics.subscribe(listener)
    }
}
