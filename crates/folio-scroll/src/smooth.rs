use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{Document, FrameCallbackRegistration, RuntimeHandle, Viewport};

use crate::config::{damp, lenis_easing, SmoothScrollConfig};
use crate::controller::{ScrollBehavior, ScrollController};

const NOMINAL_FRAME_SECONDS: f32 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Idle,
    /// Wheel input: chase `target` with frame-rate independent damping.
    Damped,
    /// Programmatic scroll: ease from `from` to `to` over the configured duration.
    Eased {
        from: f32,
        to: f32,
        start_nanos: Option<u64>,
    },
}

struct ScrollerInner {
    config: SmoothScrollConfig,
    runtime: RuntimeHandle,
    document: Document,
    viewport: Viewport,
    enabled: bool,
    animated: f32,
    target: f32,
    motion: Motion,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

impl ScrollerInner {
    fn limit(&self) -> f32 {
        (self.document.page_height() - self.viewport.height()).max(0.0)
    }

    fn clamp(&self, y: f32) -> f32 {
        y.clamp(0.0, self.limit())
    }

    /// Advances the motion to `now`; returns the new offset and whether more
    /// frames are needed.
    fn step(&mut self, now: u64) -> (f32, bool) {
        let dt = self
            .last_frame_nanos
            .map(|last| now.saturating_sub(last) as f32 / 1e9)
            .unwrap_or(NOMINAL_FRAME_SECONDS);
        self.last_frame_nanos = Some(now);
        match self.motion {
            Motion::Idle => {}
            Motion::Damped => {
                self.animated = damp(self.animated, self.target, self.config.lerp, dt);
                if (self.target - self.animated).abs() < self.config.settle_threshold {
                    self.animated = self.target;
                    self.motion = Motion::Idle;
                }
            }
            Motion::Eased { from, to, start_nanos } => {
                let start = start_nanos.unwrap_or(now);
                self.motion = Motion::Eased {
                    from,
                    to,
                    start_nanos: Some(start),
                };
                let duration = self.config.duration_millis.max(1) as f32;
                let t = (now.saturating_sub(start) as f32 / 1e6 / duration).min(1.0);
                self.animated = from + (to - from) * lenis_easing(t);
                if t >= 1.0 {
                    self.animated = to;
                    self.motion = Motion::Idle;
                }
            }
        }
        let running = self.motion != Motion::Idle;
        if !running {
            self.last_frame_nanos = None;
        }
        (self.animated, running)
    }
}

/// Lenis-style smooth scroller driving [`Viewport::scroll_y`].
///
/// The viewport is written outside of the scroller's own borrow, so
/// listeners (scroll triggers, the navbar) may call back into it.
#[derive(Clone)]
pub struct SmoothScroller {
    inner: Rc<RefCell<ScrollerInner>>,
}

impl SmoothScroller {
    /// Starts disabled; the page enables it once loading has finished.
    pub fn new(
        runtime: RuntimeHandle,
        document: Document,
        viewport: Viewport,
        config: SmoothScrollConfig,
    ) -> Self {
        let offset = viewport.scroll_y();
        Self {
            inner: Rc::new(RefCell::new(ScrollerInner {
                config,
                runtime,
                document,
                viewport,
                enabled: false,
                animated: offset,
                target: offset,
                motion: Motion::Idle,
                last_frame_nanos: None,
                registration: None,
            })),
        }
    }

    pub fn config(&self) -> SmoothScrollConfig {
        self.inner.borrow().config
    }

    pub fn is_scrolling(&self) -> bool {
        self.inner.borrow().motion != Motion::Idle
    }

    /// Where the current motion will come to rest.
    pub fn target_scroll(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn animated_scroll(&self) -> f32 {
        self.inner.borrow().animated
    }

    /// Largest reachable offset for the current layout.
    pub fn limit(&self) -> f32 {
        self.inner.borrow().limit()
    }

    /// Stops any motion where it is.
    pub fn stop(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            inner.motion = Motion::Idle;
            inner.target = inner.animated;
            inner.last_frame_nanos = None;
            inner.registration.take()
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    fn jump(&self, y: f32) {
        self.stop();
        let (viewport, offset) = {
            let mut inner = self.inner.borrow_mut();
            let offset = inner.clamp(y);
            inner.animated = offset;
            inner.target = offset;
            (inner.viewport.clone(), offset)
        };
        viewport.set_scroll_y(offset);
    }

    fn ensure_frame(&self) {
        let runtime = {
            let inner = self.inner.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak: Weak<RefCell<ScrollerInner>> = Rc::downgrade(&self.inner);
        let registration = runtime.frame_clock().with_frame_nanos(move |now| {
            if let Some(inner) = weak.upgrade() {
                SmoothScroller { inner }.on_frame(now);
            }
        });
        self.inner.borrow_mut().registration = Some(registration);
    }

    fn on_frame(&self, now: u64) {
        let (viewport, offset, running) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.release();
            }
            let (offset, running) = inner.step(now);
            (inner.viewport.clone(), offset, running)
        };
        viewport.set_scroll_y(offset);
        if running && self.is_scrolling() {
            self.ensure_frame();
        }
    }
}

impl ScrollController for SmoothScroller {
    fn scroll_to(&self, y: f32, behavior: ScrollBehavior) {
        if behavior == ScrollBehavior::Instant || !self.is_enabled() {
            self.jump(y);
            return;
        }
        {
            let mut inner = self.inner.borrow_mut();
            let from = inner.animated;
            let to = inner.clamp(y);
            log::debug!("smooth scroll {from:.0} -> {to:.0}");
            inner.target = to;
            inner.motion = Motion::Eased {
                from,
                to,
                start_nanos: None,
            };
        }
        self.ensure_frame();
    }

    fn scroll_by(&self, delta: f32) {
        if !self.is_enabled() {
            let current = self.inner.borrow().viewport.scroll_y();
            self.jump(current + delta);
            return;
        }
        {
            let mut inner = self.inner.borrow_mut();
            let target = inner.target + delta * inner.config.wheel_multiplier;
            inner.target = inner.clamp(target);
            inner.motion = Motion::Damped;
        }
        self.ensure_frame();
    }

    fn set_enabled(&self, enabled: bool) {
        if self.is_enabled() == enabled {
            return;
        }
        self.stop();
        let mut inner = self.inner.borrow_mut();
        inner.enabled = enabled;
        let offset = inner.viewport.scroll_y();
        inner.animated = offset;
        inner.target = offset;
        log::debug!("smooth scrolling {}", if enabled { "enabled" } else { "disabled" });
    }

    fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }
}

impl fmt::Debug for SmoothScroller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SmoothScroller")
            .field("enabled", &inner.enabled)
            .field("animated", &inner.animated)
            .field("target", &inner.target)
            .field("motion", &inner.motion)
            .finish()
    }
}
