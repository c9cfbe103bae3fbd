use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{Document, ElementId, FrameCallbackRegistration, RuntimeHandle};
use folio_ui_graphics::VisualState;

use crate::timeline::TimelineRun;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Registered but waiting to be played (e.g. for a scroll trigger).
    Idle,
    Running,
    Completed,
    Killed,
}

struct PlayerInner {
    label: &'static str,
    runtime: RuntimeHandle,
    document: Document,
    timeline: TimelineRun,
    status: PlaybackStatus,
    start_time_nanos: Option<u64>,
    elapsed_millis: f64,
    registration: Option<FrameCallbackRegistration>,
    snapshots: Vec<(ElementId, VisualState)>,
}

/// Handle to a playing (or playable) timeline.
///
/// Driven by the frame clock: each frame re-registers a one-shot callback
/// until the timeline has finished. The first frame after [`play`] defines
/// time zero.
///
/// [`play`]: Animation::play
#[derive(Clone)]
pub struct Animation {
    inner: Rc<RefCell<PlayerInner>>,
    killed: Rc<Cell<bool>>,
}

impl Animation {
    /// Binds a resolved timeline to the document.
    ///
    /// Captures the pre-animation state of every target for [`revert`] and
    /// then renders the explicit start values.
    ///
    /// [`revert`]: Animation::revert
    pub(crate) fn new(
        label: &'static str,
        runtime: RuntimeHandle,
        document: Document,
        timeline: TimelineRun,
    ) -> Self {
        let snapshots = timeline
            .elements()
            .into_iter()
            .filter_map(|element| document.visual(element).ok().map(|visual| (element, visual)))
            .collect();
        timeline.render_from(&document);
        Self {
            inner: Rc::new(RefCell::new(PlayerInner {
                label,
                runtime,
                document,
                timeline,
                status: PlaybackStatus::Idle,
                start_time_nanos: None,
                elapsed_millis: 0.0,
                registration: None,
                snapshots,
            })),
            killed: Rc::new(Cell::new(false)),
        }
    }

    pub fn label(&self) -> &'static str {
        self.inner.borrow().label
    }

    pub fn status(&self) -> PlaybackStatus {
        self.inner.borrow().status
    }

    pub fn is_running(&self) -> bool {
        self.status() == PlaybackStatus::Running
    }

    /// Milliseconds of timeline time rendered so far.
    pub fn elapsed_millis(&self) -> f64 {
        self.inner.borrow().elapsed_millis
    }

    /// Total length in milliseconds, `None` when a child repeats forever.
    pub fn duration_millis(&self) -> Option<f64> {
        self.inner.borrow().timeline.duration()
    }

    /// Elements this animation writes to, in first-use order.
    pub fn targets(&self) -> Vec<ElementId> {
        self.inner.borrow().snapshots.iter().map(|(element, _)| *element).collect()
    }

    /// When each target first rendered, in milliseconds of timeline time.
    pub fn track_starts(&self) -> Vec<(ElementId, Option<f64>)> {
        self.inner.borrow().timeline.track_starts()
    }

    /// Starts playback. Has no effect unless the animation is idle.
    pub fn play(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.status != PlaybackStatus::Idle {
                return;
            }
            inner.status = PlaybackStatus::Running;
            log::trace!("animation {} started", inner.label);
        }
        self.schedule_next_frame();
    }

    /// Stops playback, leaving targets where they are. Pending callbacks of
    /// the current frame are dropped.
    pub fn kill(&self) {
        self.killed.set(true);
        let registration = {
            let mut inner = self.inner.borrow_mut();
            if matches!(inner.status, PlaybackStatus::Idle | PlaybackStatus::Running) {
                inner.status = PlaybackStatus::Killed;
            }
            inner.registration.take()
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    /// Kills the animation and restores every target to its pre-animation state.
    pub fn revert(&self) {
        self.kill();
        let inner = self.inner.borrow();
        for (element, visual) in &inner.snapshots {
            if inner.document.set_visual(*element, *visual).is_err() {
                log::debug!("animation {}: element {element} gone before revert", inner.label);
            }
        }
    }

    fn schedule_next_frame(&self) {
        let weak = Rc::downgrade(&self.inner);
        let killed = Rc::clone(&self.killed);
        let clock = self.inner.borrow().runtime.frame_clock();
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(inner) = weak.upgrade() {
                Animation { inner, killed }.on_frame(time);
            }
        });
        self.inner.borrow_mut().registration = Some(registration);
    }

    fn on_frame(&self, frame_time_nanos: u64) {
        let (events, finished) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.release();
            }
            if inner.status != PlaybackStatus::Running {
                return;
            }
            let start = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start) as f64 / 1_000_000.0;
            inner.elapsed_millis = elapsed;
            let PlayerInner { timeline, document, .. } = &mut *inner;
            let events = timeline.sample(elapsed, document);
            (events, timeline.is_finished())
        };

        for event in events {
            if self.killed.get() {
                return;
            }
            event.fire();
        }

        let mut inner = self.inner.borrow_mut();
        if inner.status != PlaybackStatus::Running {
            return;
        }
        if finished {
            inner.status = PlaybackStatus::Completed;
            log::trace!("animation {} completed after {:.0} ms", inner.label, inner.elapsed_millis);
        } else {
            drop(inner);
            self.schedule_next_frame();
        }
    }

    pub(crate) fn downgrade(&self) -> WeakAnimation {
        WeakAnimation {
            inner: Rc::downgrade(&self.inner),
            killed: Rc::clone(&self.killed),
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Animation")
                .field("label", &inner.label)
                .field("status", &inner.status)
                .field("elapsed_millis", &inner.elapsed_millis)
                .finish(),
            Err(_) => f.write_str("Animation { <busy> }"),
        }
    }
}

/// Non-owning handle, used by scroll triggers so a pending trigger does not
/// keep a reverted animation alive.
#[derive(Clone)]
pub(crate) struct WeakAnimation {
    inner: Weak<RefCell<PlayerInner>>,
    killed: Rc<Cell<bool>>,
}

impl WeakAnimation {
    pub(crate) fn upgrade(&self) -> Option<Animation> {
        self.inner.upgrade().map(|inner| Animation {
            inner,
            killed: Rc::clone(&self.killed),
        })
    }
}
