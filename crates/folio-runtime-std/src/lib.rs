//! Standard runtime services backed by Rust's `std` library.
//!
//! Concrete implementations of the platform traits from `folio-core`: a
//! scheduler that records frame requests and an [`Instant`] based clock.
//! A host loop builds a [`StdRuntime`], hands its handle to the page and
//! calls [`StdRuntime::run_frame`] whenever a frame was requested.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use folio_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};

type FrameWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Scheduler that flags frame requests for the host loop.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    frame_waker: RwLock<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            frame_waker: RwLock::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker that will be invoked whenever a new frame is scheduled.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.frame_waker.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(waker));
    }

    /// Clears any registered frame waker.
    pub fn clear_frame_waker(&self) {
        *self.frame_waker.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn wake(&self) {
        let waker = self
            .frame_waker
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("frame_requested", &self.frame_requested.load(Ordering::SeqCst))
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

impl StdClock {
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

/// Bundles the standard scheduler, the clock and the runtime they drive.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    runtime: Runtime,
    started: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let clock = Arc::new(StdClock);
        Self {
            scheduler,
            started: clock.now(),
            clock,
            runtime,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Nanoseconds since the runtime was created; the timestamp frames use.
    pub fn frame_time_nanos(&self) -> u64 {
        self.clock.elapsed(self.started).as_nanos() as u64
    }

    /// Runs queued tasks and woken futures.
    pub fn drain_tasks(&self) {
        let handle = self.runtime.handle();
        while handle.has_pending_tasks() {
            handle.drain_tasks();
        }
    }

    /// Drains pending frame callbacks using the provided frame timestamp in nanoseconds.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime_handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// One host frame at `frame_time_nanos`: tasks, frame callbacks, then
    /// whatever those callbacks queued.
    pub fn run_frame(&self, frame_time_nanos: u64) {
        self.drain_tasks();
        self.drain_frame_callbacks(frame_time_nanos);
        self.drain_tasks();
    }

    /// Whether anything still wants frames.
    pub fn is_busy(&self) -> bool {
        let handle = self.runtime.handle();
        handle.has_frame_callbacks() || handle.has_pending_tasks()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}
