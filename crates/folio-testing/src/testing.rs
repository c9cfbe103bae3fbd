use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use folio_core::{FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};

/// Nominal frame interval used by [`FrameDriver::frame`].
pub const FRAME_MILLIS: u64 = 16;

/// Scheduler that only counts frame requests.
#[derive(Debug, Default)]
pub struct TestScheduler {
    requested: AtomicUsize,
}

impl TestScheduler {
    pub fn frames_requested(&self) -> usize {
        self.requested.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requested.fetch_add(1, Ordering::SeqCst);
    }
}

/// Headless harness that drives a [`Runtime`] with simulated time.
///
/// Every frame drains pending tasks, runs the frame callbacks at the new
/// frame time and drains the tasks those callbacks queued, the same order a
/// real shell uses. Time starts at zero and only moves when the driver is
/// told to advance.
pub struct FrameDriver {
    runtime: Runtime,
    scheduler: Arc<TestScheduler>,
    now_nanos: u64,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        let scheduler = Arc::new(TestScheduler::default());
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            now_nanos: 0,
            frames: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<TestScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Simulated time in milliseconds.
    pub fn now_millis(&self) -> u64 {
        self.now_nanos / 1_000_000
    }

    /// Frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Runs queued tasks and woken futures without advancing time.
    pub fn pump(&mut self) {
        let handle = self.runtime.handle();
        while handle.has_pending_tasks() {
            handle.drain_tasks();
        }
    }

    /// Advances time by one frame and processes it.
    pub fn frame(&mut self) {
        self.frame_after(FRAME_MILLIS);
    }

    /// Advances time by `millis` and processes a single frame at that time.
    pub fn frame_after(&mut self, millis: u64) {
        self.pump();
        self.now_nanos += millis * 1_000_000;
        self.frames += 1;
        self.runtime.handle().drain_frame_callbacks(self.now_nanos);
        self.pump();
    }

    /// Produces frames until at least `millis` of simulated time has passed.
    pub fn advance_by(&mut self, millis: u64) {
        let target = self.now_nanos + millis * 1_000_000;
        while self.now_nanos < target {
            self.frame();
        }
    }

    /// Produces frames until `condition` holds or `max_millis` elapse.
    ///
    /// Returns whether the condition was met.
    pub fn advance_until(&mut self, max_millis: u64, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = self.now_nanos + max_millis * 1_000_000;
        self.pump();
        while !condition() {
            if self.now_nanos >= deadline {
                return false;
            }
            self.frame();
        }
        true
    }

    /// Whether anything is waiting for a frame or a drain.
    pub fn is_idle(&self) -> bool {
        let handle = self.runtime.handle();
        !handle.has_frame_callbacks() && !handle.has_pending_tasks()
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn frames_advance_in_fixed_steps() {
        let mut driver = FrameDriver::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = Rc::clone(&seen);
        let registration = driver
            .frame_clock()
            .with_frame_millis(move |millis| seen_cb.borrow_mut().push(millis));
        driver.frame();
        registration.release();
        driver.advance_by(40);
        assert_eq!(*seen.borrow(), vec![16]);
        assert_eq!(driver.now_millis(), 64);
        assert_eq!(driver.frame_count(), 4);
        assert!(driver.scheduler().frames_requested() >= 1);
        assert!(driver.is_idle());
    }

    #[test]
    fn advance_until_stops_at_deadline() {
        let mut driver = FrameDriver::new();
        assert!(!driver.advance_until(100, || false));
        assert!(driver.now_millis() >= 100);
        assert!(driver.advance_until(100, || true));
    }
}
