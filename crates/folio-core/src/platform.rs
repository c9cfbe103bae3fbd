//! Platform abstraction traits for the Folio runtime.
//!
//! The runtime delegates frame scheduling and time keeping to the host so the
//! same page can be driven by a real loop or by a deterministic test driver.

/// Schedules work for the runtime.
///
/// Wakers of spawned local futures call into the scheduler from whatever
/// context wakes them, so implementations must be thread-safe.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host run a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
