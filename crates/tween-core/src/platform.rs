//! Platform abstraction traits for Tween-RS runtime services.
//!
//! The runtime never reads a wall clock or drives a display loop itself.
//! Hosts plug those in through the traits below, which keeps the core free
//! of direct `std::time` and windowing dependencies.

/// Schedules frame processing on behalf of the runtime.
///
/// Implementations must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host deliver a new frame.
    fn schedule_frame(&self);
}

/// Monotonic clock in the frame-time domain.
///
/// Every timestamp handed to frame callbacks must come from the same domain
/// as [`FrameTimeSource::now_nanos`], so that a start time read outside a
/// frame can be compared with frame timestamps.
pub trait FrameTimeSource: Send + Sync {
    /// Returns the current frame-domain time in nanoseconds.
    fn now_nanos(&self) -> u64;
}
