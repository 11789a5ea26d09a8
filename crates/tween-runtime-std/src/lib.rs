//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `tween-core`. Applications construct a
//! [`StdRuntime`], hand its [`FrameClock`] to their interpolators and call
//! [`StdRuntime::pump_frame`] once per display refresh.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tween_core::{FrameClock, FrameTimeSource, Runtime, RuntimeHandle, RuntimeScheduler};

type FrameWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Scheduler that records frame requests in an atomic flag.
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
        *self
            .frame_waker
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(waker));
    }

    /// Clears any registered frame waker.
    pub fn clear_frame_waker(&self) {
        *self
            .frame_waker
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
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
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Frame-domain clock backed by [`std::time::Instant`], counting from the
/// moment it was created.
#[derive(Debug, Clone)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock's origin.
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimeSource for StdClock {
    fn now_nanos(&self) -> u64 {
        u64::try_from(self.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Convenience container bundling the standard scheduler and clock.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    runtime: Runtime,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let clock = Arc::new(StdClock::default());
        let runtime = Runtime::new(scheduler.clone(), clock.clone());
        Self {
            scheduler,
            clock,
            runtime,
        }
    }

    /// Returns the underlying [`tween_core::Runtime`].
    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    /// Returns a handle to the runtime.
    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Returns the runtime's frame clock.
    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// Returns the clock implementation.
    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Whether any frame callback is waiting for the next frame.
    pub fn needs_frame(&self) -> bool {
        self.runtime.needs_frame()
    }

    /// Registers a waker to be called when the runtime schedules a new frame.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    /// Clears any previously registered frame waker.
    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Drains pending frame callbacks using the provided frame timestamp in nanoseconds.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime_handle()
            .drain_frame_callbacks(frame_time_nanos);
    }

    /// Delivers one frame stamped with the clock's current time and returns
    /// that timestamp.
    pub fn pump_frame(&self) -> u64 {
        let frame_time = self.clock.now_nanos();
        log::trace!("pumping frame at {frame_time}ns");
        self.drain_frame_callbacks(frame_time);
        frame_time
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

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::StdRuntime;

    #[test]
    fn registering_callback_requests_frame() {
        let runtime = StdRuntime::new();
        assert!(!runtime.take_frame_request());

        let _registration = runtime.frame_clock().with_frame_nanos(|_| {});

        assert!(runtime.take_frame_request(), "registration should request a frame");
        assert!(!runtime.take_frame_request(), "request flag is consumed");
        assert!(runtime.needs_frame());
    }

    #[test]
    fn frame_waker_is_called_on_schedule() {
        let runtime = StdRuntime::new();
        let wakes = Arc::new(AtomicUsize::new(0));
        {
            let wakes = wakes.clone();
            runtime.set_frame_waker(move || {
                wakes.fetch_add(1, Ordering::SeqCst);
            });
        }

        let _first = runtime.frame_clock().with_frame_nanos(|_| {});
        runtime.clear_frame_waker();
        let _second = runtime.frame_clock().with_frame_nanos(|_| {});

        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pump_frame_delivers_clock_time() {
        let runtime = StdRuntime::new();
        let seen = Rc::new(RefCell::new(None));
        let _registration = {
            let seen = seen.clone();
            runtime
                .frame_clock()
                .with_frame_nanos(move |time| *seen.borrow_mut() = Some(time))
        };

        let before = runtime.frame_clock().now_nanos();
        let delivered = runtime.pump_frame();

        assert_eq!(*seen.borrow(), Some(delivered));
        assert!(delivered >= before);
        assert!(!runtime.needs_frame());
    }
}
