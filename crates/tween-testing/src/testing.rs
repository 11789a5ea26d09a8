use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tween_core::{DefaultScheduler, FrameClock, FrameTimeSource, Runtime, RuntimeHandle};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Frame-domain clock that only moves when a test moves it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_nanos: AtomicU64,
}

impl ManualClock {
    pub fn new(start_nanos: u64) -> Self {
        Self {
            now_nanos: AtomicU64::new(start_nanos),
        }
    }

    pub fn set_nanos(&self, nanos: u64) {
        self.now_nanos.store(nanos, Ordering::SeqCst);
    }

    pub fn set_millis(&self, millis: u64) {
        self.set_nanos(millis * NANOS_PER_MILLI);
    }
}

impl FrameTimeSource for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.now_nanos.load(Ordering::SeqCst)
    }
}

/// Headless harness for driving frame callbacks deterministically.
///
/// `TweenTestRule` owns a runtime backed by a [`ManualClock`]. Each
/// `advance_frame*` call moves the clock to the requested time and then
/// delivers exactly one frame at that timestamp, the way a display refresh
/// would.
pub struct TweenTestRule {
    runtime: Runtime,
    clock: Arc<ManualClock>,
    frames_delivered: u64,
}

impl TweenTestRule {
    /// Create a new test rule whose clock starts at zero.
    pub fn new() -> Self {
        Self::starting_at_millis(0)
    }

    /// Create a new test rule whose clock starts at `millis`.
    pub fn starting_at_millis(millis: u64) -> Self {
        let clock = Arc::new(ManualClock::new(millis * NANOS_PER_MILLI));
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler), clock.clone()),
            clock,
            frames_delivered: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Move the clock without delivering a frame.
    pub fn set_time_millis(&self, millis: u64) {
        self.clock.set_millis(millis);
    }

    /// Move the clock to `frame_time_nanos` and drain scheduled frame
    /// callbacks at that timestamp.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        self.clock.set_nanos(frame_time_nanos);
        self.runtime.handle().drain_frame_callbacks(frame_time_nanos);
        self.frames_delivered += 1;
    }

    pub fn advance_frame_millis(&mut self, frame_time_millis: u64) {
        self.advance_frame(frame_time_millis * NANOS_PER_MILLI);
    }

    /// Deliver one frame at each of the supplied timestamps, in order.
    pub fn advance_frames_millis(&mut self, frame_times_millis: &[u64]) {
        for &millis in frame_times_millis {
            self.advance_frame_millis(millis);
        }
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }

    pub fn has_pending_frame_callbacks(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }
}

impl Default for TweenTestRule {
    fn default() -> Self {
        Self::new()
    }
}
