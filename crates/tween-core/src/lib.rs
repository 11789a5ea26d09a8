#![doc = r"Frame scheduling runtime for Tween-RS.

The runtime owns a queue of one-shot frame callbacks. A host drains the queue
once per display refresh, passing a timestamp from a shared monotonic clock.
Callbacks that want to keep running register again from inside the callback."]

pub mod frame_clock;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{FrameTimeSource, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

#[cfg(test)]
pub use runtime::{TestRuntime, TestScheduler, TestTimeSource};

pub type FrameCallbackId = u64;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
