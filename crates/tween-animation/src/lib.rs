//! Frame-driven tweens for Tween-RS
//!
//! An [`Interpolator`] moves a value linearly from `from` to `to` over a
//! fixed duration. It listens to the runtime's frame clock only to record
//! the latest frame timestamp; the interpolated value itself is computed
//! lazily whenever [`Interpolator::value`] is called.

pub mod error;
pub mod interpolator;
pub mod lerp;
pub mod spec;
pub mod timing;
pub mod vector;

pub use error::TweenError;
pub use interpolator::{Interpolator, ScalarInterpolator};
pub use lerp::Lerp;
pub use spec::{TweenSpec, DEFAULT_DURATION_MILLIS};
pub use timing::{Progress, TimingState};
pub use vector::{Vec2, VectorInterpolator};

pub mod prelude {
    pub use crate::interpolator::{Interpolator, ScalarInterpolator};
    pub use crate::lerp::Lerp;
    pub use crate::spec::TweenSpec;
    pub use crate::vector::{Vec2, VectorInterpolator};
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
