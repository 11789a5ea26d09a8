//! Frame-driven linear interpolation.
//!
//! The frame clock delivers one tick per frame. A tick re-registers for the
//! next frame, records the frame timestamp and fires the completion callback
//! at most once per run. It never computes the value: [`Interpolator::value`]
//! derives it on demand from the recorded timestamps, so repeated queries
//! within a frame agree with each other.
//!
//! Each interpolator owns the registration for its next tick. [`stop`] or
//! dropping the last handle cancels it, and ticking ends there.
//!
//! [`stop`]: Interpolator::stop

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tween_core::{FrameCallbackRegistration, FrameClock};

use crate::error::TweenError;
use crate::lerp::Lerp;
use crate::spec::TweenSpec;
use crate::timing::{Progress, TimingState};

type CompletionCallback<T> = Rc<dyn Fn(&Interpolator<T>)>;

/// Interpolator over plain numbers.
pub type ScalarInterpolator = Interpolator<f64>;

/// Shared handle to a tween over a [`Lerp`] value domain.
///
/// Clones refer to the same tween.
pub struct Interpolator<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<InterpolatorInner<T>>>,
}

struct InterpolatorInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    from: T,
    to: T,
    /// Last mid-run value, updated in place by queries.
    current: T,
    timing: TimingState,
    on_complete: Option<CompletionCallback<T>>,
    registration: Option<FrameCallbackRegistration>,
    /// Bumped on every schedule and stop; a tick carrying an older
    /// generation was superseded after it left the frame queue.
    generation: u64,
}

impl<T: Lerp + Clone + 'static> Interpolator<T> {
    /// Create a tween from `from` to `to` timed by `clock`.
    ///
    /// A zero duration in `spec` is replaced by the default. Endpoints are
    /// not validated; see [`Interpolator::try_new`].
    pub fn new(clock: &FrameClock, from: T, to: T, spec: TweenSpec) -> Self {
        let spec = spec.normalized();
        let inner = InterpolatorInner {
            clock: clock.clone(),
            current: from.clone(),
            from,
            to,
            timing: TimingState::new(spec.duration_millis),
            on_complete: None,
            registration: None,
            generation: 0,
        };
        let interpolator = Self {
            inner: Rc::new(RefCell::new(inner)),
        };
        if spec.autostart {
            interpolator.start();
        }
        interpolator
    }

    /// Like [`Interpolator::new`], but rejects NaN or infinite endpoints.
    pub fn try_new(clock: &FrameClock, from: T, to: T, spec: TweenSpec) -> Result<Self, TweenError> {
        if !from.is_finite() {
            return Err(TweenError::NonFiniteEndpoint { endpoint: "from" });
        }
        if !to.is_finite() {
            return Err(TweenError::NonFiniteEndpoint { endpoint: "to" });
        }
        Ok(Self::new(clock, from, to, spec))
    }

    /// Begin a run at the current frame-domain time.
    ///
    /// Calling it again restarts the window from now with the same
    /// endpoints and re-arms the completion callback. The start time is
    /// never earlier than the last delivered frame, so a tick left over from
    /// a previous run reads as zero elapsed time.
    pub fn start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            let now = inner.clock.now_nanos();
            let now = match inner.clock.runtime_handle().last_frame_nanos() {
                Some(last_frame) => now.max(last_frame),
                None => now,
            };
            inner.timing.begin(now);
            log::debug!(
                "tween started at {now}ns for {}ms",
                inner.timing.duration_millis()
            );
        }
        Self::schedule_tick(&self.inner);
    }

    /// Cancel the pending tick. The value stays at whatever the last
    /// recorded frame yields until [`Interpolator::start`] is called again.
    pub fn stop(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.registration.take()
        };
        if let Some(registration) = registration {
            log::debug!("tween stopped");
            registration.cancel();
        }
    }

    /// Whether a tick is queued for an upcoming frame.
    pub fn is_running(&self) -> bool {
        self.inner
            .borrow()
            .registration
            .as_ref()
            .map(FrameCallbackRegistration::is_active)
            .unwrap_or(false)
    }

    pub fn finished(&self) -> bool {
        self.inner.borrow().timing.finished()
    }

    /// Current interpolated value.
    ///
    /// Returns `from` before the first recorded frame of a run, exactly `to`
    /// once the run has finished, and the linear blend in between. Only the
    /// last recorded frame matters, never the time of the call.
    pub fn value(&self) -> T {
        self.with_value(T::clone)
    }

    /// Runs `f` on the current value without cloning it.
    ///
    /// Mid-run the reference points at the interpolator's cache, which is
    /// rewritten by the next query.
    ///
    /// # Panics
    ///
    /// The interpolator stays borrowed while `f` runs. Calling back into the
    /// same interpolator from `f` (`value`, `start`, `stop`, or draining a
    /// frame that ticks it) panics with a `BorrowMutError`. Use
    /// [`Interpolator::value`] when the value must outlive the call.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        match inner.timing.progress() {
            Progress::Idle | Progress::AwaitingFrame => f(&inner.from),
            Progress::Finished => f(&inner.to),
            Progress::Running(fraction) => {
                inner.current.lerp_into(&inner.from, &inner.to, fraction);
                f(&inner.current)
            }
        }
    }

    /// Install the callback fired on the first frame after a run finishes.
    ///
    /// The callback receives this interpolator. Use that argument rather
    /// than capturing a clone, which would keep the tween alive forever.
    pub fn set_on_complete(&self, callback: impl Fn(&Interpolator<T>) + 'static) {
        self.inner.borrow_mut().on_complete = Some(Rc::new(callback));
    }

    pub fn clear_on_complete(&self) {
        self.inner.borrow_mut().on_complete = None;
    }

    pub fn from(&self) -> T {
        self.inner.borrow().from.clone()
    }

    pub fn to(&self) -> T {
        self.inner.borrow().to.clone()
    }

    pub fn duration_millis(&self) -> u64 {
        self.inner.borrow().timing.duration_millis()
    }

    pub fn started_at(&self) -> Option<u64> {
        self.inner.borrow().timing.started_at()
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.inner.borrow().timing.last_tick()
    }

    pub fn completed_fired(&self) -> bool {
        self.inner.borrow().timing.completed_fired()
    }

    fn schedule_tick(this: &Rc<RefCell<InterpolatorInner<T>>>) {
        let (clock, generation) = {
            let mut inner = this.borrow_mut();
            inner.generation += 1;
            (inner.clock.clone(), inner.generation)
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        // Replacing a pending registration cancels it.
        let previous = this.borrow_mut().registration.replace(registration);
        drop(previous);
    }

    fn on_frame(this: &Rc<RefCell<InterpolatorInner<T>>>, generation: u64, frame_time_nanos: u64) {
        if this.borrow().generation != generation {
            return;
        }
        Self::schedule_tick(this);

        let callback = {
            let mut inner = this.borrow_mut();
            inner.timing.record_tick(frame_time_nanos);
            log::trace!("tween tick at {frame_time_nanos}ns");
            let fire = inner.on_complete.is_some() && inner.timing.take_completion();
            if fire {
                inner.on_complete.clone()
            } else {
                None
            }
        };

        if let Some(callback) = callback {
            log::debug!("tween completed at {frame_time_nanos}ns");
            let handle = Interpolator {
                inner: Rc::clone(this),
            };
            callback(&handle);
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Interpolator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Lerp + Clone + fmt::Debug + 'static> fmt::Debug for Interpolator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Interpolator")
            .field("from", &inner.from)
            .field("to", &inner.to)
            .field("timing", &inner.timing)
            .field("has_on_complete", &inner.on_complete.is_some())
            .finish()
    }
}
