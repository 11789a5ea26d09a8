//! Timing state shared by every interpolator value domain.
//!
//! All timestamps are frame-domain nanoseconds. The state only ever moves
//! forward through [`TimingState::begin`] and [`TimingState::record_tick`];
//! everything else is a pure read.

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Where a run currently stands, as seen from the most recent frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// `start()` has not been called.
    Idle,
    /// Started, but no frame has been recorded yet.
    AwaitingFrame,
    /// Linear fraction of the duration elapsed, in `[0, 1]`.
    Running(f64),
    /// More than the full duration has elapsed.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingState {
    duration_millis: u64,
    started_at: Option<u64>,
    last_tick: Option<u64>,
    completed_fired: bool,
}

impl TimingState {
    /// `duration_millis` must already be normalized to a positive value.
    pub fn new(duration_millis: u64) -> Self {
        debug_assert!(duration_millis > 0, "duration must be positive");
        Self {
            duration_millis,
            started_at: None,
            last_tick: None,
            completed_fired: false,
        }
    }

    /// Opens a new run at `now_nanos`. The previous tick is kept; it reads as
    /// zero elapsed time until a newer frame arrives.
    pub fn begin(&mut self, now_nanos: u64) {
        self.started_at = Some(now_nanos);
        self.completed_fired = false;
    }

    pub fn record_tick(&mut self, frame_time_nanos: u64) {
        self.last_tick = Some(frame_time_nanos);
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    pub fn completed_fired(&self) -> bool {
        self.completed_fired
    }

    pub fn elapsed_nanos(&self) -> Option<u64> {
        let started_at = self.started_at?;
        let last_tick = self.last_tick?;
        Some(last_tick.saturating_sub(started_at))
    }

    /// Saturates for durations longer than `u64::MAX` nanoseconds.
    fn duration_nanos(&self) -> u64 {
        self.duration_millis.saturating_mul(NANOS_PER_MILLI)
    }

    /// True once strictly more than the duration has elapsed.
    pub fn finished(&self) -> bool {
        self.elapsed_nanos()
            .map(|elapsed| elapsed > self.duration_nanos())
            .unwrap_or(false)
    }

    pub fn fraction(&self) -> Option<f64> {
        self.elapsed_nanos()
            .map(|elapsed| elapsed as f64 / self.duration_nanos() as f64)
    }

    pub fn progress(&self) -> Progress {
        if self.started_at.is_none() {
            return Progress::Idle;
        }
        if self.finished() {
            return Progress::Finished;
        }
        match self.fraction() {
            Some(fraction) => Progress::Running(fraction.min(1.0)),
            None => Progress::AwaitingFrame,
        }
    }

    /// Flips `completed_fired` on the first call after the run finishes.
    /// Returns whether this call performed the flip.
    pub fn take_completion(&mut self) -> bool {
        if self.finished() && !self.completed_fired {
            self.completed_fired = true;
            true
        } else {
            false
        }
    }
}
