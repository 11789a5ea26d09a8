/// Duration used when none is configured, or when zero is configured.
pub const DEFAULT_DURATION_MILLIS: u64 = 300;

/// Tween configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenSpec {
    /// Duration in milliseconds. Zero means [`DEFAULT_DURATION_MILLIS`].
    pub duration_millis: u64,
    /// Start the tween as soon as it is constructed.
    pub autostart: bool,
}

impl TweenSpec {
    /// Build a spec from optional settings; a missing duration uses the default.
    pub fn new(duration_millis: Option<u64>, autostart: bool) -> Self {
        Self {
            duration_millis: duration_millis.unwrap_or(DEFAULT_DURATION_MILLIS),
            autostart,
        }
    }

    /// Create a tween spec with the given duration that waits for `start()`.
    pub fn tween(duration_millis: u64) -> Self {
        Self::new(Some(duration_millis), false)
    }

    /// Start the tween on construction.
    pub fn autostarted(mut self) -> Self {
        self.autostart = true;
        self
    }

    /// Replaces a zero duration with [`DEFAULT_DURATION_MILLIS`].
    pub fn normalized(self) -> Self {
        if self.duration_millis == 0 {
            Self {
                duration_millis: DEFAULT_DURATION_MILLIS,
                ..self
            }
        } else {
            self
        }
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(None, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_has_reasonable_values() {
        let spec = TweenSpec::default();
        assert_eq!(spec.duration_millis, 300);
        assert!(!spec.autostart);
    }

    #[test]
    fn zero_duration_normalizes_to_default() {
        assert_eq!(TweenSpec::tween(0).normalized().duration_millis, 300);
        assert_eq!(TweenSpec::tween(120).normalized().duration_millis, 120);
    }

    #[test]
    fn autostarted_keeps_duration() {
        let spec = TweenSpec::tween(50).autostarted();
        assert_eq!(spec, TweenSpec::new(Some(50), true));
    }
}
