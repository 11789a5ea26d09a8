/// Trait for types that can be linearly interpolated.
///
/// Implementing it is what makes a type usable as an [`Interpolator`]
/// value domain.
///
/// [`Interpolator`]: crate::Interpolator
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f64) -> Self;

    /// Writes `from.lerp(to, fraction)` into `self`.
    ///
    /// Value domains with heap or multi-field state override this to update
    /// in place.
    fn lerp_into(&mut self, from: &Self, to: &Self, fraction: f64)
    where
        Self: Sized,
    {
        *self = from.lerp(to, fraction);
    }

    /// Whether every component is a finite number.
    fn is_finite(&self) -> bool;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        self + (target - self) * fraction as f32
    }

    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        self + (target - self) * fraction
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        assert_eq!(Lerp::lerp(&2.0f64, &8.0, 0.0), 2.0);
        assert_eq!(Lerp::lerp(&2.0f64, &8.0, 1.0), 8.0);
        assert_eq!(Lerp::lerp(&2.0f32, &8.0, 0.5), 5.0);
    }

    #[test]
    fn lerp_into_overwrites_target() {
        let mut slot = 100.0f64;
        slot.lerp_into(&0.0, &10.0, 0.25);
        assert_eq!(slot, 2.5);
    }

    #[test]
    fn non_numbers_are_not_finite() {
        assert!(!f64::NAN.is_finite());
        assert!(!Lerp::is_finite(&f32::INFINITY));
        assert!(Lerp::is_finite(&0.0f64));
    }
}
