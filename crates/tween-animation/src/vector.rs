//! Two-dimensional value domain.

use crate::interpolator::Interpolator;
use crate::lerp::Lerp;

/// Interpolator over 2D points. Each axis is interpolated independently.
pub type VectorInterpolator = Interpolator<Vec2>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Lerp for Vec2 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        Vec2 {
            x: Lerp::lerp(&self.x, &target.x, fraction),
            y: Lerp::lerp(&self.y, &target.y, fraction),
        }
    }

    fn lerp_into(&mut self, from: &Self, to: &Self, fraction: f64) {
        self.x = Lerp::lerp(&from.x, &to.x, fraction);
        self.y = Lerp::lerp(&from.y, &to.y, fraction);
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_interpolate_independently() {
        let from = Vec2::new(0.0, 10.0);
        let to = Vec2::new(10.0, 0.0);
        assert_eq!(from.lerp(&to, 0.5), Vec2::new(5.0, 5.0));
        assert_eq!(from.lerp(&to, 0.2), Vec2::new(2.0, 8.0));
    }

    #[test]
    fn lerp_into_updates_in_place() {
        let from = Vec2::new(-4.0, 4.0);
        let to = Vec2::new(4.0, 12.0);
        let mut cache = from;
        cache.lerp_into(&from, &to, 0.75);
        assert_eq!(cache, Vec2::new(2.0, 10.0));
        assert_eq!(from, Vec2::new(-4.0, 4.0));
    }

    #[test]
    fn any_non_finite_axis_is_not_finite() {
        assert!(Vec2::new(1.0, 2.0).is_finite());
        assert!(!Vec2::new(f64::NAN, 2.0).is_finite());
        assert!(!Vec2::from((0.0, f64::NEG_INFINITY)).is_finite());
    }
}
