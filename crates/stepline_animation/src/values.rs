//! Animatable value types
//!
//! Provides the interpolation trait used to blend composite visual states
//! from a single eased progress value.

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(2.0_f32.lerp(&4.0, 0.5), 3.0);
        assert_eq!(2.0_f32.lerp(&4.0, 1.0), 4.0);
        assert!(1.0_f32.approx_eq(&1.0005, 0.001));
        assert!(!1.0_f32.approx_eq(&1.01, 0.001));
    }
}
