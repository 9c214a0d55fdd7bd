//! # hilltop_math - Game Math
//!
//! Small, copyable math primitives for the simulation: vectors, euler
//! transforms and the bounding volumes used for discrete contact tests.

pub mod bounds;
pub mod transform;
pub mod vector;

pub use bounds::*;
pub use transform::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

pub mod prelude {
    pub use crate::bounds::{Aabb, Sphere};
    pub use crate::transform::Transform;
    pub use crate::vector::Vec3;
    pub use crate::{degrees, lerp, radians, wrap_degrees};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_helpers() {
        assert_relative_eq!(degrees(radians(90.0)), 90.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_degrees(370.0), 10.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_degrees(-90.0), 270.0, epsilon = 1e-4);
        assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }
}
