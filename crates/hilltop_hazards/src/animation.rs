//! Cosmetic in-place animation

use hilltop_math::{Transform, Vec3};
use serde::{Deserialize, Serialize};

use crate::behavior::{MotionContext, MotionPhase};

/// Constant yaw spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinParams {
    /// Degrees per second
    pub speed: f32,
}

impl SpinParams {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    pub(crate) fn step(&self, transform: &mut Transform, delta: f32) -> MotionPhase {
        transform.rotate_by(Vec3::new(0.0, self.speed * delta, 0.0));
        MotionPhase::Idle
    }
}

/// Spin plus a vertical sine bob around a base height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverParams {
    pub base_y: f32,
    pub amplitude: f32,
    /// Radians per simulation second
    pub frequency: f32,
    /// Degrees per second
    pub spin_speed: f32,
}

impl Default for HoverParams {
    fn default() -> Self {
        Self {
            base_y: 0.0,
            amplitude: 0.5,
            frequency: 4.0,
            spin_speed: 90.0,
        }
    }
}

impl HoverParams {
    pub fn new(base_y: f32) -> Self {
        Self {
            base_y,
            ..Default::default()
        }
    }

    pub fn height_at(&self, time: f32) -> f32 {
        self.base_y + (time * self.frequency).sin() * self.amplitude
    }

    pub(crate) fn step(&self, transform: &mut Transform, ctx: &MotionContext) -> MotionPhase {
        transform.rotate_by(Vec3::new(0.0, self.spin_speed * ctx.delta, 0.0));
        transform.position.y = self.height_at(ctx.time);
        MotionPhase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hover_bob_bounds() {
        let hover = HoverParams::new(9.5);
        let mut t = Transform::from_position(Vec3::new(0.0, 9.5, 25.0));
        for i in 0..50 {
            let ctx = MotionContext::new(0.05, i as f32 * 0.05);
            hover.step(&mut t, &ctx);
            assert!(t.position.y >= 9.0 - 1e-4 && t.position.y <= 10.0 + 1e-4);
            assert_eq!(t.position.z, 25.0);
        }
    }

    #[test]
    fn test_spin() {
        let mut t = Transform::default();
        SpinParams::new(40.0).step(&mut t, 0.5);
        assert_relative_eq!(t.rotation.y, 20.0, epsilon = 1e-4);
    }
}
