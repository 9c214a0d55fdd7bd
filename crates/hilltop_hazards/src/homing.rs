//! Homing (bob-omb) motion

use hilltop_math::{Transform, Vec3};
use serde::{Deserialize, Serialize};

use crate::behavior::{MotionContext, MotionPhase};

/// Seek the player while inside the trigger radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingParams {
    /// Spawn position
    pub home: Vec3,
    pub trigger_radius: f32,
    /// Units per second
    pub speed: f32,
    /// Idle spin in degrees per second, runs whether seeking or not
    pub spin_speed: f32,
    /// Hold position while the player is invulnerable
    pub idle_while_target_protected: bool,
}

impl Default for HomingParams {
    fn default() -> Self {
        Self {
            home: Vec3::ZERO,
            trigger_radius: 5.0,
            speed: 2.5,
            spin_speed: 70.0,
            idle_while_target_protected: true,
        }
    }
}

impl HomingParams {
    pub fn new(home: Vec3) -> Self {
        Self {
            home,
            ..Default::default()
        }
    }

    pub fn with_trigger_radius(mut self, radius: f32) -> Self {
        self.trigger_radius = radius;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn ignoring_protection(mut self) -> Self {
        self.idle_while_target_protected = false;
        self
    }

    pub(crate) fn step(&self, transform: &mut Transform, ctx: &MotionContext) -> MotionPhase {
        transform.rotate_by(Vec3::new(0.0, self.spin_speed * ctx.delta, 0.0));

        let Some(target) = ctx.target else {
            return MotionPhase::Idle;
        };
        if ctx.target_protected && self.idle_while_target_protected {
            return MotionPhase::Idle;
        }

        let to_target = target - transform.position;
        let distance = to_target.length();
        if distance >= self.trigger_radius {
            return MotionPhase::Idle;
        }

        // Never step past the target
        let step = (self.speed * ctx.delta).min(distance);
        transform.position += to_target.normalize_or_zero() * step;
        MotionPhase::Seeking
    }
}
