//! Tethered (chain chomp) motion

use hilltop_math::{Transform, Vec3};
use serde::{Deserialize, Serialize};

use crate::behavior::{MotionContext, MotionPhase};

/// Circular orbit around a fixed anchor. Position depends only on time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherParams {
    pub anchor: Vec3,
    pub radius: f32,
    /// Radians per simulation second
    pub angular_speed: f32,
    /// Starting angle in radians
    pub phase: f32,
    /// Body spin in degrees per second
    pub spin_speed: f32,
    /// Number of chain links drawn between anchor and body
    pub links: usize,
}

impl Default for TetherParams {
    fn default() -> Self {
        Self {
            anchor: Vec3::new(-10.0, 1.0, 5.0),
            radius: 4.0,
            angular_speed: 3.0,
            phase: 0.0,
            spin_speed: 120.0,
            links: 8,
        }
    }
}

impl TetherParams {
    pub fn new(anchor: Vec3, radius: f32) -> Self {
        Self {
            anchor,
            radius,
            ..Default::default()
        }
    }

    pub fn with_links(mut self, links: usize) -> Self {
        self.links = links;
        self
    }

    pub fn with_angular_speed(mut self, angular_speed: f32) -> Self {
        self.angular_speed = angular_speed;
        self
    }

    /// Body position at simulation time `time`
    pub fn position_at(&self, time: f32) -> Vec3 {
        let angle = self.phase + time * self.angular_speed;
        self.anchor + Vec3::new(angle.sin() * self.radius, 0.0, angle.cos() * self.radius)
    }

    /// Link i sits at i/links of the way from anchor to body
    pub fn link_positions(&self, body: Vec3) -> Vec<Vec3> {
        (0..self.links)
            .map(|i| self.anchor.lerp(body, i as f32 / self.links as f32))
            .collect()
    }

    pub(crate) fn step(&self, transform: &mut Transform, ctx: &MotionContext) -> MotionPhase {
        transform.position = self.position_at(ctx.time);
        transform.rotate_by(Vec3::new(0.0, self.spin_speed * ctx.delta, 0.0));
        MotionPhase::Moving
    }
}
