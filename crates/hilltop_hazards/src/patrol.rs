//! Patrol (rolling boulder) motion

use hilltop_math::{Transform, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::behavior::MotionPhase;

/// Straight-line run from a start region to a far bound, then loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolParams {
    /// Center of the start region
    pub origin: Vec3,
    /// Half-range of the random offset applied on each (re)start, per axis
    pub jitter: Vec3,
    /// Point the hazard rolls toward. Passing it triggers the loop.
    pub far_bound: Vec3,
    /// Units per second
    pub speed: f32,
    /// Roll rate in degrees per second
    pub roll_speed: f32,
}

impl Default for PatrolParams {
    fn default() -> Self {
        Self {
            origin: Vec3::new(0.0, 7.0, 25.0),
            jitter: Vec3::new(2.0, 0.0, 1.0),
            far_bound: Vec3::new(0.0, 7.0, -10.0),
            speed: 4.0,
            roll_speed: 180.0,
        }
    }
}

impl PatrolParams {
    pub fn new(origin: Vec3, far_bound: Vec3) -> Self {
        Self {
            origin,
            far_bound,
            jitter: Vec3::ZERO,
            ..Default::default()
        }
    }

    pub fn with_jitter(mut self, jitter: Vec3) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Unit direction of travel
    pub fn direction(&self) -> Vec3 {
        (self.far_bound - self.origin).normalize_or_zero()
    }

    /// A fresh position inside the start region
    pub fn start_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        self.origin
            + Vec3::new(
                jitter_axis(rng, self.jitter.x),
                jitter_axis(rng, self.jitter.y),
                jitter_axis(rng, self.jitter.z),
            )
    }

    /// Whether `position` has reached or passed the far bound along the path
    pub fn has_passed(&self, position: Vec3) -> bool {
        (position - self.far_bound).dot(self.direction()) >= 0.0
    }

    pub(crate) fn step<R: Rng + ?Sized>(
        &self,
        transform: &mut Transform,
        delta: f32,
        rng: &mut R,
    ) -> MotionPhase {
        transform.position += self.direction() * (self.speed * delta);
        transform.rotate_by(Vec3::new(self.roll_speed * delta, 0.0, 0.0));

        if self.has_passed(transform.position) {
            transform.position = self.start_position(rng);
            MotionPhase::Looped
        } else {
            MotionPhase::Moving
        }
    }
}

fn jitter_axis<R: Rng + ?Sized>(rng: &mut R, half_range: f32) -> f32 {
    if half_range > 0.0 {
        rng.gen_range(-half_range..=half_range)
    } else {
        0.0
    }
}
