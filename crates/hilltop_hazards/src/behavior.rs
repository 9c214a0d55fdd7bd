//! Tagged behavior dispatch

use crate::animation::{HoverParams, SpinParams};
use crate::hazard::HazardKind;
use crate::homing::HomingParams;
use crate::patrol::PatrolParams;
use crate::tether::TetherParams;
use hilltop_math::{Transform, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inputs shared by every behavior for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionContext {
    /// Step length in seconds
    pub delta: f32,
    /// Simulation seconds since the run started. Frozen while paused.
    pub time: f32,
    /// Player position, if a player exists
    pub target: Option<Vec3>,
    /// Player is inside its invulnerability window
    pub target_protected: bool,
}

impl MotionContext {
    pub fn new(delta: f32, time: f32) -> Self {
        Self {
            delta,
            time,
            target: None,
            target_protected: false,
        }
    }

    pub fn with_target(mut self, target: Vec3, protected: bool) -> Self {
        self.target = Some(target);
        self.target_protected = protected;
        self
    }
}

/// What a behavior did this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Followed its path or orbit
    Moving,
    /// Passed its bound and was put back at the start region
    Looped,
    /// Closed in on the player
    Seeking,
    /// Animated in place only
    Idle,
}

/// Per-entity motion rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    Patrol(PatrolParams),
    Tethered(TetherParams),
    Homing(HomingParams),
    Spin(SpinParams),
    Hover(HoverParams),
}

impl Behavior {
    /// Hazard classification, `None` for cosmetic behaviors
    pub fn hazard_kind(&self) -> Option<HazardKind> {
        match self {
            Self::Patrol(_) => Some(HazardKind::Patrol),
            Self::Tethered(_) => Some(HazardKind::Tethered),
            Self::Homing(_) => Some(HazardKind::Homing),
            Self::Spin(_) | Self::Hover(_) => None,
        }
    }

    /// Where the entity should appear when spawned.
    /// Cosmetic behaviors are placed by the caller.
    pub fn spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec3> {
        match self {
            Self::Patrol(p) => Some(p.start_position(rng)),
            Self::Tethered(t) => Some(t.position_at(0.0)),
            Self::Homing(h) => Some(h.home),
            Self::Spin(_) | Self::Hover(_) => None,
        }
    }

    /// Advance one step
    pub fn advance<R: Rng + ?Sized>(
        &self,
        transform: &mut Transform,
        ctx: &MotionContext,
        rng: &mut R,
    ) -> MotionPhase {
        match self {
            Self::Patrol(p) => p.step(transform, ctx.delta, rng),
            Self::Tethered(t) => t.step(transform, ctx),
            Self::Homing(h) => h.step(transform, ctx),
            Self::Spin(s) => s.step(transform, ctx.delta),
            Self::Hover(h) => h.step(transform, ctx),
        }
    }

    /// Intermediate chain positions for tethered behaviors
    pub fn chain_links(&self, body: Vec3) -> Vec<Vec3> {
        match self {
            Self::Tethered(t) => t.link_positions(body),
            _ => Vec::new(),
        }
    }
}
