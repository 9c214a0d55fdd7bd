//! Scene host contract
//!
//! The simulation owns game state; the host owns whatever represents it on
//! screen. Every call is fire-and-forget and must tolerate ids it no longer
//! knows about.

use std::collections::HashMap;

use hilltop_math::{Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Host-side object id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u64);

/// What an entity is, for the host's choice of model and for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ground,
    Terrace,
    Fence,
    Player,
    Hazard,
    ChainLink,
    Boss,
    Star,
    Effect,
}

impl EntityKind {
    /// Surfaces the player can stand on
    pub fn is_walkable(&self) -> bool {
        matches!(self, Self::Ground | Self::Terrace)
    }
}

/// Collision volume, relative to the entity position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }
}

/// Spawn request
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDesc {
    pub kind: EntityKind,
    pub name: String,
    pub transform: Transform,
    pub collider: Option<Collider>,
    pub color: [f32; 4],
}

impl EntityDesc {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            transform: Transform::default(),
            collider: None,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

/// Scene collaborator driven by the simulation
pub trait SceneHost {
    /// Create the visual for `desc` and return its id
    fn spawn(&mut self, desc: &EntityDesc) -> SceneId;
    fn destroy(&mut self, id: SceneId);
    fn set_enabled(&mut self, id: SceneId, enabled: bool);
    fn set_position(&mut self, id: SceneId, position: Vec3);
    /// Euler degrees
    fn set_rotation(&mut self, id: SceneId, rotation: Vec3);
    /// Brief color flash used as hit feedback
    fn blink(&mut self, id: SceneId, color: [f32; 4]);
    /// Pointer capture for mouse look
    fn set_cursor_locked(&mut self, locked: bool);
}

/// Host-side view of one object in a [`HeadlessScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub kind: EntityKind,
    pub name: String,
    pub transform: Transform,
    pub enabled: bool,
    pub blinks: u32,
}

/// In-memory host with no output. Used by the headless binary and tests.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_id: u64,
    objects: HashMap<SceneId, SceneObject>,
    destroy_calls: HashMap<SceneId, u32>,
    cursor_locked: bool,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: SceneId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    /// Live objects of one kind
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }

    /// How many times `destroy` was called for `id`
    pub fn destroy_calls(&self, id: SceneId) -> u32 {
        self.destroy_calls.get(&id).copied().unwrap_or(0)
    }

    /// Largest destroy count over all ids ever destroyed
    pub fn max_destroy_calls(&self) -> u32 {
        self.destroy_calls.values().copied().max().unwrap_or(0)
    }

    pub fn cursor_locked(&self) -> bool {
        self.cursor_locked
    }
}

impl SceneHost for HeadlessScene {
    fn spawn(&mut self, desc: &EntityDesc) -> SceneId {
        self.next_id += 1;
        let id = SceneId(self.next_id);
        self.objects.insert(
            id,
            SceneObject {
                kind: desc.kind,
                name: desc.name.clone(),
                transform: desc.transform,
                enabled: true,
                blinks: 0,
            },
        );
        id
    }

    fn destroy(&mut self, id: SceneId) {
        *self.destroy_calls.entry(id).or_insert(0) += 1;
        if self.objects.remove(&id).is_none() {
            log::warn!("Host asked to destroy unknown object {:?}", id);
        }
    }

    fn set_enabled(&mut self, id: SceneId, enabled: bool) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.enabled = enabled;
        }
    }

    fn set_position(&mut self, id: SceneId, position: Vec3) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.transform.position = position;
        }
    }

    fn set_rotation(&mut self, id: SceneId, rotation: Vec3) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.transform.rotation = rotation;
        }
    }

    fn blink(&mut self, id: SceneId, _color: [f32; 4]) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.blinks += 1;
        }
    }

    fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_lifecycle() {
        let mut scene = HeadlessScene::new();
        let id = scene.spawn(&EntityDesc::new(EntityKind::Boss, "Boss").at(Vec3::Y));
        assert_eq!(scene.live_count(), 1);
        assert_eq!(scene.object(id).map(|o| o.transform.position), Some(Vec3::Y));

        scene.set_enabled(id, false);
        assert_eq!(scene.object(id).map(|o| o.enabled), Some(false));

        scene.destroy(id);
        assert_eq!(scene.live_count(), 0);
        assert_eq!(scene.destroy_calls(id), 1);

        // Unknown ids are tolerated
        scene.set_position(id, Vec3::ZERO);
        scene.blink(id, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_walkable_kinds() {
        assert!(EntityKind::Ground.is_walkable());
        assert!(EntityKind::Terrace.is_walkable());
        assert!(!EntityKind::Fence.is_walkable());
    }
}
