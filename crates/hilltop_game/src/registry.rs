//! Entity registry
//!
//! Single owner of every spawned entity. Records live in a generational
//! [`HandleMap`], so a handle kept past `destroy` or `clear` resolves to
//! `None` instead of someone else's entity.

use hilltop_core::{Handle, HandleMap};
use hilltop_math::{Aabb, Sphere, Transform, Vec3};

use crate::host::{Collider, EntityDesc, EntityKind, SceneHost, SceneId};

/// Handle to a registered entity
pub type EntityHandle = Handle<EntityRecord>;

/// Simulation-side state of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub name: String,
    pub transform: Transform,
    pub collider: Option<Collider>,
    pub enabled: bool,
    pub scene_id: SceneId,
}

/// World-space collision volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    Sphere(Sphere),
    Box(Aabb),
}

impl Bounds {
    pub fn intersects(&self, other: &Bounds) -> bool {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => a.intersects_sphere(b),
            (Self::Sphere(s), Self::Box(b)) | (Self::Box(b), Self::Sphere(s)) => {
                s.intersects_aabb(b)
            }
            (Self::Box(a), Self::Box(b)) => a.intersects_aabb(b),
        }
    }
}

impl EntityRecord {
    /// World-space bounds, if the entity has a collider
    pub fn bounds(&self) -> Option<Bounds> {
        let center = self.transform.position;
        self.collider.map(|collider| match collider {
            Collider::Sphere { radius } => Bounds::Sphere(Sphere::new(center, radius)),
            Collider::Box { half_extents } => {
                Bounds::Box(Aabb::from_center_half_extents(center, half_extents))
            }
        })
    }
}

/// Distance and overlap tests between registered entities
pub trait SpatialQuery {
    /// Center distance. `None` if either handle is absent.
    fn distance(&self, a: EntityHandle, b: EntityHandle) -> Option<f32>;
    /// Collider overlap. Absent, disabled or collider-less entities never intersect.
    fn intersects(&self, a: EntityHandle, b: EntityHandle) -> bool;
}

/// Owns entity records and mirrors every change into the scene host
pub struct EntityRegistry<H: SceneHost> {
    host: H,
    entities: HandleMap<EntityRecord>,
}

impl<H: SceneHost> EntityRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            entities: HandleMap::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Create and register an entity
    pub fn spawn(&mut self, desc: EntityDesc) -> EntityHandle {
        let scene_id = self.host.spawn(&desc);
        let handle = self.entities.insert(EntityRecord {
            kind: desc.kind,
            name: desc.name,
            transform: desc.transform,
            collider: desc.collider,
            enabled: true,
            scene_id,
        });
        log::debug!("Spawned {:?} as {:?}", scene_id, handle);
        handle
    }

    /// Remove an entity. Returns `false` (and does nothing) if already gone.
    pub fn destroy(&mut self, handle: EntityHandle) -> bool {
        match self.entities.remove(handle) {
            Some(record) => {
                self.host.destroy(record.scene_id);
                log::debug!("Destroyed '{}' {:?}", record.name, handle);
                true
            }
            None => false,
        }
    }

    /// Destroy every entity. Returns how many were live.
    pub fn clear(&mut self) -> usize {
        let drained = self.entities.drain();
        let count = drained.len();
        for (_, record) in drained {
            self.host.destroy(record.scene_id);
        }
        if count > 0 {
            log::debug!("Cleared {} entities", count);
        }
        count
    }

    pub fn set_enabled(&mut self, handle: EntityHandle, enabled: bool) -> bool {
        match self.entities.get_mut(handle) {
            Some(record) => {
                record.enabled = enabled;
                self.host.set_enabled(record.scene_id, enabled);
                true
            }
            None => false,
        }
    }

    /// `false` for absent entities
    pub fn is_enabled(&self, handle: EntityHandle) -> bool {
        self.entities.get(handle).map_or(false, |r| r.enabled)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&EntityRecord> {
        self.entities.get(handle)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.contains(handle)
    }

    pub fn position(&self, handle: EntityHandle) -> Option<Vec3> {
        self.get(handle).map(|r| r.transform.position)
    }

    pub fn transform(&self, handle: EntityHandle) -> Option<Transform> {
        self.get(handle).map(|r| r.transform)
    }

    pub fn set_position(&mut self, handle: EntityHandle, position: Vec3) {
        if let Some(record) = self.entities.get_mut(handle) {
            record.transform.position = position;
            self.host.set_position(record.scene_id, position);
        }
    }

    pub fn set_rotation(&mut self, handle: EntityHandle, rotation: Vec3) {
        if let Some(record) = self.entities.get_mut(handle) {
            record.transform.rotation = rotation;
            self.host.set_rotation(record.scene_id, rotation);
        }
    }

    pub fn set_transform(&mut self, handle: EntityHandle, transform: Transform) {
        if let Some(record) = self.entities.get_mut(handle) {
            record.transform = transform;
            self.host.set_position(record.scene_id, transform.position);
            self.host.set_rotation(record.scene_id, transform.rotation);
        }
    }

    pub fn blink(&mut self, handle: EntityHandle, color: [f32; 4]) {
        if let Some(record) = self.entities.get(handle) {
            self.host.blink(record.scene_id, color);
        }
    }

    pub fn bounds(&self, handle: EntityHandle) -> Option<Bounds> {
        self.get(handle).and_then(EntityRecord::bounds)
    }

    /// Top faces of walkable box colliders
    pub fn walkable_surfaces(&self) -> Vec<Aabb> {
        self.entities
            .iter()
            .filter(|(_, r)| r.enabled && r.kind.is_walkable())
            .filter_map(|(_, r)| match r.bounds() {
                Some(Bounds::Box(aabb)) => Some(aabb),
                _ => None,
            })
            .collect()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|(_, r)| r.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<H: SceneHost> SpatialQuery for EntityRegistry<H> {
    fn distance(&self, a: EntityHandle, b: EntityHandle) -> Option<f32> {
        Some(self.position(a)?.distance(self.position(b)?))
    }

    fn intersects(&self, a: EntityHandle, b: EntityHandle) -> bool {
        if !self.is_enabled(a) || !self.is_enabled(b) {
            return false;
        }
        match (self.bounds(a), self.bounds(b)) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        }
    }
}
