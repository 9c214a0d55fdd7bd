//! Static level geometry

use hilltop_math::{Aabb, Vec3};

use crate::config::LevelConfig;
use crate::host::{Collider, EntityDesc, EntityKind, SceneHost};
use crate::registry::{EntityHandle, EntityRegistry};

/// Slab thickness used for the ground and terraces
const SLAB_THICKNESS: f32 = 0.2;

const GRASS: [f32; 4] = [0.45, 0.75, 0.2, 1.0];
const FENCE: [f32; 4] = [0.45, 0.3, 0.15, 1.0];

/// Handles and surfaces of the spawned geometry
#[derive(Debug, Default)]
pub struct LevelGeometry {
    pub ground: Option<EntityHandle>,
    pub terraces: Vec<EntityHandle>,
    pub fence_posts: Vec<EntityHandle>,
    /// Walkable boxes, top face at `max.y`
    pub surfaces: Vec<Aabb>,
}

/// A slab whose top face is at `top`
fn slab(center_xz: Vec3, top: f32, size: f32) -> (Vec3, Vec3) {
    let half = Vec3::new(size * 0.5, SLAB_THICKNESS * 0.5, size * 0.5);
    (Vec3::new(center_xz.x, top - half.y, center_xz.z), half)
}

/// Spawn the ground, the terraces up the hill and the fence line
pub fn build_geometry<H: SceneHost>(registry: &mut EntityRegistry<H>, config: &LevelConfig) -> LevelGeometry {
    let mut geometry = LevelGeometry::default();

    let (center, half) = slab(Vec3::ZERO, 0.0, config.ground_size);
    geometry.ground = Some(registry.spawn(
        EntityDesc::new(EntityKind::Ground, "Ground")
            .at(center)
            .with_collider(Collider::cuboid(half))
            .with_color(GRASS),
    ));

    for i in 1..=config.terrace_count {
        let step = i as f32;
        let (center, half) = slab(
            Vec3::new(0.0, 0.0, step * config.terrace_spacing),
            step * config.terrace_rise,
            config.terrace_size,
        );
        geometry.terraces.push(registry.spawn(
            EntityDesc::new(EntityKind::Terrace, format!("Terrace{}", i))
                .at(center)
                .with_collider(Collider::cuboid(half))
                .with_color(GRASS),
        ));
    }

    if config.fence_spacing > 0.0 {
        let extent = config.ground_size * 0.5;
        let mut x = -extent;
        while x <= extent {
            geometry.fence_posts.push(registry.spawn(
                EntityDesc::new(EntityKind::Fence, "Fence Post")
                    .at(Vec3::new(x, 1.0, config.fence_z))
                    .with_collider(Collider::cuboid(Vec3::new(0.25, 1.5, 0.25)))
                    .with_color(FENCE),
            ));
            x += config.fence_spacing;
        }
    }

    geometry.surfaces = registry.walkable_surfaces();
    log::debug!(
        "Level geometry: {} terraces, {} fence posts",
        geometry.terraces.len(),
        geometry.fence_posts.len()
    );
    geometry
}
