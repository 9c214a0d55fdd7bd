//! Collectible star

use hilltop_hazards::prelude::*;
use hilltop_math::Vec3;
use rand::Rng;

use crate::config::StarConfig;
use crate::host::{Collider, EntityDesc, EntityKind, SceneHost};
use crate::registry::{EntityHandle, EntityRegistry};

const STAR_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// The run objective. Hovers about its spawn point until picked up.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub handle: EntityHandle,
    pub collected: bool,
    behavior: Behavior,
}

impl Star {
    pub fn spawn<H: SceneHost>(
        registry: &mut EntityRegistry<H>,
        position: Vec3,
        config: &StarConfig,
    ) -> Self {
        let handle = registry.spawn(
            EntityDesc::new(EntityKind::Star, "Power Star")
                .at(position)
                .with_collider(Collider::sphere(0.5))
                .with_color(STAR_COLOR),
        );
        log::info!("Star appears at ({:.1}, {:.1}, {:.1})", position.x, position.y, position.z);
        Self {
            handle,
            collected: false,
            behavior: Behavior::Hover(config.hover(position.y)),
        }
    }

    pub fn animate<H: SceneHost, R: Rng + ?Sized>(
        &self,
        registry: &mut EntityRegistry<H>,
        ctx: &MotionContext,
        rng: &mut R,
    ) {
        if self.collected {
            return;
        }
        if let Some(mut transform) = registry.transform(self.handle) {
            self.behavior.advance(&mut transform, ctx, rng);
            registry.set_transform(self.handle, transform);
        }
    }

    /// Collect if `player` is within `pickup_radius`. Destroys the visual.
    pub fn try_collect<H: SceneHost>(
        &mut self,
        registry: &mut EntityRegistry<H>,
        player: Vec3,
        pickup_radius: f32,
    ) -> bool {
        if self.collected {
            return false;
        }
        let Some(position) = registry.position(self.handle) else {
            return false;
        };
        if position.distance(player) >= pickup_radius {
            return false;
        }

        self.collected = true;
        registry.destroy(self.handle);
        log::info!("Star collected!");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessScene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pickup_radius() {
        let mut registry = EntityRegistry::new(HeadlessScene::new());
        let at = Vec3::new(0.0, 9.5, 25.0);
        let mut star = Star::spawn(&mut registry, at, &StarConfig::default());

        assert!(!star.try_collect(&mut registry, at + Vec3::new(1.5, 0.0, 0.0), 1.0));
        assert!(star.try_collect(&mut registry, at + Vec3::new(0.5, 0.0, 0.0), 1.0));
        assert!(star.collected);
        assert!(registry.get(star.handle).is_none());
        assert!(!star.try_collect(&mut registry, at, 1.0));
    }

    #[test]
    fn test_hover_stays_near_spawn() {
        let mut registry = EntityRegistry::new(HeadlessScene::new());
        let at = Vec3::new(0.0, 9.5, 25.0);
        let star = Star::spawn(&mut registry, at, &StarConfig::default());
        let mut rng = StdRng::seed_from_u64(0);

        for i in 0..30 {
            star.animate(&mut registry, &MotionContext::new(0.1, i as f32 * 0.1), &mut rng);
            let y = registry.position(star.handle).map(|p| p.y).unwrap_or_default();
            assert!((y - at.y).abs() <= 0.5 + 1e-4);
        }
    }
}
