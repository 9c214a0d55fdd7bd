//! Boss encounter

use hilltop_hazards::prelude::*;
use hilltop_math::Vec3;
use rand::Rng;

use crate::config::BossConfig;
use crate::host::{Collider, EntityDesc, EntityKind, SceneHost};
use crate::player::Player;
use crate::registry::{EntityHandle, EntityRegistry, SpatialQuery};

const BOSS_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const HIT_FLASH: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Result of one boss step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossEvent {
    /// Hit landed, boss still standing
    Hit { remaining: u32 },
    /// Last hit landed. The boss entity is already destroyed.
    Defeated { position: Vec3 },
}

/// Staged-HP boss. `hp` is set at creation and only ever goes down.
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub handle: EntityHandle,
    pub hp: u32,
    pub defeated: bool,
    behavior: Behavior,
}

impl Boss {
    pub fn spawn<H: SceneHost>(registry: &mut EntityRegistry<H>, config: &BossConfig) -> Self {
        let handle = registry.spawn(
            EntityDesc::new(EntityKind::Boss, config.name.clone())
                .at(config.position)
                .with_collider(Collider::sphere(config.radius))
                .with_color(BOSS_COLOR),
        );
        log::debug!("Boss '{}' spawned with {} hp", config.name, config.hp);
        Self {
            handle,
            hp: config.hp,
            defeated: false,
            behavior: Behavior::Spin(SpinParams::new(config.spin_speed)),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    /// Spin, then land a hit if the player is within the proximity radius.
    ///
    /// Every in-range step is a hit; the player's invulnerability window does
    /// not gate it. Each hit pushes the player directly away from the boss.
    pub fn update<H: SceneHost, R: Rng + ?Sized>(
        &mut self,
        registry: &mut EntityRegistry<H>,
        player: &mut Player,
        config: &BossConfig,
        ctx: &MotionContext,
        rng: &mut R,
    ) -> Option<BossEvent> {
        if self.defeated {
            return None;
        }
        let mut transform = registry.transform(self.handle)?;
        self.behavior.advance(&mut transform, ctx, rng);
        registry.set_transform(self.handle, transform);

        let distance = registry.distance(player.handle, self.handle)?;
        if distance >= config.proximity_radius {
            return None;
        }

        self.hp = self.hp.saturating_sub(1);
        registry.blink(self.handle, HIT_FLASH);
        log::info!("Hit {}! Boss HP = {}", config.name, self.hp);

        let away = (player.position - transform.position).normalize_or_zero();
        player.displace(away * config.knockback);
        registry.set_position(player.handle, player.position);

        if self.hp > 0 {
            return Some(BossEvent::Hit { remaining: self.hp });
        }

        self.defeated = true;
        registry.destroy(self.handle);
        log::info!("{} defeated", config.name);
        Some(BossEvent::Defeated {
            position: transform.position,
        })
    }
}
