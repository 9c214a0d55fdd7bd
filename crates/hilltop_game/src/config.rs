//! Game Configuration
//!
//! Every tunable of a run lives in [`GameConfig`]. The defaults reproduce the
//! reference hill level, so an empty file (or no file at all) is a complete
//! configuration.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Built-in defaults
//! 2. Config file: first positional CLI argument, or `HILLTOP_CONFIG`
//! 3. Environment overrides: `HILLTOP_SEED`, `HILLTOP_INVULN`
//!
//! # Example Config File
//!
//! ```toml
//! [combat]
//! max_health = 5
//! invulnerability = 1.5
//!
//! [session]
//! seed = 42
//!
//! [[level.hazards]]
//! name = "Lone Boulder"
//! radius = 0.75
//!
//! [level.hazards.behavior]
//! kind = "patrol"
//! origin = { x = 0.0, y = 7.0, z = 25.0 }
//! far_bound = { x = 0.0, y = 7.0, z = -10.0 }
//! ```

use std::path::{Path, PathBuf};

use hilltop_hazards::prelude::*;
use hilltop_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "HILLTOP_CONFIG";
/// Environment override for the RNG seed
pub const SEED_ENV: &str = "HILLTOP_SEED";
/// Environment override for the invulnerability window (seconds)
pub const INVULN_ENV: &str = "HILLTOP_INVULN";

/// Player movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed (units/s)
    pub speed: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Initial upward velocity of a jump
    pub jump_speed: f32,
    pub spawn_point: Vec3,
    /// Falling below this height costs a hit and respawns the player
    pub fall_threshold: f32,
    /// Pitch clamp in degrees
    pub max_pitch: f32,
    /// Collider radius
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            gravity: 20.0,
            jump_speed: 8.0,
            spawn_point: Vec3::new(0.0, 5.0, 0.0),
            fall_threshold: -10.0,
            max_pitch: 60.0,
            radius: 0.5,
        }
    }
}

/// Health and contact damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub max_health: u32,
    /// Seconds of wall-clock time after a hit during which damage is dropped
    pub invulnerability: f64,
    /// Extra reach added to a hazard's radius for contact tests
    pub contact_margin: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            invulnerability: 1.0,
            contact_margin: 0.7,
        }
    }
}

/// Boss encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub enabled: bool,
    pub name: String,
    pub position: Vec3,
    pub hp: u32,
    /// Player within this distance lands a hit every step
    pub proximity_radius: f32,
    /// Distance the player is pushed away per hit
    pub knockback: f32,
    /// Degrees per second
    pub spin_speed: f32,
    /// Star reward offset from the boss's last position
    pub star_offset: Vec3,
    pub radius: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "Big Bob-omb".to_string(),
            position: Vec3::new(0.0, 6.5, 25.0),
            hp: 3,
            proximity_radius: 3.0,
            knockback: 2.0,
            spin_speed: 40.0,
            star_offset: Vec3::new(0.0, 3.0, 0.0),
            radius: 1.0,
        }
    }
}

/// Collectible star and its effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub pickup_radius: f32,
    /// Degrees per second
    pub spin_speed: f32,
    pub bob_amplitude: f32,
    /// Radians per simulation second
    pub bob_frequency: f32,
    /// Seconds the defeat confetti stays before it is destroyed
    pub confetti_lifetime: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            pickup_radius: 1.0,
            spin_speed: 90.0,
            bob_amplitude: 0.5,
            bob_frequency: 4.0,
            confetti_lifetime: 1.0,
        }
    }
}

impl StarConfig {
    /// Hover animation centered on `base_y`
    pub fn hover(&self, base_y: f32) -> HoverParams {
        HoverParams {
            base_y,
            amplitude: self.bob_amplitude,
            frequency: self.bob_frequency,
            spin_speed: self.spin_speed,
        }
    }
}

/// Session timing and randomness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds from GameOver to the automatic return to the menu
    pub game_over_delay: f64,
    /// Seconds the end-of-run banner stays up
    pub banner_duration: f64,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_over_delay: 2.0,
            banner_duration: 2.0,
            seed: None,
        }
    }
}

/// Level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Side length of the square ground plane
    pub ground_size: f32,
    pub terrace_count: u32,
    /// Side length of each terrace
    pub terrace_size: f32,
    /// Height gained per terrace
    pub terrace_rise: f32,
    /// Distance along +z between terraces
    pub terrace_spacing: f32,
    pub fence_spacing: f32,
    pub fence_z: f32,
    /// Star position for levels without a boss
    pub star: Option<Vec3>,
    /// Hazards in registration order
    pub hazards: Vec<HazardSpec>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            ground_size: 50.0,
            terrace_count: 5,
            terrace_size: 8.0,
            terrace_rise: 1.2,
            terrace_spacing: 5.0,
            fence_spacing: 5.0,
            fence_z: -25.0,
            star: Some(Vec3::new(0.0, 9.5, 25.0)),
            hazards: reference_hazards(),
        }
    }
}

/// Three boulders, a chain chomp and three bob-ombs
pub fn reference_hazards() -> Vec<HazardSpec> {
    let mut hazards: Vec<HazardSpec> = (0..3)
        .map(|i| {
            HazardSpec::new(
                format!("Boulder{}", i),
                0.75,
                Behavior::Patrol(PatrolParams::default()),
            )
        })
        .collect();

    hazards.push(HazardSpec::new(
        "Chain Chomp",
        1.0,
        Behavior::Tethered(TetherParams::default()),
    ));

    for (i, home) in [
        Vec3::new(8.0, 0.4, 12.0),
        Vec3::new(-6.0, 0.4, 18.0),
        Vec3::new(6.0, 0.4, -8.0),
    ]
    .into_iter()
    .enumerate()
    {
        hazards.push(HazardSpec::new(
            format!("Bob-omb{}", i),
            0.4,
            Behavior::Homing(HomingParams::new(home)),
        ));
    }

    hazards
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub combat: CombatConfig,
    pub boss: BossConfig,
    pub star: StarConfig,
    pub session: SessionConfig,
    pub level: LevelConfig,
    /// Where this config was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl GameConfig {
    /// Load configuration from all sources.
    ///
    /// `path` wins over `HILLTOP_CONFIG`. Environment overrides apply last,
    /// then the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match file {
            Some(file) => Self::load_from_file(&file)?,
            None => {
                log::info!("No config file given, using the reference level");
                Self::default()
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text. Missing sections keep defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides looked up by variable name
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup(SEED_ENV) {
            let seed = value.trim().parse().map_err(|_| GameError::InvalidOverride {
                name: SEED_ENV.to_string(),
                value: value.clone(),
            })?;
            self.session.seed = Some(seed);
            log::info!("Seed from env: {}", seed);
        }

        if let Some(value) = lookup(INVULN_ENV) {
            let seconds = value.trim().parse().map_err(|_| GameError::InvalidOverride {
                name: INVULN_ENV.to_string(),
                value: value.clone(),
            })?;
            self.combat.invulnerability = seconds;
            log::info!("Invulnerability window from env: {}s", seconds);
        }

        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(GameError::InvalidConfig(msg)) };

        if self.combat.max_health == 0 {
            return invalid("combat.max_health must be at least 1".into());
        }
        for (name, value) in [
            ("combat.invulnerability", self.combat.invulnerability),
            ("session.game_over_delay", self.session.game_over_delay),
            ("session.banner_duration", self.session.banner_duration),
            ("star.confetti_lifetime", self.star.confetti_lifetime),
        ] {
            if value < 0.0 {
                return invalid(format!("{} must not be negative (got {})", name, value));
            }
        }
        for (name, value) in [
            ("player.speed", self.player.speed),
            ("player.gravity", self.player.gravity),
            ("player.radius", self.player.radius),
            ("star.pickup_radius", self.star.pickup_radius),
        ] {
            if value <= 0.0 {
                return invalid(format!("{} must be positive (got {})", name, value));
            }
        }
        if self.boss.enabled && (self.boss.hp == 0 || self.boss.proximity_radius <= 0.0) {
            return invalid("boss needs hp >= 1 and a positive proximity_radius".into());
        }
        if self.player.fall_threshold >= self.player.spawn_point.y {
            return invalid(format!(
                "player.fall_threshold ({}) must be below the spawn point ({})",
                self.player.fall_threshold, self.player.spawn_point.y
            ));
        }
        if let Some(spec) = self.level.hazards.iter().find(|h| h.radius <= 0.0) {
            return invalid(format!("hazard '{}' has a non-positive radius", spec.name));
        }
        if let Some(spec) = self.level.hazards.iter().find(|h| h.kind().is_none()) {
            return invalid(format!("hazard '{}' has a cosmetic behavior", spec.name));
        }

        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.session.seed = Some(seed);
        self
    }

    pub fn with_hazards(mut self, hazards: Vec<HazardSpec>) -> Self {
        self.level.hazards = hazards;
        self
    }

    pub fn without_boss(mut self) -> Self {
        self.boss.enabled = false;
        self
    }
}
