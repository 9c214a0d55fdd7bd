//! Hilltop Combat - Health and Damage
//!
//! The damage controller is the only code allowed to change the player's
//! health. It owns the invulnerability window and decides when a hit kills.
//!
//! # Example
//!
//! ```
//! use hilltop_combat::prelude::*;
//!
//! let mut health = HealthComponent::new(3).with_invulnerability(1.0);
//!
//! let hit = DamageInfo::new(1, DamageSource::Fall);
//! assert!(health.apply_damage(&hit, 10.0).was_applied());
//!
//! // Inside the window: silently dropped
//! assert_eq!(health.apply_damage(&hit, 10.5), DamageOutcome::Blocked);
//! assert_eq!(health.current(), 2);
//! ```

pub mod damage;
pub mod health;

pub mod prelude {
    pub use crate::damage::{DamageInfo, DamageSource};
    pub use crate::health::{DamageOutcome, HealthComponent};
}

pub use prelude::*;
