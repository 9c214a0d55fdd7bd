//! Health component and the invulnerability window

use crate::damage::DamageInfo;
use serde::{Deserialize, Serialize};

/// Result of an `apply_damage` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Inside the invulnerability window, or already dead. Nothing changed.
    Blocked,
    /// Health went down but is still above zero
    Dealt { amount: u32, remaining: u32 },
    /// This hit took health to zero
    Killed { amount: u32 },
}

impl DamageOutcome {
    /// Whether health was mutated
    pub fn was_applied(&self) -> bool {
        !matches!(self, Self::Blocked)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Killed { .. })
    }
}

/// Integer health with a wall-clock invulnerability window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthComponent {
    current: u32,
    max: u32,
    /// Seconds after a successful hit during which further damage is dropped
    invulnerability_duration: f64,
    /// Timestamp of the last successful hit
    #[serde(skip)]
    last_hit_time: Option<f64>,
    #[serde(skip)]
    is_dead: bool,
}

impl HealthComponent {
    pub fn new(max_health: u32) -> Self {
        Self {
            current: max_health,
            max: max_health,
            invulnerability_duration: 0.0,
            last_hit_time: None,
            is_dead: max_health == 0,
        }
    }

    /// Set the invulnerability window (seconds)
    pub fn with_invulnerability(mut self, duration: f64) -> Self {
        self.invulnerability_duration = duration.max(0.0);
        self
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn invulnerability_duration(&self) -> f64 {
        self.invulnerability_duration
    }

    pub fn last_hit_time(&self) -> Option<f64> {
        self.last_hit_time
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Whether damage at `now` would be dropped by the window
    pub fn is_invulnerable(&self, now: f64) -> bool {
        match self.last_hit_time {
            Some(last) => now - last < self.invulnerability_duration,
            None => false,
        }
    }

    /// Seconds left in the current window (0 when vulnerable)
    pub fn invulnerability_remaining(&self, now: f64) -> f32 {
        match self.last_hit_time {
            Some(last) => (self.invulnerability_duration - (now - last)).max(0.0) as f32,
            None => 0.0,
        }
    }

    /// Apply damage at wall-clock time `now`.
    ///
    /// Damage inside the window is dropped, not queued. A successful hit
    /// restarts the window. Health floors at zero and the kill is reported
    /// exactly once; a dead component blocks everything until `reset`.
    /// Zero damage is not a hit and leaves the window alone.
    pub fn apply_damage(&mut self, damage: &DamageInfo, now: f64) -> DamageOutcome {
        if damage.amount == 0 || self.is_dead || self.is_invulnerable(now) {
            log::debug!("Dropped {} damage from {}", damage.amount, damage.source);
            return DamageOutcome::Blocked;
        }

        let dealt = damage.amount.min(self.current);
        self.current -= dealt;
        self.last_hit_time = Some(now);

        if self.current == 0 {
            self.is_dead = true;
            log::info!("Player killed by {}", damage.source);
            DamageOutcome::Killed { amount: dealt }
        } else {
            log::info!("Player hit by {}. Health now {}", damage.source, self.current);
            DamageOutcome::Dealt {
                amount: dealt,
                remaining: self.current,
            }
        }
    }

    /// Back to full health with no active window
    pub fn reset(&mut self) {
        self.current = self.max;
        self.is_dead = self.max == 0;
        self.last_hit_time = None;
    }

    /// Health as a fraction (0.0 - 1.0)
    pub fn health_percent(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self::new(3).with_invulnerability(1.0)
    }
}
