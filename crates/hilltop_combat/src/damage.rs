//! Damage sources and information

use serde::{Deserialize, Serialize};
use std::fmt;

/// What dealt the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    /// Contact with a hazard (registration index)
    Hazard(usize),
    /// Falling out of the level
    Fall,
    /// Anything driven from outside the simulation (debug, scripted)
    External,
}

impl fmt::Display for DamageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hazard(index) => write!(f, "hazard #{}", index),
            Self::Fall => write!(f, "fall"),
            Self::External => write!(f, "external"),
        }
    }
}

/// A single damage instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Hit points to remove
    pub amount: u32,
    pub source: DamageSource,
}

impl DamageInfo {
    pub fn new(amount: u32, source: DamageSource) -> Self {
        Self { amount, source }
    }

    /// One point of contact damage from the hazard at `index`
    pub fn hazard(index: usize) -> Self {
        Self::new(1, DamageSource::Hazard(index))
    }

    pub fn fall() -> Self {
        Self::new(1, DamageSource::Fall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_info() {
        let damage = DamageInfo::hazard(2);
        assert_eq!(damage.amount, 1);
        assert_eq!(damage.source, DamageSource::Hazard(2));
        assert_eq!(damage.source.to_string(), "hazard #2");
        assert_eq!(DamageInfo::fall().source, DamageSource::Fall);
    }
}
