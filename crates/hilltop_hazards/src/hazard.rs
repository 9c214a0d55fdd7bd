//! Hazard descriptions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::behavior::Behavior;

/// Hazard classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Patrol,
    Tethered,
    Homing,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patrol => write!(f, "patrol"),
            Self::Tethered => write!(f, "tethered"),
            Self::Homing => write!(f, "homing"),
        }
    }
}

/// Data needed to spawn one hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSpec {
    pub name: String,
    /// Collider radius (half the visual scale)
    pub radius: f32,
    pub behavior: Behavior,
}

impl HazardSpec {
    pub fn new(name: impl Into<String>, radius: f32, behavior: Behavior) -> Self {
        Self {
            name: name.into(),
            radius,
            behavior,
        }
    }

    /// `None` when the behavior is purely cosmetic
    pub fn kind(&self) -> Option<HazardKind> {
        self.behavior.hazard_kind()
    }
}
