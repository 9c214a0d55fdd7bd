//! Hilltop Hazards - Motion Rules
//!
//! Every moving thing in a level carries a tagged [`Behavior`]. The session
//! advances each one once per step through [`Behavior::advance`]; there are no
//! per-entity closures.
//!
//! # Behaviors
//!
//! - `Patrol`: roll toward a far bound, then loop back to a (jittered) start
//! - `Tethered`: orbit an anchor as a function of elapsed time, with chain links
//! - `Homing`: chase the player inside a trigger radius, spin in place outside
//! - `Spin` / `Hover`: cosmetic animation for the boss and the star
//!
//! # Example
//!
//! ```
//! use hilltop_hazards::prelude::*;
//! use hilltop_math::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let chomp = Behavior::Tethered(TetherParams::new(Vec3::new(-10.0, 1.0, 5.0), 4.0));
//!
//! let mut transform = Transform::default();
//! let ctx = MotionContext::new(0.016, 1.0);
//! chomp.advance(&mut transform, &ctx, &mut rng);
//! assert!((transform.position.distance(Vec3::new(-10.0, 1.0, 5.0)) - 4.0).abs() < 1e-4);
//! ```

pub mod animation;
pub mod behavior;
pub mod hazard;
pub mod homing;
pub mod patrol;
pub mod tether;

pub mod prelude {
    pub use crate::animation::{HoverParams, SpinParams};
    pub use crate::behavior::{Behavior, MotionContext, MotionPhase};
    pub use crate::hazard::{HazardKind, HazardSpec};
    pub use crate::homing::HomingParams;
    pub use crate::patrol::PatrolParams;
    pub use crate::tether::TetherParams;
}

pub use prelude::*;
