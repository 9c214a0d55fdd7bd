//! # hilltop_game - Hilltop Session Simulation
//!
//! The per-frame game loop of a small hill level: a first-person player, a
//! handful of hazards, a boss with staged health, and a star to collect.
//!
//! The crate only simulates. Rendering, windowing and widget layout are
//! collaborators behind the [`SceneHost`] and [`Hud`](hilltop_hud::Hud)
//! traits; the headless implementations here are enough to run and test a
//! whole session.
//!
//! # Example
//!
//! ```
//! use hilltop_core::ManualClock;
//! use hilltop_game::prelude::*;
//! use hilltop_hud::RecordingHud;
//!
//! let config = GameConfig::default().with_seed(1);
//! let mut session = Session::new(config, HeadlessScene::new(), RecordingHud::new());
//! let mut clock = ManualClock::new();
//!
//! session.update(&clock, &InputState::command(Command::Start));
//! for _ in 0..60 {
//!     clock.advance(1.0 / 60.0);
//!     session.update(&clock, &InputState::idle());
//! }
//!
//! assert!(session.state().is_simulating());
//! assert_eq!(session.score(), 0);
//! ```

pub mod boss;
pub mod collectible;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod level;
pub mod player;
pub mod registry;
pub mod session;

pub use host::SceneHost;

pub mod prelude {
    pub use crate::boss::{Boss, BossEvent};
    pub use crate::collectible::Star;
    pub use crate::config::GameConfig;
    pub use crate::error::{GameError, Result};
    pub use crate::host::{Collider, EntityDesc, EntityKind, HeadlessScene, SceneHost, SceneId};
    pub use crate::input::{Command, InputState};
    pub use crate::player::Player;
    pub use crate::registry::{EntityHandle, EntityRegistry, SpatialQuery};
    pub use crate::session::{ActiveHazard, Session, SessionTask};
    pub use hilltop_gamestate::{GameState, Outcome};
}
