//! Hilltop GameState - Session State Management
//!
//! This crate provides the session life-cycle state machine and the
//! one-shot delayed task queue that the session uses for timed effects.
//!
//! # Features
//!
//! - Session state machine (menu, playing, paused, game over)
//! - Guarded transitions: invalid requests are ignored, never errors
//! - Transition history for inspection
//! - Delayed tasks that are dropped when the session generation moves on
//!
//! # Example
//!
//! ```
//! use hilltop_core::GenerationCounter;
//! use hilltop_gamestate::prelude::*;
//!
//! let mut state = GameStateManager::new();
//! assert!(state.start_game());
//! assert!(state.pause());
//! assert!(!state.pause());
//! assert!(state.resume());
//!
//! let mut generations = GenerationCounter::new();
//! let mut tasks = Scheduler::new();
//! tasks.schedule("return to menu", 12.0, generations.current());
//! generations.bump();
//! assert!(tasks.due(20.0, generations.current()).is_empty());
//! ```

pub mod schedule;
pub mod state;

pub mod prelude {
    pub use crate::schedule::{ScheduledTask, Scheduler};
    pub use crate::state::{GameState, GameStateManager, Outcome, StateTransition};
}

pub use prelude::*;
