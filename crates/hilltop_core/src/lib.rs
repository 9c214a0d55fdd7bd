//! # hilltop_core - Hilltop Core
//!
//! Zero-dependency primitives shared by every Hilltop crate:
//! - **Handles**: generational indices so a destroyed entity reads as absent
//! - **Clocks**: wall-clock timestamps and per-step deltas
//! - **Generations**: session tokens that invalidate stale scheduled work

pub mod clock;
pub mod generation;
pub mod handle;

pub use clock::*;
pub use generation::*;
pub use handle::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::generation::{Generation, GenerationCounter};
    pub use crate::handle::{Handle, HandleMap};
}
