//! Hilltop HUD - Heads-Up Display Contract
//!
//! The simulation never lays out widgets. It pushes strings and banners
//! through the [`Hud`] trait and the host decides how to draw them.
//!
//! # Features
//!
//! - `Hud` collaborator trait (health text, score text, banner)
//! - Canonical text formatting for the counters
//! - End-of-run banners with their colors
//! - A recording HUD for tests and a logging HUD for headless runs
//!
//! # Example
//!
//! ```
//! use hilltop_hud::prelude::*;
//!
//! let mut hud = RecordingHud::new();
//! hud.set_health_text(&HudText::health(3));
//! hud.show_banner(&Notification::defeat());
//!
//! assert_eq!(hud.health_text(), "Health: 3");
//! assert_eq!(hud.banner().map(|b| b.title.as_str()), Some("Game Over"));
//! ```

pub mod display;
pub mod notification;

pub mod prelude {
    pub use crate::display::{Hud, HudText, LogHud, RecordingHud};
    pub use crate::notification::{Notification, NotificationType};
}

pub use prelude::*;
