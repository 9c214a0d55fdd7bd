//! End-of-run banners

use serde::{Deserialize, Serialize};

/// Banner type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationType {
    /// General message
    #[default]
    Info,
    /// Objective collected
    Victory,
    /// Out of health
    Defeat,
}

impl NotificationType {
    /// Get default color for this type
    pub fn default_color(&self) -> [f32; 4] {
        match self {
            Self::Info => [0.9, 0.9, 0.9, 1.0],    // White
            Self::Victory => [1.0, 1.0, 0.0, 1.0], // Yellow
            Self::Defeat => [1.0, 0.0, 0.0, 1.0],  // Red
        }
    }
}

/// A centered banner message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub title: String,
    /// Seconds the banner stays up
    pub duration: f32,
    /// Color override
    pub color: Option<[f32; 4]>,
}

impl Notification {
    pub fn new(notification_type: NotificationType, title: impl Into<String>) -> Self {
        Self {
            notification_type,
            title: title.into(),
            duration: 2.0,
            color: None,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn effective_color(&self) -> [f32; 4] {
        self.color.unwrap_or_else(|| self.notification_type.default_color())
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationType::Info, title)
    }

    /// "You got the Star!" in yellow
    pub fn victory() -> Self {
        Self::new(NotificationType::Victory, "You got the Star!")
    }

    /// "Game Over" in red
    pub fn defeat() -> Self {
        Self::new(NotificationType::Defeat, "Game Over")
    }
}
