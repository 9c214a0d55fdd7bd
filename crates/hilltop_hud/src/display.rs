//! HUD collaborator trait and stock implementations

use crate::notification::Notification;

/// Text/banner sink driven by the session.
///
/// Implementations only display what they are told; the session owns the
/// counters and decides when to push updates.
pub trait Hud {
    fn set_health_text(&mut self, text: &str);
    fn set_score_text(&mut self, text: &str);
    fn show_banner(&mut self, banner: &Notification);
    fn clear_banner(&mut self);
}

/// Canonical counter strings
pub struct HudText;

impl HudText {
    pub fn health(value: u32) -> String {
        format!("Health: {}", value)
    }

    pub fn score(value: u32) -> String {
        format!("Stars: {}", value)
    }
}

/// Keeps the latest values and a count of updates
#[derive(Debug, Default, Clone)]
pub struct RecordingHud {
    health: String,
    score: String,
    banner: Option<Notification>,
    banners_shown: usize,
    updates: usize,
}

impl RecordingHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health_text(&self) -> &str {
        &self.health
    }

    pub fn score_text(&self) -> &str {
        &self.score
    }

    pub fn banner(&self) -> Option<&Notification> {
        self.banner.as_ref()
    }

    /// Total banners shown since creation
    pub fn banners_shown(&self) -> usize {
        self.banners_shown
    }

    /// Total text updates received
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Hud for RecordingHud {
    fn set_health_text(&mut self, text: &str) {
        self.health = text.to_string();
        self.updates += 1;
    }

    fn set_score_text(&mut self, text: &str) {
        self.score = text.to_string();
        self.updates += 1;
    }

    fn show_banner(&mut self, banner: &Notification) {
        self.banner = Some(banner.clone());
        self.banners_shown += 1;
    }

    fn clear_banner(&mut self) {
        self.banner = None;
    }
}

/// Writes changes to the log. Repeated identical text is suppressed.
#[derive(Debug, Default)]
pub struct LogHud {
    last_health: String,
    last_score: String,
}

impl LogHud {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hud for LogHud {
    fn set_health_text(&mut self, text: &str) {
        if self.last_health != text {
            log::info!("[hud] {}", text);
            self.last_health = text.to_string();
        }
    }

    fn set_score_text(&mut self, text: &str) {
        if self.last_score != text {
            log::info!("[hud] {}", text);
            self.last_score = text.to_string();
        }
    }

    fn show_banner(&mut self, banner: &Notification) {
        log::info!("[hud] banner: {}", banner.title);
    }

    fn clear_banner(&mut self) {
        log::debug!("[hud] banner cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format() {
        assert_eq!(HudText::health(3), "Health: 3");
        assert_eq!(HudText::score(0), "Stars: 0");
    }

    #[test]
    fn test_recording_hud() {
        let mut hud = RecordingHud::new();
        hud.set_health_text("Health: 2");
        hud.set_score_text("Stars: 1");
        hud.show_banner(&Notification::victory());
        hud.clear_banner();

        assert_eq!(hud.health_text(), "Health: 2");
        assert_eq!(hud.score_text(), "Stars: 1");
        assert!(hud.banner().is_none());
        assert_eq!(hud.banners_shown(), 1);
        assert_eq!(hud.updates(), 2);
    }
}
