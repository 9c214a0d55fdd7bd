//! Per-frame input snapshot

use serde::{Deserialize, Serialize};

/// Discrete session commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Menu "Start" button
    Start,
    Pause,
    /// Pause menu "Resume" button
    Resume,
    /// Escape key: pause, resume, or quit from the menu
    TogglePause,
    /// Pause menu "Main Menu" button
    ReturnToMenu,
    /// Menu "Quit" button
    Quit,
}

impl Command {
    /// Map a key name to the command it triggers
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "escape" | "esc" => Some(Self::TogglePause),
            "enter" | "return" => Some(Self::Start),
            "p" => Some(Self::Pause),
            _ => None,
        }
    }
}

/// Input consumed by one simulation step.
///
/// The host fills this in; the session never produces input. At most one
/// command is honoured per step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// x = strafe right, y = forward, each in [-1, 1]
    pub move_axis: [f32; 2],
    /// x = yaw delta, y = pitch delta, in degrees
    pub look_axis: [f32; 2],
    pub jump: bool,
    pub command: Option<Command>,
}

impl InputState {
    /// No movement, no command
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only a command
    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Self::default()
        }
    }

    pub fn with_move(mut self, strafe: f32, forward: f32) -> Self {
        self.move_axis = [strafe.clamp(-1.0, 1.0), forward.clamp(-1.0, 1.0)];
        self
    }

    pub fn with_look(mut self, yaw: f32, pitch: f32) -> Self {
        self.look_axis = [yaw, pitch];
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }
}
