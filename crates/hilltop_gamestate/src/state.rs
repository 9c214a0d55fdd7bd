//! Session state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Objective collected
    Win,
    /// Health reached zero
    Lose,
}

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Idle, nothing simulated
    #[default]
    Menu,
    /// Full simulation
    Playing,
    /// Simulation frozen, input goes to the pause menu
    Paused,
    /// Transient end screen, returns to the menu on a timer
    GameOver(Outcome),
}

impl GameState {
    /// Check if the per-step simulation should run
    pub fn is_simulating(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Pointer/input capture is held only while playing
    pub fn captures_input(&self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    pub fn is_menu(&self) -> bool {
        matches!(self, Self::Menu)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }

    /// The outcome, if the run has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => write!(f, "Menu"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
            Self::GameOver(Outcome::Win) => write!(f, "GameOver(Win)"),
            Self::GameOver(Outcome::Lose) => write!(f, "GameOver(Lose)"),
        }
    }
}

/// A state change that actually happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    /// Previous state
    pub from: GameState,
    /// New state
    pub to: GameState,
}

impl StateTransition {
    pub fn new(from: GameState, to: GameState) -> Self {
        Self { from, to }
    }
}

/// Session state manager with stack-based states.
///
/// Pause pushes onto the stack and resume pops, so the state underneath a
/// pause is always `Playing`. Every request returns `false` and leaves the
/// stack untouched when it does not apply to the current state.
#[derive(Debug)]
pub struct GameStateManager {
    /// State stack (current state is last element)
    stack: Vec<GameState>,
    /// Transitions not yet consumed by the session
    pending: Vec<StateTransition>,
    /// Every transition since creation
    history: Vec<StateTransition>,
}

impl Default for GameStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateManager {
    /// Create a manager sitting at the menu
    pub fn new() -> Self {
        Self {
            stack: vec![GameState::Menu],
            pending: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Get current state
    pub fn current(&self) -> GameState {
        self.stack.last().copied().unwrap_or_default()
    }

    /// Get previous state (if any)
    pub fn previous(&self) -> Option<GameState> {
        self.stack.iter().rev().nth(1).copied()
    }

    /// Get full state stack
    pub fn stack(&self) -> &[GameState] {
        &self.stack
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drain pending transitions
    pub fn drain_transitions(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.pending)
    }

    /// Get transition history
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    // Guarded session transitions

    /// Menu -> Playing
    pub fn start_game(&mut self) -> bool {
        if !self.guard(GameState::Playing, |s| s.is_menu()) {
            return false;
        }
        self.reset(GameState::Playing);
        true
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        if !self.guard(GameState::Paused, |s| s.is_simulating()) {
            return false;
        }
        self.push_state(GameState::Paused);
        true
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        if !self.guard(GameState::Playing, |s| s.is_paused()) {
            return false;
        }
        self.pop_state().is_some()
    }

    /// Playing -> GameOver
    pub fn game_over(&mut self, outcome: Outcome) -> bool {
        if !self.guard(GameState::GameOver(outcome), |s| s.is_simulating()) {
            return false;
        }
        self.reset(GameState::GameOver(outcome));
        true
    }

    /// GameOver or Paused -> Menu
    pub fn return_to_menu(&mut self) -> bool {
        if !self.guard(GameState::Menu, |s| s.is_game_over() || s.is_paused()) {
            return false;
        }
        self.reset(GameState::Menu);
        true
    }

    fn guard(&self, to: GameState, allowed: impl Fn(&GameState) -> bool) -> bool {
        let from = self.current();
        if allowed(&from) {
            true
        } else {
            log::debug!("Ignoring transition {} -> {}", from, to);
            false
        }
    }

    fn push_state(&mut self, state: GameState) {
        let from = self.current();
        self.stack.push(state);
        self.record(StateTransition::new(from, state));
    }

    fn pop_state(&mut self) -> Option<GameState> {
        if self.stack.len() > 1 {
            let from = self.stack.pop()?;
            let to = self.current();
            self.record(StateTransition::new(from, to));
            Some(from)
        } else {
            None
        }
    }

    fn reset(&mut self, state: GameState) {
        let from = self.current();
        self.stack.clear();
        self.stack.push(state);
        self.record(StateTransition::new(from, state));
    }

    fn record(&mut self, transition: StateTransition) {
        log::info!("State {} -> {}", transition.from, transition.to);
        self.history.push(transition.clone());
        self.pending.push(transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_manager() {
        let manager = GameStateManager::new();
        assert_eq!(manager.current(), GameState::Menu);
        assert_eq!(manager.depth(), 1);
        assert!(manager.history().is_empty());
    }

    #[test]
    fn test_state_stack() {
        let mut manager = GameStateManager::new();

        manager.start_game();
        manager.pause();

        assert_eq!(manager.current(), GameState::Paused);
        assert_eq!(manager.previous(), Some(GameState::Playing));

        manager.resume();
        assert_eq!(manager.current(), GameState::Playing);
        assert_eq!(manager.depth(), 1);
    }

    #[test]
    fn test_full_cycle() {
        let mut manager = GameStateManager::new();

        assert!(manager.start_game());
        assert!(manager.pause());
        assert!(manager.resume());
        assert!(manager.game_over(Outcome::Lose));
        assert_eq!(manager.current(), GameState::GameOver(Outcome::Lose));
        assert!(manager.return_to_menu());
        assert_eq!(manager.current(), GameState::Menu);

        let transitions = manager.drain_transitions();
        assert_eq!(transitions.len(), 5);
        assert!(manager.drain_transitions().is_empty());
        assert_eq!(manager.history().len(), 5);
    }

    #[test]
    fn test_invalid_transitions_ignored() {
        let mut manager = GameStateManager::new();

        assert!(!manager.pause());
        assert!(!manager.resume());
        assert!(!manager.game_over(Outcome::Win));
        assert!(!manager.return_to_menu());

        manager.start_game();
        assert!(!manager.start_game());
        manager.pause();
        assert!(!manager.pause());
        assert!(!manager.game_over(Outcome::Lose));

        assert_eq!(manager.current(), GameState::Paused);
        assert_eq!(manager.history().len(), 2);
    }

    #[test]
    fn test_game_over_is_terminal_until_menu() {
        let mut manager = GameStateManager::new();
        manager.start_game();
        assert!(manager.game_over(Outcome::Lose));
        assert!(!manager.game_over(Outcome::Lose));
        assert!(!manager.game_over(Outcome::Win));
        assert!(!manager.pause());
        assert!(!manager.start_game());
    }

    #[test]
    fn test_paused_to_menu() {
        let mut manager = GameStateManager::new();
        manager.start_game();
        manager.pause();
        assert!(manager.return_to_menu());
        assert_eq!(manager.stack(), &[GameState::Menu]);
    }

    #[test]
    fn test_state_properties() {
        assert!(GameState::Playing.is_simulating());
        assert!(!GameState::Paused.is_simulating());
        assert!(!GameState::GameOver(Outcome::Win).is_simulating());

        assert!(GameState::Playing.captures_input());
        assert!(!GameState::Menu.captures_input());

        assert_eq!(GameState::GameOver(Outcome::Win).outcome(), Some(Outcome::Win));
        assert_eq!(GameState::Playing.outcome(), None);
        assert_eq!(GameState::GameOver(Outcome::Lose).to_string(), "GameOver(Lose)");
    }
}
