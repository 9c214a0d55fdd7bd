//! Play session
//!
//! [`Session`] is the single owner of all run state: health, score, the
//! player, hazards, boss, star, and the delayed-task queue. The host calls
//! [`Session::update`] once per frame with a clock and an input snapshot.
//!
//! # Frame order
//!
//! 0. A transition raised since the last frame (e.g. a fatal
//!    [`Session::apply_damage`]) is reported and ends the frame
//! 1. Due scheduled tasks (every state, including Paused)
//! 2. At most one command
//! 3. If nothing above changed state and the state is Playing:
//!    player movement, fall-out, hazard motion, boss, hazard contact, star
//!
//! A frame never performs more than one state transition; anything after the
//! first transition waits for the next frame.
//!
//! # Pause and time
//!
//! Motion runs on simulation time, which only advances while Playing.
//! Invulnerability windows and scheduled tasks run on the clock's wall time
//! and keep running while paused; nothing is rewound on resume.

use hilltop_combat::prelude::*;
use hilltop_core::{Clock, Generation, GenerationCounter};
use hilltop_gamestate::prelude::*;
use hilltop_hazards::prelude::*;
use hilltop_hud::prelude::*;
use hilltop_math::{Aabb, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boss::{Boss, BossEvent};
use crate::collectible::Star;
use crate::config::GameConfig;
use crate::host::{Collider, EntityDesc, EntityKind, SceneHost};
use crate::input::{Command, InputState};
use crate::level::build_geometry;
use crate::player::Player;
use crate::registry::{EntityHandle, EntityRegistry, SpatialQuery};

const DAMAGE_FLASH: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const LINK_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// Delayed one-shot work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    ReturnToMenu,
    ClearBanner,
    DespawnEffect(EntityHandle),
}

/// A registered hazard and its chain links
#[derive(Debug, Clone)]
pub struct ActiveHazard {
    pub handle: EntityHandle,
    pub spec: HazardSpec,
    pub links: Vec<EntityHandle>,
}

/// One play-through context, reused across runs
pub struct Session<H: SceneHost, U: Hud> {
    config: GameConfig,
    registry: EntityRegistry<H>,
    hud: U,
    state: GameStateManager,
    health: HealthComponent,
    score: u32,
    player: Option<Player>,
    surfaces: Vec<Aabb>,
    /// Registration order, which is also the contact tie-break order
    hazards: Vec<ActiveHazard>,
    boss: Option<Boss>,
    star: Option<Star>,
    scheduler: Scheduler<SessionTask>,
    generations: GenerationCounter,
    rng: StdRng,
    /// Seconds of Playing time in the current run
    sim_time: f32,
    quit_requested: bool,
}

impl<H: SceneHost, U: Hud> Session<H, U> {
    pub fn new(config: GameConfig, host: H, hud: U) -> Self {
        let rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let health = HealthComponent::new(config.combat.max_health)
            .with_invulnerability(config.combat.invulnerability);

        Self {
            config,
            registry: EntityRegistry::new(host),
            hud,
            state: GameStateManager::new(),
            health,
            score: 0,
            player: None,
            surfaces: Vec::new(),
            hazards: Vec::new(),
            boss: None,
            star: None,
            scheduler: Scheduler::new(),
            generations: GenerationCounter::new(),
            rng,
            sim_time: 0.0,
            quit_requested: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state.current()
    }

    pub fn history(&self) -> &[StateTransition] {
        self.state.history()
    }

    pub fn health(&self) -> u32 {
        self.health.current()
    }

    pub fn health_component(&self) -> &HealthComponent {
        &self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn hazards(&self) -> &[ActiveHazard] {
        &self.hazards
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn star(&self) -> Option<&Star> {
        self.star.as_ref()
    }

    pub fn registry(&self) -> &EntityRegistry<H> {
        &self.registry
    }

    pub fn hud(&self) -> &U {
        &self.hud
    }

    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Set when the player asked to leave from the menu
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Advance one frame. Returns the transition that happened, if any.
    pub fn update(&mut self, clock: &impl Clock, input: &InputState) -> Option<StateTransition> {
        let now = clock.now();

        // A transition raised between frames (external damage) owns this frame
        let mut transitions = self.state.drain_transitions();
        if !transitions.is_empty() {
            debug_assert!(transitions.len() <= 1, "{:?}", transitions);
            return transitions.pop();
        }

        self.run_scheduled(now);
        transitions = self.state.drain_transitions();

        if transitions.is_empty() {
            if let Some(command) = input.command {
                self.handle_command(command);
                transitions = self.state.drain_transitions();
            }
        }

        if transitions.is_empty() && self.state.current().is_simulating() {
            self.simulate(input, now, clock.delta());
            transitions = self.state.drain_transitions();
        }

        debug_assert!(transitions.len() <= 1, "{:?}", transitions);
        transitions.pop()
    }

    /// Damage from outside the simulation. Same rules as contact damage.
    pub fn apply_damage(&mut self, amount: u32, now: f64) -> DamageOutcome {
        self.damage_player(DamageInfo::new(amount, DamageSource::External), now)
    }

    /// Move the player without physics (debug warp)
    pub fn place_player(&mut self, position: Vec3) {
        if let Some(player) = self.player.as_mut() {
            player.position = position;
            player.velocity = Vec3::ZERO;
            self.registry.set_position(player.handle, position);
        }
    }

    /// Add a hazard to the running level. `None` when no run is active or
    /// its behavior is cosmetic.
    pub fn spawn_hazard(&mut self, spec: HazardSpec) -> Option<EntityHandle> {
        if self.player.is_none() {
            log::debug!("Ignoring hazard '{}' outside a run", spec.name);
            return None;
        }
        spec.kind()?;
        Some(self.register_hazard(spec))
    }

    /// Pause or unpause a single hazard. Disabled hazards neither move nor hurt.
    pub fn set_hazard_enabled(&mut self, handle: EntityHandle, enabled: bool) -> bool {
        let Some(hazard) = self.hazards.iter().find(|h| h.handle == handle) else {
            return false;
        };
        for link in &hazard.links {
            self.registry.set_enabled(*link, enabled);
        }
        self.registry.set_enabled(handle, enabled)
    }

    pub fn destroy_hazard(&mut self, handle: EntityHandle) -> bool {
        let Some(index) = self.hazards.iter().position(|h| h.handle == handle) else {
            return false;
        };
        let hazard = self.hazards.remove(index);
        for link in hazard.links {
            self.registry.destroy(link);
        }
        self.registry.destroy(hazard.handle)
    }

    fn run_scheduled(&mut self, now: f64) {
        for task in self.scheduler.due(now, self.generations.current()) {
            match task {
                SessionTask::ClearBanner => self.hud.clear_banner(),
                SessionTask::DespawnEffect(handle) => {
                    self.registry.destroy(handle);
                }
                SessionTask::ReturnToMenu => {
                    if self.state.return_to_menu() {
                        self.cleanup();
                        // Anything else due was issued under the old generation
                        break;
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => {
                if self.state.start_game() {
                    self.begin_run();
                }
            }
            Command::Pause => {
                if self.state.pause() {
                    self.registry.host_mut().set_cursor_locked(false);
                }
            }
            Command::Resume => {
                if self.state.resume() {
                    self.registry.host_mut().set_cursor_locked(true);
                }
            }
            Command::TogglePause => match self.state.current() {
                GameState::Playing => self.handle_command(Command::Pause),
                GameState::Paused => self.handle_command(Command::Resume),
                GameState::Menu => self.handle_command(Command::Quit),
                GameState::GameOver(_) => log::debug!("Ignoring {:?} during game over", command),
            },
            Command::ReturnToMenu => {
                if self.state.current().is_paused() && self.state.return_to_menu() {
                    self.cleanup();
                } else {
                    log::debug!("Ignoring {:?} in {}", command, self.state.current());
                }
            }
            Command::Quit => {
                if self.state.current().is_menu() {
                    log::info!("Quit requested");
                    self.quit_requested = true;
                } else {
                    log::debug!("Ignoring {:?} in {}", command, self.state.current());
                }
            }
        }
    }

    /// Menu -> Playing: fresh counters and a freshly spawned level
    fn begin_run(&mut self) {
        let generation = self.generations.bump();
        self.health.reset();
        self.score = 0;
        self.sim_time = 0.0;

        let geometry = build_geometry(&mut self.registry, &self.config.level);
        self.surfaces = geometry.surfaces;

        let spawn = self.config.player.spawn_point;
        let handle = self.registry.spawn(
            EntityDesc::new(EntityKind::Player, "Player")
                .at(spawn)
                .with_collider(Collider::sphere(self.config.player.radius)),
        );
        self.player = Some(Player::new(handle, spawn));

        for spec in self.config.level.hazards.clone() {
            self.register_hazard(spec);
        }

        if self.config.boss.enabled {
            self.boss = Some(Boss::spawn(&mut self.registry, &self.config.boss));
        } else if let Some(at) = self.config.level.star {
            self.spawn_star(at);
        }

        self.hud.set_health_text(&HudText::health(self.health.current()));
        self.hud.set_score_text(&HudText::score(self.score));
        self.registry.host_mut().set_cursor_locked(true);
        log::info!(
            "Game started ({}): {} hazards, {} entities",
            generation,
            self.hazards.len(),
            self.registry.len()
        );
    }

    /// Destroy everything from the run. Runs once per return to the menu.
    fn cleanup(&mut self) {
        let destroyed = self.registry.clear();
        self.hazards.clear();
        self.surfaces.clear();
        self.player = None;
        self.boss = None;
        self.star = None;

        let generation = self.generations.bump();
        self.hud.clear_banner();
        self.registry.host_mut().set_cursor_locked(false);
        log::info!("Back at menu: {} entities destroyed, now {}", destroyed, generation);
    }

    fn register_hazard(&mut self, spec: HazardSpec) -> EntityHandle {
        let position = spec.behavior.spawn_position(&mut self.rng).unwrap_or_default();
        let handle = self.registry.spawn(
            EntityDesc::new(EntityKind::Hazard, spec.name.clone())
                .at(position)
                .with_collider(Collider::sphere(spec.radius)),
        );
        let links = spec
            .behavior
            .chain_links(position)
            .into_iter()
            .map(|at| {
                self.registry.spawn(
                    EntityDesc::new(EntityKind::ChainLink, format!("{} link", spec.name))
                        .at(at)
                        .with_color(LINK_COLOR),
                )
            })
            .collect();

        log::debug!("Registered hazard #{} '{}'", self.hazards.len(), spec.name);
        self.hazards.push(ActiveHazard {
            handle,
            spec,
            links,
        });
        handle
    }

    fn spawn_star(&mut self, at: Vec3) {
        if let Some(old) = self.star.take() {
            self.registry.destroy(old.handle);
        }
        self.star = Some(Star::spawn(&mut self.registry, at, &self.config.star));
    }

    /// Route damage through the health controller. Only lands while Playing.
    fn damage_player(&mut self, damage: DamageInfo, now: f64) -> DamageOutcome {
        if !self.state.current().is_simulating() {
            return DamageOutcome::Blocked;
        }

        let outcome = self.health.apply_damage(&damage, now);
        if outcome.was_applied() {
            if let Some(player) = self.player.as_ref() {
                self.registry.blink(player.handle, DAMAGE_FLASH);
            }
            self.hud.set_health_text(&HudText::health(self.health.current()));
        }
        if outcome.is_fatal() {
            if let Some(player) = self.player.as_mut() {
                player.alive = false;
            }
            self.end_run(Outcome::Lose, now);
        }
        self.sync_invulnerability(now);
        outcome
    }

    fn sync_invulnerability(&mut self, now: f64) {
        if let Some(player) = self.player.as_mut() {
            player.invulnerable = self.health.is_invulnerable(now);
            player.invulnerable_timer = self.health.invulnerability_remaining(now);
        }
    }

    /// Playing -> GameOver: banner up, then back to the menu on a timer
    fn end_run(&mut self, outcome: Outcome, now: f64) {
        if !self.state.game_over(outcome) {
            return;
        }
        self.registry.host_mut().set_cursor_locked(false);

        let session = &self.config.session;
        let banner = match outcome {
            Outcome::Win => Notification::victory(),
            Outcome::Lose => Notification::defeat(),
        }
        .with_duration(session.banner_duration as f32);
        self.hud.show_banner(&banner);

        let generation = self.generations.current();
        self.scheduler
            .schedule(SessionTask::ClearBanner, now + session.banner_duration, generation);
        self.scheduler
            .schedule(SessionTask::ReturnToMenu, now + session.game_over_delay, generation);
        log::info!("{}: score {}, health {}", banner.title, self.score, self.health.current());
    }

    fn simulate(&mut self, input: &InputState, now: f64, delta: f32) {
        self.sim_time += delta;

        // Player movement
        let Some(player) = self.player.as_mut() else {
            return;
        };
        player.step(input, &self.surfaces, &self.config.player, delta);
        self.registry.set_transform(player.handle, player.transform());

        // Fall-out: one hit, then respawn unless it was fatal
        if player.is_below(self.config.player.fall_threshold) {
            log::info!("Player fell out of the level");
            if self.damage_player(DamageInfo::fall(), now).is_fatal() {
                return;
            }
            let spawn = self.config.player.spawn_point;
            if let Some(player) = self.player.as_mut() {
                player.respawn(spawn);
                self.registry.set_transform(player.handle, player.transform());
            }
        }
        self.sync_invulnerability(now);

        let Some(player) = self.player.as_ref() else {
            return;
        };
        let ctx = MotionContext::new(delta, self.sim_time)
            .with_target(player.position, player.invulnerable);

        // Hazard motion, in registration order
        for hazard in &self.hazards {
            if !self.registry.is_enabled(hazard.handle) {
                continue;
            }
            let Some(mut transform) = self.registry.transform(hazard.handle) else {
                continue;
            };
            let phase = hazard.spec.behavior.advance(&mut transform, &ctx, &mut self.rng);
            if phase == MotionPhase::Looped {
                log::debug!("'{}' looped back to its start", hazard.spec.name);
            }
            self.registry.set_transform(hazard.handle, transform);

            let links = hazard.spec.behavior.chain_links(transform.position);
            for (link, at) in hazard.links.iter().zip(links) {
                self.registry.set_position(*link, at);
            }
        }

        // Boss
        let event = match (self.boss.as_mut(), self.player.as_mut()) {
            (Some(boss), Some(player)) => {
                boss.update(&mut self.registry, player, &self.config.boss, &ctx, &mut self.rng)
            }
            _ => None,
        };
        if let Some(BossEvent::Defeated { position }) = event {
            self.on_boss_defeated(position, now);
        }

        // Hazard contact: the scan stops at the first touching hazard
        if let Some(index) = self.first_contact() {
            if self.damage_player(DamageInfo::hazard(index), now).is_fatal() {
                return;
            }
        }

        // Star
        let Some(player_position) = self.player.as_ref().map(|p| p.position) else {
            return;
        };
        let collected = match self.star.as_mut() {
            Some(star) => {
                star.animate(&mut self.registry, &ctx, &mut self.rng);
                star.try_collect(&mut self.registry, player_position, self.config.star.pickup_radius)
            }
            None => false,
        };
        if collected {
            self.score += 1;
            self.hud.set_score_text(&HudText::score(self.score));
            self.end_run(Outcome::Win, now);
        }
    }

    /// Index of the first enabled hazard touching the player
    fn first_contact(&self) -> Option<usize> {
        let player = self.player.as_ref()?;
        let margin = self.config.combat.contact_margin;

        self.hazards.iter().position(|hazard| {
            if !self.registry.is_enabled(hazard.handle) {
                return false;
            }
            let near = self
                .registry
                .distance(player.handle, hazard.handle)
                .map_or(false, |d| d < hazard.spec.radius + margin);
            near || self.registry.intersects(player.handle, hazard.handle)
        })
    }

    fn on_boss_defeated(&mut self, position: Vec3, now: f64) {
        self.spawn_star(position + self.config.boss.star_offset);

        let color = [self.rng.gen(), self.rng.gen(), self.rng.gen(), 1.0];
        let confetti = self.registry.spawn(
            EntityDesc::new(EntityKind::Effect, "Confetti")
                .at(position)
                .with_color(color),
        );
        self.scheduler.schedule(
            SessionTask::DespawnEffect(confetti),
            now + self.config.star.confetti_lifetime,
            self.generations.current(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessScene;
    use hilltop_core::ManualClock;

    fn quiet_config() -> GameConfig {
        GameConfig::default().with_seed(7).with_hazards(Vec::new())
    }

    fn session(config: GameConfig) -> Session<HeadlessScene, RecordingHud> {
        Session::new(config, HeadlessScene::new(), RecordingHud::new())
    }

    #[test]
    fn test_start_spawns_and_resets() {
        let mut s = session(GameConfig::default().with_seed(1));
        let mut clock = ManualClock::new();
        clock.advance(1.0 / 60.0);

        let t = s.update(&clock, &InputState::command(Command::Start));
        assert_eq!(t.map(|t| t.to), Some(GameState::Playing));
        assert_eq!(s.health(), 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.hazards().len(), 7);
        assert!(s.boss().is_some());
        assert!(s.star().is_none());
        assert!(s.registry().host().cursor_locked());
        assert_eq!(s.hud().health_text(), "Health: 3");
        assert_eq!(s.hud().score_text(), "Stars: 0");
        // Start frame does not simulate
        assert_eq!(s.sim_time(), 0.0);
    }

    #[test]
    fn test_commands_ignored_when_invalid() {
        let mut s = session(quiet_config());
        let clock = ManualClock::new();

        assert!(s.update(&clock, &InputState::command(Command::Pause)).is_none());
        assert!(s.update(&clock, &InputState::command(Command::Resume)).is_none());
        assert!(s.update(&clock, &InputState::command(Command::ReturnToMenu)).is_none());
        assert_eq!(s.state(), GameState::Menu);

        s.update(&clock, &InputState::command(Command::Start));
        assert!(s.update(&clock, &InputState::command(Command::Start)).is_none());
        assert!(s.update(&clock, &InputState::command(Command::Quit)).is_none());
        assert!(!s.quit_requested());
    }

    #[test]
    fn test_toggle_pause_and_quit() {
        let mut s = session(quiet_config());
        let clock = ManualClock::new();

        s.update(&clock, &InputState::command(Command::Start));
        s.update(&clock, &InputState::command(Command::TogglePause));
        assert_eq!(s.state(), GameState::Paused);
        assert!(!s.registry().host().cursor_locked());

        s.update(&clock, &InputState::command(Command::TogglePause));
        assert_eq!(s.state(), GameState::Playing);
        assert!(s.registry().host().cursor_locked());

        s.update(&clock, &InputState::command(Command::Pause));
        s.update(&clock, &InputState::command(Command::ReturnToMenu));
        assert_eq!(s.state(), GameState::Menu);
        assert!(s.registry().is_empty());

        s.update(&clock, &InputState::command(Command::TogglePause));
        assert!(s.quit_requested());
    }

    #[test]
    fn test_external_damage_blocked_while_paused() {
        let mut s = session(quiet_config());
        let clock = ManualClock::new();
        s.update(&clock, &InputState::command(Command::Start));
        s.update(&clock, &InputState::command(Command::Pause));

        assert_eq!(s.apply_damage(1, 5.0), DamageOutcome::Blocked);
        assert_eq!(s.health(), 3);
    }

    #[test]
    fn test_runtime_hazard_management() {
        let mut s = session(quiet_config());
        let mut clock = ManualClock::new();
        let spec = HazardSpec::new(
            "Sentry",
            0.4,
            Behavior::Homing(HomingParams::new(Vec3::new(10.0, 0.4, 10.0))),
        );

        assert!(s.spawn_hazard(spec.clone()).is_none());

        s.update(&clock, &InputState::command(Command::Start));
        let handle = s.spawn_hazard(spec).expect("run is active");
        assert_eq!(s.hazards().len(), 1);

        assert!(s.set_hazard_enabled(handle, false));
        clock.advance(0.1);
        s.update(&clock, &InputState::idle());
        assert_eq!(
            s.registry().position(handle),
            Some(Vec3::new(10.0, 0.4, 10.0))
        );

        assert!(s.destroy_hazard(handle));
        assert!(!s.destroy_hazard(handle));
        assert!(s.registry().get(handle).is_none());
        assert!(s.hazards().is_empty());
    }

    #[test]
    fn test_tethered_links_follow_body() {
        let config = GameConfig::default().with_seed(3).with_hazards(vec![HazardSpec::new(
            "Chain Chomp",
            1.0,
            Behavior::Tethered(TetherParams::default()),
        )]);
        let mut s = session(config);
        let mut clock = ManualClock::new();
        s.update(&clock, &InputState::command(Command::Start));
        clock.advance(0.25);
        s.update(&clock, &InputState::idle());

        let hazard = &s.hazards()[0];
        assert_eq!(hazard.links.len(), 8);
        let body = s.registry().position(hazard.handle).unwrap();
        let last_link = s.registry().position(hazard.links[7]).unwrap();
        let anchor = Vec3::new(-10.0, 1.0, 5.0);
        assert!((body.distance(anchor) - 4.0).abs() < 1e-3);
        assert!((last_link.distance(anchor) - 3.5).abs() < 1e-3);
    }
}
