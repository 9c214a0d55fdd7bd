//! Whole-session scenarios driven frame by frame

use approx::assert_relative_eq;
use hilltop_combat::DamageOutcome;
use hilltop_core::{Clock, ManualClock};
use hilltop_game::prelude::*;
use hilltop_hazards::prelude::*;
use hilltop_hud::RecordingHud;
use hilltop_math::Vec3;

const FRAME: f32 = 1.0 / 60.0;

type TestSession = Session<HeadlessScene, RecordingHud>;

fn new_session(config: GameConfig) -> TestSession {
    Session::new(config, HeadlessScene::new(), RecordingHud::new())
}

/// Start a run and let the player land on the ground
fn started(config: GameConfig) -> (TestSession, ManualClock) {
    let mut session = new_session(config);
    let mut clock = ManualClock::new();
    clock.advance(FRAME);
    session.update(&clock, &InputState::command(Command::Start));
    run(&mut session, &mut clock, 60, &InputState::idle());
    (session, clock)
}

fn run(session: &mut TestSession, clock: &mut ManualClock, frames: usize, input: &InputState) -> Vec<GameState> {
    let mut entered = Vec::new();
    for _ in 0..frames {
        clock.advance(FRAME);
        if let Some(t) = session.update(clock, input) {
            entered.push(t.to);
        }
    }
    entered
}

fn empty_level() -> GameConfig {
    GameConfig::default().with_seed(42).with_hazards(Vec::new())
}

fn game_overs(session: &TestSession, outcome: Outcome) -> usize {
    session
        .history()
        .iter()
        .filter(|t| t.to == GameState::GameOver(outcome))
        .count()
}

#[test]
fn test_damage_inside_window_is_dropped() {
    let (mut session, _) = started(empty_level());

    assert!(session.apply_damage(1, 100.0).was_applied());
    assert_eq!(session.apply_damage(1, 100.4), DamageOutcome::Blocked);
    assert_eq!(session.apply_damage(1, 100.99), DamageOutcome::Blocked);
    assert_eq!(session.health(), 2);

    // Elapsed equal to the window is no longer protected
    assert!(session.apply_damage(1, 101.0).was_applied());
    assert_eq!(session.health(), 1);
    assert_eq!(session.hud().health_text(), "Health: 1");
}

#[test]
fn test_three_hits_one_game_over() {
    let (mut session, mut clock) = started(empty_level());

    let t0 = clock.now();
    session.apply_damage(1, t0);
    session.apply_damage(1, t0 + 1.5);
    assert_eq!(session.apply_damage(1, t0 + 3.0), DamageOutcome::Killed { amount: 1 });

    assert_eq!(session.health(), 0);
    assert_eq!(session.state(), GameState::GameOver(Outcome::Lose));
    assert_eq!(session.apply_damage(1, t0 + 10.0), DamageOutcome::Blocked);
    assert_eq!(game_overs(&session, Outcome::Lose), 1);
    assert_eq!(session.hud().banner().map(|b| b.title.as_str()), Some("Game Over"));
    assert!(!session.registry().host().cursor_locked());

    // Auto-return fires on the clock, not on frames
    run(&mut session, &mut clock, 30, &InputState::idle());
    assert!(session.state().is_game_over());
    clock.skip(5.0);
    run(&mut session, &mut clock, 1, &InputState::idle());
    assert_eq!(session.state(), GameState::Menu);
    assert_eq!(game_overs(&session, Outcome::Lose), 1);
}

#[test]
fn test_contact_damage_until_lose() {
    // A hazard parked on the landing spot. Sentries ignore protection here so
    // contact is continuous.
    let sentry = HazardSpec::new(
        "Sentry",
        0.4,
        Behavior::Homing(HomingParams::new(Vec3::new(0.0, 0.4, 0.0)).ignoring_protection()),
    );
    let config = GameConfig::default()
        .with_seed(5)
        .without_boss()
        .with_hazards(vec![sentry]);
    let mut session = new_session(config);
    let mut clock = ManualClock::new();
    session.update(&clock, &InputState::command(Command::Start));

    let mut health_seen = vec![session.health()];
    for _ in 0..(60 * 5) {
        clock.advance(FRAME);
        session.update(&clock, &InputState::idle());
        if health_seen.last() != Some(&session.health()) {
            health_seen.push(session.health());
        }
        if session.state().is_game_over() {
            break;
        }
    }

    // Health only ever goes down one step at a time
    assert_eq!(health_seen, vec![3, 2, 1, 0]);
    assert_eq!(session.state(), GameState::GameOver(Outcome::Lose));
    assert_eq!(game_overs(&session, Outcome::Lose), 1);
}

#[test]
fn test_overlapping_hazards_hit_once() {
    let at = Vec3::new(0.0, 0.4, 0.0);
    let hazards = (0..3)
        .map(|i| {
            HazardSpec::new(
                format!("Sentry{}", i),
                0.4,
                Behavior::Homing(HomingParams::new(at)),
            )
        })
        .collect();
    let config = GameConfig::default().with_seed(5).with_hazards(hazards);
    let (session, _) = started(config);

    assert_eq!(session.health(), 2);
    assert!(session.player().map_or(false, |p| p.invulnerable));
}

#[test]
fn test_fall_respawns_with_one_hit() {
    let config = empty_level().without_boss();
    let (mut session, mut clock) = started(config);
    let spawn = session.config().player.spawn_point;

    session.place_player(Vec3::new(40.0, 0.0, 0.0));
    let mut respawned = false;
    for _ in 0..(60 * 3) {
        clock.advance(FRAME);
        session.update(&clock, &InputState::idle());
        if session.health() < 3 {
            let player = session.player().expect("player exists while playing");
            assert_eq!(player.position, spawn);
            assert_eq!(player.velocity, Vec3::ZERO);
            respawned = true;
            break;
        }
    }

    assert!(respawned);
    assert_eq!(session.health(), 2);
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn test_fall_respawns_even_when_protected() {
    let config = empty_level().without_boss();
    let (mut session, mut clock) = started(config);
    let spawn = session.config().player.spawn_point;

    // Window opened just now; the fall lands inside it
    session.apply_damage(1, clock.now());
    session.place_player(Vec3::new(0.0, -10.5, 0.0));
    clock.advance(FRAME);
    session.update(&clock, &InputState::idle());

    assert_eq!(session.health(), 2);
    assert_eq!(session.player().map(|p| p.position), Some(spawn));
}

#[test]
fn test_pause_freezes_simulation() {
    let (mut session, mut clock) = started(GameConfig::default().with_seed(11));
    let handles: Vec<_> = session.hazards().iter().map(|h| h.handle).collect();
    let positions = |s: &TestSession| -> Vec<Option<Vec3>> {
        handles.iter().map(|h| s.registry().position(*h)).collect()
    };

    run(&mut session, &mut clock, 1, &InputState::command(Command::Pause));
    assert_eq!(session.state(), GameState::Paused);

    let frozen = positions(&session);
    let sim_time = session.sim_time();
    let health = session.health();

    let walking = InputState::idle().with_move(0.0, 1.0);
    run(&mut session, &mut clock, 120, &walking);
    assert_eq!(positions(&session), frozen);
    assert_eq!(session.sim_time(), sim_time);
    assert_eq!(session.apply_damage(1, clock.now()), DamageOutcome::Blocked);
    assert_eq!(session.health(), health);

    run(&mut session, &mut clock, 1, &InputState::command(Command::Resume));
    run(&mut session, &mut clock, 10, &InputState::idle());
    assert_ne!(positions(&session), frozen);
    assert!(session.sim_time() > sim_time);
}

#[test]
fn test_boss_to_star_to_win() {
    let (mut session, mut clock) = started(empty_level());
    let boss_config = session.config().boss.clone();
    let boss_handle = session.boss().map(|b| b.handle).expect("boss spawned");
    let near = boss_config.position + Vec3::new(0.0, -0.5, -1.0);

    for expected in [2, 1] {
        session.place_player(near);
        run(&mut session, &mut clock, 1, &InputState::idle());
        assert_eq!(session.boss().map(|b| b.hp), Some(expected));
        assert!(session.registry().contains(boss_handle));
        // Knocked back out of range
        let distance = session
            .player()
            .map(|p| p.position.distance(boss_config.position))
            .unwrap_or_default();
        assert!(distance >= boss_config.proximity_radius);
    }

    session.place_player(near);
    run(&mut session, &mut clock, 1, &InputState::idle());
    let boss = session.boss().expect("defeated boss stays recorded");
    assert_eq!(boss.hp, 0);
    assert!(boss.defeated);
    assert!(session.registry().get(boss_handle).is_none());

    let host = session.registry().host();
    assert_eq!(host.count_kind(EntityKind::Star), 1);
    assert_eq!(host.count_kind(EntityKind::Effect), 1);
    let star_at = session
        .star()
        .and_then(|s| session.registry().position(s.handle))
        .expect("star spawned");
    assert_relative_eq!(star_at.x, boss_config.position.x);
    assert_relative_eq!(star_at.z, boss_config.position.z);
    assert!((star_at.y - (boss_config.position.y + 3.0)).abs() <= 0.5 + 1e-3);

    // Confetti goes away on its own
    run(&mut session, &mut clock, 70, &InputState::idle());
    assert_eq!(session.registry().host().count_kind(EntityKind::Effect), 0);

    // Pick up the star
    session.place_player(boss_config.position + boss_config.star_offset);
    let entered = run(&mut session, &mut clock, 1, &InputState::idle());
    assert_eq!(entered, vec![GameState::GameOver(Outcome::Win)]);
    assert_eq!(session.score(), 1);
    assert_eq!(session.hud().score_text(), "Stars: 1");
    assert_eq!(
        session.hud().banner().map(|b| b.title.as_str()),
        Some("You got the Star!")
    );
    assert_eq!(session.registry().host().count_kind(EntityKind::Star), 0);
}

#[test]
fn test_win_without_boss() {
    let config = empty_level().without_boss();
    let (mut session, mut clock) = started(config);
    let star_at = session.config().level.star.expect("reference star position");

    session.place_player(star_at);
    run(&mut session, &mut clock, 1, &InputState::idle());
    assert_eq!(session.state(), GameState::GameOver(Outcome::Win));
    assert_eq!(session.score(), 1);
}

#[test]
fn test_game_over_returns_to_menu_and_cleans_up() {
    let (mut session, mut clock) = started(GameConfig::default().with_seed(3));
    assert!(session.registry().len() > 20);

    session.apply_damage(3, clock.now());
    assert!(session.state().is_game_over());
    let frozen = session.registry().position(session.hazards()[0].handle);

    // GameOver skips simulation
    run(&mut session, &mut clock, 30, &InputState::idle().with_move(1.0, 0.0));
    assert_eq!(session.registry().position(session.hazards()[0].handle), frozen);

    let entered = run(&mut session, &mut clock, 120, &InputState::idle());
    assert_eq!(entered, vec![GameState::Menu]);
    assert!(session.registry().is_empty());
    assert!(session.player().is_none());
    assert!(session.hazards().is_empty());
    assert!(session.boss().is_none());
    assert!(session.hud().banner().is_none());

    let host = session.registry().host();
    assert_eq!(host.live_count(), 0);
    // Every entity was destroyed exactly once
    assert_eq!(host.max_destroy_calls(), 1);

    // A second run starts from scratch
    run(&mut session, &mut clock, 1, &InputState::command(Command::Start));
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.health(), 3);
    assert_eq!(session.score(), 0);
    assert_eq!(session.hazards().len(), 7);
}

#[test]
fn test_stale_tasks_do_not_reach_next_run() {
    let (mut session, mut clock) = started(empty_level());
    let boss = session.config().boss.clone();
    let near = boss.position + Vec3::new(0.0, -0.5, -1.0);
    for _ in 0..3 {
        session.place_player(near);
        run(&mut session, &mut clock, 1, &InputState::idle());
    }
    assert!(session.boss().map_or(false, |b| b.defeated));
    assert_eq!(session.pending_tasks(), 1);
    let first_generation = session.generation();

    run(&mut session, &mut clock, 1, &InputState::command(Command::Pause));
    run(&mut session, &mut clock, 1, &InputState::command(Command::ReturnToMenu));
    assert_eq!(session.state(), GameState::Menu);
    run(&mut session, &mut clock, 1, &InputState::command(Command::Start));
    assert!(session.generation() > first_generation);

    let live = session.registry().len();
    run(&mut session, &mut clock, 90, &InputState::idle());
    assert_eq!(session.pending_tasks(), 0);
    assert_eq!(session.registry().len(), live);
    assert!(session.boss().map_or(false, |b| b.is_alive()));
}

#[test]
fn test_one_transition_per_frame() {
    let (mut session, mut clock) = started(empty_level());
    session.apply_damage(3, clock.now());
    clock.skip(10.0);

    // The kill, the overdue return to menu and a Start all compete
    let start = InputState::command(Command::Start);
    let entered = run(&mut session, &mut clock, 1, &start);
    assert_eq!(entered, vec![GameState::GameOver(Outcome::Lose)]);
    assert!(session.state().is_game_over());

    let entered = run(&mut session, &mut clock, 1, &start);
    assert_eq!(entered, vec![GameState::Menu]);
    assert!(session.registry().is_empty());

    let entered = run(&mut session, &mut clock, 1, &start);
    assert_eq!(entered, vec![GameState::Playing]);
}

#[test]
fn test_zero_delay_return_still_one_step_each() {
    let mut config = empty_level();
    config.session.game_over_delay = 0.0;
    let (mut session, mut clock) = started(config);
    assert!(session.config().validate().is_ok());

    session.apply_damage(3, clock.now());
    let entered = run(&mut session, &mut clock, 2, &InputState::idle());
    assert_eq!(
        entered,
        vec![GameState::GameOver(Outcome::Lose), GameState::Menu]
    );
    assert_eq!(game_overs(&session, Outcome::Lose), 1);
}

#[test]
fn test_disabled_hazard_neither_moves_nor_hurts() {
    let sentry = HazardSpec::new(
        "Sentry",
        0.4,
        Behavior::Homing(HomingParams::new(Vec3::new(0.0, 0.4, 0.0)).ignoring_protection()),
    );
    let config = empty_level().without_boss().with_hazards(vec![sentry]);
    let mut session = new_session(config);
    let mut clock = ManualClock::new();
    session.update(&clock, &InputState::command(Command::Start));

    let handle = session.hazards()[0].handle;
    assert!(session.set_hazard_enabled(handle, false));
    session.place_player(Vec3::new(0.0, 0.5, 0.0));
    let parked = session.registry().position(handle);

    run(&mut session, &mut clock, 120, &InputState::idle());
    assert_eq!(session.health(), 3);
    assert_eq!(session.registry().position(handle), parked);

    assert!(session.set_hazard_enabled(handle, true));
    run(&mut session, &mut clock, 1, &InputState::idle());
    assert_eq!(session.health(), 2);
}
