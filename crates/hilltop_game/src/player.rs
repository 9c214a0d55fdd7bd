//! First-person player controller

use hilltop_math::{radians, wrap_degrees, Aabb, Transform, Vec3};

use crate::config::PlayerConfig;
use crate::input::InputState;
use crate::registry::EntityHandle;

/// How far below a surface top the feet may start a step and still land on it
const LANDING_TOLERANCE: f32 = 0.05;

/// Player state. Position is at the feet.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Degrees, wrapped to [0, 360)
    pub yaw: f32,
    /// Degrees, clamped to the configured limit
    pub pitch: f32,
    pub grounded: bool,
    /// Mirrors the damage controller's window
    pub invulnerable: bool,
    /// Seconds left in the window
    pub invulnerable_timer: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(handle: EntityHandle, spawn_point: Vec3) -> Self {
        Self {
            handle,
            position: spawn_point,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            grounded: false,
            invulnerable: false,
            invulnerable_timer: 0.0,
            alive: true,
        }
    }

    /// Yaw-only transform for the player body
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position).with_rotation(Vec3::new(0.0, self.yaw, 0.0))
    }

    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32, max_pitch: f32) {
        self.yaw = wrap_degrees(self.yaw + yaw_delta);
        self.pitch = (self.pitch + pitch_delta).clamp(-max_pitch, max_pitch);
    }

    /// World-space horizontal direction for the move axes
    pub fn move_direction(&self, move_axis: [f32; 2]) -> Vec3 {
        let yaw = radians(self.yaw);
        let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        let wish = right * move_axis[0] + forward * move_axis[1];
        // Diagonals are no faster than straight lines
        if wish.length_squared() > 1.0 {
            wish.normalize_or_zero()
        } else {
            wish
        }
    }

    /// Integrate one step of movement against the walkable surfaces
    pub fn step(&mut self, input: &InputState, surfaces: &[Aabb], config: &PlayerConfig, delta: f32) {
        self.look(input.look_axis[0], input.look_axis[1], config.max_pitch);

        let horizontal = self.move_direction(input.move_axis) * config.speed;
        self.velocity.x = horizontal.x;
        self.velocity.z = horizontal.z;

        if input.jump && self.grounded {
            self.velocity.y = config.jump_speed;
            self.grounded = false;
        }
        self.velocity.y -= config.gravity * delta;

        let previous = self.position;
        let mut next = previous + self.velocity * delta;

        self.grounded = false;
        if self.velocity.y <= 0.0 {
            let landing = surfaces
                .iter()
                .filter(|s| s.contains_xz(next))
                .map(|s| s.max.y)
                .filter(|top| previous.y >= top - LANDING_TOLERANCE && next.y <= *top)
                .reduce(f32::max);

            if let Some(top) = landing {
                next.y = top;
                self.velocity.y = 0.0;
                self.grounded = true;
            }
        }

        self.position = next;
    }

    pub fn is_below(&self, threshold: f32) -> bool {
        self.position.y < threshold
    }

    /// Back to the spawn point with rotation and velocity zeroed
    pub fn respawn(&mut self, spawn_point: Vec3) {
        self.position = spawn_point;
        self.velocity = Vec3::ZERO;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.grounded = false;
    }

    /// Push the player by `offset` (boss knockback)
    pub fn displace(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ground() -> Vec<Aabb> {
        vec![Aabb::new(Vec3::new(-25.0, -0.2, -25.0), Vec3::new(25.0, 0.0, 25.0))]
    }

    fn player_at(position: Vec3) -> Player {
        Player::new(EntityHandle::null(), position)
    }

    #[test]
    fn test_falls_and_lands() {
        let config = PlayerConfig::default();
        let mut player = player_at(Vec3::new(0.0, 5.0, 0.0));

        for _ in 0..120 {
            player.step(&InputState::idle(), &ground(), &config, 1.0 / 60.0);
        }
        assert!(player.grounded);
        assert_relative_eq!(player.position.y, 0.0);
        assert_relative_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_walks_forward_at_speed() {
        let config = PlayerConfig::default();
        let mut player = player_at(Vec3::ZERO);
        player.grounded = true;

        let input = InputState::idle().with_move(0.0, 1.0);
        player.step(&input, &ground(), &config, 0.5);
        assert_relative_eq!(player.position.z, 3.0, epsilon = 1e-4);
        assert!(player.grounded);
    }

    #[test]
    fn test_diagonal_normalized() {
        let player = player_at(Vec3::ZERO);
        let dir = player.move_direction([1.0, 1.0]);
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let config = PlayerConfig::default();
        let mut player = player_at(Vec3::new(0.0, 3.0, 0.0));
        let jump = InputState::idle().with_jump();

        player.step(&jump, &ground(), &config, 0.01);
        assert!(player.velocity.y < 0.0);

        let mut player = player_at(Vec3::ZERO);
        player.grounded = true;
        player.step(&jump, &ground(), &config, 0.01);
        assert!(player.velocity.y > 7.0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut player = player_at(Vec3::ZERO);
        player.look(400.0, 100.0, 60.0);
        assert_relative_eq!(player.pitch, 60.0);
        assert_relative_eq!(player.yaw, 40.0, epsilon = 1e-4);
        player.look(0.0, -500.0, 60.0);
        assert_relative_eq!(player.pitch, -60.0);
    }

    #[test]
    fn test_walks_off_edge() {
        let config = PlayerConfig::default();
        let mut player = player_at(Vec3::new(0.0, 0.0, 24.9));
        player.grounded = true;

        let input = InputState::idle().with_move(0.0, 1.0);
        for _ in 0..180 {
            player.step(&input, &ground(), &config, 1.0 / 60.0);
        }
        assert!(player.is_below(config.fall_threshold));
    }

    #[test]
    fn test_respawn_resets_motion() {
        let mut player = player_at(Vec3::new(3.0, -12.0, 1.0));
        player.velocity = Vec3::new(1.0, -30.0, 0.0);
        player.yaw = 90.0;

        player.respawn(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(player.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(player.velocity, Vec3::ZERO);
        assert_eq!(player.yaw, 0.0);
    }
}
