//! Position + euler rotation

use crate::vector::Vec3;
use crate::wrap_degrees;

/// Entity placement. Rotation is euler angles in degrees (pitch, yaw, roll).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Add to the euler angles, keeping each in [0, 360)
    pub fn rotate_by(&mut self, delta_degrees: Vec3) {
        self.rotation = Vec3::new(
            wrap_degrees(self.rotation.x + delta_degrees.x),
            wrap_degrees(self.rotation.y + delta_degrees.y),
            wrap_degrees(self.rotation.z + delta_degrees.z),
        );
    }
}
