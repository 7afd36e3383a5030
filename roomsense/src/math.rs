//! Math types for RoomSense

pub use glam::{Quat, Vec3};

/// Position and orientation of an emitter in world space.
///
/// Sample directions are expressed in the emitter's local frame and rotated by
/// `rotation` before casting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * (-Vec3::Z)
    }

    /// Transforms a local-space offset into a world-space point.
    pub fn transform_offset(&self, offset: Vec3) -> Vec3 {
        self.position + self.rotation * offset
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_offset_identity() {
        let pose = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            pose.transform_offset(Vec3::new(0.0, -1.0, 0.0)),
            Vec3::new(1.0, 1.0, 3.0)
        );
    }

    #[test]
    fn test_transform_offset_rotated() {
        let pose = Pose::new(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let point = pose.transform_offset(-Vec3::Z);
        assert!((point - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
        assert!((pose.forward() - point).length() < 1e-5);
    }
}
