use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Whether a body participates in dynamics or only blocks others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Integrated by the physics engine: gravity, impulses, collisions.
    Dynamic,
    /// Immovable collision body (infinite-mass semantics).
    Boundary,
}

/// Position and orientation of a body in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Pose at the given position with identity rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Box dimensions stored as half extents, matching collider conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDims {
    pub half_extents: Vec3,
}

impl BoxDims {
    pub fn new(hx: f32, hy: f32, hz: f32) -> Self {
        Self {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    /// A cube with the given full edge length.
    pub fn cube(size: f32) -> Self {
        Self {
            half_extents: Vec3::splat(size * 0.5),
        }
    }

    /// Full size along each axis.
    pub fn full_size(&self) -> Vec3 {
        self.half_extents * 2.0
    }
}

/// Mass and bounciness handed to the physics engine at spawn time.
///
/// Boundaries ignore `mass` (they are fixed), but carry restitution so
/// collisions against them bounce the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    pub mass: f32,
    pub restitution: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            restitution: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_default_is_identity() {
        let p = Pose::default();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.rotation, Quat::IDENTITY);
    }

    #[test]
    fn pose_at_keeps_identity_rotation() {
        let p = Pose::at(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(p.position.y, 1.0);
        assert_eq!(p.rotation, Quat::IDENTITY);
    }

    #[test]
    fn cube_half_extents() {
        let d = BoxDims::cube(2.0);
        assert_eq!(d.half_extents, Vec3::splat(1.0));
        assert_eq!(d.full_size(), Vec3::splat(2.0));
    }

    #[test]
    fn body_params_default_mass() {
        let p = BodyParams::default();
        assert_eq!(p.mass, 1.0);
    }
}
