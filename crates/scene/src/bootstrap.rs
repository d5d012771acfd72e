use glam::Vec3;
use serde::{Deserialize, Serialize};

use boxroom_common::{BodyKind, BodyParams, BoxDims, Pose};
use boxroom_physics::{BodyHandle, PhysicsWorld};

use crate::enclosure::EnclosureSpec;

/// The one controllable cube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeSpec {
    /// Full edge length.
    pub size: f32,
    /// Spawn position; default puts the base on the floor plane.
    pub spawn: Vec3,
    pub mass: f32,
    pub restitution: f32,
    /// Render tint, linear RGB.
    pub color: [f32; 3],
}

impl Default for CubeSpec {
    fn default() -> Self {
        Self {
            size: 2.0,
            spawn: Vec3::new(0.0, 1.0, 0.0),
            mass: 1.0,
            restitution: 0.9,
            color: [0.345, 0.396, 0.949],
        }
    }
}

/// Fixed look-at camera configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 12.0, 18.0),
            target: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 60.0,
        }
    }
}

/// One directional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub direction: Vec3,
}

impl Default for LightSpec {
    fn default() -> Self {
        Self {
            direction: Vec3::new(1.0, 1.0, 0.0),
        }
    }
}

/// Everything the bootstrapper builds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSpec {
    pub enclosure: EnclosureSpec,
    pub cube: CubeSpec,
    pub camera: CameraSpec,
    pub light: LightSpec,
}

/// Handles to the spawned bodies, in spawn order.
#[derive(Debug, Clone, Copy)]
pub struct SceneHandles {
    pub cube: BodyHandle,
    pub boundaries: [BodyHandle; 5],
}

/// Errors from scene construction.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("cube spawn {0:?} lies outside the enclosure")]
    SpawnOutsideEnclosure(Vec3),
    #[error("bootstrap requires an empty world, found {0} bodies")]
    WorldNotEmpty(usize),
}

/// Build the scene exactly once: the cube and the five boundaries.
///
/// The camera and light in the spec are configuration for the renderer;
/// only bodies touch the physics world here.
pub fn bootstrap(world: &mut PhysicsWorld, spec: &SceneSpec) -> Result<SceneHandles, SceneError> {
    if world.body_count() != 0 {
        return Err(SceneError::WorldNotEmpty(world.body_count()));
    }
    if !spec.enclosure.contains(spec.cube.spawn) {
        return Err(SceneError::SpawnOutsideEnclosure(spec.cube.spawn));
    }

    let cube = world.spawn_box(
        BodyKind::Dynamic,
        Pose::at(spec.cube.spawn),
        BoxDims::cube(spec.cube.size),
        BodyParams {
            mass: spec.cube.mass,
            restitution: spec.cube.restitution,
        },
    );

    let walls = spec.enclosure.walls();
    let boundary_params = BodyParams {
        mass: 0.0,
        restitution: spec.enclosure.restitution,
    };
    let boundaries = walls.map(|wall| {
        world.spawn_box(
            BodyKind::Boundary,
            Pose::at(wall.center),
            wall.dims,
            boundary_params,
        )
    });

    tracing::info!(bodies = world.body_count(), "scene ready");
    Ok(SceneHandles { cube, boundaries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_builds_six_bodies() {
        let mut world = PhysicsWorld::new();
        let spec = SceneSpec::default();
        let handles = bootstrap(&mut world, &spec).unwrap();

        assert_eq!(world.body_count(), 6);
        let kinds: Vec<_> = world.bodies().map(|(_, r)| r.kind).collect();
        assert_eq!(kinds[0], BodyKind::Dynamic);
        assert!(kinds[1..].iter().all(|k| *k == BodyKind::Boundary));
        assert_eq!(world.pose(handles.cube).unwrap().position, spec.cube.spawn);
    }

    #[test]
    fn cube_carries_spec_params() {
        let mut world = PhysicsWorld::new();
        let handles = bootstrap(&mut world, &SceneSpec::default()).unwrap();

        let (_, record) = world
            .bodies()
            .find(|(h, _)| *h == handles.cube)
            .unwrap();
        assert_eq!(record.params.mass, 1.0);
        assert_eq!(record.params.restitution, 0.9);
        assert_eq!(record.dims, BoxDims::cube(2.0));
    }

    #[test]
    fn cube_stays_inside_after_settling() {
        let mut world = PhysicsWorld::new();
        let spec = SceneSpec::default();
        let handles = bootstrap(&mut world, &spec).unwrap();

        world.advance(2.0);

        let pos = world.pose(handles.cube).unwrap().position;
        let half = spec.enclosure.half_extent();
        assert!(pos.x > -half && pos.x < half);
        assert!(pos.z > -half && pos.z < half);
        assert!(pos.y > 0.0, "cube fell through the floor: {pos:?}");
    }

    #[test]
    fn spawn_outside_enclosure_is_rejected() {
        let mut world = PhysicsWorld::new();
        let spec = SceneSpec {
            cube: CubeSpec {
                spawn: Vec3::new(30.0, 1.0, 0.0),
                ..CubeSpec::default()
            },
            ..SceneSpec::default()
        };

        assert!(matches!(
            bootstrap(&mut world, &spec),
            Err(SceneError::SpawnOutsideEnclosure(_))
        ));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn bootstrap_twice_is_rejected() {
        let mut world = PhysicsWorld::new();
        let spec = SceneSpec::default();
        bootstrap(&mut world, &spec).unwrap();

        assert!(matches!(
            bootstrap(&mut world, &spec),
            Err(SceneError::WorldNotEmpty(6))
        ));
    }
}
