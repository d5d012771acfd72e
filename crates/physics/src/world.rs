use boxroom_common::{BodyKind, BodyParams, BoxDims, Pose};
use glam::{Quat, Vec3};
use rapier3d::prelude as rapier;
use rapier::nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::body::{BodyHandle, BodyRecord, PhysicsStats};

/// Errors from body lookups.
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("body {0:?} not found")]
    BodyNotFound(BodyHandle),
}

/// The rigid-body world: rapier state plus a body registry.
///
/// Integration runs on a fixed timestep. Wall-clock time handed to
/// [`PhysicsWorld::advance`] is accumulated and consumed in whole steps,
/// so simulation speed is independent of frame rate.
pub struct PhysicsWorld {
    gravity: Vector3<f32>,
    integration_parameters: rapier::IntegrationParameters,
    physics_pipeline: rapier::PhysicsPipeline,
    island_manager: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    rigid_body_set: rapier::RigidBodySet,
    collider_set: rapier::ColliderSet,
    impulse_joint_set: rapier::ImpulseJointSet,
    multibody_joint_set: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    /// Spawn-order registry; iteration order is stable.
    registry: Vec<(BodyHandle, BodyRecord)>,
    accumulator: f32,
    stats: PhysicsStats,
}

impl PhysicsWorld {
    /// World with standard downward gravity.
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -9.81, 0.0))
    }

    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity: Vector3::new(gravity.x, gravity.y, gravity.z),
            integration_parameters: rapier::IntegrationParameters::default(),
            physics_pipeline: rapier::PhysicsPipeline::new(),
            island_manager: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            rigid_body_set: rapier::RigidBodySet::new(),
            collider_set: rapier::ColliderSet::new(),
            impulse_joint_set: rapier::ImpulseJointSet::new(),
            multibody_joint_set: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            registry: Vec::new(),
            accumulator: 0.0,
            stats: PhysicsStats::default(),
        }
    }

    /// Fixed integration timestep in seconds.
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn body_count(&self) -> usize {
        self.registry.len()
    }

    pub fn stats(&self) -> PhysicsStats {
        self.stats
    }

    /// Bodies in spawn order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &BodyRecord)> {
        self.registry.iter().map(|(h, r)| (*h, r))
    }

    /// Spawn a box-shaped body. Dynamic bodies get the configured mass;
    /// boundaries are fixed and ignore it. Restitution applies to both.
    pub fn spawn_box(
        &mut self,
        kind: BodyKind,
        pose: Pose,
        dims: BoxDims,
        params: BodyParams,
    ) -> BodyHandle {
        let translation = Vector3::new(pose.position.x, pose.position.y, pose.position.z);
        let body = match kind {
            BodyKind::Dynamic => rapier::RigidBodyBuilder::dynamic().translation(translation),
            BodyKind::Boundary => rapier::RigidBodyBuilder::fixed().translation(translation),
        };
        let handle = self.rigid_body_set.insert(body);

        let he = dims.half_extents;
        let mut collider =
            rapier::ColliderBuilder::cuboid(he.x, he.y, he.z).restitution(params.restitution);
        if kind == BodyKind::Dynamic {
            collider = collider.mass(params.mass);
        }
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        let handle = BodyHandle(handle);
        self.registry.push((handle, BodyRecord { kind, dims, params }));
        tracing::debug!(?kind, position = ?pose.position, "spawned body");
        handle
    }

    /// Current pose of a body.
    pub fn pose(&self, handle: BodyHandle) -> Result<Pose, PhysicsError> {
        let body = self
            .rigid_body_set
            .get(handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        let t = body.translation();
        let r = body.rotation();
        Ok(Pose {
            position: Vec3::new(t.x, t.y, t.z),
            rotation: Quat::from_xyzw(r.i, r.j, r.k, r.w),
        })
    }

    /// Current linear velocity of a body.
    pub fn velocity(&self, handle: BodyHandle) -> Result<Vec3, PhysicsError> {
        let body = self
            .rigid_body_set
            .get(handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        let v = body.linvel();
        Ok(Vec3::new(v.x, v.y, v.z))
    }

    /// Direct position override: move the body by `delta`, bypassing
    /// velocity integration entirely.
    pub fn translate(&mut self, handle: BodyHandle, delta: Vec3) -> Result<(), PhysicsError> {
        let body = self
            .rigid_body_set
            .get_mut(handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        let next = body.translation() + Vector3::new(delta.x, delta.y, delta.z);
        body.set_translation(next, true);
        self.stats.teleports += 1;
        Ok(())
    }

    /// Apply an impulse at the body's current world position. The change in
    /// momentum is integrated into velocity on the next step.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> Result<(), PhysicsError> {
        let body = self
            .rigid_body_set
            .get_mut(handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        let at = Point3::from(*body.translation());
        body.apply_impulse_at_point(Vector3::new(impulse.x, impulse.y, impulse.z), at, true);
        self.stats.impulses_applied += 1;
        Ok(())
    }

    /// Rotate the body about the world Y axis by `angle` radians.
    pub fn spin_yaw(&mut self, handle: BodyHandle, angle: f32) -> Result<(), PhysicsError> {
        let body = self
            .rigid_body_set
            .get_mut(handle.0)
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        let spun = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle) * body.rotation();
        body.set_rotation(spun, true);
        self.stats.spins_applied += 1;
        Ok(())
    }

    /// Run exactly one fixed integration step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.stats.steps += 1;
    }

    /// Feed wall-clock time into the fixed-step accumulator. Returns the
    /// number of steps executed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut ran = 0;
        while self.accumulator >= self.timestep() {
            self.accumulator -= self.timestep();
            self.step();
            ran += 1;
        }
        ran
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> (Pose, BoxDims, BodyParams) {
        (
            Pose::at(Vec3::new(0.0, 5.0, 0.0)),
            BoxDims::cube(2.0),
            BodyParams {
                mass: 1.0,
                restitution: 0.9,
            },
        )
    }

    #[test]
    fn spawn_registers_in_order() {
        let mut world = PhysicsWorld::new();
        let (pose, dims, params) = unit_cube();
        let a = world.spawn_box(BodyKind::Dynamic, pose, dims, params);
        let b = world.spawn_box(BodyKind::Boundary, Pose::default(), dims, params);

        assert_eq!(world.body_count(), 2);
        let kinds: Vec<_> = world.bodies().map(|(h, r)| (h, r.kind)).collect();
        assert_eq!(kinds, vec![(a, BodyKind::Dynamic), (b, BodyKind::Boundary)]);
    }

    #[test]
    fn dynamic_body_falls_under_gravity() {
        let mut world = PhysicsWorld::new();
        let (pose, dims, params) = unit_cube();
        let cube = world.spawn_box(BodyKind::Dynamic, pose, dims, params);

        world.advance(1.0);
        let after = world.pose(cube).unwrap();
        assert!(after.position.y < 4.0, "cube did not fall: {after:?}");
    }

    #[test]
    fn boundary_body_never_moves() {
        let mut world = PhysicsWorld::new();
        let pose = Pose::at(Vec3::new(0.0, 2.0, -10.0));
        let wall = world.spawn_box(
            BodyKind::Boundary,
            pose,
            BoxDims::new(10.0, 2.0, 0.5),
            BodyParams {
                mass: 0.0,
                restitution: 0.9,
            },
        );

        world.advance(1.0);
        assert_eq!(world.pose(wall).unwrap().position, pose.position);
    }

    #[test]
    fn translate_is_exact_and_immediate() {
        let mut world = PhysicsWorld::new();
        let (pose, dims, params) = unit_cube();
        let cube = world.spawn_box(BodyKind::Dynamic, pose, dims, params);

        world.translate(cube, Vec3::new(0.1, 0.0, 0.0)).unwrap();
        let after = world.pose(cube).unwrap();
        assert_eq!(after.position.x, pose.position.x + 0.1);
        assert_eq!(after.position.y, pose.position.y);
        assert_eq!(world.stats().teleports, 1);
    }

    #[test]
    fn impulse_changes_velocity_not_position() {
        let mut world = PhysicsWorld::new();
        let (pose, dims, params) = unit_cube();
        let cube = world.spawn_box(BodyKind::Dynamic, pose, dims, params);

        world.apply_impulse(cube, Vec3::new(1.0, 0.0, 0.0)).unwrap();

        // Unit mass: impulse of 1 N*s produces 1 m/s.
        let v = world.velocity(cube).unwrap();
        assert!((v.x - 1.0).abs() < 1e-4, "velocity.x = {}", v.x);
        assert_eq!(world.pose(cube).unwrap().position, pose.position);
        assert_eq!(world.stats().impulses_applied, 1);
    }

    #[test]
    fn spin_yaw_rotates_by_angle() {
        let mut world = PhysicsWorld::new();
        let (pose, dims, params) = unit_cube();
        let cube = world.spawn_box(BodyKind::Dynamic, pose, dims, params);

        let angle = std::f32::consts::FRAC_PI_4;
        world.spin_yaw(cube, angle).unwrap();

        let rot = world.pose(cube).unwrap().rotation;
        let (axis, measured) = rot.to_axis_angle();
        assert!((measured - angle).abs() < 1e-5);
        assert!((axis.y.abs() - 1.0).abs() < 1e-5);
        assert_eq!(world.stats().spins_applied, 1);
    }

    #[test]
    fn advance_runs_whole_steps_only() {
        let mut world = PhysicsWorld::new();
        let ts = world.timestep();

        // Half a step accumulates; the second half completes it exactly.
        assert_eq!(world.advance(ts * 0.5), 0);
        assert_eq!(world.advance(ts * 0.5), 1);
        for _ in 0..3 {
            assert_eq!(world.advance(ts), 1);
        }
        assert_eq!(world.stats().steps, 4);
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let world = PhysicsWorld::new();
        assert!(matches!(
            world.pose(BodyHandle::invalid()),
            Err(PhysicsError::BodyNotFound(_))
        ));
    }
}
