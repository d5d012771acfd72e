use boxroom_physics::{BodyHandle, PhysicsError, PhysicsWorld};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::action::Action;
use crate::keymap::action_for_key;
use crate::perturb::{sample_perturbation, PerturbTimer};
use crate::queue::{EventQueue, SimEvent};
use crate::settings::SimSettings;

/// The explicit simulation context: the dynamic body's handle, the
/// perturbation gate, and the event queue, threaded to every producer
/// instead of living in ambient global state.
///
/// Keyboard nudges teleport the body; perturbations apply impulses. The
/// mismatch is inherited behavior and is kept deliberately.
pub struct SimContext {
    body: BodyHandle,
    settings: SimSettings,
    rng: ChaCha8Rng,
    queue: EventQueue,
    timer: PerturbTimer,
}

impl SimContext {
    pub fn new(body: BodyHandle, settings: SimSettings) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let timer = PerturbTimer::new(settings.perturb_interval());
        Self {
            body,
            settings,
            rng,
            queue: EventQueue::new(),
            timer,
        }
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn random_motion(&self) -> bool {
        self.settings.random_motion
    }

    /// Flip the perturbation gate. The timer is unaffected: re-enabling
    /// takes effect on the next tick it fires.
    pub fn set_random_motion(&mut self, enabled: bool) {
        self.settings.random_motion = enabled;
    }

    /// Producer entry point for key-press edges.
    pub fn push_key(&mut self, key: char) {
        self.queue.push(SimEvent::Key(key));
    }

    /// Number of events waiting to be applied.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Advance the wall clock by `dt` seconds and drain the queue.
    ///
    /// Enqueues any due perturbation ticks and this frame's tick after the
    /// already-queued key events, then applies everything in arrival
    /// order. With `dt == 0.0` only pending events are applied.
    pub fn pump(&mut self, dt: f32, world: &mut PhysicsWorld) -> Result<(), PhysicsError> {
        for _ in 0..self.timer.advance(dt) {
            self.queue.push(SimEvent::PerturbTick);
        }
        if dt > 0.0 {
            self.queue.push(SimEvent::Frame { dt });
        }
        while let Some(event) = self.queue.pop() {
            self.apply(event, world)?;
        }
        Ok(())
    }

    fn apply(&mut self, event: SimEvent, world: &mut PhysicsWorld) -> Result<(), PhysicsError> {
        match event {
            SimEvent::Frame { dt } => {
                world.advance(dt);
                Ok(())
            }
            SimEvent::Key(key) => {
                let action = action_for_key(key, self.settings.nudge_step);
                if action == Action::Noop {
                    tracing::trace!(%key, "unmapped key");
                }
                self.apply_action(action, world)
            }
            SimEvent::PerturbTick => {
                // Gate closed: the tick is a no-op, the timer keeps running.
                if !self.settings.random_motion {
                    return Ok(());
                }
                let action = sample_perturbation(
                    &mut self.rng,
                    self.settings.impulse_strength,
                    self.settings.max_spin,
                );
                self.apply_action(action, world)
            }
        }
    }

    fn apply_action(&mut self, action: Action, world: &mut PhysicsWorld) -> Result<(), PhysicsError> {
        match action {
            Action::Nudge(delta) => world.translate(self.body, delta),
            Action::Perturb { impulse, yaw } => {
                world.apply_impulse(self.body, impulse)?;
                world.spin_yaw(self.body, yaw)
            }
            Action::Noop => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxroom_common::{BodyKind, BodyParams, BoxDims, Pose};
    use glam::Vec3;

    fn cube_world() -> (PhysicsWorld, BodyHandle) {
        let mut world = PhysicsWorld::new();
        let cube = world.spawn_box(
            BodyKind::Dynamic,
            Pose::at(Vec3::new(0.0, 1.0, 0.0)),
            BoxDims::cube(2.0),
            BodyParams {
                mass: 1.0,
                restitution: 0.9,
            },
        );
        (world, cube)
    }

    fn still_settings() -> SimSettings {
        SimSettings {
            random_motion: false,
            ..SimSettings::default()
        }
    }

    #[test]
    fn three_a_presses_move_x_by_three_steps() {
        let (mut world, cube) = cube_world();
        let mut ctx = SimContext::new(cube, still_settings());
        let start = world.pose(cube).unwrap().position;

        for _ in 0..3 {
            ctx.push_key('a');
        }
        ctx.pump(0.0, &mut world).unwrap();

        let end = world.pose(cube).unwrap().position;
        assert!((end.x - (start.x + 0.3)).abs() < 1e-6);
        assert_eq!(end.z, start.z);
        assert_eq!(world.stats().teleports, 3);
    }

    #[test]
    fn unmapped_key_leaves_body_alone() {
        let (mut world, cube) = cube_world();
        let mut ctx = SimContext::new(cube, still_settings());
        let start = world.pose(cube).unwrap();

        ctx.push_key('x');
        ctx.pump(0.0, &mut world).unwrap();

        assert_eq!(world.pose(cube).unwrap(), start);
    }

    #[test]
    fn disabled_gate_applies_nothing_over_two_seconds() {
        let (mut world, cube) = cube_world();
        let mut ctx = SimContext::new(cube, still_settings());
        let start_rotation = world.pose(cube).unwrap().rotation;

        for _ in 0..4 {
            ctx.pump(0.5, &mut world).unwrap();
        }

        assert_eq!(world.stats().impulses_applied, 0);
        assert_eq!(world.stats().spins_applied, 0);
        // Free fall applies no torque: without perturbations the rotation
        // must not change at all.
        assert_eq!(world.pose(cube).unwrap().rotation, start_rotation);
    }

    #[test]
    fn enabled_gate_perturbs_once_per_period() {
        let (mut world, cube) = cube_world();
        let mut ctx = SimContext::new(cube, SimSettings::default());

        ctx.pump(0.5, &mut world).unwrap();
        assert_eq!(world.stats().impulses_applied, 1);
        assert_eq!(world.stats().spins_applied, 1);

        ctx.pump(1.0, &mut world).unwrap();
        assert_eq!(world.stats().impulses_applied, 3);
    }

    #[test]
    fn timer_keeps_running_while_gate_is_closed() {
        let (mut world, cube) = cube_world();
        let mut ctx = SimContext::new(cube, still_settings());

        // 0.45 s accumulates silently with the gate closed.
        ctx.pump(0.45, &mut world).unwrap();
        assert_eq!(world.stats().impulses_applied, 0);

        // Re-open the gate: the next 0.1 s completes the pending period.
        ctx.set_random_motion(true);
        ctx.pump(0.1, &mut world).unwrap();
        assert_eq!(world.stats().impulses_applied, 1);
    }

    #[test]
    fn keys_apply_before_the_frame_that_follows_them() {
        let (mut world, cube) = cube_world();
        let mut ctx = SimContext::new(cube, still_settings());

        ctx.push_key('s');
        ctx.push_key('s');
        ctx.pump(0.0, &mut world).unwrap();

        let pos = world.pose(cube).unwrap().position;
        assert!((pos.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let (mut world_a, cube_a) = cube_world();
        let (mut world_b, cube_b) = cube_world();
        let mut ctx_a = SimContext::new(cube_a, SimSettings::default());
        let mut ctx_b = SimContext::new(cube_b, SimSettings::default());

        for _ in 0..5 {
            ctx_a.pump(0.5, &mut world_a).unwrap();
            ctx_b.pump(0.5, &mut world_b).unwrap();
        }

        assert_eq!(
            world_a.pose(cube_a).unwrap(),
            world_b.pose(cube_b).unwrap()
        );
    }
}
