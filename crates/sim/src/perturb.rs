use std::time::Duration;

use glam::Vec3;
use rand::Rng;

use crate::action::Action;

/// Fixed-period timer driven by frame deltas.
///
/// The timer accumulates wall-clock time and fires once per elapsed
/// period; leftover time carries into the next frame so the long-run rate
/// stays exact regardless of frame pacing.
#[derive(Debug, Clone)]
pub struct PerturbTimer {
    period: f32,
    accumulator: f32,
}

impl PerturbTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.as_secs_f32(),
            accumulator: 0.0,
        }
    }

    /// Feed `dt` seconds of wall-clock time. Returns how many periods
    /// elapsed (ticks to fire).
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut fired = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            fired += 1;
        }
        fired
    }
}

/// Draw one random perturbation: horizontal impulse components uniform in
/// [−strength, strength), vertical component zero, yaw uniform in
/// [0, max_spin).
pub fn sample_perturbation(rng: &mut impl Rng, strength: f32, max_spin: f32) -> Action {
    let impulse = Vec3::new(
        rng.gen_range(-strength..strength),
        0.0,
        rng.gen_range(-strength..strength),
    );
    Action::Perturb {
        impulse,
        yaw: rng.gen_range(0.0..max_spin),
    }
}
