//! Interaction control: keyboard nudges and the periodic random perturbation.
//!
//! # Invariants
//! - All mutations flow through one [`EventQueue`] drained on a single
//!   thread in arrival order; producers never touch the body directly.
//! - Keyboard nudges are direct position overrides; perturbations are
//!   physically integrated impulses. The two styles intentionally coexist.
//! - A disabled perturbation tick is a no-op, not an unscheduled one: the
//!   timer keeps running.

pub mod action;
pub mod context;
pub mod keymap;
pub mod perturb;
pub mod queue;
pub mod settings;

pub use action::Action;
pub use context::SimContext;
pub use keymap::action_for_key;
pub use perturb::{sample_perturbation, PerturbTimer};
pub use queue::{EventQueue, SimEvent};
pub use settings::{SettingsError, SimSettings};
