//! Physics adapter: the external rigid-body engine behind a typed surface.
//!
//! # Invariants
//! - Bodies are spawned once and live for the lifetime of the world; there
//!   is no despawn path.
//! - `step`/`advance` are the only operations that integrate motion;
//!   teleports and impulses mutate state directly and take effect on the
//!   next step.
//! - Body iteration follows insertion order.

pub mod body;
pub mod world;

pub use body::{BodyHandle, BodyRecord, PhysicsStats};
pub use world::{PhysicsError, PhysicsWorld};
