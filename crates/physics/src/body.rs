use boxroom_common::{BodyKind, BodyParams, BoxDims};
use rapier3d::prelude::RigidBodyHandle;

/// Opaque handle to a body owned by a [`crate::PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

impl BodyHandle {
    /// A handle that resolves to no body. Lookups with it fail with
    /// [`crate::PhysicsError::BodyNotFound`].
    pub fn invalid() -> Self {
        Self(RigidBodyHandle::invalid())
    }
}

/// Spawn-time description kept alongside each body for renderers and
/// inspection. The engine owns the live state; this never changes.
#[derive(Debug, Clone, Copy)]
pub struct BodyRecord {
    pub kind: BodyKind,
    pub dims: BoxDims,
    pub params: BodyParams,
}

/// Counters for instrumentation and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsStats {
    /// Fixed integration steps executed.
    pub steps: u64,
    /// Impulses applied via [`crate::PhysicsWorld::apply_impulse`].
    pub impulses_applied: u64,
    /// Yaw spins applied via [`crate::PhysicsWorld::spin_yaw`].
    pub spins_applied: u64,
    /// Direct position overrides via [`crate::PhysicsWorld::translate`].
    pub teleports: u64,
}
