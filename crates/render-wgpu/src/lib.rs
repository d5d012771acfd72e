//! wgpu render backend for the boxroom sandbox.
//!
//! Draws every physics body as an instanced, directionally lit box scaled
//! by its half extents. The camera is a fixed look-at camera derived from
//! the scene spec.
//!
//! # Invariants
//! - The renderer never mutates body state; resizing touches only the
//!   surface, depth buffer, and camera aspect.

mod camera;
mod gpu;
mod shaders;

pub use camera::LookAtCamera;
pub use gpu::BoxRenderer;
