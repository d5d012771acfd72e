//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate the physics world; they read body poses and
//!   produce output.
//! - The trait is stable across backends: the debug text renderer and the
//!   wgpu backend share consumers.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
