//! Shared vocabulary types for the boxroom sandbox.
//!
//! # Invariants
//! - Types here are plain data: no engine handles, no behavior beyond
//!   constructors and conversions.

pub mod types;

pub use types::{BodyKind, BodyParams, BoxDims, Pose};
