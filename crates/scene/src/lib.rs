//! Scene bootstrap: the static environment built exactly once at startup.
//!
//! # Invariants
//! - One dynamic cube, five fixed boundaries, one camera, one light.
//! - The cube's spawn position lies strictly inside the enclosure and
//!   above the floor slab; `bootstrap` refuses anything else.
//! - Specs are plain data; all engine interaction happens in `bootstrap`.

pub mod bootstrap;
pub mod enclosure;

pub use bootstrap::{bootstrap, CameraSpec, CubeSpec, LightSpec, SceneError, SceneHandles, SceneSpec};
pub use enclosure::{EnclosureSpec, WallSpec};
