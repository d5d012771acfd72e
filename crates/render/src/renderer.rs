use glam::Vec3;

use boxroom_common::BodyKind;
use boxroom_physics::PhysicsWorld;
use boxroom_scene::CameraSpec;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl From<CameraSpec> for RenderView {
    fn from(spec: CameraSpec) -> Self {
        Self {
            eye: spec.eye,
            target: spec.target,
            fov_degrees: spec.fov_degrees,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        CameraSpec::default().into()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads body state and a view configuration, then produces
/// output. It never mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &PhysicsWorld, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs, CLI output, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &PhysicsWorld, view: &RenderView) -> String {
        let stats = world.stats();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Boxroom (steps={}, impulses={}, spins={}, teleports={}) ===\n",
            stats.steps, stats.impulses_applied, stats.spins_applied, stats.teleports
        ));
        out.push_str(&format!("Bodies: {}\n", world.body_count()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (handle, record) in world.bodies() {
            let Ok(pose) = world.pose(handle) else {
                continue;
            };
            let tag = match record.kind {
                BodyKind::Dynamic => "dyn",
                BodyKind::Boundary => "fix",
            };
            let p = pose.position;
            out.push_str(&format!(
                "  [{tag}] pos=({:.2}, {:.2}, {:.2}) size=({:.1}, {:.1}, {:.1})\n",
                p.x,
                p.y,
                p.z,
                record.dims.full_size().x,
                record.dims.full_size().y,
                record.dims.full_size().z,
            ));
        }

        out
    }
}
