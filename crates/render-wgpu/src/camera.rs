use glam::{Mat4, Vec3};

use boxroom_render::RenderView;

/// Fixed look-at camera. There is no user camera control in this demo;
/// only the aspect ratio changes, on window resize.
#[derive(Debug, Clone, Copy)]
pub struct LookAtCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl LookAtCamera {
    pub fn new(view: &RenderView, width: u32, height: u32) -> Self {
        let mut cam = Self {
            eye: view.eye,
            target: view.target,
            fov: view.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        };
        cam.set_aspect(width, height);
        cam
    }

    /// Update the aspect ratio from viewport dimensions.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_projection_is_finite() {
        let cam = LookAtCamera::new(&RenderView::default(), 1280, 720);
        let vp = cam.view_projection();
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn resize_updates_only_aspect() {
        let mut cam = LookAtCamera::new(&RenderView::default(), 1280, 720);
        let eye = cam.eye;
        let target = cam.target;

        cam.set_aspect(640, 480);

        assert_eq!(cam.aspect, 640.0 / 480.0);
        assert_eq!(cam.eye, eye);
        assert_eq!(cam.target, target);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let mut cam = LookAtCamera::new(&RenderView::default(), 1280, 720);
        cam.set_aspect(100, 0);
        assert!(cam.aspect.is_finite());
    }
}
