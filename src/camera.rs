//! Fixed perspective camera and primary-ray generation.

use glam::{Mat4, Vec3, Vec4};

use crate::params::CameraConfig;

/// Camera looking from a fixed eye point toward a target
pub struct CameraSystem {
    config: CameraConfig,
}

impl CameraSystem {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.config.position)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.config.target)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Arguments
    /// * `aspect` - Viewport width divided by height
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.position(), self.target(), Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            aspect,
            self.config.near_plane_m,
            self.config.far_plane_m,
        );
        proj * view
    }

    /// World-space ray through a point in normalized device coordinates
    ///
    /// # Arguments
    /// * `ndc_x`, `ndc_y` - Position on the image plane in [-1, 1] (y up)
    /// * `aspect` - Viewport width divided by height
    ///
    /// # Returns
    /// Tuple of (origin, unit direction)
    pub fn ray(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> (Vec3, Vec3) {
        self.unproject_ray(&self.view_proj(aspect).inverse(), ndc_x, ndc_y)
    }

    /// Same as [`CameraSystem::ray`] with the inverse view-projection computed once by the caller
    pub fn unproject_ray(&self, inv_view_proj: &Mat4, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        // wgpu depth range: 0 at the near plane, 1 at the far plane
        let near = *inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = *inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let eye = self.position();
        let direction = (far - near).try_normalize().unwrap_or_else(|| {
            (self.target() - eye).try_normalize().unwrap_or(Vec3::NEG_Z)
        });
        (eye, direction)
    }
}
