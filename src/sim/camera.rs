//! Perspective camera model
//!
//! Pure math over the current camera parameters. Nothing here is cached, so
//! values read after a resize always reflect the new aspect ratio.

use glam::{Mat4, Vec2, Vec3};

use crate::consts::*;

/// Perspective camera looking down -Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view (degrees)
    pub fov_deg: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            aspect: 16.0 / 9.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::new(0.0, 0.0, CAMERA_Z),
        }
    }
}

/// A ray with unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self::default();
        camera.set_viewport(width, height);
        camera
    }

    /// Update aspect ratio from viewport size (ignores degenerate sizes)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Visible half-width/half-height of the plane at world `depth` (z)
    pub fn visible_half_extents(&self, depth: f32) -> Vec2 {
        let distance = (self.position.z - depth).abs();
        let half_h = (self.fov_deg.to_radians() * 0.5).tan() * distance;
        Vec2::new(half_h * self.aspect, half_h)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Convert viewport pixel coordinates to normalized device coordinates
    pub fn viewport_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
    }

    /// Ray from the camera through an NDC point
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let on_plane = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray {
            origin: self.position,
            dir: (on_plane - self.position).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extents_follow_aspect() {
        let mut camera = Camera::new(1000.0, 1000.0);
        let square = camera.visible_half_extents(0.0);
        let expected_h = (37.5_f32).to_radians().tan() * 50.0;
        assert!((square.y - expected_h).abs() < 0.001);
        assert!((square.x - expected_h).abs() < 0.001);

        camera.set_viewport(2000.0, 1000.0);
        let wide = camera.visible_half_extents(0.0);
        assert!((wide.x - expected_h * 2.0).abs() < 0.001);
        assert!((wide.y - expected_h).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_viewport_keeps_aspect() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_viewport(0.0, 600.0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_viewport_to_ndc() {
        let center = Camera::viewport_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert!(center.length() < 1e-6);
        let top_left = Camera::viewport_to_ndc(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, Vec2::new(-1.0, 1.0));
        let bottom_right = Camera::viewport_to_ndc(800.0, 600.0, 800.0, 600.0);
        assert_eq!(bottom_right, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_center_ray_points_down_negative_z() {
        let camera = Camera::new(800.0, 600.0);
        let ray = camera.ray_through(Vec2::ZERO);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_edge_ray_hits_visible_edge() {
        let camera = Camera::new(1600.0, 900.0);
        let ray = camera.ray_through(Vec2::new(1.0, 0.0));
        // Intersect with z = 0 plane
        let t = -ray.origin.z / ray.dir.z;
        let hit = ray.at(t);
        let half = camera.visible_half_extents(0.0);
        assert!((hit.x - half.x).abs() < 0.01);
        assert!(hit.y.abs() < 0.01);
    }
}
