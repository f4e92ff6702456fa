//! Orbiting camera
//!
//! The camera circles the scene origin on a fixed-radius horizontal path.
//! Orientation is never accumulated: the view matrix is rebuilt every tick
//! from the derived position and the origin target.

use glam::{Mat4, Vec3};

use crate::consts::ORBIT_RADIUS;
use crate::orbit_position;

pub struct OrbitCamera {
    /// Orbit parameter; grows without bound, cos/sin wrap it implicitly
    pub angle: f32,
    /// Constant distance from the origin
    pub orbit_radius: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            orbit_radius: ORBIT_RADIUS,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    /// Advance the orbit by one step
    pub fn advance(&mut self, step: f32) {
        self.angle += step;
    }

    /// Position on the orbit circle, y fixed at 0
    pub fn position(&self) -> Vec3 {
        orbit_position(self.orbit_radius, self.angle)
    }

    /// Look-at view matrix aimed at the scene origin
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
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
    use crate::consts::ORBIT_STEP;

    #[test]
    fn test_orbit_positions_after_ticks() {
        let mut cam = OrbitCamera::default();
        for _ in 0..100 {
            cam.advance(ORBIT_STEP);
        }
        let t = 100.0 * ORBIT_STEP;
        let pos = cam.position();
        assert!((pos.x - ORBIT_RADIUS * t.cos()).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
        assert!((pos.z - ORBIT_RADIUS * t.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_radius_constant_along_orbit() {
        let mut cam = OrbitCamera::default();
        for _ in 0..5000 {
            cam.advance(ORBIT_STEP);
            assert!((cam.position().length() - ORBIT_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_view_aims_at_origin() {
        let mut cam = OrbitCamera::default();
        cam.advance(1.3);
        // The origin maps onto the view-space -Z axis at orbit-radius depth
        let origin_view = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin_view.x.abs() < 1e-4);
        assert!(origin_view.y.abs() < 1e-4);
        assert!((origin_view.z + ORBIT_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_view_projection_valid() {
        let cam = OrbitCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }
}
