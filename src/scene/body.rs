//! Cell body construction
//!
//! A body is a noised outer membrane with a clean nucleus sphere nested at
//! its local origin. The nucleus is an owned child: its world transform is
//! the parent's model matrix, so it moves and rotates with the cell.

use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

use super::mesh::SphereMesh;
use crate::consts::{MEMBRANE_RADIUS, NOISE_SPAN, NUCLEUS_RADIUS, SPHERE_SEGMENTS};

/// One placed cell: membrane, nucleus, transform state
#[derive(Debug, Clone)]
pub struct Body {
    /// World position, fixed at placement
    position: Vec3,
    /// Euler rotation; X and Y accumulate each tick, Z never changes
    pub rotation: Vec3,
    /// Outer sphere with baked per-component surface noise
    pub membrane: SphereMesh,
    /// Inner sphere at the local origin, no noise
    pub nucleus: SphereMesh,
}

impl Body {
    /// Build a body at the origin. Membrane noise consumes three uniform
    /// draws per vertex, so the shape is unique per body.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut membrane =
            SphereMesh::uv_sphere(MEMBRANE_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        membrane.apply_surface_noise(NOISE_SPAN, rng);

        let nucleus = SphereMesh::uv_sphere(NUCLEUS_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS);

        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            membrane,
            nucleus,
        }
    }

    /// Build a body already placed at a lattice point
    pub fn new_at(position: Vec3, rng: &mut impl Rng) -> Self {
        let mut body = Self::new(rng);
        body.position = position;
        body
    }

    /// World position (immutable after placement)
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Advance self-rotation around X and Y by one step
    pub fn spin(&mut self, step: f32) {
        self.rotation.x += step;
        self.rotation.y += step;
    }

    /// Model matrix for the membrane; the nucleus shares it because the
    /// child sits at the parent's local origin.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPIN_STEP;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_body_at_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let body = Body::new(&mut rng);
        assert_eq!(body.position(), Vec3::ZERO);
        assert_eq!(body.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_membrane_noised_nucleus_clean() {
        let mut rng = Pcg32::seed_from_u64(5);
        let body = Body::new(&mut rng);

        let clean = SphereMesh::uv_sphere(MEMBRANE_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        let changed = clean
            .positions
            .iter()
            .zip(&body.membrane.positions)
            .any(|(a, b)| a != b);
        assert!(changed, "membrane must carry baked noise");

        // Nucleus vertices sit exactly on the radius-0.5 sphere
        for pos in &body.nucleus.positions {
            assert!((pos.length() - NUCLEUS_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn test_spin_leaves_z_alone() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut body = Body::new(&mut rng);
        for _ in 0..250 {
            body.spin(SPIN_STEP);
        }
        assert!((body.rotation.x - 2.5).abs() < 1e-4);
        assert!((body.rotation.y - 2.5).abs() < 1e-4);
        assert_eq!(body.rotation.z, 0.0);
    }

    #[test]
    fn test_spin_does_not_move_body() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut body = Body::new_at(Vec3::new(3.0, -6.0, 1.5), &mut rng);
        let before = body.position();
        body.spin(SPIN_STEP);
        body.spin(SPIN_STEP);
        assert_eq!(body.position(), before);
    }

    #[test]
    fn test_model_matrix_translates_local_origin() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut body = Body::new_at(Vec3::new(1.0, 2.0, 3.0), &mut rng);
        body.spin(0.7);

        // The nucleus center is the parent's local origin; rotation must not
        // displace it from the body position.
        let world = body.model_matrix().transform_point3(Vec3::ZERO);
        assert!((world - body.position()).length() < 1e-5);
    }
}
