//! Per-frame animation state
//!
//! `AnimationContext` owns the body registry and the camera; the host loop
//! calls `tick` once per display refresh and then submits a frame. The tick
//! itself is synchronous and total, so it runs headless in tests.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Body;
use super::camera::OrbitCamera;
use super::lattice::{LatticeError, generate_lattice};
use crate::consts::{ORBIT_STEP, SPIN_STEP};

pub struct AnimationContext {
    /// Placed bodies in lattice iteration order; fixed after construction
    pub bodies: Vec<Body>,
    pub camera: OrbitCamera,
    /// Ticks applied so far
    pub ticks: u64,
}

impl AnimationContext {
    /// Generate the lattice and start the camera at angle 0
    pub fn new(size: i32, spacing: f32, seed: u64) -> Result<Self, LatticeError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bodies = generate_lattice(size, spacing, &mut rng)?;
        log::info!("lattice ready: {} bodies, seed {}", bodies.len(), seed);

        Ok(Self {
            bodies,
            camera: OrbitCamera::default(),
            ticks: 0,
        })
    }

    /// One animation step: spin every body, advance the camera orbit
    pub fn tick(&mut self) {
        for body in &mut self.bodies {
            body.spin(SPIN_STEP);
        }
        self.camera.advance(ORBIT_STEP);
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ORBIT_RADIUS;
    use glam::Vec3;

    #[test]
    fn test_reference_context_body_count() {
        let ctx = AnimationContext::new(4, 3.0, 123).unwrap();
        assert_eq!(ctx.bodies.len(), 63);
        assert_eq!(ctx.ticks, 0);
    }

    #[test]
    fn test_rotation_accumulates_per_tick() {
        let mut ctx = AnimationContext::new(2, 1.0, 7).unwrap();
        for _ in 0..300 {
            ctx.tick();
        }
        assert_eq!(ctx.ticks, 300);
        for body in &ctx.bodies {
            assert!((body.rotation.x - 3.0).abs() < 1e-3);
            assert!((body.rotation.y - 3.0).abs() < 1e-3);
            assert_eq!(body.rotation.z, 0.0);
        }
    }

    #[test]
    fn test_rotation_state_disjoint_per_body() {
        let mut ctx = AnimationContext::new(2, 1.0, 7).unwrap();
        ctx.tick();
        // Rotating one body by hand must not leak into the others
        ctx.bodies[0].rotation.x += 1.0;
        ctx.tick();
        assert!((ctx.bodies[0].rotation.x - 1.02).abs() < 1e-5);
        assert!((ctx.bodies[1].rotation.x - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_tick_never_moves_bodies() {
        let mut ctx = AnimationContext::new(4, 3.0, 42).unwrap();
        let before: Vec<Vec3> = ctx.bodies.iter().map(|b| b.position()).collect();
        for _ in 0..50 {
            ctx.tick();
        }
        for (body, pos) in ctx.bodies.iter().zip(before) {
            assert_eq!(body.position(), pos);
        }
    }

    #[test]
    fn test_camera_tracks_tick_count() {
        let mut ctx = AnimationContext::new(0, 1.0, 1).unwrap();
        for _ in 0..400 {
            ctx.tick();
        }
        let t = 400.0 * crate::consts::ORBIT_STEP;
        let pos = ctx.camera.position();
        assert!((pos.x - ORBIT_RADIUS * t.cos()).abs() < 1e-3);
        assert!((pos.z - ORBIT_RADIUS * t.sin()).abs() < 1e-3);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_invalid_parameters_propagate() {
        assert!(AnimationContext::new(-3, 1.0, 0).is_err());
        assert!(AnimationContext::new(4, 0.0, 0).is_err());
    }
}
