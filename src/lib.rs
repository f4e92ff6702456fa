//! Cell Lattice - a rotating BCC lattice of organic cells
//!
//! Core modules:
//! - `scene`: Lattice generation, body construction, per-tick animation
//! - `renderer`: WebGPU rendering pipeline

pub mod renderer;
pub mod scene;

pub use scene::{AnimationContext, Body, LatticeError, OrbitCamera};

use glam::Vec3;

/// Scene configuration constants
pub mod consts {
    /// Lattice extent (integer coordinates span -size/2 ..= size/2)
    pub const LATTICE_SIZE: i32 = 4;
    /// Distance unit between adjacent lattice points
    pub const LATTICE_SPACING: f32 = 3.0;

    /// Cell membrane radius
    pub const MEMBRANE_RADIUS: f32 = 1.0;
    /// Nucleus radius (nested inside the membrane)
    pub const NUCLEUS_RADIUS: f32 = 0.5;
    /// Sphere tessellation (both longitude segments and latitude rings)
    pub const SPHERE_SEGMENTS: u32 = 32;
    /// Full span of the per-component surface noise; each vertex component
    /// is offset by a uniform draw in [-NOISE_SPAN/2, +NOISE_SPAN/2]
    pub const NOISE_SPAN: f32 = 0.1;

    /// Per-tick rotation step for each body's X and Y axes (radians)
    pub const SPIN_STEP: f32 = 0.01;
    /// Per-tick camera orbit angle step (radians)
    pub const ORBIT_STEP: f32 = 0.01;
    /// Radius of the camera's circular path around the origin
    pub const ORBIT_RADIUS: f32 = 20.0;
}

/// Point on a horizontal circle of the given radius around the origin
#[inline]
pub fn orbit_position(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}
