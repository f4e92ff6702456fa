//! Lattice generation and per-tick animation
//!
//! Everything here must stay pure and renderer-independent:
//! - Seeded RNG only (noise is baked at construction, never per frame)
//! - Stable body order (lattice iteration order)
//! - No wgpu or windowing dependencies

pub mod body;
pub mod camera;
pub mod lattice;
pub mod mesh;
pub mod tick;

pub use body::Body;
pub use camera::OrbitCamera;
pub use lattice::{LatticeError, generate_lattice};
pub use mesh::SphereMesh;
pub use tick::AnimationContext;
