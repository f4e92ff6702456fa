//! WebGPU rendering module
//!
//! Uploads the generated meshes once at startup and redraws the scene from
//! per-body model matrices every frame.

pub mod pipeline;
pub mod vertex;

pub use pipeline::RenderState;
