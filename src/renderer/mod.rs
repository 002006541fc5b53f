//! WebGPU rendering module
//!
//! The simulation is projected on the CPU into clip-space triangles; the GPU
//! side is a single flat-colour pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
pub use vertex::Vertex;
