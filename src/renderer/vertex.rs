//! Vertex type for flat-coloured geometry in clip space

use bytemuck::{Pod, Zeroable};

/// 2D vertex in normalized device coordinates with colour
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    /// Pancake crust
    pub const CRUST: [f32; 4] = [0.78, 0.5, 0.2, 1.0];
    /// Darker rim around the crust
    pub const CRUST_EDGE: [f32; 4] = [0.55, 0.32, 0.12, 1.0];
    /// Anko filling peeking through the middle
    pub const ANKO: [f32; 4] = [0.35, 0.12, 0.1, 1.0];
    pub const BEAM: [f32; 4] = [0.4, 1.0, 1.0, 0.9];
    /// Transparent so the page background shows through
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
}
