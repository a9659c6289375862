//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Convert 8-bit sRGB components to a vertex color
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const SKY: [f32; 4] = rgb(135, 206, 235);
    pub const CLOUD: [f32; 4] = rgb(255, 255, 255);
    pub const PIPE: [f32; 4] = rgb(0, 128, 0);
    pub const PIPE_CAP: [f32; 4] = rgb(0, 100, 0);
    pub const FLOOR: [f32; 4] = rgb(222, 184, 135);
    pub const FLOOR_DETAIL: [f32; 4] = rgb(200, 164, 115);
    pub const BIRD: [f32; 4] = rgb(255, 255, 0);
    pub const BEAK: [f32; 4] = rgb(255, 165, 0);
    pub const EYE: [f32; 4] = rgb(0, 0, 0);
    /// Letterbox outside the world
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
