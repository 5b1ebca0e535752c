//! Vertex buffer layouts for the two-stream sprite mesh.
//!
//! Slot 0 streams pixel positions as signed 16-bit pairs and is rewritten
//! whenever the simulation steps. Slot 1 holds UVs and is written once.

use drift_core::mesh::{Position, TexCoord};

pub const POSITION_SLOT: u32 = 0;
pub const UV_SLOT: u32 = 1;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: 0,
    format: wgpu::VertexFormat::Sint16x2,
}];

const UV_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: 1,
    format: wgpu::VertexFormat::Float32x2,
}];

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Position>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRIBUTES,
    }
}

pub fn uv_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TexCoord>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &UV_ATTRIBUTES,
    }
}
