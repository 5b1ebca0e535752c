use drift_core::mesh::{Position, TexCoord};
use drift_core::MeshBuffers;
use wgpu::util::DeviceExt;

use crate::vertex::{POSITION_SLOT, UV_SLOT};

/// GPU copy of the sprite mesh: every sprite in one non-indexed draw.
///
/// The position buffer is rewritten after simulation steps; the UV buffer is
/// uploaded at creation and never touched again.
pub struct SpriteBatch {
    position_buffer: wgpu::Buffer,
    uv_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl SpriteBatch {
    pub fn new(device: &wgpu::Device, mesh: &MeshBuffers) -> Self {
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Position Buffer"),
            contents: bytemuck::cast_slice(mesh.positions()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let uv_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite UV Buffer"),
            contents: bytemuck::cast_slice(mesh.uvs()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            position_buffer,
            uv_buffer,
            vertex_count: mesh.vertex_count() as u32,
        }
    }

    /// Overwrite the whole position stream. `positions` must hold exactly
    /// `vertex_count` entries.
    pub fn upload_positions(&self, queue: &wgpu::Queue, positions: &[Position]) {
        debug_assert_eq!(positions.len(), self.vertex_count as usize);
        queue.write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(positions));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(POSITION_SLOT, self.position_buffer.slice(..));
        render_pass.set_vertex_buffer(UV_SLOT, self.uv_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Bytes held by both vertex streams.
    pub fn byte_size(&self) -> usize {
        let count = self.vertex_count as usize;
        count * (std::mem::size_of::<Position>() + std::mem::size_of::<TexCoord>())
    }
}

impl Drop for SpriteBatch {
    fn drop(&mut self) {
        log::debug!(
            "Releasing sprite batch buffers ({} vertices, {} bytes)",
            self.vertex_count,
            self.byte_size()
        );
    }
}
