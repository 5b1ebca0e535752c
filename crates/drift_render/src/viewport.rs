use drift_core::WindowSize;

/// Window extents pushed to the vertex stage, which maps pixel `p` to clip
/// space as `p / (size / 2) - 1`.
///
/// Padded to 16 bytes for uniform buffer layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WindowUniform {
    pub size: [f32; 2],
    _padding: [f32; 2],
}

impl WindowUniform {
    pub fn new(window: WindowSize) -> Self {
        Self {
            size: [window.width as f32, window.height as f32],
            _padding: [0.0; 2],
        }
    }

    /// Clip-space position of pixel `(x, y)`, mirroring the vertex shader.
    pub fn to_clip(&self, x: i16, y: i16) -> [f32; 2] {
        [
            x as f32 / (self.size[0] / 2.0) - 1.0,
            y as f32 / (self.size[1] / 2.0) - 1.0,
        ]
    }
}
