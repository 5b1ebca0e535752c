use std::path::PathBuf;

/// Failures while bringing up the GPU side of the renderer.
///
/// All of these happen once during startup; none are retried.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// Shader compilation or pipeline validation failed. Carries the
    /// diagnostic reported by wgpu.
    #[error("sprite shader rejected by the GPU backend:\n{0}")]
    Shader(String),

    #[error("failed to load texture '{}': {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
