use drift_render::RenderError;

/// Everything that can stop the game before or during startup.
///
/// Configuration problems are reported before any window or GPU resource
/// exists. The rest are initialization failures; all of them are fatal.
#[derive(thiserror::Error, Debug)]
pub enum DriftError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid atlas metadata: {0}")]
    Atlas(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
