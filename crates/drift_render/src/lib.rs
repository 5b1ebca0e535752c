pub mod error;
pub mod gpu_context;
pub mod sprite_batch;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;
pub mod viewport;

pub use error::RenderError;
pub use gpu_context::GpuContext;
pub use sprite_batch::SpriteBatch;
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use viewport::WindowUniform;
