pub mod atlas;
pub mod mesh;
pub mod motion;
pub mod objects;
pub mod simulation;
pub mod time;
pub mod window_size;

pub use atlas::{AtlasCatalog, TextureRegion};
pub use mesh::MeshBuffers;
pub use objects::{Object, ObjectStore};
pub use simulation::{Simulation, OBJECT_COUNT};
pub use time::{FrameReport, TimeState};
pub use window_size::WindowSize;
