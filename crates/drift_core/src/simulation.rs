use rand::rngs::StdRng;

use crate::atlas::AtlasCatalog;
use crate::mesh::MeshBuffers;
use crate::motion;
use crate::objects::ObjectStore;
use crate::window_size::WindowSize;

/// Number of sprites spawned at startup.
pub const OBJECT_COUNT: usize = 500;

/// Sprite state plus its CPU-side mesh, advanced one fixed step at a time.
pub struct Simulation {
    window: WindowSize,
    objects: ObjectStore,
    mesh: MeshBuffers,
    rng: StdRng,
}

impl Simulation {
    /// Scatter `count` sprites and build the initial position and UV buffers.
    ///
    /// Fails when the window cannot hold the largest catalog region inside
    /// the border.
    pub fn new(
        window: WindowSize,
        count: usize,
        catalog: &AtlasCatalog,
        mut rng: StdRng,
    ) -> Result<Self, String> {
        window.check_fits(catalog)?;
        let objects = ObjectStore::initialize(window, count, catalog, &mut rng);
        let mesh = MeshBuffers::new(&objects);
        log::info!(
            "Spawned {} sprites from atlas '{}' ({} vertices)",
            objects.len(),
            catalog.atlas_id,
            mesh.vertex_count()
        );
        Ok(Self {
            window,
            objects,
            mesh,
            rng,
        })
    }

    /// One fixed step: move every sprite, then regenerate the position buffer.
    pub fn tick(&mut self) {
        motion::step_all(&mut self.objects, self.window, &mut self.rng);
        self.mesh.rebuild_positions(&self.objects);
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }
}
