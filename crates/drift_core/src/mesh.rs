//! CPU-side sprite mesh: one quad (two triangles, six vertices) per object.
//!
//! Positions and UVs live in two parallel buffers so they can be uploaded
//! separately. Positions change every fixed step and are rebuilt wholesale;
//! UVs depend only on each object's region, which never changes, so they are
//! built exactly once.
//!
//! Vertex order inside a quad:
//!
//! ```text
//!   top-right, bottom-right, top-left, bottom-right, bottom-left, top-left
//! ```
//!
//! The V axis is flipped relative to the Y axis: the top edge (smaller `y`)
//! samples `v2`, the bottom edge samples `v1`.

use crate::atlas::TextureRegion;
use crate::objects::{Object, ObjectStore};

pub const VERTICES_PER_QUAD: usize = 6;

pub type Position = [i16; 2];
pub type TexCoord = [f32; 2];

pub fn quad_positions(object: &Object) -> [Position; VERTICES_PER_QUAD] {
    let left = object.x;
    let top = object.y;
    let right = object.x.saturating_add(object.region.width as i16);
    let bottom = object.y.saturating_add(object.region.height as i16);

    [
        [right, top],
        [right, bottom],
        [left, top],
        [right, bottom],
        [left, bottom],
        [left, top],
    ]
}

pub fn quad_uvs(region: &TextureRegion) -> [TexCoord; VERTICES_PER_QUAD] {
    let TextureRegion { u1, v1, u2, v2, .. } = *region;
    [[u2, v2], [u2, v1], [u1, v2], [u2, v1], [u1, v1], [u1, v2]]
}

pub fn build_quad(object: &Object) -> ([Position; VERTICES_PER_QUAD], [TexCoord; VERTICES_PER_QUAD]) {
    (quad_positions(object), quad_uvs(&object.region))
}

#[derive(Debug, Clone)]
pub struct MeshBuffers {
    positions: Vec<Position>,
    uvs: Vec<TexCoord>,
}

impl MeshBuffers {
    /// Build both buffers for the current object state.
    pub fn new(store: &ObjectStore) -> Self {
        let vertex_count = store.len() * VERTICES_PER_QUAD;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for object in store.iter() {
            let (quad_pos, quad_uv) = build_quad(object);
            positions.extend_from_slice(&quad_pos);
            uvs.extend_from_slice(&quad_uv);
        }
        Self { positions, uvs }
    }

    /// Regenerate every position from `store`, in place.
    ///
    /// `store` must be the store this mesh was built from; object count and
    /// order are fixed for the lifetime of the run.
    pub fn rebuild_positions(&mut self, store: &ObjectStore) {
        debug_assert_eq!(self.positions.len(), store.len() * VERTICES_PER_QUAD);
        for (quad, object) in self
            .positions
            .chunks_exact_mut(VERTICES_PER_QUAD)
            .zip(store.iter())
        {
            quad.copy_from_slice(&quad_positions(object));
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn uvs(&self) -> &[TexCoord] {
        &self.uvs
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
