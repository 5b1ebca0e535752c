use std::sync::Arc;

use rand::Rng;

use crate::atlas::{AtlasCatalog, TextureRegion};
use crate::window_size::WindowSize;

/// A single drifting sprite. `x`/`y` is the top-left corner in window pixels.
#[derive(Debug, Clone)]
pub struct Object {
    pub x: i16,
    pub y: i16,
    pub region: Arc<TextureRegion>,
}

/// Fixed-size, index-stable storage for every sprite in the run.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: Vec<Object>,
}

impl ObjectStore {
    /// Scatter `count` objects uniformly over the window, each with a region
    /// drawn from `catalog`.
    pub fn initialize<R: Rng>(
        window: WindowSize,
        count: usize,
        catalog: &AtlasCatalog,
        rng: &mut R,
    ) -> Self {
        let objects = (0..count)
            .map(|_| Object {
                // WindowSize guarantees both extents fit in i16.
                x: rng.random_range(0..window.width) as i16,
                y: rng.random_range(0..window.height) as i16,
                region: Arc::clone(catalog.pick_random(rng)),
            })
            .collect();
        Self { objects }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Object> {
        self.objects.iter_mut()
    }

    pub fn as_slice(&self) -> &[Object] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(seed: u64) -> (WindowSize, AtlasCatalog, ObjectStore) {
        let window = WindowSize::new(320, 200).expect("valid window");
        let catalog = AtlasCatalog::builtin().expect("builtin atlas");
        let mut rng = StdRng::seed_from_u64(seed);
        let store = ObjectStore::initialize(window, 500, &catalog, &mut rng);
        (window, catalog, store)
    }

    #[test]
    fn initialize_creates_requested_count() {
        let (_, _, store) = setup(11);
        assert_eq!(store.len(), 500);
        assert!(!store.is_empty());
        assert!(store.get(499).is_some());
        assert!(store.get(500).is_none());
    }

    #[test]
    fn initial_positions_lie_inside_window() {
        let (window, _, store) = setup(12);
        for object in store.iter() {
            assert!((0..window.width as i16).contains(&object.x));
            assert!((0..window.height as i16).contains(&object.y));
        }
    }

    #[test]
    fn initial_regions_come_from_catalog_and_skip_last_entry() {
        let (_, catalog, store) = setup(13);
        let last = catalog.regions().last().expect("non-empty").clone();
        for object in store.iter() {
            let from_catalog = catalog
                .regions()
                .iter()
                .any(|r| Arc::ptr_eq(r, &object.region));
            assert!(from_catalog, "region must be shared with the catalog");
            assert!(!Arc::ptr_eq(&object.region, &last));
        }
    }

    #[test]
    fn same_seed_produces_same_layout() {
        let (_, _, a) = setup(99);
        let (_, _, b) = setup(99);
        for (oa, ob) in a.iter().zip(b.iter()) {
            assert_eq!((oa.x, oa.y), (ob.x, ob.y));
            assert_eq!(oa.region.name, ob.region.name);
        }
    }

    #[test]
    fn get_mut_mutates_in_place() {
        let (_, _, mut store) = setup(14);
        if let Some(object) = store.get_mut(3) {
            object.x = 42;
            object.y = 24;
        }
        let object = store.get(3).expect("index 3 exists");
        assert_eq!((object.x, object.y), (42, 24));
    }
}
