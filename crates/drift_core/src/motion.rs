//! Bounded random walk applied to every sprite once per fixed step.
//!
//! Motion is purely positional: each step adds an independent displacement in
//! `[-MAX_STEP, MAX_STEP]` on each axis, then clamps the sprite into the window
//! minus a `BORDER_INSET` margin. There is no velocity, so a sprite pinned
//! against a wall can move back inward on the very next step.

use rand::Rng;

use crate::objects::{Object, ObjectStore};
use crate::window_size::WindowSize;

/// Margin in pixels kept clear on every window edge.
pub const BORDER_INSET: i16 = 5;
/// Largest displacement per axis per step.
pub const MAX_STEP: i16 = 2;

pub fn step<R: Rng>(object: &mut Object, window: WindowSize, rng: &mut R) {
    let dx = rng.random_range(-MAX_STEP..=MAX_STEP);
    let dy = rng.random_range(-MAX_STEP..=MAX_STEP);
    object.x = object.x.saturating_add(dx);
    object.y = object.y.saturating_add(dy);
    clamp_to_border(object, window);
}

/// Clamp `object` into the inset border.
///
/// The lower bound is applied before the upper bound, so when a region is too
/// large for the window (`max < min`) the object ends up at the upper bound.
/// `WindowSize::check_fits` rejects such configurations up front.
pub fn clamp_to_border(object: &mut Object, window: WindowSize) {
    let (max_x, max_y) = upper_bounds(object, window);
    if object.x < BORDER_INSET {
        object.x = BORDER_INSET;
    }
    if object.x > max_x {
        object.x = max_x;
    }
    if object.y < BORDER_INSET {
        object.y = BORDER_INSET;
    }
    if object.y > max_y {
        object.y = max_y;
    }
}

/// Advance every object by one step, in index order.
pub fn step_all<R: Rng>(store: &mut ObjectStore, window: WindowSize, rng: &mut R) {
    for object in store.iter_mut() {
        step(object, window, rng);
    }
}

fn upper_bounds(object: &Object, window: WindowSize) -> (i16, i16) {
    let inset = BORDER_INSET as i32;
    let max_x = window.width as i32 - inset - object.region.width as i32;
    let max_y = window.height as i32 - inset - object.region.height as i32;
    (saturate_i16(max_x), saturate_i16(max_y))
}

fn saturate_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{AtlasCatalog, TextureRegion};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn region(width: u16, height: u16) -> Arc<TextureRegion> {
        Arc::new(TextureRegion {
            name: "test".to_string(),
            width,
            height,
            u1: 0.0,
            v1: 0.0,
            u2: 0.5,
            v2: 0.5,
        })
    }

    fn object_at(x: i16, y: i16, size: u16) -> Object {
        Object {
            x,
            y,
            region: region(size, size),
        }
    }

    #[test]
    fn objects_stay_inside_border_after_many_steps() {
        let window = WindowSize::new(200, 150).unwrap();
        let catalog = AtlasCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let mut store = ObjectStore::initialize(window, 500, &catalog, &mut rng);

        for _ in 0..300 {
            step_all(&mut store, window, &mut rng);
            for object in store.iter() {
                let max_x = window.width as i16 - BORDER_INSET - object.region.width as i16;
                let max_y = window.height as i16 - BORDER_INSET - object.region.height as i16;
                assert!((BORDER_INSET..=max_x).contains(&object.x));
                assert!((BORDER_INSET..=max_y).contains(&object.y));
            }
        }
    }

    #[test]
    fn interior_step_moves_at_most_two_pixels() {
        let window = WindowSize::new(400, 400).unwrap();
        let mut rng = StdRng::seed_from_u64(22);
        let mut object = object_at(150, 150, 16);

        let mut seen_dx = std::collections::HashSet::new();
        for _ in 0..500 {
            let (before_x, before_y) = (object.x, object.y);
            step(&mut object, window, &mut rng);
            let dx = object.x - before_x;
            let dy = object.y - before_y;
            assert!((-MAX_STEP..=MAX_STEP).contains(&dx));
            assert!((-MAX_STEP..=MAX_STEP).contains(&dy));
            seen_dx.insert(dx);
            // Recentre so the border never interferes.
            object.x = 150;
            object.y = 150;
        }
        assert_eq!(seen_dx.len(), 5, "all five displacements should occur");
    }

    #[test]
    fn clamp_pins_to_lower_and_upper_bounds() {
        let window = WindowSize::new(100, 80).unwrap();

        let mut low = object_at(-3, 2, 16);
        clamp_to_border(&mut low, window);
        assert_eq!((low.x, low.y), (5, 5));

        let mut high = object_at(99, 79, 16);
        clamp_to_border(&mut high, window);
        assert_eq!((high.x, high.y), (100 - 5 - 16, 80 - 5 - 16));
    }

    #[test]
    fn pinned_object_can_move_inward_immediately() {
        let window = WindowSize::new(100, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        let mut moved_inward = false;
        for _ in 0..100 {
            let mut object = object_at(BORDER_INSET, BORDER_INSET, 16);
            step(&mut object, window, &mut rng);
            assert!(object.x >= BORDER_INSET && object.y >= BORDER_INSET);
            if object.x > BORDER_INSET || object.y > BORDER_INSET {
                moved_inward = true;
            }
        }
        assert!(moved_inward);
    }

    #[test]
    fn inverted_bounds_resolve_to_upper_bound() {
        // 64 px region in a 60 px window: max (60 - 5 - 64 = -9) < min (5).
        let window = WindowSize::new(60, 60).unwrap();
        let mut object = object_at(20, 20, 64);
        clamp_to_border(&mut object, window);
        assert_eq!((object.x, object.y), (-9, -9));
    }
}
