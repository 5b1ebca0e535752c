//! Atlas catalog: the fixed table of sprite regions inside the shared texture sheet.
//!
//! The catalog is described by a small JSON metadata file (the same shape the
//! atlas tooling emits: a texture block plus a list of regions with pixel size
//! and UV rect). The built-in fruit sheet is embedded at compile time, so the
//! binary never depends on a metadata file being present next to it.
//!
//! Regions are handed out as `Arc<TextureRegion>` so every sprite of the same
//! kind shares one immutable region.

use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

const BUILTIN_ATLAS_JSON: &str = include_str!("../../../assets/atlas/fruit_atlas.json");
const SUPPORTED_VERSION: &str = "0.1";

/// Allowed mismatch (in pixels) between a region's declared size and the size
/// implied by its UV span over the texture.
const FOOTPRINT_TOLERANCE_PX: f32 = 0.5;

#[derive(Debug, Deserialize, Clone)]
struct AtlasFile {
    version: String,
    atlas_id: String,
    texture: AtlasTexture,
    regions: Vec<AtlasRegionEntry>,
}

#[derive(Debug, Deserialize, Clone)]
struct AtlasTexture {
    path: String,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize, Clone)]
struct AtlasRegionEntry {
    name: String,
    width: u16,
    height: u16,
    uv: AtlasUvRect,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct AtlasUvRect {
    u1: f32,
    v1: f32,
    u2: f32,
    v2: f32,
}

/// Pixel footprint and normalized UV rectangle of one sprite kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRegion {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

#[derive(Debug, Clone)]
pub struct AtlasCatalog {
    pub atlas_id: String,
    pub texture_path: String,
    pub texture_size: (u32, u32),
    regions: Vec<Arc<TextureRegion>>,
}

impl AtlasCatalog {
    /// The fruit sheet shipped with the game.
    pub fn builtin() -> Result<Self, String> {
        Self::from_json(BUILTIN_ATLAS_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let atlas: AtlasFile = serde_json::from_str(raw)
            .map_err(|e| format!("Failed to parse atlas metadata: {e}"))?;
        validate_atlas(&atlas)?;

        let regions = atlas
            .regions
            .into_iter()
            .map(|entry| {
                Arc::new(TextureRegion {
                    name: entry.name,
                    width: entry.width,
                    height: entry.height,
                    u1: entry.uv.u1,
                    v1: entry.uv.v1,
                    u2: entry.uv.u2,
                    v2: entry.uv.v2,
                })
            })
            .collect();

        Ok(Self {
            atlas_id: atlas.atlas_id,
            texture_path: atlas.texture.path,
            texture_size: (atlas.texture.width, atlas.texture.height),
            regions,
        })
    }

    /// Pick a region uniformly from every entry except the last one.
    ///
    /// Known quirk: the final catalog entry is never selected. Validation
    /// guarantees at least two regions so the range is never empty.
    pub fn pick_random<R: Rng>(&self, rng: &mut R) -> &Arc<TextureRegion> {
        let index = rng.random_range(0..self.regions.len() - 1);
        &self.regions[index]
    }

    pub fn regions(&self) -> &[Arc<TextureRegion>] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TextureRegion>> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Largest region width and height (not necessarily from the same region).
    pub fn max_region_size(&self) -> (u16, u16) {
        self.regions.iter().fold((0, 0), |(w, h), r| {
            (w.max(r.width), h.max(r.height))
        })
    }
}

fn validate_atlas(atlas: &AtlasFile) -> Result<(), String> {
    if atlas.version != SUPPORTED_VERSION {
        return Err(format!(
            "Atlas validation failed: unsupported version '{}'",
            atlas.version
        ));
    }
    if atlas.texture.width == 0 || atlas.texture.height == 0 {
        return Err("Atlas validation failed: texture width/height must be > 0".to_string());
    }
    // Random selection skips the last entry, so one region would leave nothing to pick.
    if atlas.regions.len() < 2 {
        return Err(format!(
            "Atlas validation failed: '{}' needs at least 2 regions, found {}",
            atlas.atlas_id,
            atlas.regions.len()
        ));
    }

    let mut names = HashSet::new();
    for region in &atlas.regions {
        if !names.insert(region.name.as_str()) {
            return Err(format!(
                "Atlas validation failed: duplicate region '{}'",
                region.name
            ));
        }
        if region.width == 0 || region.height == 0 {
            return Err(format!(
                "Atlas validation failed: region '{}' has zero size",
                region.name
            ));
        }
        let uv = region.uv;
        if !(0.0..=1.0).contains(&uv.u1)
            || !(0.0..=1.0).contains(&uv.v1)
            || !(0.0..=1.0).contains(&uv.u2)
            || !(0.0..=1.0).contains(&uv.v2)
        {
            return Err(format!(
                "Atlas validation failed: region '{}' has UV outside [0, 1]",
                region.name
            ));
        }
        if uv.u1 >= uv.u2 || uv.v1 >= uv.v2 {
            return Err(format!(
                "Atlas validation failed: region '{}' has invalid UV range",
                region.name
            ));
        }

        let span_w = (uv.u2 - uv.u1) * atlas.texture.width as f32;
        let span_h = (uv.v2 - uv.v1) * atlas.texture.height as f32;
        if (span_w - region.width as f32).abs() > FOOTPRINT_TOLERANCE_PX
            || (span_h - region.height as f32).abs() > FOOTPRINT_TOLERANCE_PX
        {
            return Err(format!(
                "Atlas validation failed: region '{}' is {}x{} but its UV rect covers {:.1}x{:.1} pixels",
                region.name, region.width, region.height, span_w, span_h
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn atlas_json(regions: &str) -> String {
        format!(
            r#"{{
              "version": "0.1",
              "atlas_id": "test",
              "texture": {{ "path": "test.png", "width": 64, "height": 64 }},
              "regions": [{regions}]
            }}"#
        )
    }

    const TWO_REGIONS: &str = r#"
        { "name": "a", "width": 32, "height": 32, "uv": { "u1": 0.0, "v1": 0.0, "u2": 0.5, "v2": 0.5 } },
        { "name": "b", "width": 32, "height": 32, "uv": { "u1": 0.5, "v1": 0.0, "u2": 1.0, "v2": 0.5 } }
    "#;

    #[test]
    fn builtin_catalog_has_fruit_layout() {
        let catalog = AtlasCatalog::builtin().expect("builtin atlas should load");
        assert_eq!(catalog.atlas_id, "fruit");
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.texture_size, (128, 128));

        let sizes: Vec<u16> = catalog.regions().iter().map(|r| r.width).collect();
        assert_eq!(sizes, vec![64, 64, 32, 32, 32, 32, 16, 16, 16]);

        let watermelon = catalog.get("watermelon").expect("watermelon region");
        assert_eq!(
            (watermelon.u1, watermelon.v1, watermelon.u2, watermelon.v2),
            (0.0, 0.0, 0.5, 0.5)
        );
        assert_eq!(catalog.regions().last().map(|r| r.name.as_str()), Some("raspberry"));
        assert_eq!(catalog.max_region_size(), (64, 64));
    }

    #[test]
    fn pick_random_never_returns_last_entry() {
        let catalog = AtlasCatalog::builtin().expect("builtin atlas should load");
        let last = catalog.regions().last().expect("non-empty catalog").clone();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            let picked = catalog.pick_random(&mut rng);
            assert!(!Arc::ptr_eq(picked, &last));
            seen.insert(picked.name.clone());
        }
        // Every other entry is reachable.
        assert_eq!(seen.len(), catalog.len() - 1);
    }

    #[test]
    fn picked_regions_are_shared_not_copied() {
        let catalog = AtlasCatalog::builtin().expect("builtin atlas should load");
        let mut rng = StdRng::seed_from_u64(1);
        let picked = catalog.pick_random(&mut rng).clone();
        let original = catalog.get(&picked.name).expect("picked region is in catalog");
        assert!(Arc::ptr_eq(&picked, original));
    }

    #[test]
    fn from_json_accepts_minimal_catalog() {
        let catalog = AtlasCatalog::from_json(&atlas_json(TWO_REGIONS)).expect("should parse");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.texture_path, "test.png");

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(catalog.pick_random(&mut rng).name, "a");
        }
    }

    #[test]
    fn from_json_rejects_single_region() {
        let json = atlas_json(
            r#"{ "name": "a", "width": 32, "height": 32, "uv": { "u1": 0.0, "v1": 0.0, "u2": 0.5, "v2": 0.5 } }"#,
        );
        let err = AtlasCatalog::from_json(&json).expect_err("single region should fail");
        assert!(err.contains("at least 2 regions"));
    }

    #[test]
    fn from_json_rejects_inverted_uv() {
        let json = atlas_json(
            r#"
            { "name": "a", "width": 32, "height": 32, "uv": { "u1": 0.5, "v1": 0.0, "u2": 0.0, "v2": 0.5 } },
            { "name": "b", "width": 32, "height": 32, "uv": { "u1": 0.5, "v1": 0.0, "u2": 1.0, "v2": 0.5 } }
            "#,
        );
        let err = AtlasCatalog::from_json(&json).expect_err("inverted uv should fail");
        assert!(err.contains("invalid UV range"));
    }

    #[test]
    fn from_json_rejects_uv_outside_unit_square() {
        let json = atlas_json(
            r#"
            { "name": "a", "width": 32, "height": 32, "uv": { "u1": 0.0, "v1": 0.0, "u2": 0.5, "v2": 0.5 } },
            { "name": "b", "width": 32, "height": 32, "uv": { "u1": 0.75, "v1": 0.0, "u2": 1.25, "v2": 0.5 } }
            "#,
        );
        let err = AtlasCatalog::from_json(&json).expect_err("uv > 1 should fail");
        assert!(err.contains("outside [0, 1]"));
    }

    #[test]
    fn from_json_rejects_duplicate_names() {
        let json = atlas_json(
            r#"
            { "name": "a", "width": 32, "height": 32, "uv": { "u1": 0.0, "v1": 0.0, "u2": 0.5, "v2": 0.5 } },
            { "name": "a", "width": 32, "height": 32, "uv": { "u1": 0.5, "v1": 0.0, "u2": 1.0, "v2": 0.5 } }
            "#,
        );
        let err = AtlasCatalog::from_json(&json).expect_err("duplicate should fail");
        assert!(err.contains("duplicate region 'a'"));
    }

    #[test]
    fn from_json_rejects_footprint_mismatch() {
        let json = atlas_json(
            r#"
            { "name": "a", "width": 20, "height": 32, "uv": { "u1": 0.0, "v1": 0.0, "u2": 0.5, "v2": 0.5 } },
            { "name": "b", "width": 32, "height": 32, "uv": { "u1": 0.5, "v1": 0.0, "u2": 1.0, "v2": 0.5 } }
            "#,
        );
        let err = AtlasCatalog::from_json(&json).expect_err("mismatched footprint should fail");
        assert!(err.contains("region 'a' is 20x32"));
    }

    #[test]
    fn from_json_rejects_unknown_version() {
        let json = atlas_json(TWO_REGIONS).replace("\"0.1\"", "\"9.9\"");
        let err = AtlasCatalog::from_json(&json).expect_err("version should fail");
        assert!(err.contains("unsupported version '9.9'"));
    }
}
