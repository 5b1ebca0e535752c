use crate::atlas::AtlasCatalog;
use crate::motion::BORDER_INSET;

/// Window extents as seen by the simulation.
///
/// Sprite coordinates are stored as `i16`, so both extents must fit that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        let max = i16::MAX as u32;
        if width == 0 || height == 0 {
            return Err(format!(
                "window size {width}x{height} is empty; both extents must be > 0"
            ));
        }
        if width > max || height > max {
            return Err(format!(
                "window size {width}x{height} exceeds the {max} pixel limit of the vertex format"
            ));
        }
        Ok(Self { width, height })
    }

    /// Check that every catalog region fits between the border insets.
    ///
    /// A window narrower than `2 * BORDER_INSET + region width` would invert
    /// the clamp range of the motion integrator.
    pub fn check_fits(&self, catalog: &AtlasCatalog) -> Result<(), String> {
        let (max_w, max_h) = catalog.max_region_size();
        let min_width = 2 * BORDER_INSET as u32 + max_w as u32;
        let min_height = 2 * BORDER_INSET as u32 + max_h as u32;
        if self.width < min_width || self.height < min_height {
            return Err(format!(
                "window size {}x{} is too small for atlas '{}': need at least {}x{}",
                self.width, self.height, catalog.atlas_id, min_width, min_height
            ));
        }
        Ok(())
    }

    /// Half extents used by the vertex stage to map pixels to clip space.
    pub fn half_extents(&self) -> [f32; 2] {
        [self.width as f32 / 2.0, self.height as f32 / 2.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_extent() {
        assert!(WindowSize::new(0, 600).is_err());
        assert!(WindowSize::new(800, 0).is_err());
    }

    #[test]
    fn rejects_extent_beyond_i16() {
        let err = WindowSize::new(40_000, 600).expect_err("too wide");
        assert!(err.contains("32767"));
        assert!(WindowSize::new(32_767, 32_767).is_ok());
    }

    #[test]
    fn check_fits_requires_border_plus_largest_region() {
        let catalog = AtlasCatalog::builtin().expect("builtin atlas");
        // Largest fruit is 64 px, border is 5 px on each side.
        assert!(WindowSize::new(74, 74).unwrap().check_fits(&catalog).is_ok());

        let err = WindowSize::new(73, 400)
            .unwrap()
            .check_fits(&catalog)
            .expect_err("one pixel short");
        assert!(err.contains("need at least 74x74"));
    }

    #[test]
    fn half_extents_match_window() {
        let size = WindowSize::new(1440, 810).unwrap();
        assert_eq!(size.half_extents(), [720.0, 405.0]);
    }
}
