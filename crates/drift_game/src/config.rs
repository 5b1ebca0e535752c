use clap::Parser;
use drift_core::{AtlasCatalog, WindowSize};
use drift_platform::window::{PlatformConfig, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};

use crate::error::DriftError;

#[derive(Debug, Parser)]
#[command(
    name = "sprite_drift",
    about = "Atlas-textured sprites drifting on a fixed timestep"
)]
pub struct Args {
    /// Game window title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub window_title: String,

    /// Game window width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub window_width: u32,

    /// Game window height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub window_height: u32,
}

/// Validated startup configuration. Built before any window or GPU resource
/// is acquired.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub platform: PlatformConfig,
    pub window: WindowSize,
}

impl GameConfig {
    pub fn from_args(args: Args, catalog: &AtlasCatalog) -> Result<Self, DriftError> {
        let window =
            WindowSize::new(args.window_width, args.window_height).map_err(DriftError::Config)?;
        window.check_fits(catalog).map_err(DriftError::Config)?;

        Ok(Self {
            platform: PlatformConfig {
                title: args.window_title,
                width: window.width,
                height: window.height,
            },
            window,
        })
    }
}
