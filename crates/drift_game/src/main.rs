//! Sprite Drift -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler` in
//! `ControlFlow::Poll` mode. Each `RedrawRequested` runs one iteration:
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed the accumulator,
//!      maybe emit a once-per-second timing report
//!   2. `while should_step()` -- one `Simulation::tick` per fixed 10 ms slice
//!      (random walk for every sprite, then a full position-buffer rebuild)
//!   3. upload the position stream if any tick ran, clear, draw every sprite
//!      in a single call, present
//!
//! Window events are delivered by winit between iterations (the poll phase).
//! Closing the window exits the loop; all GPU resources are owned by
//! `EngineState` and released when it drops.

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use config::{Args, GameConfig};
use drift_core::{AtlasCatalog, Simulation, TimeState, OBJECT_COUNT};
use drift_render::{GpuContext, SpriteBatch, SpritePipeline, Texture, WindowUniform};
use error::DriftError;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.25,
    b: 0.3,
    a: 1.0,
};

/// All mutable engine state. Constructed in `ApplicationHandler::resumed`
/// once the event loop can create windows.
///
/// Field order is drop order: GPU objects that depend on the device go before
/// `gpu`, and `window` outlives the surface.
struct EngineState {
    time: TimeState,
    simulation: Simulation,

    sprite_batch: SpriteBatch,
    window_bind_group: wgpu::BindGroup,
    _window_buffer: wgpu::Buffer,
    texture_bind_group: wgpu::BindGroup,
    _atlas_texture: Texture,
    sprite_pipeline: SpritePipeline,
    gpu: GpuContext,
    window: Arc<Window>,
}

impl EngineState {
    /// Startup order matters; each step needs the one before it.
    fn new(
        event_loop: &ActiveEventLoop,
        config: &GameConfig,
        catalog: &AtlasCatalog,
    ) -> Result<Self, DriftError> {
        let window = drift_platform::window::create_window(event_loop, &config.platform)?;
        log::info!(
            "Window created: {}x{}",
            config.platform.width,
            config.platform.height
        );

        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format)?;

        let atlas_texture =
            Texture::from_path(&gpu.device, &gpu.queue, Path::new(&catalog.texture_path))?;
        if atlas_texture.size != catalog.texture_size {
            log::warn!(
                "Atlas texture '{}' is {}x{} but metadata declares {}x{}",
                catalog.texture_path,
                atlas_texture.size.0,
                atlas_texture.size.1,
                catalog.texture_size.0,
                catalog.texture_size.1
            );
        }
        let texture_bind_group =
            sprite_pipeline.create_texture_bind_group(&gpu.device, &atlas_texture);
        log::info!("Atlas '{}' loaded from {}", catalog.atlas_id, catalog.texture_path);

        let simulation = Simulation::new(
            config.window,
            OBJECT_COUNT,
            catalog,
            StdRng::from_os_rng(),
        )
        .map_err(DriftError::Config)?;
        let sprite_batch = SpriteBatch::new(&gpu.device, simulation.mesh());

        let window_uniform = WindowUniform::new(config.window);
        let window_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Window Uniform Buffer"),
                contents: bytemuck::cast_slice(&[window_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let window_bind_group =
            sprite_pipeline.create_window_bind_group(&gpu.device, &window_buffer);

        Ok(Self {
            time: TimeState::new(),
            simulation,
            sprite_batch,
            window_bind_group,
            _window_buffer: window_buffer,
            texture_bind_group,
            _atlas_texture: atlas_texture,
            sprite_pipeline,
            gpu,
            window,
        })
    }

    /// One loop iteration: integrate fixed steps, then present.
    fn frame(&mut self) {
        if let Some(report) = self.time.begin_frame() {
            log::info!(
                "{:.3}ms frame, {} fps",
                report.frame_time_ms,
                report.frames
            );
        }

        while self.time.should_step() {
            self.simulation.tick();
        }

        // Nothing moved when no step ran; the GPU copy is still current.
        if self.time.steps_this_frame > 0 {
            self.sprite_batch
                .upload_positions(&self.gpu.queue, self.simulation.mesh().positions());
        }

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.window_bind_group, &[]);
            render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
            self.sprite_batch.draw(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl Drop for EngineState {
    fn drop(&mut self) {
        log::info!(
            "Shutting down after {} frames, {} fixed steps ({:.2}s simulated)",
            self.time.frame_count,
            self.time.fixed_step_count,
            self.time.total_time
        );
    }
}

struct App {
    config: GameConfig,
    catalog: AtlasCatalog,
    state: Option<EngineState>,
    fatal: Option<DriftError>,
}

impl App {
    fn new(config: GameConfig, catalog: AtlasCatalog) -> Self {
        Self {
            config,
            catalog,
            state: None,
            fatal: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.fatal.is_some() {
            return;
        }
        match EngineState::new(event_loop, &self.config, &self.catalog) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                state
                    .gpu
                    .resize(physical_size.width, physical_size.height);
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                state.frame();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU resources while the event loop still owns the window.
        self.state = None;
    }
}

fn run(args: Args) -> Result<(), DriftError> {
    let catalog = AtlasCatalog::builtin().map_err(DriftError::Atlas)?;
    let config = GameConfig::from_args(args, &catalog)?;

    log::info!("Sprite Drift starting...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, catalog);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
