use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use throttled_life::config::{
    CELL_SIZE, DEFAULT_RANDOM_BIAS, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
use throttled_life::simulation::seed;
use throttled_life::{Grid, RenderSink, SimulationClock};

use crate::gpu::{GpuContext, GridBuffers, RenderPipeline};

/// Render sink that stages each generation as `u32` words for the next GPU upload
#[derive(Default)]
pub struct GridUpload {
    pending: Option<Vec<u32>>,
}

impl GridUpload {
    fn stage(&mut self, grid: &Grid) {
        self.pending = Some(encode_cells(grid));
    }

    fn take(&mut self) -> Option<Vec<u32>> {
        self.pending.take()
    }
}

impl RenderSink for GridUpload {
    fn render(&mut self, grid: &Grid) {
        self.stage(grid);
    }
}

fn encode_cells(grid: &Grid) -> Vec<u32> {
    grid.cells().iter().map(|&alive| u32::from(alive)).collect()
}

/// Grid dimensions that fit a window of the given physical size.
///
/// `None` for a minimized window or one smaller than a single cell.
fn grid_size_for(size: PhysicalSize<u32>) -> Option<(usize, usize)> {
    let (width, height) = (size.width / CELL_SIZE, size.height / CELL_SIZE);
    (width > 0 && height > 0).then_some((width as usize, height as usize))
}

/// GPU resources that live as long as the window
struct Renderer {
    gpu: GpuContext,
    buffers: GridBuffers,
    pipeline: RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl Renderer {
    /// Recreate the cell buffer when the grid changed size, then upload it
    fn sync_grid(&mut self, grid: &Grid) {
        let (width, height) = (grid.width() as u32, grid.height() as u32);
        let cells = encode_cells(grid);
        if self.buffers.matches(width, height) {
            self.buffers.upload_cells(&self.gpu.queue, &cells);
        } else {
            let gpu = &self.gpu;
            self.buffers = GridBuffers::new(&gpu.device, &gpu.queue, width, height, &cells);
            self.bind_group = self.pipeline.create_bind_group(&self.gpu.device, &self.buffers);
        }
    }
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    clock: SimulationClock<GridUpload>,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(clock: SimulationClock<GridUpload>) -> Self {
        Self {
            window: None,
            renderer: None,
            clock,
            fps_counter: FpsCounter::new(),
        }
    }

    fn render(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        if self.clock.is_running() {
            if let Err(e) = self.clock.tick() {
                log::error!("Tick failed: {}", e);
                self.clock.stop();
            }
        }
        if let Some(cells) = self.clock.sink_mut().take() {
            renderer.buffers.upload_cells(&renderer.gpu.queue, &cells);
        }

        let gpu = &renderer.gpu;
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        renderer
            .pipeline
            .draw(&mut encoder, &view, &renderer.bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let state = if self.clock.is_running() { "" } else { " [Paused]" };
                window.set_title(&format!(
                    "Life - {:.0} FPS - Generation {}{}",
                    fps,
                    self.clock.generation(),
                    state
                ));
            }
        }
    }

    /// Run an idle-only reconfiguration, restarting the clock if it was running
    fn reconfigure<F>(&mut self, change: F)
    where
        F: FnOnce(&mut SimulationClock<GridUpload>) -> throttled_life::Result<()>,
    {
        let was_running = self.clock.is_running();
        self.clock.stop();

        if let Err(e) = change(&mut self.clock) {
            log::error!("Reconfiguration failed: {}", e);
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.sync_grid(self.clock.grid());
        }

        if was_running {
            self.clock.start();
        }
    }

    fn handle_viewport(&mut self, size: PhysicalSize<u32>) {
        let Some((width, height)) = grid_size_for(size) else {
            log::debug!("Ignoring {}x{} viewport", size.width, size.height);
            return;
        };
        self.reconfigure(|clock| clock.resize(width, height));
    }

    fn reseed(&mut self) {
        let (width, height) = (self.clock.grid().width(), self.clock.grid().height());
        self.reconfigure(|clock| {
            let grid = seed::random(width, height, DEFAULT_RANDOM_BIAS, &mut rand::thread_rng())?;
            clock.reseed(grid)
        });
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                if self.clock.is_running() {
                    self.clock.stop();
                } else {
                    self.clock.start();
                }
            }
            KeyCode::KeyR => self.reseed(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Life - Initializing...")
            .with_inner_size(winit::dpi::LogicalSize::new(
                DEFAULT_WINDOW_WIDTH,
                DEFAULT_WINDOW_HEIGHT,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Some((width, height)) = grid_size_for(window.inner_size()) {
            if let Err(e) = self.clock.resize(width, height) {
                log::error!("Initial resize failed: {}", e);
            }
        }
        let grid = self.clock.grid();
        log::info!("Grid size: {}x{}", grid.width(), grid.height());

        let buffers = GridBuffers::new(
            &gpu.device,
            &gpu.queue,
            grid.width() as u32,
            grid.height() as u32,
            &encode_cells(grid),
        );
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(&gpu.device, &buffers);

        log::info!("Controls:");
        log::info!("  Space: Start/stop");
        log::info!("  R: Reseed");
        log::info!("  Escape: Quit");

        self.renderer = Some(Renderer {
            gpu,
            buffers,
            pipeline,
            bind_group,
        });
        self.clock.start();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.gpu.resize(new_size);
                }
                self.handle_viewport(new_size);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
