//! Simulation builder and window runner.
//!
//! [`Simulation`] configures a [`ParticleFlow`] and drives it: one tick
//! per display frame, then a buffer upload and a render. The flow itself
//! never touches the window or the GPU, so it stays testable headless.

use crate::error::SimulationError;
use crate::field::NoiseField;
use crate::flow::{ParticleFlow, SteerParams};
use crate::gpu::GpuState;
use crate::pool::SpawnParams;
use crate::time::Time;
use glam::Mat4;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Tilt of the whole cloud, from the reference visual.
const CLOUD_TILT: f32 = 0.5;
/// Slow automatic rotation of the cloud, radians per frame.
const CLOUD_SPIN: f32 = 0.003;

/// A particle flow visual builder.
///
/// Use method chaining to configure, then call `.run()` to open a window
/// and start ticking.
///
/// ```ignore
/// use driftfield::Simulation;
///
/// Simulation::new()
///     .with_particle_count(20_000)
///     .with_seed(7)
///     .run()?;
/// ```
pub struct Simulation {
    particle_count: usize,
    seed: u64,
    spawn: Option<SpawnParams>,
    steer: SteerParams,
    noise: Option<Box<dyn NoiseField>>,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self {
            particle_count: 20_000,
            seed: seed_from_clock(),
            spawn: None,
            steer: SteerParams::default(),
            noise: None,
        }
    }

    /// Set the number of particles. Fixed for the whole run.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Seed the spawn RNG and the noise field. Equal seeds reproduce
    /// the same run; the default seed comes from the clock.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the spawn ranges (sphere radius, speed, lifetime).
    pub fn with_spawn_params(mut self, spawn: SpawnParams) -> Self {
        self.spawn = Some(spawn);
        self
    }

    /// Override the steering constants.
    pub fn with_steer_params(mut self, steer: SteerParams) -> Self {
        self.steer = steer;
        self
    }

    /// Replace the steering noise field.
    pub fn with_noise(mut self, noise: impl NoiseField + 'static) -> Self {
        self.noise = Some(Box::new(noise));
        self
    }

    /// Open a window and run the visual. Blocks until the window closes.
    pub fn run(self) -> Result<(), SimulationError> {
        let mut flow = ParticleFlow::new(self.particle_count, self.seed).with_steer(self.steer);
        if let Some(spawn) = self.spawn {
            flow = flow.with_spawn(spawn, self.seed);
        }
        if let Some(noise) = self.noise {
            flow = flow.with_boxed_noise(noise);
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(flow);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

struct App {
    flow: ParticleFlow,
    time: Time,
    spin: f32,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    fn new(flow: ParticleFlow) -> Self {
        Self {
            flow,
            time: Time::new(),
            spin: 0.0,
            window: None,
            gpu: None,
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("driftfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("{}", SimulationError::Window(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, self.flow.pool())) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                eprintln!("{}", SimulationError::Gpu(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.time.toggle_pause();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(gpu) = &mut self.gpu {
                            gpu.camera.orbit(dx, dy);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu) = &mut self.gpu {
                    gpu.camera.dolly(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                let (elapsed, _) = self.time.update();

                if !self.time.is_paused() {
                    // The tick must fully finish before the upload: the
                    // renderer only ever sees whole frames.
                    self.flow.tick();
                    self.spin += CLOUD_SPIN;
                    if let Some(gpu) = &self.gpu {
                        gpu.upload(self.flow.pool());
                    }
                }

                let model = Mat4::from_rotation_y(self.spin) * Mat4::from_rotation_x(CLOUD_TILT);
                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(elapsed, model) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu.resize(winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }

                if let Some(window) = &self.window {
                    if self.time.frame() % 30 == 0 {
                        window.set_title(&format!(
                            "driftfield | {} particles | {:.0} fps",
                            self.flow.pool().count(),
                            self.time.fps()
                        ));
                    }
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
