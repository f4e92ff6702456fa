//! Cell Lattice entry point
//!
//! Thin host glue: window creation, wgpu surface bootstrap, and the
//! redraw-driven tick loop. All animation math lives in the library.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use cell_lattice::consts::{LATTICE_SIZE, LATTICE_SPACING};
use cell_lattice::renderer::RenderState;
use cell_lattice::scene::AnimationContext;

struct App {
    ctx: AnimationContext,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
}

impl App {
    fn new(ctx: AnimationContext) -> Self {
        Self {
            ctx,
            window: None,
            render_state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Cell Lattice")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        self.ctx.camera.aspect = width as f32 / height as f32;

        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            width,
            height,
            &self.ctx.bodies,
        ));

        self.window = Some(window);
        self.render_state = Some(render_state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                // Viewport-only update; lattice and rotation state untouched
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(new_size.width, new_size.height);
                    self.ctx.camera.aspect =
                        new_size.width.max(1) as f32 / new_size.height.max(1) as f32;
                }
            }
            WindowEvent::RedrawRequested => {
                self.ctx.tick();

                if let Some(render_state) = &mut self.render_state {
                    match render_state.render(&self.ctx) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let (w, h) = render_state.size;
                            render_state.resize(w, h);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of memory!");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Cell Lattice starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let ctx = match AnimationContext::new(LATTICE_SIZE, LATTICE_SPACING, seed) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Lattice generation failed: {e}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(ctx);
    event_loop.run_app(&mut app).expect("run event loop");
}
