use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

use boxroom_physics::PhysicsWorld;
use boxroom_render::RenderView;
use boxroom_render_wgpu::{BoxRenderer, LookAtCamera};
use boxroom_scene::{bootstrap, SceneSpec};
use boxroom_sim::{SimContext, SimSettings};

#[derive(Parser)]
#[command(name = "boxroom-desktop", about = "Boxroom desktop sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the periodic random perturbation
    #[arg(long)]
    still: bool,
}

struct SandboxApp {
    physics: PhysicsWorld,
    spec: SceneSpec,
    ctx: SimContext,
    last_frame: Instant,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<BoxRenderer>,
    camera: Option<LookAtCamera>,
}

impl SandboxApp {
    fn new(settings: SimSettings) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        let spec = SceneSpec::default();
        let handles = bootstrap(&mut physics, &spec)?;
        let ctx = SimContext::new(handles.cube, settings);

        Ok(Self {
            physics,
            spec,
            ctx,
            last_frame: Instant::now(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            camera: None,
        })
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        // Press edges only; repeats arrive as further presses, matching
        // the host's keydown semantics.
        if event.state != ElementState::Pressed {
            return;
        }
        if let Key::Character(text) = &event.logical_key {
            if let Some(key) = text.chars().next() {
                self.ctx.push_key(key);
            }
        }
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Boxroom")
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

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("boxroom_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let camera = LookAtCamera::new(
            &RenderView::from(self.spec.camera),
            size.width,
            size.height,
        );
        let renderer = BoxRenderer::new(
            &device,
            surface_format,
            size.width,
            size.height,
            self.spec.light.direction,
            self.spec.cube.color,
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.camera = Some(camera);
        self.last_frame = Instant::now();

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
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
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(camera) = &mut self.camera {
                        camera.set_aspect(config.width, config.height);
                    }
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32().min(0.1);
                self.last_frame = now;

                if let Err(e) = self.ctx.pump(dt, &mut self.physics) {
                    tracing::error!("simulation error: {e}");
                }

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let (Some(renderer), Some(camera)) = (&self.renderer, &self.camera) {
                    renderer.render(device, queue, &view, camera, &self.physics);
                }

                output.present();
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

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut settings = match &cli.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };
    if cli.still {
        settings.random_motion = false;
    }

    tracing::info!(
        random_motion = settings.random_motion,
        "boxroom-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SandboxApp::new(settings)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
