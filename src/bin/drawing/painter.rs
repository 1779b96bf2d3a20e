use winit::{
    dpi::LogicalSize,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::app_state::AppState;
use crate::config::CONFIG;

/// Owns the window and the GPU surface the HUD is drawn onto.
pub struct Painter {
    pub window: Window,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    surface: wgpu::Surface,
}

impl Painter {
    pub fn init(event_loop: &EventLoop<()>, width: u32, height: u32) -> Self {
        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let window = WindowBuilder::new()
            .with_title(CONFIG.window.title.as_str())
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .build(event_loop)
            .expect("Could not create a window.");
        let surface = unsafe { instance.create_surface(&window) };

        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            }))
            .expect("No suitable GPU adapter found.");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))
        .expect("Could not request the GPU device.");

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface
                .get_preferred_format(&adapter)
                .expect("The surface is incompatible with the adapter."),
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
        };
        surface.configure(&device, &surface_config);

        Self {
            window,
            device,
            queue,
            surface_config,
            surface,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        // A minimized window reports a zero extent the surface rejects.
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn paint(&mut self, hud: &mut super::ui::Hud, app_state: &mut AppState) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated) | Err(wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(e) => {
                log::warn!("Could not acquire the next frame. Reason:\r\n{}", e);
                return;
            }
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        hud.paint(
            app_state,
            &self.window,
            &mut self.device,
            &self.queue,
            &mut encoder,
            &frame,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}
