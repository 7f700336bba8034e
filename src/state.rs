use crate::render::{
    create_cell_buffer, create_render_bind_group, create_render_bind_group_layout, create_render_pipeline,
    upload_damage, GridParams, RenderParams,
};
use crate::ui;
use anyhow::Context as _;
use life_view::{Command, Config, Simulation};
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalSize,
    window::Window,
};
use std::sync::Arc;

// GUI Imports
use egui_winit::State as EguiWinitState;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui::Context as EguiContext;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub config: Config,
    pub sim: Simulation,

    pub cell_buffer: wgpu::Buffer,
    pub render_param_buffer: wgpu::Buffer,
    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group: wgpu::BindGroup,

    pub hover: Option<(usize, usize)>,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
}

impl State {
    pub async fn new(window: Arc<Window>, config: Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create drawing surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context("failed to find an appropriate adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                },
                None,
            )
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // egui expects a linear target; fall back to whatever the surface offers
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface is incompatible with the adapter")?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // Create Grid Resources
        let sim = Simulation::with_startup_pattern(&config);
        let cell_buffer = create_cell_buffer(&device, sim.grid());
        let grid_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Parameters"),
            contents: bytemuck::bytes_of(&GridParams::new(&config)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        // Create Render Resources
        let render_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Render Parameters"),
            contents: bytemuck::bytes_of(&RenderParams::new(&config, None)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline = create_render_pipeline(&device, &render_bind_group_layout, surface_config.format);
        let render_bind_group = create_render_bind_group(
            &device, &render_bind_group_layout, &cell_buffer, &grid_param_buffer, &render_param_buffer,
        );

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = EguiWgpuRenderer::new(&device, surface_config.format, None, 1);
        log::info!("egui initialized.");

        log::info!(
            "wgpu initialized successfully: {}x{} surface, {}x{} grid",
            surface_config.width,
            surface_config.height,
            sim.grid().width(),
            sim.grid().height()
        );

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            size,
            window,
            config,
            sim,
            cell_buffer,
            render_param_buffer,
            render_pipeline,
            render_bind_group,
            hover: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        })
    }

    /// Reconfigure the surface. The grid keeps its size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.device, &self.surface_config);
            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Advance the simulation by at most one generation.
    pub fn update(&mut self) {
        self.sim.tick();
    }

    /// Draw the grid and the header, then apply any header button presses.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let damage = self.sim.take_damage();
        upload_damage(&self.queue, &self.cell_buffer, self.sim.grid(), damage);
        self.queue.write_buffer(
            &self.render_param_buffer,
            0,
            bytemuck::bytes_of(&RenderParams::new(&self.config, self.hover)),
        );

        let output_frame = self.surface.get_current_texture()?;
        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        // --- Header UI ---
        let pixels_per_point = self.window.scale_factor() as f32;
        let header_points = self.config.header_height as f32 / pixels_per_point;
        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        let mut commands: Vec<Command> = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            commands = ui::header(ctx, &self.sim, self.hover, header_points);
        });
        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);
        let paint_jobs = self.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let egui_commands = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle

            // Header on top of the grid
            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();

        for command in commands {
            self.sim.apply(command);
        }
        Ok(())
    }
}
