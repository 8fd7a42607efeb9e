//! Window creation and event handling via winit.
//!
//! [`App`] implements winit's [`ApplicationHandler`]: it creates the window
//! and GPU context on resume, builds the scene, and drives the per-frame
//! update/render cycle from `RedrawRequested`.

use std::sync::Arc;
use std::time::Instant;

use tellus_config::Config;
use tellus_controls::{OrbitController, ViewState};
use tellus_globe::{AtmosphereRenderer, GlobeRenderer};
use tellus_render::{
    Camera, DEPTH_CLEAR_VALUE, DepthBuffer, FrameError, GpuContext, GpuTexture, Viewport,
    ViewportChange, camera_bind_group_layout, init_gpu_blocking, load_texture,
    placeholder_texture, texture_bind_group_layout,
};
use tellus_starfield::{StarRenderer, StarStyle, StarfieldGenerator};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::input::DragTracker;

/// Window attributes derived from config.
fn window_attributes(config: &Config) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs = attrs.with_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
    }
    attrs
}

/// GPU resources for the scene, created once after device initialization.
struct Scene {
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_buffer: DepthBuffer,
    globe_texture: GpuTexture,
    globe: GlobeRenderer,
    atmosphere: AtmosphereRenderer,
    stars: StarRenderer,
}

/// Application state: window, GPU context, scene, controls.
pub struct App {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    scene: Option<Scene>,
    viewport: Viewport,
    camera: Camera,
    orbit: OrbitController,
    view_state: ViewState,
    drag: DragTracker,
    frame_clock: FrameClock,
    stats_window_start: Instant,
    stats_frames: u32,
}

impl App {
    /// Create the application from a loaded config. No GPU work happens
    /// until the event loop delivers `resumed`.
    pub fn new(config: Config) -> Self {
        let camera = Camera {
            fov_y: config.camera.fov_degrees.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            aspect_ratio: config.window.width as f32 / config.window.height.max(1) as f32,
            ..Camera::default()
        };
        let orbit = OrbitController::new(&config.controls, config.camera.start_distance);
        let view_state = ViewState::new(config.controls.auto_rotate);
        let viewport = Viewport::new(
            config.window.width,
            config.window.height,
            1.0,
            config.window.max_pixel_ratio,
        );

        Self {
            config,
            window: None,
            gpu: None,
            scene: None,
            viewport,
            camera,
            orbit,
            view_state,
            drag: DragTracker::new(),
            frame_clock: FrameClock::new(),
            stats_window_start: Instant::now(),
            stats_frames: 0,
        }
    }

    /// Build all GPU-side scene resources.
    fn build_scene(&self, gpu: &GpuContext) -> Result<Scene, tellus_starfield::SampleError> {
        use wgpu::util::DeviceExt;

        let camera_layout = camera_bind_group_layout(&gpu.device);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("camera-uniform"),
                contents: bytemuck::bytes_of(&self.camera.to_uniform()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = texture_bind_group_layout(&gpu.device);
        let globe_texture = match load_texture(
            &gpu.device,
            &gpu.queue,
            &texture_layout,
            &self.config.globe.texture_path,
        ) {
            Ok(texture) => {
                info!("Globe texture loaded");
                texture
            }
            Err(e) => {
                error!("Globe texture unavailable, using placeholder: {e}");
                placeholder_texture(&gpu.device, &gpu.queue, &texture_layout)
            }
        };

        let globe = GlobeRenderer::new(
            &gpu.device,
            gpu.surface_format,
            &camera_layout,
            &texture_layout,
            1.0,
            self.config.globe.segments,
            self.config.globe.rings,
        );
        let atmosphere = AtmosphereRenderer::new(
            &gpu.device,
            gpu.surface_format,
            &camera_layout,
            self.config.globe.atmosphere_scale,
            self.config.globe.segments,
            self.config.globe.rings,
        );

        let starfield = &self.config.starfield;
        let catalog = StarfieldGenerator::new(
            starfield.seed,
            starfield.star_count,
            starfield.min_radius,
            starfield.max_radius,
        )?
        .generate()?;
        let stars = StarRenderer::new(
            &gpu.device,
            gpu.surface_format,
            &camera_layout,
            &catalog,
            StarStyle {
                size: starfield.star_size,
                opacity: starfield.star_opacity,
            },
        );

        let depth_buffer = DepthBuffer::new(
            &gpu.device,
            self.viewport.render_width(),
            self.viewport.render_height(),
        );

        Ok(Scene {
            camera_buffer,
            camera_bind_group,
            depth_buffer,
            globe_texture,
            globe,
            atmosphere,
            stars,
        })
    }

    /// Apply a viewport change to the GPU surface, depth buffer, and camera.
    fn apply_viewport_change(&mut self, change: ViewportChange) {
        self.camera.set_aspect_ratio(change.aspect_ratio);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(change.render_width, change.render_height);
            if let Some(scene) = &mut self.scene {
                scene
                    .depth_buffer
                    .resize(&gpu.device, change.render_width, change.render_height);
            }
        }
        info!(
            "Viewport changed: {}x{}",
            change.render_width, change.render_height
        );
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => {
                info!("Escape pressed, shutting down");
                event_loop.exit();
            }
            KeyCode::Space | KeyCode::KeyR => {
                let enabled = self.view_state.toggle_auto_rotate();
                info!(
                    "Auto-rotate {}",
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            KeyCode::Equal | KeyCode::NumpadAdd => self.orbit.zoom_in(),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.orbit.zoom_out(),
            _ => {}
        }
    }

    /// Run fixed-rate updates, upload per-frame uniforms, and draw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let orbit = &mut self.orbit;
        let view_state = &self.view_state;
        self.frame_clock.tick(|dt| orbit.update(dt, view_state));

        self.camera.position = self.orbit.camera_position();

        let (Some(gpu), Some(scene)) = (&self.gpu, &self.scene) else {
            return;
        };

        gpu.queue.write_buffer(
            &scene.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera.to_uniform()),
        );

        // Billboard basis for the stars from the camera's current pose.
        let forward = (self.camera.target - self.camera.position).normalize();
        let right = forward.cross(self.camera.up).normalize();
        let up = right.cross(forward);
        scene.stars.update(&gpu.queue, right, up);

        let frame = match gpu.acquire_frame() {
            Ok(frame) => frame,
            Err(FrameError::Timeout) => {
                warn!("Frame acquisition timed out, skipping frame");
                return;
            }
            Err(e) => {
                error!("Unrecoverable surface error: {e}");
                event_loop.exit();
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &scene.depth_buffer.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DEPTH_CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            scene.stars.render(&mut pass, &scene.camera_bind_group);
            scene.globe.render(
                &mut pass,
                &scene.camera_bind_group,
                &scene.globe_texture.bind_group,
            );
            scene.atmosphere.render(&mut pass, &scene.camera_bind_group);
        }
        gpu.queue.submit([encoder.finish()]);
        frame.present();

        self.stats_frames += 1;
        if self.config.debug.log_frame_stats {
            let elapsed = self.stats_window_start.elapsed().as_secs_f64();
            if elapsed >= 1.0 {
                info!(
                    "{:.1} fps, distance {:.2}",
                    self.stats_frames as f64 / elapsed,
                    self.orbit.distance()
                );
                self.stats_window_start = Instant::now();
                self.stats_frames = 0;
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        self.viewport = Viewport::new(
            inner.width,
            inner.height,
            window.scale_factor(),
            self.config.window.max_pixel_ratio,
        );
        self.camera.set_aspect_ratio(self.viewport.aspect_ratio());
        info!(
            "Window created: {}x{} (scale {:.2})",
            inner.width,
            inner.height,
            window.scale_factor()
        );

        let gpu = match init_gpu_blocking(window.clone(), self.config.window.vsync) {
            Ok(mut gpu) => {
                gpu.resize(self.viewport.render_width(), self.viewport.render_height());
                gpu
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.build_scene(&gpu) {
            Ok(scene) => self.scene = Some(scene),
            Err(e) => {
                error!("Invalid starfield configuration: {e}");
                event_loop.exit();
                return;
            }
        }

        self.gpu = Some(gpu);
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
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(change) = self.viewport.handle_resize(size.width, size.height) {
                    self.apply_viewport_change(change);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let inner = window.inner_size();
                    if let Some(change) = self.viewport.handle_scale_factor_changed(
                        scale_factor,
                        inner.width,
                        inner.height,
                    ) {
                        self.apply_viewport_change(change);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && let PhysicalKey::Code(code) = event.physical_key
                {
                    self.handle_key(event_loop, code);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.drag.on_button(state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(delta) = self.drag.on_cursor_moved(position.x, position.y) {
                    self.orbit.apply_drag(delta.x, delta.y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    // Normalize pixel deltas: ~40 pixels per line.
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 40.0) as f32,
                };
                self.orbit.apply_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Continuous rendering: the globe animates every frame.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Create the event loop and run the viewer until the window closes.
pub fn run(config: Config) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
