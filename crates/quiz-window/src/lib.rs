//! quiz-window: winit + wgpu window and event dispatch for the quiz.
//!
//! Responsibilities:
//! - Create window + surface + device/queue.
//! - Manage surface configuration and resizing.
//! - Dispatch pointer, resize and redraw events to an [`EventHandler`].
//! - Fold touch input into the same pointer callbacks as the mouse.

use anyhow::{anyhow, Result};
use quiz_config::WindowConfig;
use quiz_surface::{make_surface_config, wgpu};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{CursorIcon, Window, WindowBuilder};

struct Gpu {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    _adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    fn configure(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

pub struct QuizWindow {
    event_loop: EventLoop<()>,
    // Leaked so the surface can borrow it for 'static.
    window: &'static Window,
    gpu: Gpu,
}

pub struct WindowCtx<'a> {
    window: &'a Window,
    gpu: &'a mut Gpu,
}

impl<'a> WindowCtx<'a> {
    pub fn window(&self) -> &Window { self.window }
    pub fn device(&self) -> &wgpu::Device { &self.gpu.device }
    pub fn queue(&self) -> &wgpu::Queue { &self.gpu.queue }
    pub fn surface_format(&self) -> wgpu::TextureFormat { self.gpu.config.format }
    /// Current surface size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> { PhysicalSize::new(self.gpu.config.width, self.gpu.config.height) }
    pub fn request_redraw(&self) { self.window.request_redraw(); }
    pub fn set_cursor_icon(&self, icon: CursorIcon) { self.window.set_cursor_icon(icon); }

    /// Acquire the next surface texture. Returns `None` when the frame should
    /// be skipped; a lost or outdated surface is reconfigured first.
    pub fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.gpu.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated; reconfiguring");
                let size = self.window.inner_size();
                self.gpu.configure(size);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface acquire timed out; skipping frame");
                Ok(None)
            }
            Err(e) => Err(anyhow!("failed to acquire frame: {e}")),
        }
    }
}

pub trait EventHandler {
    fn init(&mut self, _ctx: &mut WindowCtx) -> Result<()> { Ok(()) }
    fn on_resize(&mut self, _ctx: &mut WindowCtx, _size: PhysicalSize<u32>) -> Result<()> { Ok(()) }
    fn on_mouse_move(&mut self, _ctx: &mut WindowCtx, _pos: [f32; 2]) -> Result<()> { Ok(()) }
    fn on_mouse_input(&mut self, _ctx: &mut WindowCtx, _state: ElementState, _button: MouseButton) -> Result<()> { Ok(()) }
    fn on_redraw(&mut self, _ctx: &mut WindowCtx) -> Result<()> { Ok(()) }
}

/// Pointer callbacks a touch phase stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PointerInput {
    Move([f32; 2]),
    Button(ElementState),
}

fn touch_to_pointer(phase: TouchPhase, pos: [f32; 2]) -> Vec<PointerInput> {
    match phase {
        TouchPhase::Started => vec![PointerInput::Move(pos), PointerInput::Button(ElementState::Pressed)],
        TouchPhase::Moved => vec![PointerInput::Move(pos)],
        TouchPhase::Ended | TouchPhase::Cancelled => vec![PointerInput::Button(ElementState::Released)],
    }
}

fn report(what: &str, result: Result<()>) {
    if let Err(e) = result {
        log::error!("{what} handler failed: {e:#}");
    }
}

impl QuizWindow {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width.max(1), config.height.max(1)))
            .build(&event_loop)?;
        let window: &'static Window = Box::leak(Box::new(window));

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or_else(|| anyhow!("no suitable GPU adapter found"))?;
        log::info!("using adapter {:?}", adapter.get_info().name);
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None))?;

        let size = window.inner_size();
        let surface_config = make_surface_config(&adapter, &surface, size.width, size.height)
            .ok_or_else(|| anyhow!("surface is not supported by adapter {:?}", adapter.get_info().name))?;
        surface.configure(&device, &surface_config);

        Ok(Self {
            event_loop,
            window,
            gpu: Gpu {
                _instance: instance,
                surface,
                _adapter: adapter,
                device,
                queue,
                config: surface_config,
            },
        })
    }

    pub fn run(self, mut handler: impl EventHandler + 'static) -> Result<()> {
        let Self { event_loop, window, mut gpu } = self;
        let mut needs_init = true;

        event_loop.run(move |event, elwt| {
            macro_rules! ctx {
                () => {
                    WindowCtx { window, gpu: &mut gpu }
                };
            }

            match event {
                Event::Resumed if needs_init => {
                    needs_init = false;
                    report("init", handler.init(&mut ctx!()));
                    window.request_redraw();
                }
                Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(new_size) => {
                        gpu.configure(new_size);
                        if new_size.width > 0 && new_size.height > 0 {
                            report("resize", handler.on_resize(&mut ctx!(), new_size));
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let pos = [position.x as f32, position.y as f32];
                        report("mouse move", handler.on_mouse_move(&mut ctx!(), pos));
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        report("mouse input", handler.on_mouse_input(&mut ctx!(), state, button));
                    }
                    WindowEvent::Touch(touch) => {
                        let pos = [touch.location.x as f32, touch.location.y as f32];
                        for input in touch_to_pointer(touch.phase, pos) {
                            match input {
                                PointerInput::Move(p) => {
                                    report("touch move", handler.on_mouse_move(&mut ctx!(), p));
                                }
                                PointerInput::Button(state) => {
                                    report("touch", handler.on_mouse_input(&mut ctx!(), state, MouseButton::Left));
                                }
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if gpu.config.width > 0 && gpu.config.height > 0 {
                            report("redraw", handler.on_redraw(&mut ctx!()));
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    // Animations run continuously; keep frames coming.
                    window.request_redraw();
                }
                _ => {}
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_start_moves_then_presses() {
        let inputs = touch_to_pointer(TouchPhase::Started, [12.0, 34.0]);
        assert_eq!(
            inputs,
            vec![PointerInput::Move([12.0, 34.0]), PointerInput::Button(ElementState::Pressed)]
        );
    }

    #[test]
    fn touch_move_and_end_map_to_move_and_release() {
        assert_eq!(touch_to_pointer(TouchPhase::Moved, [1.0, 2.0]), vec![PointerInput::Move([1.0, 2.0])]);
        assert_eq!(
            touch_to_pointer(TouchPhase::Cancelled, [0.0, 0.0]),
            vec![PointerInput::Button(ElementState::Released)]
        );
    }
}
