use std::time::Instant;

use anyhow::Result;
use quiz_config::QuizConfig;
use quiz_core::{AnimationClock, LayoutCache, LayoutParams, QuizModel, Viewport};
use quiz_surface::{Canvas, FramePresenter};
use quiz_text::TextEngine;
use quiz_window::{EventHandler, WindowCtx};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton};
use winit::window::CursorIcon;

use crate::button::RestartButton;
use crate::input::{self, PressContext};
use crate::render;
use crate::trail::CursorTrail;

/// Longest frame step fed to the animation clock, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

/// Owns all quiz state; the window drives it through [`EventHandler`].
pub struct QuizApp {
    model: QuizModel,
    text: TextEngine,
    params: LayoutParams,
    cache: LayoutCache,
    clock: AnimationClock,
    trail: CursorTrail,
    pointer: [f32; 2],
    /// Window scale factor, refreshed every frame.
    scale: f32,
    canvas: Canvas,
    presenter: Option<FramePresenter>,
    last_frame: Option<Instant>,
    hand_cursor: bool,
}

impl QuizApp {
    pub fn new(config: &QuizConfig, model: QuizModel, text: TextEngine) -> Result<Self> {
        Ok(Self {
            model,
            text,
            params: LayoutParams::default(),
            cache: LayoutCache::new(),
            clock: AnimationClock::new(config.animation.speed),
            trail: CursorTrail::new(config.animation.trail_length),
            pointer: [0.0, 0.0],
            scale: 1.0,
            canvas: Canvas::new(config.window.width, config.window.height)?,
            presenter: None,
            last_frame: None,
            hand_cursor: false,
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    /// Paint one frame into the canvas. Returns whether the pointer is over
    /// something clickable.
    fn draw_frame(&mut self, dt: f32) -> bool {
        let viewport = self.viewport();
        self.trail.push(self.pointer);
        self.canvas.background(render::BACKGROUND);
        self.trail.draw(&mut self.canvas);

        if self.model.is_finished() {
            render::draw_result_screen(
                &mut self.canvas,
                &self.text,
                &self.model,
                viewport,
                self.scale,
                self.clock.time(),
            );
            self.clock.advance(dt);
            return RestartButton::for_viewport(viewport, self.scale).contains(self.pointer);
        }

        let mut press = PressContext {
            cache: &mut self.cache,
            viewport,
            scale: self.scale,
            measure: &self.text,
            params: &self.params,
        };
        let hovered = input::hovered_option(&self.model, &mut press, self.pointer);
        if let Some(question) = self.model.current_question() {
            let layout = self
                .cache
                .get_or_compute(viewport, self.model.current_index(), question, &self.text, &self.params);
            render::draw_quiz_screen(&mut self.canvas, &self.text, &self.model, layout, hovered);
        }
        hovered.is_some()
    }
}

impl EventHandler for QuizApp {
    fn init(&mut self, ctx: &mut WindowCtx) -> Result<()> {
        let size = ctx.size();
        self.scale = ctx.window().scale_factor() as f32;
        self.canvas.resize(size.width, size.height)?;
        self.presenter = Some(FramePresenter::new(ctx.device(), ctx.surface_format(), size.width, size.height));
        log::info!("renderer ready at {}x{} ({:?})", size.width, size.height, ctx.surface_format());
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut WindowCtx, size: PhysicalSize<u32>) -> Result<()> {
        self.canvas.resize(size.width, size.height)?;
        self.cache.invalidate();
        ctx.request_redraw();
        Ok(())
    }

    fn on_mouse_move(&mut self, _ctx: &mut WindowCtx, pos: [f32; 2]) -> Result<()> {
        self.pointer = pos;
        Ok(())
    }

    fn on_mouse_input(&mut self, ctx: &mut WindowCtx, state: ElementState, button: MouseButton) -> Result<()> {
        if state != ElementState::Pressed || button != MouseButton::Left {
            return Ok(());
        }
        let viewport = self.viewport();
        let mut press = PressContext {
            cache: &mut self.cache,
            viewport,
            scale: self.scale,
            measure: &self.text,
            params: &self.params,
        };
        input::apply_press(&mut self.model, &mut press, &mut self.clock, self.pointer);
        ctx.request_redraw();
        Ok(())
    }

    fn on_redraw(&mut self, ctx: &mut WindowCtx) -> Result<()> {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32())
            .min(MAX_FRAME_DT);
        self.last_frame = Some(now);

        let size = ctx.size();
        self.scale = ctx.window().scale_factor() as f32;
        self.canvas.resize(size.width, size.height)?;
        let hand = self.draw_frame(dt);
        if hand != self.hand_cursor {
            ctx.set_cursor_icon(if hand { CursorIcon::Pointer } else { CursorIcon::Default });
            self.hand_cursor = hand;
        }

        let Some(presenter) = self.presenter.as_mut() else {
            return Ok(());
        };
        let Some(frame) = ctx.acquire_frame()? else {
            return Ok(());
        };
        let view = frame.texture.create_view(&Default::default());
        presenter.present(ctx.device(), ctx.queue(), &view, &self.canvas)?;
        frame.present();
        Ok(())
    }
}
