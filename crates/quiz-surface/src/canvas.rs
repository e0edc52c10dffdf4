//! Immediate-mode drawing onto a `tiny-skia` pixmap.
//!
//! The canvas keeps a stack of translations so animations can draw around
//! a local origin, mirroring push/translate/pop in sketching APIs. Text is
//! drawn by blending `fontdue` coverage masks straight into the pixmap.

use quiz_core::{MeasureText, TextBlock};
use quiz_text::{GlyphMask, TextEngine};
use tiny_skia::{FillRule, Paint, Path, Pixmap, Stroke, Transform};

use crate::shapes;
use crate::SurfaceError;

/// Straight (non-premultiplied) 8-bit sRGB color.
pub type Color = tiny_skia::ColorU8;

pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    tiny_skia::ColorU8::from_rgba(r, g, b, a)
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    rgba(r, g, b, 255)
}

pub const fn gray(v: u8) -> Color {
    rgba(v, v, v, 255)
}

/// Fill and outline of a shape. Either may be absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub stroke: Option<(Color, f32)>,
}

impl ShapeStyle {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), stroke: None }
    }

    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = (width > 0.0).then_some((color, width));
        self
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red(), color.green(), color.blue(), color.alpha());
    paint.anti_alias = true;
    paint
}

pub struct Canvas {
    pixmap: Pixmap,
    offsets: Vec<[f32; 2]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let (width, height) = (width.max(1), height.max(1));
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;
        Ok(Self { pixmap, offsets: Vec::new() })
    }

    /// Reallocate when the size changes. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        let (width, height) = (width.max(1), height.max(1));
        if self.pixmap.width() == width && self.pixmap.height() == height {
            return Ok(());
        }
        log::debug!("canvas resized to {}x{}", width, height);
        *self = Self::new(width, height)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA8 rows, top to bottom.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Fill the whole canvas, ignoring the current translation.
    pub fn background(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ));
    }

    /// Move the origin by `(dx, dy)` until the matching [`Canvas::pop`].
    pub fn push_translate(&mut self, dx: f32, dy: f32) {
        let [x, y] = self.offset();
        self.offsets.push([x + dx, y + dy]);
    }

    pub fn pop(&mut self) {
        if self.offsets.pop().is_none() {
            log::warn!("canvas pop without matching push");
        }
    }

    fn offset(&self) -> [f32; 2] {
        self.offsets.last().copied().unwrap_or([0.0, 0.0])
    }

    fn transform(&self) -> Transform {
        let [x, y] = self.offset();
        Transform::from_translate(x, y)
    }

    pub fn draw_path(&mut self, path: &Path, style: &ShapeStyle) {
        let ts = self.transform();
        if let Some(fill) = style.fill {
            self.pixmap.fill_path(path, &paint(fill), FillRule::Winding, ts, None);
        }
        if let Some((color, width)) = style.stroke {
            let stroke = Stroke { width, ..Stroke::default() };
            self.pixmap.stroke_path(path, &paint(color), &stroke, ts, None);
        }
    }

    fn draw_opt(&mut self, path: Option<Path>, style: &ShapeStyle) {
        if let Some(path) = path {
            self.draw_path(&path, style);
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, style: &ShapeStyle) {
        self.draw_opt(shapes::rect(x, y, w, h), style);
    }

    /// Rectangle centred on `center`.
    pub fn rect_centered(&mut self, center: [f32; 2], size: [f32; 2], style: &ShapeStyle) {
        self.rect(center[0] - size[0] / 2.0, center[1] - size[1] / 2.0, size[0], size[1], style);
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, style: &ShapeStyle) {
        self.draw_opt(shapes::rounded_rect(x, y, w, h, radius), style);
    }

    pub fn rounded_rect_centered(&mut self, center: [f32; 2], size: [f32; 2], radius: f32, style: &ShapeStyle) {
        self.rounded_rect(
            center[0] - size[0] / 2.0,
            center[1] - size[1] / 2.0,
            size[0],
            size[1],
            radius,
            style,
        );
    }

    pub fn ellipse(&mut self, center: [f32; 2], size: [f32; 2], style: &ShapeStyle) {
        self.draw_opt(shapes::ellipse(center, size), style);
    }

    pub fn circle(&mut self, center: [f32; 2], diameter: f32, style: &ShapeStyle) {
        self.ellipse(center, [diameter, diameter], style);
    }

    pub fn pie(&mut self, center: [f32; 2], size: [f32; 2], start: f32, stop: f32, style: &ShapeStyle) {
        self.draw_opt(shapes::pie(center, size, start, stop), style);
    }

    pub fn triangle(&mut self, a: [f32; 2], b: [f32; 2], c: [f32; 2], style: &ShapeStyle) {
        self.draw_opt(shapes::polygon(&[a, b, c]), style);
    }

    pub fn star(&mut self, center: [f32; 2], inner: f32, outer: f32, points: u32, style: &ShapeStyle) {
        self.draw_opt(shapes::star(center, inner, outer, points), style);
    }

    /// Blend a coverage mask with its top-left at `origin` (before translation).
    pub fn draw_mask(&mut self, mask: &GlyphMask, origin: [f32; 2], color: Color) {
        let [dx, dy] = self.offset();
        let left = (origin[0] + dx).round() as i64;
        let top = (origin[1] + dy).round() as i64;
        let (pw, ph) = (self.pixmap.width() as i64, self.pixmap.height() as i64);
        let alpha = color.alpha() as u32;
        let src = [color.red() as u32, color.green() as u32, color.blue() as u32];
        let data = self.pixmap.data_mut();

        for my in 0..mask.height as i64 {
            let y = top + my;
            if y < 0 || y >= ph {
                continue;
            }
            for mx in 0..mask.width as i64 {
                let x = left + mx;
                if x < 0 || x >= pw {
                    continue;
                }
                let coverage = mask.coverage[(my * mask.width as i64 + mx) as usize] as u32;
                let sa = coverage * alpha / 255;
                if sa == 0 {
                    continue;
                }
                let inv = 255 - sa;
                let i = ((y * pw + x) * 4) as usize;
                for (c, s) in src.iter().enumerate() {
                    data[i + c] = (s * sa / 255 + data[i + c] as u32 * inv / 255) as u8;
                }
                data[i + 3] = (sa + data[i + 3] as u32 * inv / 255) as u8;
            }
        }
    }

    /// Draw one line of text centred on `center` both ways.
    pub fn text_line(&mut self, engine: &TextEngine, text: &str, center: [f32; 2], size_px: f32, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        let width = engine.text_width(text, size_px);
        let metrics = engine.line_metrics(size_px);
        let left = center[0] - width / 2.0;
        let baseline = center[1] + (metrics.ascent - metrics.descent) / 2.0;
        for glyph in engine.rasterize_line(text, size_px) {
            self.draw_mask(&glyph.mask, [left + glyph.offset[0], baseline + glyph.offset[1]], color);
        }
    }

    /// Draw a wrapped block exactly where the layout placed its lines.
    pub fn text_block(&mut self, engine: &TextEngine, block: &TextBlock, color: Color) {
        for (i, line) in block.lines.iter().enumerate() {
            self.text_line(engine, line, [block.center_x, block.line_center_y(i)], block.size_px, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color = rgb(240, 240, 255);

    fn px(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        let c = canvas.pixmap().pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn background_fills_every_pixel() {
        let mut canvas = Canvas::new(8, 4).unwrap();
        canvas.background(BG);
        assert_eq!(px(&canvas, 0, 0), [240, 240, 255, 255]);
        assert_eq!(px(&canvas, 7, 3), [240, 240, 255, 255]);
    }

    #[test]
    fn zero_size_is_clamped_and_resize_reallocates() {
        let mut canvas = Canvas::new(0, 0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
        canvas.resize(30, 20).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (30, 20));
        assert_eq!(canvas.data().len(), 30 * 20 * 4);
    }

    #[test]
    fn rounded_corners_leave_background() {
        let mut canvas = Canvas::new(100, 60).unwrap();
        canvas.background(BG);
        canvas.rounded_rect(10.0, 10.0, 80.0, 40.0, 15.0, &ShapeStyle::filled(rgb(220, 230, 255)));
        assert_eq!(px(&canvas, 50, 30), [220, 230, 255, 255]);
        assert_eq!(px(&canvas, 11, 11), [240, 240, 255, 255]);
    }

    #[test]
    fn translation_moves_shapes_until_pop() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.background(gray(255));
        canvas.push_translate(70.0, 70.0);
        canvas.circle([0.0, 0.0], 20.0, &ShapeStyle::filled(gray(0)));
        canvas.pop();
        canvas.rect(0.0, 0.0, 10.0, 10.0, &ShapeStyle::filled(rgb(255, 0, 0)));
        assert_eq!(px(&canvas, 70, 70), [0, 0, 0, 255]);
        assert_eq!(px(&canvas, 5, 5), [255, 0, 0, 255]);
        assert_eq!(px(&canvas, 40, 40), [255, 255, 255, 255]);
    }

    #[test]
    fn nested_translations_accumulate() {
        let mut canvas = Canvas::new(50, 50).unwrap();
        canvas.push_translate(10.0, 0.0);
        canvas.push_translate(0.0, 20.0);
        assert_eq!(canvas.offset(), [10.0, 20.0]);
        canvas.pop();
        assert_eq!(canvas.offset(), [10.0, 0.0]);
        canvas.pop();
        canvas.pop();
        assert_eq!(canvas.offset(), [0.0, 0.0]);
    }

    #[test]
    fn mask_blending_respects_coverage_and_bounds() {
        let mut canvas = Canvas::new(4, 1).unwrap();
        canvas.background(gray(255));
        let mask = GlyphMask { width: 3, height: 1, coverage: vec![255, 0, 255] };
        // Last mask column falls off the right edge.
        canvas.draw_mask(&mask, [2.0, 0.0], rgb(0, 0, 0));
        assert_eq!(px(&canvas, 0, 0), [255, 255, 255, 255]);
        assert_eq!(px(&canvas, 2, 0), [0, 0, 0, 255]);
        assert_eq!(px(&canvas, 3, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn partial_coverage_mixes_with_background() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.background(gray(255));
        let mask = GlyphMask { width: 1, height: 1, coverage: vec![128] };
        canvas.draw_mask(&mask, [0.0, 0.0], gray(0));
        let [r, g, b, a] = px(&canvas, 0, 0);
        assert_eq!(a, 255);
        assert!(r == g && g == b && (120..=135).contains(&r), "got {r}");
    }

    #[test]
    fn stroke_only_style_leaves_interior() {
        let mut canvas = Canvas::new(60, 60).unwrap();
        canvas.background(gray(255));
        let style = ShapeStyle::default().with_stroke(gray(0), 2.0);
        canvas.rect(10.0, 10.0, 40.0, 40.0, &style);
        assert_eq!(px(&canvas, 30, 30), [255, 255, 255, 255]);
        assert!(px(&canvas, 10, 30)[0] < 16);
    }
}
