use quiz_core::Viewport;
use quiz_surface::{rgb, Canvas, Color, ShapeStyle};
use quiz_text::TextEngine;

/// Rounded button shown under the results to start the quiz over.
///
/// Sized in logical pixels and scaled to the window's DPI.
pub struct RestartButton {
    /// Top-left corner.
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub radius: f32,
    pub bg: Color,
    pub fg: Color,
    pub label: &'static str,
    pub label_size: f32,
}

impl RestartButton {
    pub const WIDTH: f32 = 200.0;
    pub const HEIGHT: f32 = 50.0;

    /// `scale` is physical pixels per logical pixel.
    pub fn for_viewport(viewport: Viewport, scale: f32) -> Self {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let width = Self::WIDTH * scale;
        Self {
            origin: [viewport.w() / 2.0 - width / 2.0, viewport.h() * 0.85],
            size: [width, Self::HEIGHT * scale],
            radius: 10.0 * scale,
            bg: rgb(0x66, 0xa3, 0xff),
            fg: rgb(255, 255, 255),
            label: "Restart quiz",
            label_size: 18.0 * scale,
        }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.origin[0] + self.size[0] / 2.0, self.origin[1] + self.size[1] / 2.0]
    }

    /// Strict containment, matching the option boxes.
    pub fn contains(&self, point: [f32; 2]) -> bool {
        point[0] > self.origin[0]
            && point[0] < self.origin[0] + self.size[0]
            && point[1] > self.origin[1]
            && point[1] < self.origin[1] + self.size[1]
    }

    pub fn render(&self, canvas: &mut Canvas, text: &TextEngine) {
        let [x, y] = self.origin;
        let [w, h] = self.size;
        canvas.rounded_rect(x, y, w, h, self.radius, &ShapeStyle::filled(self.bg));
        canvas.text_line(text, self.label, self.center(), self.label_size, self.fg);
    }
}
