//! Path builders for the shapes the quiz draws.
//!
//! Every builder returns `None` for degenerate input (zero size, fewer than
//! three points) so callers can simply skip drawing.

use tiny_skia::{Path, PathBuilder, Rect};

/// Cubic control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Segments used to approximate one full turn of an arc.
const ARC_SEGMENTS: u32 = 64;

pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect)
}

/// Rectangle with four equal corner radii, clamped to half the shorter side.
pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if r == 0.0 {
        return rect(x, y, w, h);
    }
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Ellipse centred on `center` with full width and height `size`.
pub fn ellipse(center: [f32; 2], size: [f32; 2]) -> Option<Path> {
    if size[0] <= 0.0 || size[1] <= 0.0 {
        return None;
    }
    let oval = Rect::from_xywh(center[0] - size[0] / 2.0, center[1] - size[1] / 2.0, size[0], size[1])?;
    PathBuilder::from_oval(oval)
}

/// Closed pie slice of an ellipse, angles in radians clockwise from +x (y-down).
pub fn pie(center: [f32; 2], size: [f32; 2], start: f32, stop: f32) -> Option<Path> {
    if size[0] <= 0.0 || size[1] <= 0.0 || stop <= start {
        return None;
    }
    let (rx, ry) = (size[0] / 2.0, size[1] / 2.0);
    let sweep = stop - start;
    let steps = ((sweep / std::f32::consts::TAU) * ARC_SEGMENTS as f32).ceil().max(2.0) as u32;

    let mut pb = PathBuilder::new();
    pb.move_to(center[0], center[1]);
    for i in 0..=steps {
        let a = start + sweep * (i as f32 / steps as f32);
        pb.line_to(center[0] + rx * a.cos(), center[1] + ry * a.sin());
    }
    pb.close();
    pb.finish()
}

pub fn polygon(points: &[[f32; 2]]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.len() < 2 {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(first[0], first[1]);
    for p in rest {
        pb.line_to(p[0], p[1]);
    }
    pb.close();
    pb.finish()
}

/// Star with `points` tips on `outer` radius and notches on `inner` radius.
/// The first tip points along +x.
pub fn star(center: [f32; 2], inner: f32, outer: f32, points: u32) -> Option<Path> {
    if points < 2 || outer <= 0.0 {
        return None;
    }
    let step = std::f32::consts::TAU / points as f32;
    let vertices: Vec<[f32; 2]> = (0..points)
        .flat_map(|i| {
            let a = step * i as f32;
            let b = a + step / 2.0;
            [
                [center[0] + a.cos() * outer, center[1] + a.sin() * outer],
                [center[0] + b.cos() * inner, center[1] + b.sin() * inner],
            ]
        })
        .collect();
    polygon(&vertices)
}
