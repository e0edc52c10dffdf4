//! Looping result-screen animations, one per feedback tier.
//!
//! Geometry is computed by pure functions of the viewport and animation
//! time so it can be checked without drawing; the `draw_*` functions only
//! turn it into canvas calls.

use std::f32::consts::{PI, TAU};

use quiz_core::{FeedbackTier, Viewport};
use quiz_surface::{gray, rgb, rgba, Canvas, ShapeStyle};
use quiz_text::TextEngine;

pub const STAR_COUNT: usize = 30;
const STAR_POINTS: u32 = 5;

/// Re-map `value` from `[start1, stop1]` onto `[start2, stop2]` without clamping.
pub fn map_range(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    start2 + (value - start1) * (stop2 - start2) / (stop1 - start1)
}

/// Anchor all animations share: horizontally centred, three quarters down.
pub fn animation_center(viewport: Viewport) -> [f32; 2] {
    [viewport.w() / 2.0, viewport.h() * 0.75]
}

/// Vertical bounce offset for the smiley and the arrow.
pub fn bounce(time: f32, amplitude: f32) -> f32 {
    (time * 8.0).sin() * amplitude
}

/// Alpha of the pulsing disc behind the stars, between 50 and 128.
pub fn pulse_alpha(time: f32) -> u8 {
    let pulse = map_range((time * 2.0).sin(), -1.0, 1.0, 100.0, 255.0);
    (pulse * 0.5).round().clamp(0.0, 255.0) as u8
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSprite {
    pub center: [f32; 2],
    pub inner: f32,
    pub outer: f32,
}

/// Stars orbiting on an ellipse that breathes between 100 and 200 px.
pub fn perfect_stars(viewport: Viewport, time: f32) -> Vec<StarSprite> {
    let [cx, cy] = animation_center(viewport);
    let dist = map_range((time * 3.0).sin(), -1.0, 1.0, 100.0, 200.0);
    (0..STAR_COUNT)
        .map(|i| {
            let rotation = i as f32 * (TAU / STAR_COUNT as f32) + time * 0.5;
            let size = 10.0 + (time * 10.0 + i as f32).sin() * 10.0;
            StarSprite {
                center: [cx + rotation.cos() * dist * 1.5, cy + rotation.sin() * dist],
                inner: size * 0.5,
                outer: size,
            }
        })
        .collect()
}

pub fn draw(canvas: &mut Canvas, text: &TextEngine, tier: FeedbackTier, viewport: Viewport, time: f32) {
    match tier {
        FeedbackTier::Perfect => draw_perfect(canvas, viewport, time),
        FeedbackTier::Good => draw_good(canvas, text, viewport, time),
        FeedbackTier::Encourage => draw_encourage(canvas, text, viewport, time),
    }
}

fn draw_perfect(canvas: &mut Canvas, viewport: Viewport, time: f32) {
    let disc = ShapeStyle::filled(rgba(255, 255, 0, pulse_alpha(time)));
    canvas.circle(animation_center(viewport), viewport.w() * 0.5, &disc);

    let star_style = ShapeStyle::filled(rgb(255, 255, 0)).with_stroke(rgb(255, 165, 0), 2.0);
    for star in perfect_stars(viewport, time) {
        canvas.star(star.center, star.inner, star.outer, STAR_POINTS, &star_style);
    }
}

fn draw_good(canvas: &mut Canvas, text: &TextEngine, viewport: Viewport, time: f32) {
    let (w, h) = (viewport.w(), viewport.h());
    let [cx, cy] = animation_center(viewport);
    canvas.push_translate(cx, cy + bounce(time, 40.0));

    canvas.circle([0.0, 0.0], w * 0.15, &ShapeStyle::filled(rgb(255, 200, 0)).with_stroke(gray(0), 2.0));
    let features = ShapeStyle::filled(gray(0)).with_stroke(gray(0), 2.0);
    canvas.circle([-w * 0.03, -h * 0.02], w * 0.015, &features);
    canvas.circle([w * 0.03, -h * 0.02], w * 0.015, &features);
    canvas.pie([0.0, h * 0.02], [w * 0.08, h * 0.05], 0.0, PI, &features);
    canvas.text_line(text, "Good Job!", [0.0, -h * 0.1], w * 0.02, rgb(200, 50, 50));

    canvas.pop();
}

fn draw_encourage(canvas: &mut Canvas, text: &TextEngine, viewport: Viewport, time: f32) {
    let (w, h) = (viewport.w(), viewport.h());
    let [cx, cy] = animation_center(viewport);
    canvas.push_translate(cx, cy + bounce(time, 30.0));

    let arrow = ShapeStyle::filled(rgb(100, 100, 200)).with_stroke(gray(50), 3.0);
    canvas.rect_centered([0.0, h * 0.05], [w * 0.04, h * 0.08], &arrow);
    let head = w * 0.06;
    canvas.triangle([-head / 2.0, -h * 0.02], [head / 2.0, -h * 0.02], [0.0, -h * 0.08], &arrow);
    canvas.text_line(text, "Keep going!", [0.0, h * 0.15], w * 0.025, gray(0));

    canvas.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_is_linear_and_unclamped() {
        assert_eq!(map_range(0.0, -1.0, 1.0, 100.0, 200.0), 150.0);
        assert_eq!(map_range(5.0, 0.0, 10.0, 30.0, 200.0), 115.0);
        assert_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
    }

    #[test]
    fn pulse_alpha_stays_in_band() {
        for step in 0..200 {
            let a = pulse_alpha(step as f32 * 0.05);
            assert!((50..=128).contains(&a), "alpha {a}");
        }
    }

    #[test]
    fn stars_start_on_the_resting_orbit() {
        let vp = Viewport::new(1000, 800);
        let stars = perfect_stars(vp, 0.0);
        assert_eq!(stars.len(), STAR_COUNT);
        // At t = 0 the orbit is 150 px and star 0 sits on +x with size 10.
        assert!((stars[0].center[0] - (500.0 + 225.0)).abs() < 1e-3);
        assert!((stars[0].center[1] - 600.0).abs() < 1e-3);
        assert!((stars[0].outer - 10.0).abs() < 1e-4);
        assert!((stars[0].inner - 5.0).abs() < 1e-4);
    }

    #[test]
    fn star_sizes_stay_non_negative() {
        let vp = Viewport::new(640, 480);
        for step in 0..100 {
            for star in perfect_stars(vp, step as f32 * 0.13) {
                assert!(star.outer >= 0.0 && star.outer <= 20.0 + 1e-4);
            }
        }
    }

    #[test]
    fn bounce_is_bounded_by_amplitude() {
        assert_eq!(bounce(0.0, 40.0), 0.0);
        for step in 0..100 {
            assert!(bounce(step as f32 * 0.05, 30.0).abs() <= 30.0);
        }
    }
}
