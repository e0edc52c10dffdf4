//! Screen painters. Pure functions of model, layout and time; they never
//! mutate quiz state.

use quiz_core::{format_percentage, AnswerLabel, FeedbackTier, QuizLayout, QuizModel, Viewport};
use quiz_surface::{gray, rgb, Canvas, Color, ShapeStyle};
use quiz_text::TextEngine;

use crate::animation;
use crate::button::RestartButton;

pub const BACKGROUND: Color = rgb(240, 240, 255);
const TEXT: Color = gray(50);
const OPTION_TEXT: Color = gray(0);
const SCORE_TEXT: Color = gray(100);
const OPTION_RADIUS: f32 = 15.0;

fn option_style(hovered: bool) -> ShapeStyle {
    if hovered {
        ShapeStyle::filled(rgb(120, 180, 255)).with_stroke(gray(50), 5.0)
    } else {
        ShapeStyle::filled(rgb(220, 230, 255)).with_stroke(gray(150), 2.0)
    }
}

/// Question header, wrapped question, the three option boxes and the score.
pub fn draw_quiz_screen(
    canvas: &mut Canvas,
    text: &TextEngine,
    model: &QuizModel,
    layout: &QuizLayout,
    hovered: Option<AnswerLabel>,
) {
    let center_x = layout.viewport.w() / 2.0;
    let header = format!("Question {} / {}:", model.question_number(), model.len());
    canvas.text_line(text, &header, [center_x, layout.header_y], layout.header_size, TEXT);

    canvas.text_block(text, &layout.question, TEXT);

    for option in &layout.options {
        let style = option_style(hovered == Some(option.label));
        canvas.rounded_rect_centered(option.center, option.size, OPTION_RADIUS, &style);
        canvas.text_block(text, &option.text, OPTION_TEXT);
    }

    let score = format!("Score: {}", model.score());
    canvas.text_line(text, &score, [center_x, layout.score_y], layout.score_size, SCORE_TEXT);
}

/// Totals, accuracy, feedback message, tier animation and the restart button.
pub fn draw_result_screen(
    canvas: &mut Canvas,
    text: &TextEngine,
    model: &QuizModel,
    viewport: Viewport,
    scale: f32,
    time: f32,
) {
    let (w, h) = (viewport.w(), viewport.h());
    let cx = w / 2.0;
    let percentage = model.percentage();
    let tier = FeedbackTier::from_percentage(percentage);

    canvas.text_line(text, "Quiz complete!", [cx, h * 0.15], w * 0.045, rgb(0, 150, 0));
    let total = format!("Total: {} / {}", model.score(), model.len());
    canvas.text_line(text, &total, [cx, h * 0.28], w * 0.06, rgb(0, 0, 200));
    let accuracy = format!("Accuracy: {}%", format_percentage(percentage));
    canvas.text_line(text, &accuracy, [cx, h * 0.38], w * 0.03, SCORE_TEXT);

    animation::draw(canvas, text, tier, viewport, time);
    canvas.text_line(text, tier.message(), [cx, h * 0.5], w * 0.035, rgb(255, 69, 0));

    RestartButton::for_viewport(viewport, scale).render(canvas, text);
}
