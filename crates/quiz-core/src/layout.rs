//! Layout pass for the question screen.
//!
//! Everything is derived from the viewport size and the current question
//! text. The resulting [`QuizLayout`] is the single source of truth for both
//! drawing and pointer hit-testing; [`LayoutCache`] keeps one per frame so the
//! two paths never compute it separately.

use crate::measure::{MeasureText, TextMeasurer};
use crate::model::{AnswerLabel, Question};

/// Canvas size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn w(&self) -> f32 {
        self.width as f32
    }

    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

/// Proportions of the question screen, as fractions of the viewport.
///
/// Suffix `_w` means "fraction of width", `_h` "fraction of height".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub header_size_w: f32,
    pub header_y_h: f32,
    pub question_size_w: f32,
    pub question_leading_w: f32,
    /// Question wrap width as a fraction of the option box width.
    pub question_width_ratio: f32,
    pub question_start_y_h: f32,
    pub question_gap_h: f32,
    pub option_width_w: f32,
    pub option_height_h: f32,
    pub option_margin_h: f32,
    pub option_text_size_w: f32,
    pub option_leading_w: f32,
    /// Option text wrap width as a fraction of the option box width.
    pub option_text_width_ratio: f32,
    pub score_size_w: f32,
    pub score_gap_h: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            header_size_w: 0.02,
            header_y_h: 0.08,
            question_size_w: 0.03,
            question_leading_w: 0.04,
            question_width_ratio: 0.95,
            question_start_y_h: 0.15,
            question_gap_h: 0.05,
            option_width_w: 0.75,
            option_height_h: 0.08,
            option_margin_h: 0.03,
            option_text_size_w: 0.018,
            option_leading_w: 0.025,
            option_text_width_ratio: 0.9,
            score_size_w: 0.015,
            score_gap_h: 0.05,
        }
    }
}

/// Wrapped lines positioned as a horizontally centred block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub center_x: f32,
    pub top_y: f32,
    pub size_px: f32,
    pub line_height: f32,
}

impl TextBlock {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Vertical centre of line `i`.
    pub fn line_center_y(&self, i: usize) -> f32 {
        self.top_y + (i as f32 + 0.5) * self.line_height
    }
}

/// A clickable answer box, stored as centre + size.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionBox {
    pub label: AnswerLabel,
    pub center: [f32; 2],
    pub size: [f32; 2],
    /// "A. ..." wrapped to the box and centred on it.
    pub text: TextBlock,
}

impl OptionBox {
    pub fn left(&self) -> f32 {
        self.center[0] - self.size[0] / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center[0] + self.size[0] / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center[1] - self.size[1] / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center[1] + self.size[1] / 2.0
    }

    /// Strict containment: points on the edge are outside.
    ///
    /// Hover highlighting and click hit-testing both go through here.
    pub fn contains(&self, point: [f32; 2]) -> bool {
        let [x, y] = point;
        x > self.left() && x < self.right() && y > self.top() && y < self.bottom()
    }
}

/// Result of one layout pass over the question screen.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizLayout {
    pub viewport: Viewport,
    pub header_y: f32,
    pub header_size: f32,
    pub question: TextBlock,
    pub question_block_height: f32,
    pub options_start_y: f32,
    pub options: [OptionBox; 3],
    pub score_y: f32,
    pub score_size: f32,
}

impl QuizLayout {
    pub fn compute<M: MeasureText + ?Sized>(
        viewport: Viewport,
        question: &Question,
        measurer: &M,
        params: &LayoutParams,
    ) -> Self {
        let (w, h) = (viewport.w(), viewport.h());
        let center_x = w / 2.0;

        let option_w = w * params.option_width_w;
        let option_h = h * params.option_height_h;
        let option_margin = h * params.option_margin_h;

        let question_size = w * params.question_size_w;
        let question_leading = w * params.question_leading_w;
        let question_max_w = option_w * params.question_width_ratio;
        let question_start_y = h * params.question_start_y_h;

        let wrapped = TextMeasurer::new(measurer, question_size).wrap(
            &question.text,
            question_max_w,
            question_leading,
        );
        let question_block_height = wrapped.total_height;
        let question_block = TextBlock {
            lines: wrapped.lines,
            center_x,
            top_y: question_start_y,
            size_px: question_size,
            line_height: question_leading,
        };

        let options_start_y = question_start_y + question_block_height + h * params.question_gap_h;

        let option_size = w * params.option_text_size_w;
        let option_leading = w * params.option_leading_w;
        let option_text_w = option_w * params.option_text_width_ratio;
        let option_measurer = TextMeasurer::new(measurer, option_size);

        let options = AnswerLabel::ALL.map(|label| {
            let y = options_start_y + label.index() as f32 * (option_h + option_margin);
            let caption = format!("{}. {}", label, question.option(label));
            let wrapped = option_measurer.wrap(&caption, option_text_w, option_leading);
            OptionBox {
                label,
                center: [center_x, y],
                size: [option_w, option_h],
                text: TextBlock {
                    top_y: y - wrapped.total_height / 2.0,
                    lines: wrapped.lines,
                    center_x,
                    size_px: option_size,
                    line_height: option_leading,
                },
            }
        });

        let last = AnswerLabel::ALL.len() - 1;
        let score_y = options_start_y
            + last as f32 * (option_h + option_margin)
            + option_h / 2.0
            + h * params.score_gap_h;

        Self {
            viewport,
            header_y: h * params.header_y_h,
            header_size: w * params.header_size_w,
            question: question_block,
            question_block_height,
            options_start_y,
            options,
            score_y,
            score_size: w * params.score_size_w,
        }
    }

    pub fn option_center_y(&self, label: AnswerLabel) -> f32 {
        self.options[label.index()].center[1]
    }

    /// First option (in A, B, C order) containing `point`.
    pub fn option_at(&self, point: [f32; 2]) -> Option<&OptionBox> {
        self.options.iter().find(|o| o.contains(point))
    }
}

/// One cached layout keyed by viewport and question index.
///
/// Computed on the draw path and read back by the input path within the same
/// frame; a resize or a new question changes the key and forces a recompute.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(Viewport, usize, QuizLayout)>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Cached layout for exactly this viewport and question, if any.
    pub fn get(&self, viewport: Viewport, question_index: usize) -> Option<&QuizLayout> {
        match &self.entry {
            Some((vp, idx, layout)) if *vp == viewport && *idx == question_index => Some(layout),
            _ => None,
        }
    }

    pub fn get_or_compute<M: MeasureText + ?Sized>(
        &mut self,
        viewport: Viewport,
        question_index: usize,
        question: &Question,
        measurer: &M,
        params: &LayoutParams,
    ) -> &QuizLayout {
        if self.get(viewport, question_index).is_none() {
            self.entry = None;
        }
        let (_, _, layout) = self.entry.get_or_insert_with(|| {
            (
                viewport,
                question_index,
                QuizLayout::compute(viewport, question, measurer, params),
            )
        });
        layout
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
