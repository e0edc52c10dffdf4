//! Word-wrap estimation and block-height measurement.
//!
//! The wrapper is greedy and breaks only on whitespace. It produces both the
//! wrapped lines and their total height, so the renderer draws exactly the
//! lines whose height the layout pass reserved.

/// Width measurement primitive supplied by the rendering surface.
///
/// Implementations must return the same width the renderer will use when
/// drawing `text` at `size_px`, otherwise the layout estimate drifts from
/// the drawn result.
pub trait MeasureText {
    fn text_width(&self, text: &str, size_px: f32) -> f32;
}

impl<T: MeasureText + ?Sized> MeasureText for &T {
    fn text_width(&self, text: &str, size_px: f32) -> f32 {
        (**self).text_width(text, size_px)
    }
}

/// Character-count approximation: every char advances `size * advance_factor`.
///
/// Deterministic and font-free; used where no real font is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxMeasure {
    pub advance_factor: f32,
}

impl ApproxMeasure {
    pub fn new(advance_factor: f32) -> Self {
        Self { advance_factor }
    }
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self::new(0.55)
    }
}

impl MeasureText for ApproxMeasure {
    fn text_width(&self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * self.advance_factor
    }
}

/// Wrapped text lines with their line height and total block height.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedText {
    /// The wrapped lines, each a single-space-joined run of tokens.
    pub lines: Vec<String>,
    pub line_height: f32,
    /// `lines.len() * line_height`; zero when the text has no tokens.
    pub total_height: f32,
}

impl WrappedText {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Greedy word wrapper bound to one measurement function and font size.
pub struct TextMeasurer<'a, M: MeasureText + ?Sized> {
    measurer: &'a M,
    size_px: f32,
}

impl<'a, M: MeasureText + ?Sized> TextMeasurer<'a, M> {
    pub fn new(measurer: &'a M, size_px: f32) -> Self {
        Self { measurer, size_px }
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Wrap `text` so that no line containing more than one token is wider
    /// than `max_width`.
    ///
    /// A token that is wider than `max_width` on its own still occupies a
    /// single line; tokens are never split.
    pub fn wrap(&self, text: &str, max_width: f32, line_height: f32) -> WrappedText {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut candidate = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            candidate.clear();
            candidate.push_str(&current);
            candidate.push(' ');
            candidate.push_str(word);

            if self.measurer.text_width(&candidate, self.size_px) > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                std::mem::swap(&mut current, &mut candidate);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        let total_height = lines.len() as f32 * line_height;
        WrappedText {
            lines,
            line_height,
            total_height,
        }
    }

    /// Estimated height of `text` wrapped to `max_width`: `lines * line_height`,
    /// or zero for empty text.
    pub fn measure_height(&self, text: &str, max_width: f32, line_height: f32) -> f32 {
        self.wrap(text, max_width, line_height).total_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5 px per char at size 10; exact in f32.
    fn measure() -> ApproxMeasure {
        ApproxMeasure::new(0.5)
    }

    #[test]
    fn empty_text_has_zero_height() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        assert_eq!(tm.measure_height("", 100.0, 12.0), 0.0);
        assert_eq!(tm.measure_height("   \t\n ", 100.0, 12.0), 0.0);
    }

    #[test]
    fn single_word_is_one_line() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        assert_eq!(tm.measure_height("hello", 100.0, 12.0), 12.0);
    }

    #[test]
    fn width_equal_to_limit_does_not_wrap() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        // "aaaa bbbb" is 9 chars = 45 px.
        assert_eq!(tm.wrap("aaaa bbbb", 45.0, 10.0).line_count(), 1);
        assert_eq!(tm.wrap("aaaa bbbb", 44.9, 10.0).line_count(), 2);
    }

    #[test]
    fn wraps_greedily() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        let wrapped = tm.wrap("one two three four five", 50.0, 20.0);
        assert_eq!(wrapped.lines, vec!["one two", "three four", "five"]);
        assert_eq!(wrapped.total_height, 60.0);
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        let wrapped = tm.wrap("  one   two\tthree ", 1000.0, 10.0);
        assert_eq!(wrapped.lines, vec!["one two three"]);
    }

    #[test]
    fn oversized_token_keeps_its_own_line() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        let wrapped = tm.wrap("a extraordinarily b", 30.0, 10.0);
        assert_eq!(wrapped.lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn height_is_a_positive_multiple_of_line_height() {
        let m = ApproxMeasure::default();
        let tm = TextMeasurer::new(&m, 18.0);
        let texts = [
            "Short",
            "Which planet is known as the red planet?",
            "A considerably longer question whose text should need several lines once it is squeezed into a narrow column",
        ];
        for width in [80.0_f32, 200.0, 640.0] {
            for text in texts {
                let h = tm.measure_height(text, width, 24.0);
                assert!(h >= 24.0, "{text:?} at {width}: {h}");
                let lines = h / 24.0;
                assert_eq!(lines, lines.round(), "{text:?} at {width}: {h}");
            }
        }
    }

    #[test]
    fn narrower_width_never_needs_fewer_lines() {
        let m = measure();
        let tm = TextMeasurer::new(&m, 10.0);
        let text = "the quick brown fox jumps over the lazy dog";
        let mut previous = 0;
        for width in [400.0_f32, 200.0, 100.0, 60.0, 30.0] {
            let n = tm.wrap(text, width, 1.0).line_count();
            assert!(n >= previous);
            previous = n;
        }
    }
}
