//! Pointer press handling.
//!
//! Presses are resolved against the same cached [`QuizLayout`] the renderer
//! draws from, so whatever box is highlighted is the box that gets answered.
//!
//! [`QuizLayout`]: quiz_core::QuizLayout

use quiz_core::{
    AnimationClock, AnswerLabel, LayoutCache, LayoutParams, MeasureText, QuizModel, SubmitOutcome, Viewport,
};

use crate::button::RestartButton;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// An option box was pressed while the quiz was running.
    Answered { label: AnswerLabel, outcome: SubmitOutcome },
    Restarted,
    Ignored,
}

/// Everything a press needs besides the model.
pub struct PressContext<'a, M: MeasureText + ?Sized> {
    pub cache: &'a mut LayoutCache,
    pub viewport: Viewport,
    /// Physical pixels per logical pixel.
    pub scale: f32,
    pub measure: &'a M,
    pub params: &'a LayoutParams,
}

/// Option box under `point` for the current question, if any.
pub fn hovered_option<M: MeasureText + ?Sized>(
    model: &QuizModel,
    ctx: &mut PressContext<'_, M>,
    point: [f32; 2],
) -> Option<AnswerLabel> {
    let question = model.current_question()?;
    let layout = ctx
        .cache
        .get_or_compute(ctx.viewport, model.current_index(), question, ctx.measure, ctx.params);
    layout.option_at(point).map(|b| b.label)
}

pub fn handle_press<M: MeasureText + ?Sized>(
    model: &mut QuizModel,
    ctx: &mut PressContext<'_, M>,
    point: [f32; 2],
) -> PressOutcome {
    if model.is_finished() {
        if RestartButton::for_viewport(ctx.viewport, ctx.scale).contains(point) {
            model.restart();
            log::info!("quiz restarted");
            return PressOutcome::Restarted;
        }
        return PressOutcome::Ignored;
    }

    match hovered_option(model, ctx, point) {
        Some(label) => PressOutcome::Answered {
            label,
            outcome: model.submit_answer(label),
        },
        None => PressOutcome::Ignored,
    }
}

/// [`handle_press`], then restart the result animation when the press
/// finished the quiz or started it over.
pub fn apply_press<M: MeasureText + ?Sized>(
    model: &mut QuizModel,
    ctx: &mut PressContext<'_, M>,
    clock: &mut AnimationClock,
    point: [f32; 2],
) -> PressOutcome {
    let outcome = handle_press(model, ctx, point);
    match outcome {
        PressOutcome::Answered {
            outcome: SubmitOutcome::Answered { finished: true, .. },
            ..
        } => {
            log::info!("quiz finished: {} / {} correct", model.score(), model.len());
            clock.reset();
        }
        PressOutcome::Restarted => clock.reset(),
        PressOutcome::Answered { .. } | PressOutcome::Ignored => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{ApproxMeasure, Phase, Question};

    fn question(answer: AnswerLabel) -> Question {
        Question {
            text: "Which layout pass feeds both drawing and hit-testing?".to_string(),
            options: ["The first".to_string(), "The cached one".to_string(), "Neither".to_string()],
            answer,
        }
    }

    struct Fixture {
        cache: LayoutCache,
        measure: ApproxMeasure,
        params: LayoutParams,
        viewport: Viewport,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                cache: LayoutCache::new(),
                measure: ApproxMeasure::default(),
                params: LayoutParams::default(),
                viewport: Viewport::new(1280, 800),
            }
        }

        fn press(&mut self, model: &mut QuizModel, point: [f32; 2]) -> PressOutcome {
            let mut ctx = PressContext {
                cache: &mut self.cache,
                viewport: self.viewport,
                scale: 1.0,
                measure: &self.measure,
                params: &self.params,
            };
            handle_press(model, &mut ctx, point)
        }

        fn press_with_clock(&mut self, model: &mut QuizModel, clock: &mut AnimationClock, point: [f32; 2]) -> PressOutcome {
            let mut ctx = PressContext {
                cache: &mut self.cache,
                viewport: self.viewport,
                scale: 1.0,
                measure: &self.measure,
                params: &self.params,
            };
            apply_press(model, &mut ctx, clock, point)
        }

        fn option_center(&mut self, model: &QuizModel, label: AnswerLabel) -> [f32; 2] {
            let question = model.current_question().unwrap();
            let layout = self.cache.get_or_compute(
                self.viewport,
                model.current_index(),
                question,
                &self.measure,
                &self.params,
            );
            layout.options[label.index()].center
        }
    }

    #[test]
    fn pressing_a_box_answers_with_its_label() {
        let mut fx = Fixture::new();
        let mut model = QuizModel::new(vec![question(AnswerLabel::B), question(AnswerLabel::A)]);
        let point = fx.option_center(&model, AnswerLabel::B);
        let outcome = fx.press(&mut model, point);
        assert_eq!(
            outcome,
            PressOutcome::Answered {
                label: AnswerLabel::B,
                outcome: SubmitOutcome::Answered { correct: true, finished: false },
            }
        );
        assert_eq!((model.current_index(), model.score()), (1, 1));
    }

    #[test]
    fn pressing_outside_every_box_is_a_no_op() {
        let mut fx = Fixture::new();
        let mut model = QuizModel::new(vec![question(AnswerLabel::A)]);
        assert_eq!(fx.press(&mut model, [5.0, 5.0]), PressOutcome::Ignored);
        // Left edge of box A is outside it.
        let [_, y] = fx.option_center(&model, AnswerLabel::A);
        assert_eq!(fx.press(&mut model, [1280.0 * 0.125, y]), PressOutcome::Ignored);
        assert_eq!(model.current_index(), 0);
    }

    #[test]
    fn finished_quiz_only_reacts_to_the_restart_button() {
        let mut fx = Fixture::new();
        let mut model = QuizModel::new(vec![question(AnswerLabel::C)]);
        let point = fx.option_center(&model, AnswerLabel::A);
        fx.press(&mut model, point);
        assert_eq!(model.phase(), Phase::Finished);

        // Where option A used to be is now empty space.
        assert_eq!(fx.press(&mut model, point), PressOutcome::Ignored);
        assert_eq!(model.phase(), Phase::Finished);

        let restart = RestartButton::for_viewport(fx.viewport, 1.0).center();
        assert_eq!(fx.press(&mut model, restart), PressOutcome::Restarted);
        assert_eq!((model.current_index(), model.score(), model.phase()), (0, 0, Phase::InProgress));
    }

    #[test]
    fn restart_button_is_inert_while_in_progress() {
        let mut fx = Fixture::new();
        let mut model = QuizModel::new(vec![question(AnswerLabel::A), question(AnswerLabel::B)]);
        let restart = RestartButton::for_viewport(fx.viewport, 1.0).center();
        let outcome = fx.press(&mut model, restart);
        assert!(!matches!(outcome, PressOutcome::Restarted));
        assert_eq!(model.phase(), Phase::InProgress);
    }

    #[test]
    fn hover_and_press_agree() {
        let mut fx = Fixture::new();
        let model = QuizModel::new(vec![question(AnswerLabel::A)]);
        let point = fx.option_center(&model, AnswerLabel::C);
        let mut ctx = PressContext {
            cache: &mut fx.cache,
            viewport: fx.viewport,
            scale: 1.0,
            measure: &fx.measure,
            params: &fx.params,
        };
        assert_eq!(hovered_option(&model, &mut ctx, point), Some(AnswerLabel::C));
    }

    fn running_clock() -> AnimationClock {
        let mut clock = AnimationClock::new(1.0);
        clock.advance(0.5);
        clock
    }

    #[test]
    fn clock_keeps_running_on_non_final_and_ignored_presses() {
        let mut fx = Fixture::new();
        let mut model = QuizModel::new(vec![question(AnswerLabel::A), question(AnswerLabel::B)]);
        let mut clock = running_clock();

        assert_eq!(fx.press_with_clock(&mut model, &mut clock, [5.0, 5.0]), PressOutcome::Ignored);
        assert_eq!(clock.time(), 0.5);

        let point = fx.option_center(&model, AnswerLabel::A);
        fx.press_with_clock(&mut model, &mut clock, point);
        assert_eq!(model.phase(), Phase::InProgress);
        assert_eq!(clock.time(), 0.5);
    }

    #[test]
    fn clock_resets_on_finishing_and_on_restart() {
        let mut fx = Fixture::new();
        let mut model = QuizModel::new(vec![question(AnswerLabel::A)]);
        let mut clock = running_clock();

        let point = fx.option_center(&model, AnswerLabel::A);
        fx.press_with_clock(&mut model, &mut clock, point);
        assert_eq!(model.phase(), Phase::Finished);
        assert_eq!(clock.time(), 0.0);

        clock.advance(2.0);
        assert_eq!(fx.press_with_clock(&mut model, &mut clock, [5.0, 5.0]), PressOutcome::Ignored);
        assert_eq!(clock.time(), 2.0);

        let restart = RestartButton::for_viewport(fx.viewport, 1.0).center();
        assert_eq!(fx.press_with_clock(&mut model, &mut clock, restart), PressOutcome::Restarted);
        assert_eq!(clock.time(), 0.0);
    }
}
