//! Quiz state: questions, progress, score and phase.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::QuizDataError;
use crate::loader::{self, QuestionRow};

/// Label of one of the three answer options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerLabel {
    A,
    B,
    C,
}

impl AnswerLabel {
    /// Labels in hit-test and drawing order.
    pub const ALL: [AnswerLabel; 3] = [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C];

    pub fn index(self) -> usize {
        match self {
            AnswerLabel::A => 0,
            AnswerLabel::B => 1,
            AnswerLabel::C => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerLabel {
    type Err = QuizDataError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(AnswerLabel::A),
            "B" => Ok(AnswerLabel::B),
            "C" => Ok(AnswerLabel::C),
            _ => Err(QuizDataError::InvalidLabel(s.to_string())),
        }
    }
}

/// One multiple-choice question. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: [String; 3],
    pub answer: AnswerLabel,
}

impl Question {
    pub fn option(&self, label: AnswerLabel) -> &str {
        &self.options[label.index()]
    }
}

impl TryFrom<QuestionRow> for Question {
    type Error = QuizDataError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        if row.question.trim().is_empty() {
            return Err(QuizDataError::EmptyQuestion);
        }
        let answer = row.answer.parse::<AnswerLabel>()?;
        Ok(Question {
            text: row.question,
            options: [row.option_a, row.option_b, row.option_c],
            answer,
        })
    }
}

/// Quiz lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Finished,
}

/// Result of [`QuizModel::submit_answer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The quiz was already finished; nothing changed.
    Ignored,
    /// The answer was recorded. `finished` is true when it was the last question.
    Answered { correct: bool, finished: bool },
}

/// Questions plus progress through them.
///
/// Invariants: `questions` is non-empty, `score <= current <= questions.len()`,
/// and `phase == Finished` exactly when `current == questions.len()`.
#[derive(Clone, Debug)]
pub struct QuizModel {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    phase: Phase,
}

impl QuizModel {
    /// Build a model from already-validated questions.
    ///
    /// An empty list is replaced by the fallback question.
    pub fn new(questions: Vec<Question>) -> Self {
        let questions = if questions.is_empty() {
            log::warn!("no questions supplied, using the built-in fallback question");
            vec![loader::fallback_question()]
        } else {
            questions
        };
        Self {
            questions,
            current: 0,
            score: 0,
            phase: Phase::InProgress,
        }
    }

    /// Parse raw rows into questions.
    ///
    /// Invalid rows are skipped with a warning; if none survive, the model
    /// holds the single fallback question.
    pub fn from_rows(rows: impl IntoIterator<Item = QuestionRow>) -> Self {
        let mut questions = Vec::new();
        let mut rejected = 0usize;
        for (i, row) in rows.into_iter().enumerate() {
            match Question::try_from(row) {
                Ok(q) => questions.push(q),
                Err(e) => {
                    rejected += 1;
                    // Row numbers are 1-based and count the header line.
                    log::warn!("skipping question row {}: {}", i + 2, e);
                }
            }
        }
        if questions.is_empty() {
            log::error!(
                "question data is empty or unparseable ({} rejected rows), using the built-in fallback question",
                rejected
            );
        }
        Self::new(questions)
    }

    /// Load questions from a CSV file, falling back on any failure.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match loader::load_from_path(path) {
            Ok(rows) => {
                let model = Self::from_rows(rows);
                log::info!("loaded {} question(s) from {}", model.len(), path.display());
                model
            }
            Err(e) => {
                log::error!("failed to load questions: {}", e);
                Self::new(Vec::new())
            }
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> usize {
        (self.current + 1).min(self.questions.len())
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The question being asked, or `None` once the quiz is finished.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress => self.questions.get(self.current),
            Phase::Finished => None,
        }
    }

    /// Score as a percentage of the question count.
    pub fn percentage(&self) -> f64 {
        self.score as f64 / self.questions.len() as f64 * 100.0
    }

    /// Record an answer for the current question and advance.
    pub fn submit_answer(&mut self, selected: AnswerLabel) -> SubmitOutcome {
        let Some(question) = self.current_question() else {
            return SubmitOutcome::Ignored;
        };
        let correct = question.answer == selected;
        if correct {
            self.score += 1;
        }
        self.current += 1;
        let finished = self.current >= self.questions.len();
        if finished {
            self.phase = Phase::Finished;
        }
        log::debug!(
            "answer {} ({}), score {}/{}",
            selected,
            if correct { "correct" } else { "incorrect" },
            self.score,
            self.questions.len()
        );
        SubmitOutcome::Answered { correct, finished }
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.score = 0;
        self.phase = Phase::InProgress;
    }
}
