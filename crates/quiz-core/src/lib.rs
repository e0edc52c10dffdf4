//! quiz-core: platform-independent quiz logic.
//!
//! - [`measure`]: word-wrap estimation over an injected width function.
//! - [`layout`]: per-frame layout pass shared by drawing and hit-testing.
//! - [`model`]: questions, score and the InProgress/Finished state machine.
//! - [`loader`]: CSV question source with a built-in fallback.
//! - [`feedback`]: result percentage, feedback tier and animation clock.
//!
//! Nothing in this crate touches a window, a GPU or a font file, so every
//! piece can be exercised in unit tests with [`ApproxMeasure`].

pub mod error;
pub mod feedback;
pub mod layout;
pub mod loader;
pub mod measure;
pub mod model;

pub use error::QuizDataError;
pub use feedback::{format_percentage, AnimationClock, FeedbackTier};
pub use layout::{LayoutCache, LayoutParams, OptionBox, QuizLayout, TextBlock, Viewport};
pub use loader::{fallback_question, load_from_path, read_rows, QuestionRow};
pub use measure::{ApproxMeasure, MeasureText, TextMeasurer, WrappedText};
pub use model::{AnswerLabel, Phase, Question, QuizModel, SubmitOutcome};
