//! Error types for question loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing the question source.
///
/// These never reach the player: [`QuizModel::load_or_fallback`](crate::QuizModel::load_or_fallback)
/// logs them and substitutes the fallback question.
#[derive(Error, Debug)]
pub enum QuizDataError {
    /// The question file could not be opened.
    #[error("failed to open question data {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader could not read the header row.
    #[error("malformed question data: {0}")]
    Csv(#[from] csv::Error),

    /// The header lacks one of the required columns.
    #[error("question data has no {0:?} column")]
    MissingColumn(&'static str),

    /// A row was readable but its question text is blank.
    #[error("question text is empty")]
    EmptyQuestion,

    /// The source held a header but no question rows.
    #[error("question data contains no rows")]
    Empty,

    /// An answer label outside A/B/C.
    #[error("invalid answer label {0:?}, expected A, B or C")]
    InvalidLabel(String),
}
