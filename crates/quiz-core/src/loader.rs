//! Question source: a CSV table with a header row.
//!
//! ```text
//! Question,OptionA,OptionB,OptionC,Answer
//! "Which planet is known as the red planet?",Venus,Mars,Jupiter,b
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::QuizDataError;
use crate::model::{AnswerLabel, Question};

/// One raw row of the question table, before validation.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct QuestionRow {
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "OptionA")]
    pub option_a: String,
    #[serde(rename = "OptionB")]
    pub option_b: String,
    #[serde(rename = "OptionC")]
    pub option_c: String,
    #[serde(rename = "Answer")]
    pub answer: String,
}

const COLUMNS: [&str; 5] = ["Question", "OptionA", "OptionB", "OptionC", "Answer"];

/// Read every row from a CSV source with a `Question,OptionA,OptionB,OptionC,Answer` header.
///
/// A header missing one of those columns fails the whole source. A record
/// that cannot be read (a missing field, for one) is logged and
/// skipped; label and text validation happens later in
/// [`QuizModel::from_rows`](crate::QuizModel::from_rows).
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<QuestionRow>, QuizDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if let Some(missing) = COLUMNS.into_iter().find(|name| !headers.iter().any(|h| h == *name)) {
        return Err(QuizDataError::MissingColumn(missing));
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<QuestionRow>() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("skipping malformed question row: {e}"),
        }
    }
    Ok(rows)
}

/// Open `path` and read its rows. An empty table is an error.
pub fn load_from_path(path: &Path) -> Result<Vec<QuestionRow>, QuizDataError> {
    let file = File::open(path).map_err(|source| QuizDataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_rows(file)?;
    if rows.is_empty() {
        return Err(QuizDataError::Empty);
    }
    Ok(rows)
}

/// The question shown when no usable data could be loaded.
///
/// Deliberately long so that wrapping and the dynamic option placement are
/// visible even without a data file.
pub fn fallback_question() -> Question {
    Question {
        text: "Sample question: what is this quiz drawn with? (This is a deliberately long sample question that checks text wrapping and the dynamic height of the question block.)".to_string(),
        options: [
            "A deliberately long option A that also needs to wrap inside its box".to_string(),
            "A canvas rendered every frame".to_string(),
            "A spreadsheet".to_string(),
        ],
        answer: AnswerLabel::B,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Question,OptionA,OptionB,OptionC,Answer
\"Which planet is known as the red planet?\",Venus,Mars,Jupiter,b
What is 2 + 2?,3,4,5, B
\"Commas, inside quotes\",\"x, y\",z,w,A
";

    #[test]
    fn reads_rows_by_header_name() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].question, "Which planet is known as the red planet?");
        assert_eq!(rows[0].option_b, "Mars");
        assert_eq!(rows[1].answer, " B");
        assert_eq!(rows[2].option_a, "x, y");
    }

    #[test]
    fn header_only_reads_no_rows() {
        let rows = read_rows("Question,OptionA,OptionB,OptionC,Answer\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "Question,OptionA,OptionB,Answer\nQ,a,b,A\n";
        assert!(matches!(
            read_rows(data.as_bytes()),
            Err(QuizDataError::MissingColumn("OptionC"))
        ));
    }

    #[test]
    fn short_row_is_skipped_and_neighbours_survive() {
        let data = "\
Question,OptionA,OptionB,OptionC,Answer
Q1?,a,b,c,A
Q2?,a,b,B
Q3?,a,b,c,C
";
        let rows = read_rows(data.as_bytes()).unwrap();
        let questions: Vec<&str> = rows.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, ["Q1?", "Q3?"]);
        assert_eq!(rows[1].answer, "C");
    }

    #[test]
    fn row_with_an_extra_field_keeps_earlier_rows() {
        let data = "\
Question,OptionA,OptionB,OptionC,Answer
Q1?,a,b,c,A
Q2?,a,b,c,B,extra
";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].question, "Q1?");
    }

    #[test]
    fn load_from_missing_path_reports_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, QuizDataError::Open { .. }));
    }

    #[test]
    fn load_from_empty_table_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Question,OptionA,OptionB,OptionC,Answer").unwrap();
        assert!(matches!(load_from_path(file.path()), Err(QuizDataError::Empty)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let rows = load_from_path(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn fallback_answer_is_b() {
        let q = fallback_question();
        assert_eq!(q.answer, AnswerLabel::B);
        assert!(!q.text.trim().is_empty());
    }
}
