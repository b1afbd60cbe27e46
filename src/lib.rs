//! Import of quiz question sheets (CSV exports from spreadsheets) into
//! typed questions.
//!
//! ```
//! let report = quizcsv::parse_csv("Type;Question;Reponse\nVF;Le ciel est bleu.;vrai").unwrap();
//! assert_eq!(report.questions.len(), 1);
//! assert!(report.errors.is_empty());
//! ```

pub mod backend;

pub use backend::delimiter::{Delimiter, detect_delimiter};
pub use backend::error::{ImportError, RowError};
pub use backend::importer::{ImportOptions, PagePolicy, QuestionImporter, parse_csv, parse_csv_bytes};
pub use backend::question::{
    Answer, ImportReport, MatchPair, Question, QuestionBody, QuestionKind, Verdict,
};
pub use backend::resolver::resolve_question_type;
