use thiserror::Error;

/// Failure of a whole import, as opposed to a rejected row.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unreadable CSV structure: {0}")]
    Csv(#[from] csv::Error),
    #[error("input is neither UTF-8 nor Windows-1252 text")]
    Encoding,
}

/// Why a single row was rejected. Rendered as `Line {n}: {self}`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("unknown type")]
    UnknownType,
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("missing QCM choices")]
    MissingChoices,
    #[error("missing QCM answer")]
    MissingQcmAnswer,
    #[error("missing True/False answer")]
    MissingBooleanAnswer,
    #[error("invalid True/False answer")]
    InvalidBooleanAnswer,
    #[error("missing answer")]
    MissingAnswer,
    #[error("missing pairs")]
    MissingPairs,
    #[error("non-numeric PDF page ({0})")]
    InvalidPage(String),
}

impl RowError {
    /// Stable code for the error, used in summaries.
    pub fn code(&self) -> &'static str {
        match self {
            RowError::UnknownType => "unknown_type",
            RowError::MissingField(_) => "missing_field",
            RowError::MissingChoices => "missing_choices",
            RowError::MissingPairs => "missing_pairs",
            RowError::MissingQcmAnswer
            | RowError::MissingBooleanAnswer
            | RowError::MissingAnswer => "missing_answer",
            RowError::InvalidBooleanAnswer => "invalid_boolean_answer",
            RowError::InvalidPage(_) => "invalid_page",
        }
    }

    pub fn at_line(&self, line: u64) -> String {
        format!("Line {}: {}", line, self)
    }
}
