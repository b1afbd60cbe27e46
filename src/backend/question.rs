use serde::{Deserialize, Serialize};

/// The four question kinds a quiz sheet can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "QCM")]
    Qcm,
    #[serde(rename = "VraiFaux")]
    TrueFalse,
    #[serde(rename = "Completer")]
    FillBlank,
    #[serde(rename = "Associer")]
    Match,
}

impl QuestionKind {
    pub fn all() -> &'static [QuestionKind] {
        &[
            QuestionKind::Qcm,
            QuestionKind::TrueFalse,
            QuestionKind::FillBlank,
            QuestionKind::Match,
        ]
    }

    /// Label written back into the `Type` column on export.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::Qcm => "QCM",
            QuestionKind::TrueFalse => "VraiFaux",
            QuestionKind::FillBlank => "Compléter",
            QuestionKind::Match => "Associer",
        }
    }
}

/// One accepted answer or several.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    One(String),
    Many(Vec<String>),
}

impl Answer {
    /// Collapses a list of parts: a single part stays a plain string.
    /// Returns `None` for an empty list.
    pub fn from_parts(mut parts: Vec<String>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop().map(Answer::One),
            _ => Some(Answer::Many(parts)),
        }
    }

    pub fn parts(&self) -> Vec<&str> {
        match self {
            Answer::One(a) => vec![a.as_str()],
            Answer::Many(all) => all.iter().map(String::as_str).collect(),
        }
    }

    /// Joins the parts with `|`, the inner separator of the sheets.
    pub fn joined(&self) -> String {
        self.parts().join("|")
    }
}

/// Canonical True/False answer, stored as "Vrai" or "Faux".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Vrai,
    Faux,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Vrai => "Vrai",
            Verdict::Faux => "Faux",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// Kind-specific part of a question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionBody {
    #[serde(rename = "QCM", rename_all = "camelCase")]
    Qcm {
        choices: Vec<String>,
        answer: Answer,
        /// Position of a single answer among `choices`, when found.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        answer_index: Option<usize>,
    },
    #[serde(rename = "VraiFaux")]
    TrueFalse { answer: Verdict },
    #[serde(rename = "Completer")]
    FillBlank { answer: Answer },
    #[serde(rename = "Associer")]
    Match { pairs: Vec<MatchPair> },
}

impl QuestionBody {
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionBody::Qcm { .. } => QuestionKind::Qcm,
            QuestionBody::TrueFalse { .. } => QuestionKind::TrueFalse,
            QuestionBody::FillBlank { .. } => QuestionKind::FillBlank,
            QuestionBody::Match { .. } => QuestionKind::Match,
        }
    }
}

/// A question parsed from one sheet row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_search_text: Option<String>,
    #[serde(flatten)]
    pub body: QuestionBody,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }
}

/// Outcome of one import: parsed questions in source order plus
/// `Line {n}: ...` messages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub questions: Vec<Question>,
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_from_parts() {
        assert_eq!(Answer::from_parts(vec![]), None);
        assert_eq!(
            Answer::from_parts(vec!["Blanc".into()]),
            Some(Answer::One("Blanc".into()))
        );
        let many = Answer::from_parts(vec!["Rouge".into(), "Vert".into()]).unwrap();
        assert_eq!(many.parts(), vec!["Rouge", "Vert"]);
        assert_eq!(many.joined(), "Rouge|Vert");
    }

    #[test]
    fn test_question_json_shape() {
        let q = Question {
            id: "1".into(),
            question: "Quelle touche pour copier?".into(),
            theme: Some("Clavier".into()),
            course_reference: None,
            pdf_keyword: None,
            pdf_page: Some(10),
            lesson: None,
            pdf_search_text: None,
            body: QuestionBody::Qcm {
                choices: vec!["Ctrl+C".into(), "Ctrl+V".into()],
                answer: Answer::One("Ctrl+C".into()),
                answer_index: Some(0),
            },
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "QCM");
        assert_eq!(value["answer"], "Ctrl+C");
        assert_eq!(value["answerIndex"], 0);
        assert_eq!(value["pdfPage"], 10);
        assert!(value.get("courseReference").is_none());
    }

    #[test]
    fn test_verdict_serializes_canonically() {
        let body = QuestionBody::TrueFalse { answer: Verdict::Faux };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["type"], "VraiFaux");
        assert_eq!(value["answer"], "Faux");
        assert_eq!(body.kind(), QuestionKind::TrueFalse);
    }
}
