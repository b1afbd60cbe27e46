use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::delimiter::{DEFAULT_SAMPLE_LINES, Delimiter, detect_delimiter_with};
use super::error::{ImportError, RowError};
use super::loader::decode_text;
use super::normalize::{Lookup, fold_compat, fold_text};
use super::parser::CsvParser;
use super::question::{Answer, ImportReport, MatchPair, Question, QuestionBody, QuestionKind, Verdict};
use super::resolver::resolve_question_type;

const ID: &[&str] = &["ID", "Identifiant", "QuestionID"];
const TYPE: &[&str] = &["Type", "QuestionType"];
const QUESTION: &[&str] = &["Question", "Enonce", "Texte", "Intitulé"];
const THEME: &[&str] = &["Theme", "Thème", "Categorie"];
const COURSE_REFERENCE: &[&str] = &["ReferenceCours", "RéférenceCours", "CourseReference"];
const PDF_KEYWORD: &[&str] = &["MotClePDF", "MotCléRecherchePDF", "PdfKeyword"];
const PDF_PAGE: &[&str] = &["PagePDF", "Page", "PdfPage"];
const LESSON: &[&str] = &["Leçon", "Lesson"];
const PDF_SEARCH_TEXT: &[&str] = &["TexteRecherchePDF", "PdfSearchText"];
const CHOICES: &[&str] = &["Choix", "Options", "Reponses"];
const ANSWER: &[&str] = &["Reponse", "Answer"];
const PAIRS: &[&str] = &["Choix", "Pairs", "Associations"];

/// What to do with a `PagePDF` cell that is not a number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePolicy {
    /// Keep the question, drop the page and report a warning.
    #[default]
    Warn,
    /// Reject the row.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    /// Forces the outer delimiter instead of sniffing it.
    pub delimiter: Option<Delimiter>,
    pub sample_lines: usize,
    pub page_policy: PagePolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            sample_lines: DEFAULT_SAMPLE_LINES,
            page_policy: PagePolicy::Warn,
        }
    }
}

/// Parses quiz sheets into questions, one row at a time.
#[derive(Clone, Debug, Default)]
pub struct QuestionImporter {
    options: ImportOptions,
}

impl QuestionImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Parses CSV text. Row failures land in the report; only an
    /// unreadable CSV structure fails the whole call.
    pub fn import(&self, text: &str) -> Result<ImportReport, ImportError> {
        let delimiter = match self.options.delimiter {
            Some(d) => d,
            None => {
                let d = detect_delimiter_with(text, self.options.sample_lines);
                debug!(delimiter = %d.as_char(), "detected delimiter");
                d
            }
        };

        let table = CsvParser::parse_table(text, delimiter)?;
        let mut report = ImportReport::default();

        for (index, row) in table.rows.iter().enumerate() {
            let lookup = Lookup::build(table.entries(row));
            let mut warnings = Vec::new();
            match self.build_question(&lookup, index, &mut warnings) {
                Ok(question) => report.questions.push(question),
                Err(err) => {
                    debug!(line = row.line, code = err.code(), "row rejected");
                    report.errors.push(err.at_line(row.line));
                    continue;
                }
            }
            report
                .warnings
                .extend(warnings.into_iter().map(|w| format!("Line {}: {}", row.line, w)));
        }

        info!(
            questions = report.questions.len(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "import finished"
        );
        Ok(report)
    }

    /// Decodes raw upload bytes, then parses them.
    pub fn import_bytes(&self, bytes: &[u8]) -> Result<ImportReport, ImportError> {
        let text = decode_text(bytes)?;
        self.import(&text)
    }

    fn build_question(
        &self,
        lookup: &Lookup,
        index: usize,
        warnings: &mut Vec<String>,
    ) -> Result<Question, RowError> {
        let kind = resolve_question_type(lookup.get(TYPE)).ok_or(RowError::UnknownType)?;
        let question = lookup
            .get(QUESTION)
            .ok_or(RowError::MissingField("question"))?
            .to_string();

        let id = lookup
            .get(ID)
            .map(str::to_string)
            .unwrap_or_else(|| (index + 1).to_string());
        let pdf_page = self.parse_page(lookup.get(PDF_PAGE), warnings)?;

        let body = match kind {
            QuestionKind::Qcm => parse_qcm(lookup, warnings)?,
            QuestionKind::TrueFalse => parse_true_false(lookup)?,
            QuestionKind::FillBlank => parse_fill_blank(lookup)?,
            QuestionKind::Match => parse_match(lookup)?,
        };

        let optional = |names: &[&str]| lookup.get(names).map(str::to_string);
        Ok(Question {
            id,
            question,
            theme: optional(THEME),
            course_reference: optional(COURSE_REFERENCE),
            pdf_keyword: optional(PDF_KEYWORD),
            pdf_page,
            lesson: optional(LESSON),
            pdf_search_text: optional(PDF_SEARCH_TEXT),
            body,
        })
    }

    fn parse_page(
        &self,
        raw: Option<&str>,
        warnings: &mut Vec<String>,
    ) -> Result<Option<u32>, RowError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        match raw.parse::<u32>() {
            Ok(page) => Ok(Some(page)),
            Err(_) => match self.options.page_policy {
                PagePolicy::Warn => {
                    warnings.push(format!("non-numeric PDF page ({}) ignored", raw));
                    Ok(None)
                }
                PagePolicy::Reject => Err(RowError::InvalidPage(raw.to_string())),
            },
        }
    }
}

/// Parses `text` with default options.
pub fn parse_csv(text: &str) -> Result<ImportReport, ImportError> {
    QuestionImporter::default().import(text)
}

/// Parses raw upload bytes with default options.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<ImportReport, ImportError> {
    QuestionImporter::default().import_bytes(bytes)
}

/// Splits a multi-value cell on `|` or `;`, trimming and dropping empties.
fn split_values(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(['|', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_qcm(lookup: &Lookup, warnings: &mut Vec<String>) -> Result<QuestionBody, RowError> {
    let choices = split_values(lookup.get(CHOICES));
    if choices.is_empty() {
        return Err(RowError::MissingChoices);
    }
    let answer =
        Answer::from_parts(split_values(lookup.get(ANSWER))).ok_or(RowError::MissingQcmAnswer)?;

    let folded: Vec<String> = choices.iter().map(|c| fold_compat(c)).collect();
    let position = |part: &str| {
        let part = fold_compat(part);
        folded.iter().position(|c| *c == part)
    };
    for part in answer.parts() {
        if position(part).is_none() {
            warnings.push(format!("QCM answer \"{}\" is not one of the choices", part));
        }
    }
    let answer_index = match &answer {
        Answer::One(a) => position(a),
        Answer::Many(_) => None,
    };

    Ok(QuestionBody::Qcm {
        choices,
        answer,
        answer_index,
    })
}

fn parse_true_false(lookup: &Lookup) -> Result<QuestionBody, RowError> {
    let raw = lookup.get(ANSWER).ok_or(RowError::MissingBooleanAnswer)?;
    let answer = match fold_text(raw).as_str() {
        "vrai" | "true" => Verdict::Vrai,
        "faux" | "false" => Verdict::Faux,
        _ => return Err(RowError::InvalidBooleanAnswer),
    };
    Ok(QuestionBody::TrueFalse { answer })
}

fn parse_fill_blank(lookup: &Lookup) -> Result<QuestionBody, RowError> {
    let answer =
        Answer::from_parts(split_values(lookup.get(ANSWER))).ok_or(RowError::MissingAnswer)?;
    Ok(QuestionBody::FillBlank { answer })
}

fn parse_match(lookup: &Lookup) -> Result<QuestionBody, RowError> {
    let raw = lookup.get(PAIRS).or_else(|| lookup.get(ANSWER));
    let pairs = parse_pairs(raw.unwrap_or_default());
    if pairs.is_empty() {
        return Err(RowError::MissingPairs);
    }
    Ok(QuestionBody::Match { pairs })
}

/// `Copier=Ctrl+C|Coller -> Ctrl+V` style pairs; `=`, `->` and `:` separate
/// the two sides.
fn parse_pairs(raw: &str) -> Vec<MatchPair> {
    raw.split(['|', ';'])
        .filter_map(|entry| {
            let mut sides = entry.split("->").flat_map(|s| s.split(['=', ':']));
            let left = sides.next()?.trim();
            let right = sides.next()?.trim();
            if left.is_empty() || right.is_empty() {
                return None;
            }
            Some(MatchPair {
                left: left.to_string(),
                right: right.to_string(),
            })
        })
        .collect()
}
