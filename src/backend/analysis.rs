use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::question::{ImportReport, Question, QuestionKind};

/// A question whose `Leçon` and `RéférenceCours` cells disagree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LessonMismatch {
    pub id: String,
    pub lesson: String,
    pub course_reference: String,
}

/// Aggregate view of one import.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub rejected: usize,
    pub warnings: usize,
    pub per_kind: BTreeMap<QuestionKind, usize>,
    /// Most frequent themes first, ties by name.
    pub top_themes: Vec<(String, usize)>,
    pub without_theme: usize,
    pub without_course_reference: usize,
    pub duplicate_ids: Vec<String>,
    pub lesson_mismatches: Vec<LessonMismatch>,
}

impl ImportSummary {
    pub fn from_report(report: &ImportReport) -> Self {
        let mut summary = Self::from_questions(&report.questions);
        summary.rejected = report.errors.len();
        summary.warnings = report.warnings.len();
        summary
    }

    pub fn from_questions(questions: &[Question]) -> Self {
        let mut summary = Self {
            total: questions.len(),
            ..Default::default()
        };

        let mut themes: HashMap<&str, usize> = HashMap::new();
        let mut ids: HashMap<&str, usize> = HashMap::new();

        for q in questions {
            *summary.per_kind.entry(q.kind()).or_insert(0) += 1;
            *ids.entry(q.id.as_str()).or_insert(0) += 1;

            match q.theme.as_deref() {
                Some(theme) => *themes.entry(theme).or_insert(0) += 1,
                None => summary.without_theme += 1,
            }
            if q.course_reference.is_none() {
                summary.without_course_reference += 1;
            }
            if let (Some(lesson), Some(reference)) = (&q.lesson, &q.course_reference) {
                if lesson != reference {
                    summary.lesson_mismatches.push(LessonMismatch {
                        id: q.id.clone(),
                        lesson: lesson.clone(),
                        course_reference: reference.clone(),
                    });
                }
            }
        }

        let mut top: Vec<(String, usize)> = themes
            .into_iter()
            .map(|(theme, count)| (theme.to_string(), count))
            .collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        summary.top_themes = top.into_iter().take(5).collect();

        let mut duplicates: Vec<String> = ids
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect();
        duplicates.sort();
        summary.duplicate_ids = duplicates;

        summary
    }

    pub fn count(&self, kind: QuestionKind) -> usize {
        self.per_kind.get(&kind).copied().unwrap_or(0)
    }
}
