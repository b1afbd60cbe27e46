use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::question::{Question, QuestionBody};

/// Header written by [`write_canonical_csv`]; every alias the importer
/// accepts collapses onto one of these.
pub const CANONICAL_HEADERS: [&str; 11] = [
    "QuestionID",
    "Type",
    "Question",
    "Choix",
    "Réponse",
    "Thème",
    "RéférenceCours",
    "MotCléRecherchePDF",
    "Leçon",
    "PagePDF",
    "TexteRecherchePDF",
];

pub fn export_to_json(questions: &[Question], output_path: &Path) -> Result<()> {
    let output = File::create(output_path)
        .with_context(|| format!("Failed to create {:?}", output_path))?;
    let mut writer = BufWriter::new(output);
    serde_json::to_writer_pretty(&mut writer, questions).context("Failed to serialize questions")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes questions back as a semicolon sheet with the canonical header.
pub fn write_canonical_csv<W: Write>(questions: &[Question], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    writer.write_record(CANONICAL_HEADERS)?;

    for q in questions {
        let (choices, answer) = match &q.body {
            QuestionBody::Qcm { choices, answer, .. } => (choices.join("|"), answer.joined()),
            QuestionBody::TrueFalse { answer } => (String::new(), answer.as_str().to_string()),
            QuestionBody::FillBlank { answer } => (String::new(), answer.joined()),
            QuestionBody::Match { pairs } => {
                let joined = pairs
                    .iter()
                    .map(|p| format!("{}={}", p.left, p.right))
                    .collect::<Vec<_>>()
                    .join("|");
                (joined, String::new())
            }
        };
        let page = q.pdf_page.map(|p| p.to_string()).unwrap_or_default();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        writer.write_record([
            q.id.clone(),
            q.kind().name().to_string(),
            q.question.clone(),
            choices,
            answer,
            text(&q.theme),
            text(&q.course_reference),
            text(&q.pdf_keyword),
            text(&q.lesson),
            page,
            text(&q.pdf_search_text),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn export_to_csv(questions: &[Question], output_path: &Path) -> Result<()> {
    let output = File::create(output_path)
        .with_context(|| format!("Failed to create {:?}", output_path))?;
    write_canonical_csv(questions, BufWriter::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::importer::parse_csv;
    use tempfile::NamedTempFile;

    const SHEET: &str = "ID;Type;Question;Choix;Réponse;Thème;PagePDF\n\
                         1;QCM;Quelle touche pour copier?;Ctrl+C|Ctrl+V;Ctrl+C;Clavier;4\n\
                         2;Vrai/Faux;Le ciel est bleu.;;vrai;;\n\
                         3;Associer;Relier les paires;Copier=Ctrl+C|Coller=Ctrl+V;;;\n";

    #[test]
    fn test_canonical_csv_reimports_identically() -> Result<()> {
        let report = parse_csv(SHEET)?;
        let mut out = Vec::new();
        write_canonical_csv(&report.questions, &mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.starts_with("QuestionID;Type;Question;Choix;Réponse;Thème"));
        assert!(text.contains("2;VraiFaux;Le ciel est bleu.;;Vrai;"));

        let again = parse_csv(&text)?;
        assert!(again.errors.is_empty(), "{:?}", again.errors);
        assert_eq!(again.questions, report.questions);
        Ok(())
    }

    #[test]
    fn test_export_json_file() -> Result<()> {
        let report = parse_csv(SHEET)?;
        let file = NamedTempFile::new()?;
        export_to_json(&report.questions, file.path())?;

        let written = std::fs::read_to_string(file.path())?;
        let value: serde_json::Value = serde_json::from_str(&written)?;
        assert_eq!(value.as_array().map(|a| a.len()), Some(3));
        assert_eq!(value[0]["theme"], "Clavier");
        assert_eq!(value[2]["pairs"][1]["right"], "Ctrl+V");
        Ok(())
    }
}
