use quizcsv::backend::loader::SheetLoader;
use quizcsv::{Answer, QuestionBody, QuestionKind, Verdict, parse_csv, parse_csv_bytes};
use std::io::Write;
use tempfile::NamedTempFile;

const SHEET: &str = "ID;Type;Question;Choix;Réponse\n\
                     1;QCM;Quelle touche pour copier?;Ctrl+C|Ctrl+V;Ctrl+C\n\
                     2;VraiFaux;Le ciel est bleu.;;Vrai\n\
                     3;Associer;Relier les paires;Copier=Ctrl+C|Coller=Ctrl+V;\n";

#[test]
fn imports_the_three_kinds_from_a_semicolon_sheet() {
    let report = parse_csv(SHEET).unwrap();
    assert!(report.errors.is_empty());
    assert_eq!(report.questions.len(), 3);

    let kinds: Vec<_> = report.questions.iter().map(|q| q.kind()).collect();
    assert_eq!(
        kinds,
        vec![QuestionKind::Qcm, QuestionKind::TrueFalse, QuestionKind::Match]
    );
    let ids: Vec<_> = report.questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    match &report.questions[0].body {
        QuestionBody::Qcm { choices, answer, .. } => {
            assert_eq!(choices, &vec!["Ctrl+C".to_string(), "Ctrl+V".to_string()]);
            assert_eq!(answer, &Answer::One("Ctrl+C".into()));
        }
        other => panic!("expected QCM, got {:?}", other),
    }
    assert_eq!(
        report.questions[1].body,
        QuestionBody::TrueFalse { answer: Verdict::Vrai }
    );
}

#[test]
fn malformed_rows_are_reported_without_stopping_the_import() {
    let text = format!("{}4;Dessin;Q;;x\n5;VF;Q;;Oui\n6;VF;Q;;Faux\n", SHEET);
    let report = parse_csv(&text).unwrap();
    assert_eq!(report.questions.len(), 4);
    assert_eq!(
        report.errors,
        vec!["Line 5: unknown type", "Line 6: invalid True/False answer"]
    );
}

#[test]
fn windows_1252_file_imports_like_utf8() -> anyhow::Result<()> {
    let mut file = NamedTempFile::new()?;
    // "Thème" and "Réponse" headers in Windows-1252
    file.write_all(b"ID;Type;Question;R\xE9ponse;Th\xE8me\r\n1;VF;Le ciel est bleu.;Vrai;M\xE9t\xE9o\r\n")?;

    let loader = SheetLoader::new(file.path())?;
    let report = parse_csv_bytes(loader.bytes())?;
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(report.questions[0].theme.as_deref(), Some("Météo"));
    Ok(())
}
