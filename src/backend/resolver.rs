use super::normalize::normalize_value_key;
use super::question::QuestionKind;

/// Maps a free-form `Type` cell ("QCM", "Choix multiple", "Vrai/Faux",
/// "VF", "Compléter", "Relier"...) to a question kind.
///
/// Token groups are tried in order and the first match wins.
pub fn resolve_question_type(raw: Option<&str>) -> Option<QuestionKind> {
    let normalized = normalize_value_key(raw?);
    if normalized.is_empty() {
        return None;
    }
    let has = |token: &str| normalized.contains(token);
    let has_any = |tokens: &[&str]| tokens.iter().any(|t| has(t));

    if has_any(&["qcm", "qcu"]) || (has("choix") && has_any(&["multiple", "unique"])) {
        return Some(QuestionKind::Qcm);
    }
    if has_any(&["vraifaux", "vf", "vraioufaux"]) || (has("vrai") && has("faux")) {
        return Some(QuestionKind::TrueFalse);
    }
    if has_any(&["completer", "texte", "saisie", "lacune"]) {
        return Some(QuestionKind::FillBlank);
    }
    if has_any(&["associer", "assoc", "appari", "matching", "relier"]) {
        return Some(QuestionKind::Match);
    }
    None
}
