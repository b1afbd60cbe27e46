use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const BOM: char = '\u{feff}';

/// NFD-decomposes `text` and drops the combining marks left behind.
fn strip_diacritics(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().filter(|c| !is_combining_mark(*c))
}

/// Reduces a column header to lowercase ASCII alphanumerics.
///
/// "Référence_Cours", "ReferenceCours" and "référence cours" all map to
/// "referencecours".
pub fn normalize_header_key(key: &str) -> String {
    let key = key.strip_prefix(BOM).unwrap_or(key);
    strip_diacritics(key)
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Reduces a cell value to lowercase word characters (`[a-z0-9_]`).
pub fn normalize_value_key(value: &str) -> String {
    strip_diacritics(value)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Accent and case folding for free text; inner punctuation is kept.
pub fn fold_text(text: &str) -> String {
    strip_diacritics(text).collect::<String>().to_lowercase().trim().to_string()
}

/// Compatibility folding used to compare answers with choices.
pub fn fold_compat(text: &str) -> String {
    text.nfkc().collect::<String>().trim().to_lowercase()
}

/// A row keyed by normalized header names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lookup {
    values: HashMap<String, String>,
}

impl Lookup {
    /// Builds the lookup from `(header, value)` pairs.
    ///
    /// Headers that normalize to nothing and blank values are skipped. When
    /// two headers collapse onto the same key the first non-empty value wins.
    pub fn build<'a, I>(row: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut values = HashMap::new();
        for (header, value) in row {
            let key = normalize_header_key(header);
            if key.is_empty() {
                continue;
            }
            let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            values.entry(key).or_insert_with(|| value.to_string());
        }
        Self { values }
    }

    /// Returns the first non-empty value among the candidate header names.
    pub fn get(&self, candidates: &[&str]) -> Option<&str> {
        candidates
            .iter()
            .filter_map(|c| self.values.get(&normalize_header_key(c)))
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
