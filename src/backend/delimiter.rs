use serde::{Deserialize, Serialize};

/// Number of lines sampled when sniffing the delimiter.
pub const DEFAULT_SAMPLE_LINES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    Semicolon,
    Comma,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Semicolon => b';',
            Delimiter::Comma => b',',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ';' => Some(Delimiter::Semicolon),
            ',' => Some(Delimiter::Comma),
            _ => None,
        }
    }
}

/// Picks `;` or `,` from the first five lines of `text`.
pub fn detect_delimiter(text: &str) -> Delimiter {
    detect_delimiter_with(text, DEFAULT_SAMPLE_LINES)
}

/// Counts `;` and `,` over the first `sample_lines` lines. Ties go to the
/// semicolon; a sample without either falls back to the comma.
pub fn detect_delimiter_with(text: &str, sample_lines: usize) -> Delimiter {
    let mut semicolons = 0usize;
    let mut commas = 0usize;

    // Splitting on '\n' leaves a trailing '\r', which counts as neither.
    for line in text.split('\n').take(sample_lines.max(1)) {
        for c in line.chars() {
            match c {
                ';' => semicolons += 1,
                ',' => commas += 1,
                _ => {}
            }
        }
    }

    if semicolons == 0 && commas == 0 {
        return Delimiter::Comma;
    }
    if semicolons >= commas {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}
