use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::delimiter::{DEFAULT_SAMPLE_LINES, Delimiter};
use super::importer::{ImportOptions, PagePolicy};

#[derive(PartialEq, Clone, Copy, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterChoice {
    #[default]
    Auto,
    Semicolon,
    Comma,
}

impl DelimiterChoice {
    pub fn name(&self) -> &'static str {
        match self {
            DelimiterChoice::Auto => "auto",
            DelimiterChoice::Semicolon => "semicolon",
            DelimiterChoice::Comma => "comma",
        }
    }

    pub fn delimiter(&self) -> Option<Delimiter> {
        match self {
            DelimiterChoice::Auto => None,
            DelimiterChoice::Semicolon => Some(Delimiter::Semicolon),
            DelimiterChoice::Comma => Some(Delimiter::Comma),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub delimiter: DelimiterChoice,
    #[serde(default = "default_sample_lines")]
    pub sample_lines: usize,
    #[serde(default)]
    pub page_policy: PagePolicy,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub recent_files: Vec<String>,
    #[serde(default = "default_max_recent")]
    pub max_recent_files: usize,
}

fn default_sample_lines() -> usize {
    DEFAULT_SAMPLE_LINES
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_max_recent() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DelimiterChoice::Auto,
            sample_lines: DEFAULT_SAMPLE_LINES,
            page_policy: PagePolicy::Warn,
            log_filter: default_log_filter(),
            recent_files: Vec::new(),
            max_recent_files: 10,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "quizcsv").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads settings from `path`; a missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read settings");
                Self::default()
            }
        }
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            delimiter: self.delimiter.delimiter(),
            sample_lines: self.sample_lines.max(1),
            page_policy: self.page_policy,
        }
    }

    pub fn add_recent_file(&mut self, path: &str) {
        self.recent_files.retain(|p| p != path);
        self.recent_files.insert(0, path.to_string());
        self.recent_files.truncate(self.max_recent_files);
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                let _ = fs::create_dir_all(dir);
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = fs::write(path, content) {
                    warn!(path = %path.display(), error = %e, "cannot write settings");
                }
            }
            Err(e) => warn!(error = %e, "cannot serialize settings"),
        }
    }

    pub fn reset() {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_importer() {
        assert_eq!(Settings::default().import_options(), ImportOptions::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::default();
        settings.delimiter = DelimiterChoice::Semicolon;
        settings.page_policy = PagePolicy::Reject;
        settings.save_to(&path);

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        let options = loaded.import_options();
        assert_eq!(options.delimiter, Some(Delimiter::Semicolon));
        assert_eq!(options.page_policy, PagePolicy::Reject);
    }

    #[test]
    fn test_partial_and_malformed_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        fs::write(&path, r#"{"page_policy": "reject"}"#).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.page_policy, PagePolicy::Reject);
        assert_eq!(loaded.sample_lines, DEFAULT_SAMPLE_LINES);
        assert_eq!(loaded.max_recent_files, 10);

        fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_recent_files() {
        let mut settings = Settings {
            max_recent_files: 2,
            ..Default::default()
        };
        settings.add_recent_file("a.csv");
        settings.add_recent_file("b.csv");
        settings.add_recent_file("a.csv");
        settings.add_recent_file("c.csv");
        assert_eq!(settings.recent_files, vec!["c.csv", "a.csv"]);
    }
}
