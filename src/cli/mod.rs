mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quizcsv::backend::analysis::ImportSummary;
use quizcsv::backend::delimiter::Delimiter;
use quizcsv::backend::export::{export_to_csv, export_to_json};
use quizcsv::backend::importer::{ImportOptions, PagePolicy, QuestionImporter};
use quizcsv::backend::loader::SheetLoader;
use quizcsv::backend::question::{ImportReport, QuestionKind};
use quizcsv::backend::settings::Settings;
use quizcsv::backend::store::{MemoryStore, QuestionStore, replace_all};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

pub use self::settings::SettingsAction;

#[derive(Parser, Debug)]
#[command(version, about = "Import quiz question sheets", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a sheet and write the accepted questions
    Import {
        /// Path to the CSV sheet
        file: PathBuf,
        /// Write the questions as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the questions back as a canonical semicolon sheet
        #[arg(long)]
        csv: Option<PathBuf>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Report rejected rows and warnings; fails when any row is rejected
    Check {
        file: PathBuf,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Count questions per type and theme
    Summary {
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Show or reset the stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Outer delimiter (';' or ','); sniffed from the sheet when omitted
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<Delimiter>,
    /// Reject rows whose PDF page is not a number
    #[arg(long)]
    strict_pages: bool,
}

impl ParseArgs {
    fn options(&self, settings: &Settings) -> ImportOptions {
        let mut options = settings.import_options();
        if self.delimiter.is_some() {
            options.delimiter = self.delimiter;
        }
        if self.strict_pages {
            options.page_policy = PagePolicy::Reject;
        }
        options
    }
}

fn parse_delimiter(raw: &str) -> Result<Delimiter, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Delimiter::from_char(c).ok_or_else(|| format!("unsupported delimiter {:?}", raw)),
        _ => Err(format!("expected a single character, got {:?}", raw)),
    }
}

pub fn run(command: Command, settings: &mut Settings) -> Result<ExitCode> {
    match command {
        Command::Import {
            file,
            output,
            csv,
            parse,
        } => import(&file, output.as_deref(), csv.as_deref(), &parse, settings),
        Command::Check { file, parse } => check(&file, &parse, settings),
        Command::Summary { file, json, parse } => summary(&file, json, &parse, settings),
        Command::Settings { action } => settings::run(action, settings),
    }
}

fn load_report(file: &Path, parse: &ParseArgs, settings: &mut Settings) -> Result<ImportReport> {
    info!(file = %file.display(), "loading sheet");
    let loader = SheetLoader::new(file)?;
    let text = loader.text()?;

    let importer = QuestionImporter::new(parse.options(settings));
    let report = importer
        .import(&text)
        .with_context(|| format!("Failed to import {:?}", file))?;

    settings.add_recent_file(&file.to_string_lossy());
    settings.save();
    Ok(report)
}

fn print_messages(report: &ImportReport) {
    for error in &report.errors {
        println!("error: {}", error);
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
}

fn import(
    file: &Path,
    output: Option<&Path>,
    csv: Option<&Path>,
    parse: &ParseArgs,
    settings: &mut Settings,
) -> Result<ExitCode> {
    let report = load_report(file, parse, settings)?;
    print_messages(&report);

    let mut store = MemoryStore::new();
    let inserted = replace_all(&mut store, report.questions)?;
    let questions = store.select(None)?;

    if let Some(path) = output {
        export_to_json(&questions, path)?;
        println!("Wrote {} questions to {:?}", questions.len(), path);
    }
    if let Some(path) = csv {
        export_to_csv(&questions, path)?;
        println!("Wrote canonical sheet to {:?}", path);
    }

    println!(
        "Imported {} questions, {} rows rejected.",
        inserted,
        report.errors.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn check(file: &Path, parse: &ParseArgs, settings: &mut Settings) -> Result<ExitCode> {
    let report = load_report(file, parse, settings)?;
    print_messages(&report);
    println!(
        "{} questions OK, {} rejected, {} warnings.",
        report.questions.len(),
        report.errors.len(),
        report.warnings.len()
    );
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn summary(file: &Path, json: bool, parse: &ParseArgs, settings: &mut Settings) -> Result<ExitCode> {
    let report = load_report(file, parse, settings)?;
    let summary = ImportSummary::from_report(&report);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} questions ({} rows rejected, {} warnings)", summary.total, summary.rejected, summary.warnings);
    for kind in QuestionKind::all() {
        println!("  {:<10} {}", kind.name(), summary.count(*kind));
    }
    if !summary.top_themes.is_empty() {
        println!("Top themes:");
        for (theme, count) in &summary.top_themes {
            println!("  {:<24} {}", theme, count);
        }
    }
    println!("Without theme: {}", summary.without_theme);
    println!("Without course reference: {}", summary.without_course_reference);
    if !summary.duplicate_ids.is_empty() {
        println!("Duplicate IDs: {}", summary.duplicate_ids.join(", "));
    }
    if !summary.lesson_mismatches.is_empty() {
        println!("Lesson differs from course reference:");
        for m in &summary.lesson_mismatches {
            println!("  Q{}: \"{}\" vs \"{}\"", m.id, m.lesson, m.course_reference);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(Delimiter::Semicolon));
        assert_eq!(parse_delimiter(","), Ok(Delimiter::Comma));
        assert!(parse_delimiter("|").is_err());
        assert!(parse_delimiter(";;").is_err());
    }

    #[test]
    fn test_cli_overrides_settings() {
        let args = Args::parse_from(["quizcsv", "check", "quiz.csv", "-d", ",", "--strict-pages"]);
        let Command::Check { parse, .. } = args.command else {
            panic!("expected check");
        };
        let options = parse.options(&Settings::default());
        assert_eq!(options.delimiter, Some(Delimiter::Comma));
        assert_eq!(options.page_policy, PagePolicy::Reject);
    }

    #[test]
    fn test_settings_used_without_flags() {
        let args = Args::parse_from(["quizcsv", "summary", "quiz.csv"]);
        let Command::Summary { parse, json, .. } = args.command else {
            panic!("expected summary");
        };
        assert!(!json);
        let settings = Settings {
            page_policy: PagePolicy::Reject,
            ..Default::default()
        };
        assert_eq!(parse.options(&settings).page_policy, PagePolicy::Reject);
        assert_eq!(parse.options(&settings).delimiter, None);
    }
}
