use anyhow::Result;
use clap::Subcommand;
use quizcsv::backend::settings::Settings;
use std::process::ExitCode;

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the current settings and where they are stored
    Show,
    /// Delete the stored settings file
    Reset,
}

pub fn run(action: SettingsAction, settings: &mut Settings) -> Result<ExitCode> {
    match action {
        SettingsAction::Show => {
            match Settings::config_path() {
                Some(path) => println!("# {}", path.display()),
                None => println!("# no config directory on this platform"),
            }
            println!("delimiter: {}", settings.delimiter.name());
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        SettingsAction::Reset => {
            Settings::reset();
            *settings = Settings::default();
            println!("Settings reset to defaults.");
        }
    }
    Ok(ExitCode::SUCCESS)
}
