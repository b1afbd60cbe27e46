mod cli;

use anyhow::Result;
use clap::Parser;
use quizcsv::backend::settings::Settings;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = Settings::load();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    cli::run(args.command, &mut settings)
}
