//! Command dispatch: turns parsed command-line requests into library and
//! organizer calls and prints their results.

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};

mod commands;
mod report;
mod settings;


pub fn run() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let settings = settings::load_settings();
    let mut out = io::stdout().lock();

    match &cli.command {
        Command::Scan { source } => commands::scan(&settings, source.as_deref(), &mut out),
        Command::Organize {
            source,
            dest,
            by,
            mode,
            overwrite,
            dry_run,
            stop_on_error,
        } => {
            let request = commands::OrganizeRequest {
                source: source.clone(),
                dest: dest.clone(),
                group_key: *by,
                mode: *mode,
                overwrite: *overwrite,
                dry_run: *dry_run,
                stop_on_error: *stop_on_error,
            };
            commands::organize(&settings, request, &mut out)
        }
        Command::Edit { file, .. } => {
            let edit = cli.command.track_edit().unwrap_or_default();
            commands::edit(&settings, file, &edit, &mut out)
        }
        Command::Defaults { source, dest } => {
            commands::defaults(source.as_deref(), dest.as_deref(), &mut out)
        }
    }
}
