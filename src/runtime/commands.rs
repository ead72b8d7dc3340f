use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{debug, info};

use crate::config::{Settings, resolve_config_path};
use crate::error::SettingsError;
use crate::library::{self, LibraryIndex, TrackEdit};
use crate::organize::{
    self, CancelToken, ExecuteOptions, GroupKey, RunEvent, RunState, TransferMode,
};

use super::report;

type CmdResult = Result<ExitCode, Box<dyn Error>>;

/// Options of an `organize` invocation before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct OrganizeRequest {
    pub source: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    pub group_key: Option<GroupKey>,
    pub mode: Option<TransferMode>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub stop_on_error: bool,
}

/// An `organize` invocation with every setting decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeJob {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub group_key: GroupKey,
    pub options: ExecuteOptions,
}

pub fn resolve_organize(
    settings: &Settings,
    request: &OrganizeRequest,
) -> Result<OrganizeJob, Box<dyn Error>> {
    let source = request
        .source
        .clone()
        .or_else(|| settings.organize.default_source.clone())
        .ok_or("no source folder given and organize.default_source is not set")?;
    let dest = request
        .dest
        .clone()
        .or_else(|| settings.organize.default_destination.clone())
        .ok_or("no destination folder given and organize.default_destination is not set")?;

    Ok(OrganizeJob {
        source,
        dest,
        group_key: request.group_key.unwrap_or(settings.organize.group_by),
        options: ExecuteOptions {
            mode: request.mode.unwrap_or(settings.organize.mode),
            overwrite: request.overwrite || settings.organize.overwrite,
            stop_on_error: request.stop_on_error,
        },
    })
}

fn scan_source(
    settings: &Settings,
    source: &Path,
    out: &mut impl Write,
) -> Result<LibraryIndex, Box<dyn Error>> {
    let mut index = LibraryIndex::new();
    let scan = index.scan(source, &settings.library)?;
    for line in report::skipped_lines(&scan) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", report::scan_summary(&scan))?;
    Ok(index)
}

pub fn scan(settings: &Settings, source: Option<&Path>, out: &mut impl Write) -> CmdResult {
    let source = source
        .map(Path::to_path_buf)
        .or_else(|| settings.organize.default_source.clone())
        .ok_or("no folder given and organize.default_source is not set")?;

    let index = scan_source(settings, &source, out)?;
    for row in library::table_rows(
        index.get_all(),
        &settings.ui.columns,
        &settings.ui.column_separator,
    ) {
        writeln!(out, "{row}")?;
    }
    Ok(ExitCode::SUCCESS)
}

pub fn organize(settings: &Settings, request: OrganizeRequest, out: &mut impl Write) -> CmdResult {
    let job = resolve_organize(settings, &request)?;
    info!(
        "organizing {} into {} by {} ({})",
        job.source.display(),
        job.dest.display(),
        job.group_key,
        job.options.mode
    );

    let index = scan_source(settings, &job.source, out)?;
    let plan = organize::plan(index.get_all(), job.group_key, &job.dest)?;
    debug!("organize run {}: {} entries", RunState::Planned, plan.len());

    if plan.is_empty() {
        writeln!(out, "nothing to organize")?;
        return Ok(ExitCode::SUCCESS);
    }

    if request.dry_run {
        for line in report::plan_lines(&plan) {
            writeln!(out, "{line}")?;
        }
        writeln!(
            out,
            "{} files would be organized by {}",
            plan.len(),
            plan.group_key()
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    let (events, worker) = organize::spawn_execute(plan, job.options, CancelToken::new());
    for event in events {
        match event {
            RunEvent::StateChanged(state) => debug!("organize run {state}"),
            RunEvent::Entry(progress) => writeln!(out, "{}", report::progress_line(&progress))?,
        }
    }
    let run = worker.join().map_err(|_| "organize worker panicked")?;

    writeln!(out, "{}", report::run_summary(&run))?;
    Ok(match run.state {
        RunState::Completed => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

pub fn edit(settings: &Settings, file: &Path, edit: &TrackEdit, out: &mut impl Write) -> CmdResult {
    let mut index = LibraryIndex::new();
    index.upsert(library::read_track(file, &settings.library)?);

    if edit.is_empty() {
        writeln!(out, "nothing to change")?;
    } else {
        let updated = index.update(file, edit)?;
        library::write_track(updated)?;
        info!("saved tags of {}", file.display());
    }

    for row in library::table_rows(
        index.get_all(),
        &settings.ui.columns,
        &settings.ui.column_separator,
    ) {
        writeln!(out, "{row}")?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Persist default folders to `config_path`, returning the settings written.
///
/// Only the file itself is read back, so environment overrides are never
/// written into it. A file that does not parse or validate is left alone.
pub fn save_defaults(
    config_path: &Path,
    source: Option<&Path>,
    dest: Option<&Path>,
) -> Result<Settings, Box<dyn Error>> {
    let mut settings = Settings::load_file(config_path)?;
    settings
        .validate()
        .map_err(|e| format!("{}: {e}; fix the file first", config_path.display()))?;
    if let Some(source) = source {
        settings.organize.default_source = Some(std::path::absolute(source)?);
    }
    if let Some(dest) = dest {
        settings.organize.default_destination = Some(std::path::absolute(dest)?);
    }
    settings.save(config_path)?;
    Ok(settings)
}

pub fn defaults(source: Option<&Path>, dest: Option<&Path>, out: &mut impl Write) -> CmdResult {
    let path = resolve_config_path().ok_or(SettingsError::NoConfigPath)?;
    let saved = save_defaults(&path, source, dest)?;

    let show = |p: &Option<PathBuf>| {
        p.as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };
    writeln!(out, "config: {}", path.display())?;
    writeln!(out, "default source: {}", show(&saved.organize.default_source))?;
    writeln!(
        out,
        "default destination: {}",
        show(&saved.organize.default_destination)
    )?;
    Ok(ExitCode::SUCCESS)
}
