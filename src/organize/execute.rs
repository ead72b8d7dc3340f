use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::error::{PlanError, TransferError};

use super::types::{
    CancelToken, ExecuteOptions, OrganizePlan, Outcome, PlanEntry, Progress, RunEvent, RunReport,
    RunState, TransferMode,
};

/// Carry out `plan` one entry at a time.
///
/// Per-entry failures are recorded and the run moves on, unless
/// `options.stop_on_error` is set, in which case the first failure trips
/// `cancel`. `cancel` is only looked at before an entry starts; once
/// cancelled, the remaining entries are reported as `Failed(Cancelled)`.
/// `on_event` gets the state changes and exactly one `RunEvent::Entry` per
/// entry.
pub fn execute(
    plan: &OrganizePlan,
    options: &ExecuteOptions,
    cancel: &CancelToken,
    mut on_event: impl FnMut(RunEvent),
) -> RunReport {
    if let Err(err) = prepare_root(plan.root()) {
        warn!("organize run failed: {err}");
        on_event(RunEvent::StateChanged(RunState::Failed));
        return RunReport {
            state: RunState::Failed,
            results: Vec::new(),
            error: Some(err),
        };
    }

    on_event(RunEvent::StateChanged(RunState::Executing));

    let total = plan.len();
    let mut results = Vec::with_capacity(total);

    for (i, entry) in plan.entries().iter().enumerate() {
        let outcome = if cancel.is_cancelled() {
            Outcome::Failed(TransferError::Cancelled)
        } else {
            match transfer(entry, options) {
                Ok(()) => Outcome::Success,
                Err(err) => Outcome::Failed(err),
            }
        };

        match &outcome {
            Outcome::Success => info!(
                "{} {} -> {}",
                options.mode,
                entry.source.display(),
                entry.destination.display()
            ),
            Outcome::Failed(err) => {
                warn!("{} {}: {err}", options.mode, entry.source.display());
                if options.stop_on_error && !cancel.is_cancelled() {
                    info!("stopping after the first failure");
                    cancel.cancel();
                }
            }
        }

        on_event(RunEvent::Entry(Progress {
            completed: i + 1,
            total,
            entry: entry.clone(),
            outcome: outcome.clone(),
        }));
        results.push((entry.clone(), outcome));
    }

    let state = if results.iter().all(|(_, o)| o.is_success()) {
        RunState::Completed
    } else {
        RunState::PartiallyCompleted
    };
    info!(
        "organize run {state}: {} of {total} entries succeeded",
        results.iter().filter(|(_, o)| o.is_success()).count()
    );
    on_event(RunEvent::StateChanged(state));

    RunReport {
        state,
        results,
        error: None,
    }
}

/// Run [`execute`] on a worker thread, streaming its events over a channel.
///
/// The receiver closes once the run is over; join the handle for the report.
pub fn spawn_execute(
    plan: OrganizePlan,
    options: ExecuteOptions,
    cancel: CancelToken,
) -> (Receiver<RunEvent>, JoinHandle<RunReport>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        execute(&plan, &options, &cancel, |event| {
            // The front-end may stop listening; the run still finishes.
            let _ = tx.send(event);
        })
    });
    (rx, handle)
}

fn prepare_root(root: &Path) -> Result<(), PlanError> {
    let unwritable = |reason: String| PlanError::DestinationUnwritable {
        path: root.to_path_buf(),
        reason,
    };

    fs::create_dir_all(root).map_err(|e| unwritable(e.to_string()))?;
    let meta = fs::metadata(root).map_err(|e| unwritable(e.to_string()))?;
    if !meta.is_dir() {
        return Err(unwritable("not a directory".to_string()));
    }
    if meta.permissions().readonly() {
        return Err(unwritable("read-only".to_string()));
    }
    Ok(())
}

fn transfer(entry: &PlanEntry, options: &ExecuteOptions) -> Result<(), TransferError> {
    let source = entry.source.as_path();
    let destination = entry.destination.as_path();

    if !source.is_file() {
        return Err(TransferError::SourceMissing(source.to_path_buf()));
    }
    if is_same_file(source, destination) {
        debug!("{} is already in place", source.display());
        return Ok(());
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    match options.mode {
        TransferMode::Copy => copy_file(source, destination, options.overwrite),
        TransferMode::Move => move_file(source, destination, options.overwrite),
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn exists_error(destination: &Path, err: io::Error) -> TransferError {
    if err.kind() == io::ErrorKind::AlreadyExists {
        TransferError::DestinationExists(destination.to_path_buf())
    } else {
        err.into()
    }
}

/// Copy `source` to `destination` without leaving a partial file behind.
///
/// Without `overwrite` the destination is created with `create_new`, so an
/// existing file is never touched. With `overwrite` the data goes to a hidden
/// sibling first and is renamed over the destination once complete.
fn copy_file(source: &Path, destination: &Path, overwrite: bool) -> Result<(), TransferError> {
    if !overwrite {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .map_err(|e| exists_error(destination, e))?;
        if let Err(e) = fill(source, file) {
            discard(destination);
            return Err(e.into());
        }
        return Ok(());
    }

    let partial = partial_path(destination);
    let written = File::create(&partial)
        .and_then(|file| fill(source, file))
        .and_then(|()| fs::rename(&partial, destination));
    if let Err(e) = written {
        discard(&partial);
        return Err(e.into());
    }
    Ok(())
}

fn fill(source: &Path, mut file: File) -> io::Result<()> {
    let mut reader = File::open(source)?;
    io::copy(&mut reader, &mut file)?;
    file.set_permissions(reader.metadata()?.permissions())?;
    file.sync_all()
}

fn partial_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{name}.part"))
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!("could not remove {}: {e}", path.display());
        }
    }
}

/// Move `source` into place, falling back to copy + delete (e.g. across
/// filesystems).
///
/// Without `overwrite` the file is hard-linked into place, which fails
/// instead of replacing an existing destination.
fn move_file(source: &Path, destination: &Path, overwrite: bool) -> Result<(), TransferError> {
    let placed = if overwrite {
        fs::rename(source, destination)
    } else {
        fs::hard_link(source, destination)
    };
    match placed {
        Ok(()) => {
            if !overwrite {
                discard_source(source, destination)?;
            }
            return Ok(());
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(TransferError::DestinationExists(destination.to_path_buf()));
        }
        Err(e) => debug!(
            "{} cannot be renamed into place ({e}), copying instead",
            source.display()
        ),
    }

    copy_file(source, destination, overwrite)?;
    discard_source(source, destination)?;
    Ok(())
}

/// Remove the moved `source`; on failure drop the new copy so the source
/// stays the only one.
fn discard_source(source: &Path, destination: &Path) -> io::Result<()> {
    if let Err(e) = fs::remove_file(source) {
        discard(destination);
        return Err(e);
    }
    Ok(())
}
