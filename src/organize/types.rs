//! Small types shared by planning and execution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, TransferError};
use crate::library::Track;

/// Attribute used to bucket tracks into destination folders.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKey {
    Artist,
    Genre,
    /// The track's first tag.
    #[serde(alias = "tags")]
    Tag,
}

impl GroupKey {
    /// The track's value for this key, if it has one.
    pub fn value<'a>(&self, track: &'a Track) -> Option<&'a str> {
        let v = match self {
            GroupKey::Artist => track.artist.as_deref(),
            GroupKey::Genre => track.genre.as_deref(),
            GroupKey::Tag => track.tags.first().map(String::as_str),
        };
        v.filter(|s| !s.trim().is_empty())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupKey::Artist => "artist",
            GroupKey::Genre => "genre",
            GroupKey::Tag => "tag",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TransferMode {
    Copy,
    Move,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub mode: TransferMode,
    /// Replace files that already exist at the destination.
    pub overwrite: bool,
    /// Cancel the remaining entries once one transfer fails.
    pub stop_on_error: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            mode: TransferMode::Copy,
            overwrite: false,
            stop_on_error: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Source to destination mapping computed by [`plan`](super::plan).
///
/// Entries keep the order of the input tracks and no two share a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizePlan {
    pub(super) root: PathBuf,
    pub(super) group_key: GroupKey,
    pub(super) entries: Vec<PlanEntry>,
}

impl OrganizePlan {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn group_key(&self) -> GroupKey {
        self.group_key
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destination planned for `source`, if it is part of the plan.
    #[cfg(test)]
    pub fn destination_of(&self, source: &Path) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.source == source)
            .map(|e| e.destination.as_path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed(TransferError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Lifecycle of one organize run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    Planned,
    Executing,
    /// Every entry succeeded.
    Completed,
    /// At least one entry failed or was cancelled.
    PartiallyCompleted,
    /// The destination could not be prepared; nothing was attempted.
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Planned => "planned",
            RunState::Executing => "executing",
            RunState::Completed => "completed",
            RunState::PartiallyCompleted => "partially completed",
            RunState::Failed => "failed",
        })
    }
}

/// Sent once per finished entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Entries finished so far, including this one.
    pub completed: usize,
    pub total: usize,
    pub entry: PlanEntry,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    StateChanged(RunState),
    Entry(Progress),
}

#[derive(Debug)]
pub struct RunReport {
    pub state: RunState,
    pub results: Vec<(PlanEntry, Outcome)>,
    /// Set when `state` is `Failed`.
    pub error: Option<PlanError>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Cooperative cancellation flag, checked between entries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
