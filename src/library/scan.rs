use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{LibraryError, ReadError};

use super::index::LibraryIndex;
use super::reader::read_track;

/// A file the scan could not index, and why.
#[derive(Debug)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: ReadError,
}

/// Summary of one `scan` call.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Tracks found (and indexed) under the scanned root.
    pub indexed: usize,
    /// Previously indexed tracks under the root that are gone now.
    pub removed: usize,
    pub skipped: Vec<Skipped>,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

impl LibraryIndex {
    /// Walk `root` and (re)index every audio file under it.
    ///
    /// Files the metadata reader rejects are reported in `skipped`; they
    /// never abort the walk. Entries under `root` that no longer exist are
    /// dropped from the index.
    pub fn scan(
        &mut self,
        root: &Path,
        settings: &LibrarySettings,
    ) -> Result<ScanReport, LibraryError> {
        if !root.is_dir() {
            return Err(LibraryError::InvalidRoot(root.to_path_buf()));
        }

        let mut report = ScanReport::default();
        let mut found: HashSet<PathBuf> = HashSet::new();

        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    debug!("skipping unreadable entry {}: {err}", path.display());
                    report.skipped.push(Skipped {
                        reason: ReadError::Io {
                            path: path.clone(),
                            source: io::Error::from(err),
                        },
                        path,
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            match read_track(path, settings) {
                Ok(track) => {
                    found.insert(track.source_path.clone());
                    self.upsert(track);
                }
                Err(reason) => {
                    debug!("skipping {}: {reason}", path.display());
                    report.skipped.push(Skipped {
                        path: path.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        report.indexed = found.len();
        report.removed = self.retain_under(root, &found);

        info!(
            "scanned {}: {} indexed, {} skipped, {} removed",
            root.display(),
            report.indexed,
            report.skipped.len(),
            report.removed
        );
        Ok(report)
    }
}
