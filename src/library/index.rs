use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::LibraryError;

use super::model::{Track, TrackEdit};

/// Tracks keyed by source path, kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct LibraryIndex {
    tracks: Vec<Track>,
    positions: HashMap<PathBuf, usize>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[cfg(test)]
    pub fn get(&self, path: &Path) -> Option<&Track> {
        self.positions.get(path).map(|&i| &self.tracks[i])
    }

    /// All tracks in insertion order.
    ///
    /// The iterator is lazy and `Clone`, so a caller can restart it (or
    /// simply call `get_all` again).
    pub fn get_all(&self) -> impl Iterator<Item = &Track> + Clone + '_ {
        self.tracks.iter()
    }

    /// Insert `track`, or replace the entry with the same source path in place.
    pub fn upsert(&mut self, track: Track) {
        match self.positions.get(&track.source_path) {
            Some(&i) => self.tracks[i] = track,
            None => {
                self.positions
                    .insert(track.source_path.clone(), self.tracks.len());
                self.tracks.push(track);
            }
        }
    }

    pub fn remove(&mut self, path: &Path) -> Option<Track> {
        let i = self.positions.remove(path)?;
        let removed = self.tracks.remove(i);
        for pos in self.positions.values_mut() {
            if *pos > i {
                *pos -= 1;
            }
        }
        Some(removed)
    }

    /// Replace the metadata of the track at `path` with the result of `edit`.
    pub fn update(&mut self, path: &Path, edit: &TrackEdit) -> Result<&Track, LibraryError> {
        let i = *self
            .positions
            .get(path)
            .ok_or_else(|| LibraryError::NotFound(path.to_path_buf()))?;
        self.tracks[i] = self.tracks[i].edited(edit);
        Ok(&self.tracks[i])
    }

    /// Drop every entry under `root` that is not in `keep`; returns how many were dropped.
    pub(super) fn retain_under(&mut self, root: &Path, keep: &HashSet<PathBuf>) -> usize {
        let stale: Vec<PathBuf> = self
            .tracks
            .iter()
            .map(|t| &t.source_path)
            .filter(|p| p.starts_with(root) && !keep.contains(p.as_path()))
            .cloned()
            .collect();
        for p in &stale {
            self.remove(p);
        }
        stale.len()
    }
}
