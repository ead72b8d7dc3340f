use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::PlanError;
use crate::library::Track;

use super::types::{GroupKey, OrganizePlan, PlanEntry};

/// Folder for tracks without a value for the chosen key.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Compute `destination_root/<group>/<file name>` for every track.
///
/// Pure and deterministic: the same tracks in the same order always give
/// the same plan. When two tracks land on the same destination (compared
/// case-insensitively) the later one gets a ` (2)`, ` (3)`, ... suffix
/// before its extension.
pub fn plan<'a>(
    tracks: impl IntoIterator<Item = &'a Track>,
    group_key: GroupKey,
    destination_root: &Path,
) -> Result<OrganizePlan, PlanError> {
    if destination_root.as_os_str().is_empty() {
        return Err(PlanError::EmptyDestination);
    }

    let mut sources: HashSet<&Path> = HashSet::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();

    for track in tracks {
        let source = track.source_path.as_path();
        if !sources.insert(source) {
            return Err(PlanError::DuplicateSource(source.to_path_buf()));
        }
        let file_name = source
            .file_name()
            .ok_or_else(|| PlanError::NoFileName(source.to_path_buf()))?;

        let dir = destination_root.join(group_folder(group_key.value(track)));
        let destination = claim(&dir, Path::new(file_name), &mut taken);

        entries.push(PlanEntry {
            source: source.to_path_buf(),
            destination,
        });
    }

    Ok(OrganizePlan {
        root: destination_root.to_path_buf(),
        group_key,
        entries,
    })
}

fn group_folder(value: Option<&str>) -> String {
    value
        .map(sanitize_component)
        .unwrap_or_else(|| UNKNOWN_GROUP.to_string())
}

/// Make `value` usable as a single folder name.
pub fn sanitize_component(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_end_matches('.').trim_end();

    if cleaned.is_empty() {
        UNKNOWN_GROUP.to_string()
    } else {
        cleaned.to_string()
    }
}

/// First free `dir/name`, `dir/name (2)`, ... and mark it as taken.
fn claim(dir: &Path, file_name: &Path, taken: &mut HashSet<String>) -> PathBuf {
    let candidate = dir.join(file_name);
    if taken.insert(collision_key(&candidate)) {
        return candidate;
    }

    let stem = file_name.file_stem().unwrap_or(file_name.as_os_str());
    let ext = file_name.extension();
    let mut n = 2usize;
    loop {
        let mut name = OsString::from(stem);
        name.push(format!(" ({n})"));
        if let Some(ext) = ext {
            name.push(".");
            name.push(ext);
        }
        let candidate = dir.join(name);
        if taken.insert(collision_key(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

fn collision_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_component_replaces_separators_and_reserved_chars() {
        assert_eq!(sanitize_component("AC/DC"), "AC_DC");
        assert_eq!(sanitize_component("What?: \"Now\""), "What__ _Now_");
        assert_eq!(sanitize_component("  Trailing dots... "), "Trailing dots");
        assert_eq!(sanitize_component("a\tb"), "a_b");
    }

    #[test]
    fn sanitize_component_falls_back_to_unknown() {
        assert_eq!(sanitize_component(""), UNKNOWN_GROUP);
        assert_eq!(sanitize_component("   "), UNKNOWN_GROUP);
        assert_eq!(sanitize_component("."), UNKNOWN_GROUP);
        assert_eq!(sanitize_component(".."), UNKNOWN_GROUP);
    }

    #[test]
    fn claim_suffixes_before_extension() {
        let mut taken = HashSet::new();
        let dir = Path::new("/out/X");
        assert_eq!(
            claim(dir, Path::new("song.mp3"), &mut taken),
            PathBuf::from("/out/X/song.mp3")
        );
        assert_eq!(
            claim(dir, Path::new("song.mp3"), &mut taken),
            PathBuf::from("/out/X/song (2).mp3")
        );
        assert_eq!(
            claim(dir, Path::new("SONG.mp3"), &mut taken),
            PathBuf::from("/out/X/SONG (3).mp3")
        );
        assert_eq!(
            claim(dir, Path::new("noext"), &mut taken),
            PathBuf::from("/out/X/noext")
        );
        assert_eq!(
            claim(dir, Path::new("noext"), &mut taken),
            PathBuf::from("/out/X/noext (2)")
        );
    }
}
