//! Metadata reader: turns one audio file into a [`Track`] and writes edits back.

use std::fs;
use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::read_from_path;
use lofty::tag::{ItemKey, Tag};

use crate::config::LibrarySettings;
use crate::error::ReadError;

use super::model::{Track, clean_text, split_tags};

/// Whether `path` has one of the configured audio extensions.
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| settings.accepts_extension(ext))
        .unwrap_or(false)
}

/// Read the tags of `path` into a [`Track`].
///
/// Missing tags are left as `None` (the title falls back to the file stem).
/// Files with an unknown extension, or whose content lofty cannot parse,
/// fail with [`ReadError::UnsupportedFormat`].
pub fn read_track(path: &Path, settings: &LibrarySettings) -> Result<Track, ReadError> {
    if !is_audio_file(path, settings) {
        return Err(ReadError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: "not an audio file extension".to_string(),
        });
    }

    fs::metadata(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tagged = read_from_path(path).map_err(|e| ReadError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut track = Track::untagged(path);

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = text(tag, ItemKey::TrackTitle) {
            track.title = v;
        }
        track.artist =
            text(tag, ItemKey::TrackArtist).or_else(|| text(tag, ItemKey::AlbumArtist));
        track.album = text(tag, ItemKey::AlbumTitle);
        track.genre = text(tag, ItemKey::Genre);
        if let Some(grouping) = tag.get_string(ItemKey::ContentGroup) {
            track.tags = split_tags(grouping);
        }
    }

    Ok(track)
}

fn text(tag: &Tag, key: ItemKey) -> Option<String> {
    tag.get_string(key).and_then(clean_text)
}

/// Write `track`'s metadata into the primary tag of its file.
///
/// A primary tag is created when the file has none. Fields that are `None`
/// (or an empty tag list) are removed from the tag.
pub fn write_track(track: &Track) -> Result<(), ReadError> {
    let path = track.source_path.as_path();
    let write_err = |reason: String| ReadError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let mut tagged = read_from_path(path).map_err(|e| write_err(e.to_string()))?;
    let tag_type = tagged.primary_tag_type();
    if tagged.tag(tag_type).is_none() {
        tagged.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged
        .tag_mut(tag_type)
        .ok_or_else(|| write_err(format!("no {tag_type:?} tag available")))?;

    set_text(tag, ItemKey::TrackTitle, Some(track.title.as_str()));
    set_text(tag, ItemKey::TrackArtist, track.artist.as_deref());
    set_text(tag, ItemKey::AlbumTitle, track.album.as_deref());
    set_text(tag, ItemKey::Genre, track.genre.as_deref());
    let grouping = track.tags.join(", ");
    set_text(
        tag,
        ItemKey::ContentGroup,
        Some(grouping.as_str()).filter(|g| !g.is_empty()),
    );

    tagged
        .save_to_path(path, WriteOptions::default())
        .map_err(|e| write_err(e.to_string()))
}

fn set_text(tag: &mut Tag, key: ItemKey, value: Option<&str>) {
    tag.remove_key(key);
    if let Some(v) = value {
        tag.insert_text(key, v.to_string());
    }
}
