use std::path::{Path, PathBuf};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

/// One audio file and the metadata read from it.
///
/// Tracks are replaced, never edited, once they are in a
/// [`LibraryIndex`](super::LibraryIndex); see [`Track::edited`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub source_path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// Ordered and deduplicated; the first one is used when grouping by tag.
    pub tags: Vec<String>,
}

impl Track {
    /// A track with no metadata, titled after the file stem.
    pub fn untagged(path: impl Into<PathBuf>) -> Self {
        let source_path = path.into();
        let title = default_title(&source_path);
        Self {
            source_path,
            title,
            artist: None,
            album: None,
            genre: None,
            tags: Vec::new(),
        }
    }

    pub fn artist_or_unknown(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn album_or_unknown(&self) -> &str {
        self.album.as_deref().unwrap_or(UNKNOWN_ALBUM)
    }

    pub fn genre_or_unknown(&self) -> &str {
        self.genre.as_deref().unwrap_or(UNKNOWN_GENRE)
    }

    /// Build the replacement record for `edit`, leaving `self` untouched.
    pub fn edited(&self, edit: &TrackEdit) -> Track {
        let mut next = self.clone();
        if let Some(title) = &edit.title {
            next.title = match clean_text(title) {
                Some(t) => t,
                None => default_title(&self.source_path),
            };
        }
        if let Some(artist) = &edit.artist {
            next.artist = clean_text(artist);
        }
        if let Some(album) = &edit.album {
            next.album = clean_text(album);
        }
        if let Some(genre) = &edit.genre {
            next.genre = clean_text(genre);
        }
        if let Some(tags) = &edit.tags {
            next.tags = normalize_tags(tags.iter().map(String::as_str));
        }
        next
    }
}

/// Replacement values for a track's metadata.
///
/// `None` keeps the current value. `Some` with a blank string clears the
/// field (a cleared title falls back to the file stem).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackEdit {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TrackEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.genre.is_none()
            && self.tags.is_none()
    }
}

pub(crate) fn default_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

pub(crate) fn clean_text(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Trim, drop blanks and keep the first occurrence of each tag (case-insensitive).
pub(crate) fn normalize_tags<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Split a grouping/tag field such as `"chill; live, 90s"` into tags.
pub(crate) fn split_tags(field: &str) -> Vec<String> {
    normalize_tags(field.split([',', ';']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_track_is_titled_after_file_stem() {
        let t = Track::untagged("/music/Some Song.flac");
        assert_eq!(t.title, "Some Song");
        assert_eq!(t.artist_or_unknown(), UNKNOWN_ARTIST);
        assert_eq!(t.album_or_unknown(), UNKNOWN_ALBUM);
        assert_eq!(t.genre_or_unknown(), UNKNOWN_GENRE);
        assert!(t.tags.is_empty());
    }

    #[test]
    fn edited_replaces_only_given_fields() {
        let mut original = Track::untagged("/music/a.mp3");
        original.artist = Some("X".into());
        original.album = Some("First".into());

        let edit = TrackEdit {
            genre: Some(" Jazz ".into()),
            album: Some("   ".into()),
            tags: Some(vec!["late night".into(), "".into(), "Late Night".into()]),
            ..TrackEdit::default()
        };
        let next = original.edited(&edit);

        assert_eq!(next.artist.as_deref(), Some("X"));
        assert_eq!(next.album, None);
        assert_eq!(next.genre.as_deref(), Some("Jazz"));
        assert_eq!(next.tags, vec!["late night".to_string()]);
        // the source record is left alone
        assert_eq!(original.album.as_deref(), Some("First"));
    }

    #[test]
    fn clearing_title_falls_back_to_stem() {
        let mut original = Track::untagged("/music/b.mp3");
        original.title = "Named".into();
        let next = original.edited(&TrackEdit {
            title: Some(String::new()),
            ..TrackEdit::default()
        });
        assert_eq!(next.title, "b");
    }

    #[test]
    fn split_tags_handles_both_separators() {
        assert_eq!(
            split_tags("chill; live, 90s ,, chill"),
            vec!["chill".to_string(), "live".to_string(), "90s".to_string()]
        );
        assert!(split_tags(" ; ").is_empty());
    }
}
