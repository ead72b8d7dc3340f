use super::display::{cell, table_rows};
use super::model::Track;
use crate::config::LibraryColumn;

fn track(path: &str, artist: Option<&str>, tags: &[&str]) -> Track {
    let mut t = Track::untagged(path);
    t.artist = artist.map(String::from);
    t.tags = tags.iter().map(|s| s.to_string()).collect();
    t
}

#[test]
fn cells_use_sentinels_for_missing_metadata() {
    let t = track("/music/Song.mp3", None, &[]);
    assert_eq!(cell(&t, LibraryColumn::Title), "Song");
    assert_eq!(cell(&t, LibraryColumn::Artist), "Unknown Artist");
    assert_eq!(cell(&t, LibraryColumn::Album), "Unknown Album");
    assert_eq!(cell(&t, LibraryColumn::Genre), "Unknown Genre");
    assert_eq!(cell(&t, LibraryColumn::Tags), "");
    assert_eq!(cell(&t, LibraryColumn::Location), "/music/Song.mp3");
    assert_eq!(cell(&t, LibraryColumn::Filename), "Song");
}

#[test]
fn table_rows_pads_all_but_the_last_column() {
    let tracks = vec![
        track("/m/a.mp3", Some("Artist"), &["x", "y"]),
        track("/m/longer-name.mp3", Some("B"), &[]),
    ];
    let rows = table_rows(
        &tracks,
        &[LibraryColumn::Title, LibraryColumn::Artist, LibraryColumn::Tags],
        " | ",
    );

    assert_eq!(
        rows,
        vec![
            "TRACK NAME  | ARTIST | TAGS".to_string(),
            "a           | Artist | x, y".to_string(),
            "longer-name | B      | ".to_string(),
        ]
    );
}

#[test]
fn table_rows_with_no_tracks_is_just_the_header() {
    let none: Vec<Track> = Vec::new();
    let rows = table_rows(&none, &[LibraryColumn::Artist, LibraryColumn::Title], " - ");
    assert_eq!(rows, vec!["ARTIST - TRACK NAME".to_string()]);
}
