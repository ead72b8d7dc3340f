use crate::config::LibraryColumn;

use super::model::Track;

/// Header label for a library column.
pub fn column_label(column: LibraryColumn) -> &'static str {
    match column {
        LibraryColumn::Title => "TRACK NAME",
        LibraryColumn::Artist => "ARTIST",
        LibraryColumn::Album => "ALBUM",
        LibraryColumn::Genre => "GENRE",
        LibraryColumn::Tags => "TAGS",
        LibraryColumn::Location => "LOCATION",
        LibraryColumn::Filename => "FILE",
    }
}

/// Text of a single cell. Missing metadata shows its "Unknown ..." sentinel.
pub fn cell(track: &Track, column: LibraryColumn) -> String {
    match column {
        LibraryColumn::Title => track.title.clone(),
        LibraryColumn::Artist => track.artist_or_unknown().to_string(),
        LibraryColumn::Album => track.album_or_unknown().to_string(),
        LibraryColumn::Genre => track.genre_or_unknown().to_string(),
        LibraryColumn::Tags => track.tags.join(", "),
        LibraryColumn::Location => track.source_path.display().to_string(),
        LibraryColumn::Filename => track
            .source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Render `tracks` as aligned rows, the first row being the header.
///
/// Every column is padded to its widest cell except the last one.
pub fn table_rows<'a>(
    tracks: impl IntoIterator<Item = &'a Track>,
    columns: &[LibraryColumn],
    sep: &str,
) -> Vec<String> {
    let mut grid: Vec<Vec<String>> = vec![
        columns
            .iter()
            .map(|&c| column_label(c).to_string())
            .collect(),
    ];
    grid.extend(
        tracks
            .into_iter()
            .map(|t| columns.iter().map(|&c| cell(t, c)).collect()),
    );

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            grid.iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    grid.into_iter()
        .map(|row| {
            let last = row.len().saturating_sub(1);
            row.into_iter()
                .enumerate()
                .map(|(i, text)| {
                    if i == last {
                        text
                    } else {
                        format!("{text:<width$}", width = widths[i])
                    }
                })
                .collect::<Vec<_>>()
                .join(sep)
        })
        .collect()
}
