use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::library::TrackEdit;
use crate::organize::{GroupKey, TransferMode};

#[derive(Debug, Parser)]
#[command(name = "dubdib", version)]
#[command(about = "Scan a music folder and organize it by artist, genre or tag")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the audio files under a folder with their metadata.
    Scan {
        /// Folder to scan (defaults to `organize.default_source`).
        source: Option<PathBuf>,
    },

    /// Copy or move audio files into `<DEST>/<group>/<file>`.
    Organize {
        /// Folder to scan (defaults to `organize.default_source`).
        source: Option<PathBuf>,
        /// Destination root (defaults to `organize.default_destination`).
        dest: Option<PathBuf>,
        /// Attribute used to bucket tracks.
        #[arg(long, value_enum)]
        by: Option<GroupKey>,
        #[arg(long, value_enum)]
        mode: Option<TransferMode>,
        /// Replace files that already exist at the destination.
        #[arg(long)]
        overwrite: bool,
        /// Print the plan without touching any file.
        #[arg(long)]
        dry_run: bool,
        /// Stop before the next file once one transfer fails.
        #[arg(long)]
        stop_on_error: bool,
    },

    /// Change the metadata of one file and save it into its tags.
    Edit {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        album: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        /// Comma-separated list; an empty value clears all tags.
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        tags: Option<Vec<String>>,
    },

    /// Save default source/destination folders to the config file.
    Defaults {
        #[arg(long)]
        source: Option<PathBuf>,
        #[arg(long)]
        dest: Option<PathBuf>,
    },
}

impl Command {
    /// The metadata change requested by an `edit` command.
    pub fn track_edit(&self) -> Option<TrackEdit> {
        match self {
            Command::Edit {
                title,
                artist,
                album,
                genre,
                tags,
                ..
            } => Some(TrackEdit {
                title: title.clone(),
                artist: artist.clone(),
                album: album.clone(),
                genre: genre.clone(),
                tags: tags.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organize_parses_flags_and_positionals() {
        let cli = Cli::try_parse_from([
            "dubdib", "organize", "/in", "/out", "--by", "genre", "--mode", "move", "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Command::Organize {
                source,
                dest,
                by,
                mode,
                overwrite,
                dry_run,
                stop_on_error,
            } => {
                assert_eq!(source, Some(PathBuf::from("/in")));
                assert_eq!(dest, Some(PathBuf::from("/out")));
                assert_eq!(by, Some(GroupKey::Genre));
                assert_eq!(mode, Some(TransferMode::Move));
                assert!(!overwrite);
                assert!(dry_run);
                assert!(!stop_on_error);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn organize_falls_back_when_paths_are_omitted() {
        let cli = Cli::try_parse_from(["dubdib", "organize"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Organize {
                source: None,
                dest: None,
                by: None,
                ..
            }
        ));
    }

    #[test]
    fn edit_builds_a_track_edit() {
        let cli = Cli::try_parse_from([
            "dubdib", "edit", "song.mp3", "--artist", "X", "--tags", "live,90s",
        ])
        .unwrap();
        let edit = cli.command.track_edit().unwrap();
        assert_eq!(edit.artist.as_deref(), Some("X"));
        assert_eq!(edit.title, None);
        assert_eq!(edit.tags, Some(vec!["live".to_string(), "90s".to_string()]));
    }

    #[test]
    fn unknown_group_key_is_rejected() {
        assert!(Cli::try_parse_from(["dubdib", "organize", "--by", "year"]).is_err());
    }
}
