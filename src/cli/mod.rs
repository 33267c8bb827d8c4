//! CLI module for playlist-along

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::playlist::validate_playlist_path;

#[derive(Parser, Debug)]
#[command(name = "playlist-along", about = "Convert, inject and create M3U playlists")]
#[command(version, author)]
pub struct Cli {
    /// Playlist file to work on (.m3u or .m3u8)
    #[arg(short, long, value_parser = parse_playlist)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Alternate config file
    #[arg(long, env = "PLAYLIST_ALONG_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tracks of the playlist
    Display,

    /// Make paths relative and escape characters VLC cannot open
    Convert {
        /// Destination playlist file or folder
        #[arg(short, long, value_name = "PATH")]
        dest: PathBuf,

        /// Also copy the tracks into the destination folder
        #[arg(long)]
        copy: bool,
    },

    /// Insert the content of another playlist
    Inject {
        /// Playlist to inject (.m3u or .m3u8)
        #[arg(short = 'f', long = "file", value_name = "PLAYLIST", value_parser = parse_playlist)]
        injected: PathBuf,

        /// Put injected tracks before the existing ones (default)
        #[arg(long, conflicts_with = "bottom")]
        top: bool,

        /// Put injected tracks after the existing ones
        #[arg(long)]
        bottom: bool,
    },

    /// Create a playlist from a folder of audio files
    Create {
        /// Folder with audio files
        #[arg(short = 'f', long = "from", value_name = "DIR", required_unless_present = "empty")]
        from: Option<PathBuf>,

        /// Sort numbers by value ("Track 2" before "Track 10")
        #[arg(long, conflicts_with = "platform_sort")]
        nat_sort: bool,

        /// Sort the way the system file manager does
        #[arg(long)]
        platform_sort: bool,

        /// Write bare filenames (default)
        #[arg(long, conflicts_with = "abs")]
        rel: bool,

        /// Write absolute paths
        #[arg(long)]
        abs: bool,

        /// Generate an extended M3U playlist
        #[arg(long = "ext-m3u")]
        extended: bool,

        /// Save the playlist in the audio folder, using only the name from --file
        #[arg(long)]
        here: bool,

        /// Create an empty playlist file and exit
        #[arg(long)]
        empty: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn parse_playlist(value: &str) -> Result<PathBuf, String> {
    validate_playlist_path(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_unsupported_format() {
        let err = Cli::try_parse_from(["playlist-along", "-f", "hello.txt"]).unwrap_err();
        assert!(err.to_string().contains("currently supported"));
    }

    #[test]
    fn test_file_requires_value() {
        assert!(Cli::try_parse_from(["playlist-along", "-f"]).is_err());
    }

    #[test]
    fn test_parses_inject() {
        let cli = Cli::try_parse_from([
            "playlist-along",
            "-f",
            "origin.m3u",
            "inject",
            "-f",
            "other.m3u8",
            "--bottom",
        ])
        .expect("parse");

        assert_eq!(cli.file, Some(PathBuf::from("origin.m3u")));
        match cli.command {
            Some(Commands::Inject { injected, top, bottom }) => {
                assert_eq!(injected, PathBuf::from("other.m3u8"));
                assert!(!top);
                assert!(bottom);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_needs_from_unless_empty() {
        assert!(Cli::try_parse_from(["playlist-along", "-f", "new.m3u", "create"]).is_err());
        assert!(
            Cli::try_parse_from(["playlist-along", "-f", "new.m3u", "create", "--empty"]).is_ok()
        );
    }

    #[test]
    fn test_rel_and_abs_conflict() {
        let result = Cli::try_parse_from([
            "playlist-along",
            "-f",
            "new.m3u",
            "create",
            "--from",
            "music",
            "--rel",
            "--abs",
        ]);
        assert!(result.is_err());
    }
}
