//! Playlist content model

pub mod convert;
pub mod encoding;
pub mod inject;
pub mod tracks;

pub use convert::{convert_for_vlc, unescape};
pub use encoding::{TextEncoding, detect_file_encoding};
pub use inject::{Placement, inject_content};
pub use tracks::extract_track_paths;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::error::{PlaylistError, Result};
use crate::storage;

/// Audio file extensions that may appear as tracks
pub const SONG_FORMATS: &[&str] = &["mp3", "flac"];

/// Playlist file extensions accepted on the command line
pub const PLAYLIST_FORMATS: &[&str] = &["m3u", "m3u8"];

/// Check whether a path or playlist line names a supported audio file
pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SONG_FORMATS
                .iter()
                .any(|format| ext.eq_ignore_ascii_case(format))
        })
}

/// Check whether a trimmed playlist line is a track path
pub fn is_track_line(line: &str) -> bool {
    !line.starts_with('#') && is_supported_audio(Path::new(line))
}

/// Validate a playlist path given on the command line
pub fn validate_playlist_path(value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PLAYLIST_FORMATS.contains(&ext));

    if supported {
        Ok(path)
    } else {
        Err(PlaylistError::UnsupportedFormat(value.to_string()))
    }
}

/// A playlist file on disk
///
/// The encoding is detected on first use and kept for the rest of the
/// operation, so a read and the following write always agree.
#[derive(Debug)]
pub struct Playlist {
    path: PathBuf,
    encoding: OnceCell<TextEncoding>,
}

impl Playlist {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolved encoding, detecting it on first call
    pub fn encoding(&self) -> Result<TextEncoding> {
        if let Some(encoding) = self.encoding.get() {
            return Ok(*encoding);
        }
        let detected = detect_file_encoding(&self.path)?;
        Ok(*self.encoding.get_or_init(|| detected))
    }

    /// Full decoded content of the playlist
    pub fn content(&self) -> Result<String> {
        let encoding = self.encoding()?;
        storage::read_playlist(&self.path, encoding)
    }

    /// Size of the playlist file in bytes
    pub fn size(&self) -> Result<u64> {
        std::fs::metadata(&self.path)
            .map(|meta| meta.len())
            .map_err(|source| PlaylistError::Read {
                path: self.path.clone(),
                source,
            })
    }

    /// Track paths listed in the playlist, in file order
    pub fn track_paths(&self) -> Result<Vec<String>> {
        Ok(extract_track_paths(&self.content()?))
    }
}
