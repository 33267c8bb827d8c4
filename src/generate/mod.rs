//! Playlist generation from a folder of audio files

pub mod duration;
pub mod sort;

pub use duration::{DurationProbe, NoDuration, TagDurationProbe};
pub use sort::{SortMode, Sorter, sorter_for};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PlaylistError, Result};
use crate::playlist::inject::EXTM3U_HEADER;
use crate::playlist::is_supported_audio;

/// Options for building a playlist from a folder
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Write `#EXTM3U` and `#EXTINF` tags
    pub extended: bool,
    /// Write bare filenames instead of absolute paths
    pub relative: bool,
    pub sort: SortMode,
}

/// A supported audio file found in the source folder
#[derive(Debug)]
struct Entry {
    name: String,
    absolute: String,
    stem: String,
    path: PathBuf,
}

/// Supported audio files directly inside `dir`
pub fn scan_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let scan_err = |source| PlaylistError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let path = entry.map_err(scan_err)?.path();
        if path.is_file() && is_supported_audio(&path) {
            files.push(path);
        }
    }

    debug!("Found {} audio files in {}", files.len(), dir.display());
    Ok(files)
}

/// Build playlist text for the audio files in `dir`
///
/// Returns `None` when the folder holds no supported audio, so callers never
/// write an empty playlist by accident.
pub fn generate_playlist(
    dir: &Path,
    options: GenerateOptions,
    probe: &dyn DurationProbe,
) -> Result<Option<String>> {
    let files = scan_audio_files(dir)?;
    if files.is_empty() {
        return Ok(None);
    }

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        // Plain absolute form: no symlink resolution, no `\\?\` prefix on Windows
        let absolute = std::path::absolute(&path).map_err(|source| PlaylistError::Scan {
            path: path.clone(),
            source,
        })?;
        entries.push(Entry {
            name: file_name_string(&path),
            absolute: absolute.to_string_lossy().into_owned(),
            stem: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: absolute,
        });
    }

    let sorter = sorter_for(options.sort);
    entries.sort_by(|a, b| sorter.compare(&a.name, &b.name));

    let mut content = String::new();
    if options.extended {
        content.push_str(EXTM3U_HEADER);
        content.push('\n');
    }
    for entry in &entries {
        if options.extended {
            let secs = probe.duration_secs(&entry.path).unwrap_or(0);
            content.push_str(&format!("#EXTINF:{},{}\n", secs, entry.stem));
        }
        if options.relative {
            content.push_str(&entry.name);
        } else {
            content.push_str(&entry.absolute);
        }
        content.push('\n');
    }

    Ok(Some(content))
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
