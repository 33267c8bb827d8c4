//! Playlist persistence and track copying

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{PlaylistError, Result};
use crate::playlist::encoding::{self, TextEncoding};
use crate::playlist::unescape;

/// Read and decode a playlist file
pub fn read_playlist(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PlaylistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encoding::decode(&bytes, encoding))
}

/// Encode and write playlist content
pub fn save_playlist_content(content: &str, target: &Path, encoding: TextEncoding) -> Result<()> {
    let bytes = encoding::encode(content, encoding).map_err(|unmappable| PlaylistError::Encode {
        path: target.to_path_buf(),
        encoding: encoding.label(),
        character: unmappable.0,
    })?;
    fs::write(target, bytes).map_err(|source| PlaylistError::Write {
        path: target.to_path_buf(),
        source,
    })?;

    debug!(
        "Wrote playlist: {} ({}, {} lines)",
        target.display(),
        encoding,
        content.lines().count()
    );
    Ok(())
}

/// Work out where converted content for `origin` should be written
///
/// A directory destination receives a file named like the origin. If that
/// would overwrite the origin itself, `rename_suffix` is inserted before the
/// extension instead.
pub fn resolve_target(dest: &Path, origin: &Path, rename_suffix: &str) -> PathBuf {
    let mut target = dest.to_path_buf();
    if dest.is_dir() {
        if let Some(name) = origin.file_name() {
            target = dest.join(name);
        }
    }

    if same_file(&target, origin) {
        let renamed = with_suffix(&target, rename_suffix);
        debug!(
            "Target {} is the source playlist, writing {} instead",
            target.display(),
            renamed.display()
        );
        target = renamed;
    }
    target
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// `dir/name.m3u8` -> `dir/name<suffix>.m3u8`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// Outcome of copying playlist tracks
#[derive(Debug, Default)]
pub struct CopyReport {
    pub copied: usize,
    /// Tracks whose destination is the source file itself
    pub already_present: usize,
    pub missing: Vec<String>,
    pub bytes_copied: u64,
}

/// Copy every track of a playlist into `dest_dir`
///
/// Relative tracks are resolved against `playlist_dir`. Escaped names from an
/// already converted playlist are tried unescaped. Tracks that cannot be
/// found are reported, not treated as failures.
pub fn copy_tracks(tracks: &[String], playlist_dir: &Path, dest_dir: &Path) -> Result<CopyReport> {
    let mut report = CopyReport::default();

    let progress = ProgressBar::new(tracks.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for track in tracks {
        let Some(source) = locate_track(track, playlist_dir) else {
            warn!("Track not found, skipping: {}", track);
            report.missing.push(track.clone());
            progress.inc(1);
            continue;
        };

        let Some(name) = source.file_name() else {
            report.missing.push(track.clone());
            progress.inc(1);
            continue;
        };
        let target = dest_dir.join(name);
        progress.set_message(name.to_string_lossy().into_owned());

        if same_file(&source, &target) {
            debug!("Already in place: {}", target.display());
            report.already_present += 1;
            progress.inc(1);
            continue;
        }

        let bytes = fs::copy(&source, &target).map_err(|source_err| PlaylistError::Copy {
            from: source.clone(),
            to: target.clone(),
            source: source_err,
        })?;

        debug!("Copied {} -> {}", source.display(), target.display());
        report.copied += 1;
        report.bytes_copied += bytes;
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(report)
}

fn locate_track(track: &str, playlist_dir: &Path) -> Option<PathBuf> {
    [track.to_string(), unescape(track)]
        .into_iter()
        .map(|candidate| {
            let path = PathBuf::from(candidate);
            if path.is_absolute() {
                path
            } else {
                playlist_dir.join(path)
            }
        })
        .find(|path| path.is_file())
}
