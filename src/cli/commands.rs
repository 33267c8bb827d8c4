//! CLI command handlers

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::generate::{
    DurationProbe, GenerateOptions, NoDuration, SortMode, TagDurationProbe, generate_playlist,
};
use crate::playlist::{
    Placement, Playlist, TextEncoding, convert_for_vlc, extract_track_paths, inject_content,
};
use crate::storage::{copy_tracks, resolve_target, save_playlist_content};

/// Flags of the `create` command
#[derive(Debug, Default)]
pub struct CreateArgs {
    pub from: Option<PathBuf>,
    pub nat_sort: bool,
    pub platform_sort: bool,
    pub absolute: bool,
    pub extended: bool,
    pub here: bool,
    pub empty: bool,
}

/// Handle the `display` command
pub fn display(playlist: &Playlist) -> Result<()> {
    let tracks = playlist.track_paths()?;
    debug!("{} tracks in {}", tracks.len(), playlist.path().display());
    println!("{}", tracks.join("\n"));
    Ok(())
}

/// Handle the `convert` command
///
/// Returns the path the converted playlist was written to, or `None` when
/// the destination folder does not exist.
pub fn convert(playlist: &Playlist, dest: &Path, copy: bool, config: &Config) -> Result<Option<PathBuf>> {
    let target = resolve_target(dest, playlist.path(), &config.rename_suffix);
    // `out/` names a folder even before it exists
    let target_dir = if names_directory(dest) { dest } else { parent_dir(&target) };
    if !target_dir.is_dir() {
        eprintln!(
            "{}",
            format!("Destination folder '{}' does not exist.", target_dir.display()).yellow()
        );
        return Ok(None);
    }

    let encoding = playlist.encoding()?;
    let content = playlist.content()?;
    let converted = convert_for_vlc(&content);
    save_playlist_content(&converted, &target, encoding)?;

    info!("Converted {} -> {}", playlist.path().display(), target.display());
    eprintln!(
        "{} {} ({})",
        "Saved converted playlist to".green(),
        target.display(),
        encoding
    );

    if copy {
        let tracks = extract_track_paths(&content);
        let report = copy_tracks(&tracks, parent_dir(playlist.path()), target_dir)?;
        eprintln!(
            "Copied {} track(s), {:.1} MB",
            report.copied,
            report.bytes_copied as f64 / 1_048_576.0
        );
        if report.already_present > 0 {
            eprintln!("{} track(s) already in place", report.already_present);
        }
        if !report.missing.is_empty() {
            eprintln!(
                "{}",
                format!("{} track(s) not found:", report.missing.len()).yellow()
            );
            for track in &report.missing {
                eprintln!("  {}", track);
            }
        }
    }

    Ok(Some(target))
}

/// Handle the `inject` command
///
/// Returns `false` when either playlist is too small to be worth merging.
pub fn inject(origin: &Playlist, injected: &Playlist, placement: Placement, config: &Config) -> Result<bool> {
    for playlist in [origin, injected] {
        if playlist.size()? <= config.min_inject_bytes {
            eprintln!(
                "{}",
                format!(
                    "Playlist '{}' is too small to inject, nothing to do.",
                    playlist.path().display()
                )
                .yellow()
            );
            return Ok(false);
        }
    }

    let origin_encoding = origin.encoding()?;
    let merged = inject_content(&origin.content()?, &injected.content()?, placement);
    save_playlist_content(&merged, origin.path(), origin_encoding)?;

    info!(
        "Injected {} into {} ({:?})",
        injected.path().display(),
        origin.path().display(),
        placement
    );
    eprintln!("{} {}", "Updated".green(), origin.path().display());
    Ok(true)
}

/// Handle the `create` command
///
/// Returns the written playlist path, or `None` when nothing was written.
pub fn create(playlist_path: &Path, args: &CreateArgs, config: &Config) -> Result<Option<PathBuf>> {
    if args.empty {
        save_playlist_content("", playlist_path, TextEncoding::Utf8)?;
        eprintln!("{} {}", "Created empty playlist".green(), playlist_path.display());
        return Ok(Some(playlist_path.to_path_buf()));
    }

    let Some(dir) = args.from.as_deref() else {
        anyhow::bail!("No folder given. Use --from <DIR> or --empty.");
    };

    if !dir.is_dir() {
        eprintln!(
            "{}",
            format!("Error: This directory '{}' does NOT exist.", dir.display()).yellow()
        );
        return Ok(None);
    }

    let sort = if args.nat_sort {
        SortMode::Natural
    } else if args.platform_sort {
        SortMode::Platform
    } else {
        config.default_sort
    };
    let options = GenerateOptions {
        extended: args.extended || config.extended,
        relative: !args.absolute,
        sort,
    };
    let probe: &dyn DurationProbe = if config.read_durations {
        &TagDurationProbe
    } else {
        &NoDuration
    };

    let Some(content) = generate_playlist(dir, options, probe)? else {
        eprintln!(
            "{}",
            format!("Warning: No supported audio files in folder '{}'.", dir.display()).yellow()
        );
        return Ok(None);
    };

    let target = if args.here {
        match playlist_path.file_name() {
            Some(name) => dir.join(name),
            None => playlist_path.to_path_buf(),
        }
    } else {
        playlist_path.to_path_buf()
    };
    save_playlist_content(&content, &target, TextEncoding::Utf8)?;

    info!("Created {} from {}", target.display(), dir.display());
    print!("{}", content);
    Ok(Some(target))
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = super::Cli::command();
    generate(shell, &mut cmd, "playlist-along", &mut io::stdout());
}

/// Folder holding `path`, `.` for bare file names
/// A path written with a trailing separator, like `out/`
fn names_directory(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
