//! Error types for playlist operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by playlist reading, writing and generation
///
/// Low-level I/O failures are wrapped here at the boundary of each
/// operation so the user always sees which file was involved.
#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Unsupported playlist format '{0}', currently supported: .m3u, .m3u8")]
    UnsupportedFormat(String),

    #[error("Encoding detection failed for {path:?}: {reason}")]
    EncodingDetection { path: PathBuf, reason: String },

    #[error("Failed to read playlist {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write playlist {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path:?} as {encoding}: {character:?} has no mapping")]
    Encode {
        path: PathBuf,
        encoding: &'static str,
        character: char,
    },

    #[error("Failed to scan folder {path:?}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PlaylistError>;
