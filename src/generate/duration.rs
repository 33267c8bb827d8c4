//! Track durations for `#EXTINF` lines

use lofty::prelude::*;
use lofty::probe::Probe;
use std::path::Path;
use tracing::debug;

/// Source of track durations
pub trait DurationProbe {
    /// Duration in whole seconds, `None` when unknown
    fn duration_secs(&self, path: &Path) -> Option<u64>;
}

/// Reports every duration as unknown
pub struct NoDuration;

impl DurationProbe for NoDuration {
    fn duration_secs(&self, _path: &Path) -> Option<u64> {
        None
    }
}

/// Reads the duration from the audio stream properties
pub struct TagDurationProbe;

impl DurationProbe for TagDurationProbe {
    fn duration_secs(&self, path: &Path) -> Option<u64> {
        let tagged_file = match Probe::open(path).and_then(|probe| probe.read()) {
            Ok(file) => file,
            Err(e) => {
                debug!("No duration for {}: {}", path.display(), e);
                return None;
            }
        };

        let secs = tagged_file.properties().duration().as_secs();
        (secs > 0).then_some(secs)
    }
}
