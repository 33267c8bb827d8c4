//! Merging one playlist into another

pub const EXTM3U_HEADER: &str = "#EXTM3U";

/// Where injected content goes relative to the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
}

/// Remove a leading `#EXTM3U` line
///
/// Only the first line is looked at, so a track whose name happens to
/// contain the tag is never touched.
pub fn strip_extended_header(content: &str) -> &str {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    if first.trim().trim_start_matches('\u{feff}') == EXTM3U_HEADER {
        rest
    } else {
        content
    }
}

/// Concatenate two playlists under a single `#EXTM3U` header
pub fn inject_content(origin: &str, injection: &str, placement: Placement) -> String {
    let origin = strip_extended_header(origin).trim_end_matches(['\r', '\n']);
    let injection = strip_extended_header(injection).trim_end_matches(['\r', '\n']);

    let parts = match placement {
        Placement::Top => [injection, origin],
        Placement::Bottom => [origin, injection],
    };

    let mut content = String::from(EXTM3U_HEADER);
    content.push('\n');
    for part in parts.into_iter().filter(|part| !part.is_empty()) {
        content.push_str(part);
        content.push('\n');
    }
    content
}
