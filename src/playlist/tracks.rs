//! Track line extraction

use super::is_track_line;

/// Extract track paths from playlist text
///
/// Lines are split on `\n` only and trimmed. Directives, comments and lines
/// without a supported audio extension are dropped, order is kept.
pub fn extract_track_paths(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| is_track_line(line))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_empty() {
        assert!(extract_track_paths("").is_empty());
    }

    #[test]
    fn test_extract_skips_tags_and_trims() {
        let content = "#EXTM3U\n\
            #EXTINF:215,First track!\n\
            \x20   First track!.mp3   \n\
            #EXTINF:180,Second Track!\n\
            Second Track!.flac\r\n";
        assert_eq!(
            extract_track_paths(content),
            vec!["First track!.mp3", "Second Track!.flac"]
        );
    }

    #[test]
    fn test_extract_drops_unsupported_lines() {
        let content = "notes\ncover.jpg\nTrack 01.mp3\nvideo.mkv\nTrack 02.FLAC";
        assert_eq!(
            extract_track_paths(content),
            vec!["Track 01.mp3", "Track 02.FLAC"]
        );
    }

    #[test]
    fn test_extract_preserves_order() {
        let tracks = ["c.mp3", "a.flac", "b.mp3", "a.mp3"];
        let content = tracks.join("\n#comment\n");
        assert_eq!(extract_track_paths(&content), tracks);
    }
}
