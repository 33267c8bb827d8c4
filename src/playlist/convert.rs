//! Path conversion for players with limited path support
//!
//! VLC on Android and some hardware players cannot open absolute paths from
//! another machine, nor filenames containing brackets or hashes. The
//! functions here rewrite a playlist so every track is a bare, escaped
//! filename next to the playlist.

use regex::Regex;
use std::sync::LazyLock;

use super::is_track_line;

/// Everything up to and including the last `/` or `\` on a line
static DIR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*[/\\]").expect("static regex is valid"));

const ESCAPES: [(&str, &str); 3] = [("[", "%5B"), ("]", "%5D"), ("#", "%23")];

/// Directory prefix removed from a non-directive line
fn strip_dir_prefix(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return line;
    }
    match DIR_PREFIX.find(line) {
        Some(prefix) => &line[prefix.end()..],
        None => line,
    }
}

/// Strip directory prefixes, leaving only filenames
///
/// Both separator styles are handled on every line, so playlists merged from
/// Windows and Unix machines convert in one pass. Directive lines such as
/// `#EXTINF:215,AC/DC - Thunder` are kept whole.
pub fn relativize(content: &str) -> String {
    content
        .split('\n')
        .map(strip_dir_prefix)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Percent-escape `[`, `]` and `#` in track lines
///
/// Directive lines are left as they are. The result always ends with a
/// newline.
pub fn escape_unsupported(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for line in content.lines() {
        if is_track_line(line.trim()) {
            let mut line = line.to_string();
            for (from, to) in ESCAPES {
                line = line.replace(from, to);
            }
            escaped.push_str(&line);
        } else {
            escaped.push_str(line);
        }
        escaped.push('\n');
    }
    escaped
}

/// Reverse [`escape_unsupported`] for a single track line
pub fn unescape(line: &str) -> String {
    let mut line = line.to_string();
    for (from, to) in ESCAPES.iter().rev() {
        line = line.replace(to, from);
    }
    line
}

/// Full conversion: escaping, then relative filenames
///
/// Escaping runs first so track lines are recognised by their full path;
/// `D:\Music\#1 Hit.mp3` stays a track even though its bare name starts
/// with `#`. Neither step touches separators, so the order does not change
/// the stripped prefix.
pub fn convert_for_vlc(content: &str) -> String {
    relativize(&escape_unsupported(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::extract_track_paths;

    #[test]
    fn test_relativize_both_separators() {
        let content = "#EXTM3U\nD:\\tmp\\First.flac\n/home/user/music/Second.mp3\nThird.mp3";
        assert_eq!(
            relativize(content),
            "#EXTM3U\nFirst.flac\nSecond.mp3\nThird.mp3"
        );
    }

    #[test]
    fn test_relativize_mixed_separators_in_one_line() {
        assert_eq!(relativize("D:\\music/rock\\Song.mp3"), "Song.mp3");
    }

    #[test]
    fn test_relativize_is_idempotent() {
        let content = "C:\\a\\b\\One.mp3\n/x/y/Two.flac\nThree.mp3\n";
        let once = relativize(content);
        assert_eq!(relativize(&once), once);
    }

    #[test]
    fn test_escape_scenario() {
        assert_eq!(
            convert_for_vlc("D:\\tmp\\First [track!].flac"),
            "First %5Btrack!%5D.flac\n"
        );
    }

    #[test]
    fn test_escape_leaves_directives() {
        let content = "#EXTM3U\n#EXTINF:0,Song #1 [live]\nSong #1 [live].mp3\n";
        assert_eq!(
            escape_unsupported(content),
            "#EXTM3U\n#EXTINF:0,Song #1 [live]\nSong %231 %5Blive%5D.mp3\n"
        );
    }

    #[test]
    fn test_escape_adds_trailing_newline() {
        assert_eq!(escape_unsupported("A.mp3\nB.mp3"), "A.mp3\nB.mp3\n");
    }

    #[test]
    fn test_escape_round_trip() {
        let names = [
            "First [track!].flac",
            "Hit #1.mp3",
            "Plain.mp3",
            "Mix [2020] #3 [remaster].flac",
        ];
        let escaped = escape_unsupported(&names.join("\n"));
        let recovered: Vec<String> = extract_track_paths(&escaped)
            .iter()
            .map(|line| unescape(line))
            .collect();
        assert_eq!(recovered, names);
    }

    #[test]
    fn test_relativize_keeps_directive_lines() {
        let content = "#EXTM3U\n#EXTINF:215,AC/DC - Thunder\n/music/AC-DC/Thunder.mp3";
        assert_eq!(
            relativize(content),
            "#EXTM3U\n#EXTINF:215,AC/DC - Thunder\nThunder.mp3"
        );
    }

    #[test]
    fn test_convert_hash_named_track_stays_a_track() {
        let converted = convert_for_vlc("#EXTM3U\nD:\\Music\\#1 Hit [live].mp3\n");
        assert_eq!(converted, "#EXTM3U\n%231 Hit %5Blive%5D.mp3\n");

        let tracks = extract_track_paths(&converted);
        assert_eq!(tracks.len(), 1);
        assert_eq!(unescape(&tracks[0]), "#1 Hit [live].mp3");
    }

    #[test]
    fn test_convert_keeps_extinf_titles() {
        assert_eq!(
            convert_for_vlc("#EXTINF:215,AC/DC - Thunder\nC:\\Rock\\Thunder.mp3"),
            "#EXTINF:215,AC/DC - Thunder\nThunder.mp3\n"
        );
    }
}
