//! Text encoding detection for playlist files
//!
//! Players save playlists in a handful of encodings: plain UTF-8 (VLC,
//! Traktor), UTF-8 with BOM (KMPlayer, AIMP), cp1251 (older AIMP builds) and
//! UTF-16 LE (AIMPPL4). Detection checks the BOM first, then falls back to
//! statistical detection.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, GB18030, GBK, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1251};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{PlaylistError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Resolved encoding of a playlist file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 without signature
    Utf8,
    /// UTF-8 with byte order mark
    Utf8Sig,
    /// Windows-1251 (Cyrillic)
    Cp1251,
    /// UTF-16 little-endian, written with a BOM
    Utf16Le,
    /// Anything else the detector reported, passed through as is
    Other(&'static Encoding),
}

impl TextEncoding {
    /// Short label in the form users know from other tools
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Sig => "utf-8-sig",
            Self::Cp1251 => "cp1251",
            Self::Utf16Le => "utf-16-le",
            Self::Other(encoding) => encoding.name(),
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 | Self::Utf8Sig => UTF_8,
            Self::Cp1251 => WINDOWS_1251,
            Self::Utf16Le => UTF_16LE,
            Self::Other(encoding) => encoding,
        }
    }

    /// Map a statistical guess onto the known set
    fn from_detector(encoding: &'static Encoding) -> Self {
        if encoding == UTF_8 {
            Self::Utf8
        } else if encoding == GBK || encoding == GB18030 {
            // VLC playlists are routinely misdetected as Chinese
            Self::Utf8
        } else if encoding == WINDOWS_1251 {
            Self::Cp1251
        } else if encoding == UTF_16LE {
            Self::Utf16Le
        } else {
            Self::Other(encoding)
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detect the encoding of a playlist file on disk
pub fn detect_file_encoding(path: &Path) -> Result<TextEncoding> {
    let bytes = std::fs::read(path).map_err(|e| PlaylistError::EncodingDetection {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let encoding = detect_encoding(&bytes);
    debug!("Detected {} for {}", encoding, path.display());
    Ok(encoding)
}

/// Guess the encoding of raw playlist bytes
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&UTF8_BOM) {
        return TextEncoding::Utf8Sig;
    }
    if bytes.starts_with(&UTF16_LE_BOM) {
        return TextEncoding::Utf16Le;
    }
    if bytes.starts_with(&UTF16_BE_BOM) {
        return TextEncoding::Other(UTF_16BE);
    }
    if looks_like_utf16_le(bytes) {
        return TextEncoding::Utf16Le;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return TextEncoding::Utf8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);
    debug!("Statistical guess: {}", guess.name());
    TextEncoding::from_detector(guess)
}

/// Wide text without BOM: mostly NUL high bytes at odd positions
fn looks_like_utf16_le(bytes: &[u8]) -> bool {
    if bytes.len() < 4 || bytes.len() % 2 != 0 {
        return false;
    }
    let pairs = bytes.len() / 2;
    let odd_nuls = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    let even_nuls = bytes.iter().step_by(2).filter(|b| **b == 0).count();
    odd_nuls * 2 > pairs && even_nuls * 10 < pairs
}

/// Decode bytes with a resolved encoding, dropping a matching BOM
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    let (text, had_errors) = encoding.encoding().decode_with_bom_removal(bytes);
    if had_errors {
        debug!("Malformed {} sequences replaced while decoding", encoding);
    }
    text.into_owned()
}

/// First character of the text the target encoding cannot represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmappable(pub char);

/// Encode text for writing with a resolved encoding
///
/// Fails instead of writing HTML numeric references when the text holds a
/// character the encoding has no mapping for.
pub fn encode(text: &str, encoding: TextEncoding) -> std::result::Result<Vec<u8>, Unmappable> {
    let bytes = match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf8Sig => {
            let mut bytes = UTF8_BOM.to_vec();
            bytes.extend_from_slice(text.as_bytes());
            bytes
        }
        // encoding_rs only decodes UTF-16, so the wide forms are built here
        TextEncoding::Utf16Le => {
            let mut bytes = UTF16_LE_BOM.to_vec();
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            bytes
        }
        TextEncoding::Other(enc) if enc == UTF_16BE => {
            let mut bytes = UTF16_BE_BOM.to_vec();
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            bytes
        }
        other => {
            let target = other.encoding();
            let (bytes, _, had_unmappable) = target.encode(text);
            if had_unmappable {
                let mut buf = [0u8; 4];
                let character = text
                    .chars()
                    .find(|c| target.encode(c.encode_utf8(&mut buf)).2)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                debug!("No {} mapping for {:?}", other, character);
                return Err(Unmappable(character));
            }
            bytes.into_owned()
        }
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYRILLIC: &str = "Кино - Группа крови.mp3\n\
        Алиса - Трасса Е95.mp3\n\
        ДДТ - Что такое осень.flac\n\
        Машина времени - Поворот.mp3\n\
        Сплин - Выхода нет.mp3\n\
        Наутилус Помпилиус - Прогулки по воде.flac\n";

    #[test]
    fn test_detect_plain_utf8() {
        let bytes = "Кирилл - Track_01!.mp3\n".as_bytes();
        assert_eq!(detect_encoding(bytes), TextEncoding::Utf8);
    }

    #[test]
    fn test_detect_ascii_and_empty_as_utf8() {
        assert_eq!(detect_encoding(b"Track 01.mp3\n"), TextEncoding::Utf8);
        assert_eq!(detect_encoding(b""), TextEncoding::Utf8);
    }

    #[test]
    fn test_detect_utf8_bom() {
        let bytes = encode(CYRILLIC, TextEncoding::Utf8Sig).expect("encode");
        assert_eq!(detect_encoding(&bytes), TextEncoding::Utf8Sig);
    }

    #[test]
    fn test_detect_utf16_le_with_and_without_bom() {
        let with_bom = encode(CYRILLIC, TextEncoding::Utf16Le).expect("encode");
        assert_eq!(detect_encoding(&with_bom), TextEncoding::Utf16Le);

        let without_bom: Vec<u8> = "Track 01.mp3\r\n"
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();
        assert_eq!(detect_encoding(&without_bom), TextEncoding::Utf16Le);
    }

    #[test]
    fn test_detect_cp1251() {
        let bytes = encode(CYRILLIC, TextEncoding::Cp1251).expect("encode");
        assert_eq!(detect_encoding(&bytes), TextEncoding::Cp1251);
    }

    #[test]
    fn test_chinese_guess_maps_to_utf8() {
        assert_eq!(TextEncoding::from_detector(GBK), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_detector(GB18030), TextEncoding::Utf8);
    }

    #[test]
    fn test_other_guess_passes_through() {
        let encoding = TextEncoding::from_detector(encoding_rs::KOI8_R);
        assert_eq!(encoding, TextEncoding::Other(encoding_rs::KOI8_R));
        assert_eq!(encoding.label(), "KOI8-R");
    }

    #[test]
    fn test_round_trip_all_encodings() {
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf8Sig,
            TextEncoding::Cp1251,
            TextEncoding::Utf16Le,
        ] {
            let bytes = encode(CYRILLIC, encoding).expect("encode");
            assert_eq!(detect_encoding(&bytes), encoding, "{}", encoding);
            assert_eq!(decode(&bytes, encoding), CYRILLIC, "{}", encoding);
        }
    }

    #[test]
    fn test_detect_missing_file_fails() {
        let err = detect_file_encoding(Path::new("=\"WrongPath.m3u\"")).unwrap_err();
        assert!(matches!(err, PlaylistError::EncodingDetection { .. }));
        assert!(err.to_string().starts_with("Encoding detection failed"));
    }

    #[test]
    fn test_encode_cp1251_rejects_unmappable() {
        assert_eq!(
            encode("Кино.mp3\n日本.mp3\n", TextEncoding::Cp1251),
            Err(Unmappable('日'))
        );
        // Wide encodings take any text
        assert!(encode("日本.mp3\n", TextEncoding::Utf16Le).is_ok());
    }
}
