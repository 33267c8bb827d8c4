//! Sort orders for generated playlists

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort order requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Plain codepoint order
    #[default]
    Default,
    /// Numbers compared by value, text ignoring case
    Natural,
    /// The file manager's own order (Windows Explorer), default elsewhere
    Platform,
}

/// A way of ordering file names
pub trait Sorter {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Codepoint order
pub struct LexicalSorter;

impl Sorter for LexicalSorter {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// "Track 2" before "Track 10"
pub struct NaturalSorter;

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(&'a str),
    Number(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                chunks.push(make_chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        chunks.push(make_chunk(&s[start..], prev));
    }
    chunks
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits { Chunk::Number(s) } else { Chunk::Text(s) }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        // Equal values: the zero-padded one first
        .then_with(|| b.len().cmp(&a.len()))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Sorter for NaturalSorter {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let a_chunks = chunks(a);
        let b_chunks = chunks(b);

        for (x, y) in a_chunks.iter().zip(&b_chunks) {
            let ord = match (x, y) {
                (Chunk::Number(x), Chunk::Number(y)) => compare_numbers(x, y),
                (Chunk::Text(x), Chunk::Text(y)) => compare_text(x, y),
                (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        a_chunks
            .len()
            .cmp(&b_chunks.len())
            .then_with(|| a.cmp(b))
    }
}

/// Delegates to `StrCmpLogicalW`, the comparison Explorer uses
#[cfg(windows)]
pub struct WindowsLogicalSorter;

#[cfg(windows)]
impl Sorter for WindowsLogicalSorter {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let a: Vec<u16> = a.encode_utf16().chain(Some(0)).collect();
        let b: Vec<u16> = b.encode_utf16().chain(Some(0)).collect();
        // SAFETY: both buffers are NUL-terminated and outlive the call
        let result = unsafe { windows_sys::Win32::UI::Shell::StrCmpLogicalW(a.as_ptr(), b.as_ptr()) };
        result.cmp(&0)
    }
}

/// Pick the sorter for a mode, once per run
pub fn sorter_for(mode: SortMode) -> Box<dyn Sorter> {
    match mode {
        SortMode::Default => Box::new(LexicalSorter),
        SortMode::Natural => Box::new(NaturalSorter),
        SortMode::Platform => platform_sorter(),
    }
}

#[cfg(windows)]
fn platform_sorter() -> Box<dyn Sorter> {
    Box::new(WindowsLogicalSorter)
}

#[cfg(not(windows))]
fn platform_sorter() -> Box<dyn Sorter> {
    tracing::debug!("No native filename comparison on this platform, using default order");
    Box::new(LexicalSorter)
}
