//! Pairs Chinese characters with their pinyin syllables.

use crate::pinyin;
use cbr_core::{CharacterPinyinPair, Highlight};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlignError {
    #[error("character count {characters} does not match syllable count {syllables}")]
    Mismatch { characters: usize, syllables: usize },
}

/// Pairs each character of `characters` with the space-separated syllable of
/// `pinyin` at the same index, formatting the syllables along the way.
///
/// When `highlight` is given, characters covered by an occurrence of the whole
/// highlight string are tagged [`Highlight::Exact`] and characters that only
/// match some individual character of it [`Highlight::Partial`].
///
/// A count mismatch is a recoverable error; callers log it and show the word
/// without pinyin.
pub fn align(
    characters: &str,
    pinyin: &str,
    highlight: Option<&str>,
) -> Result<Vec<CharacterPinyinPair>, AlignError> {
    let syllables = pinyin.split_whitespace().collect::<Vec<_>>();
    let chars = characters.chars().collect::<Vec<_>>();
    if syllables.len() != chars.len() {
        return Err(AlignError::Mismatch {
            characters: chars.len(),
            syllables: syllables.len(),
        });
    }

    let (exact, partial) = match highlight {
        Some(highlight) => (
            phrase_occurrences(highlight, characters),
            char_occurrences(highlight, characters),
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    let pairs = chars
        .into_iter()
        .zip(syllables)
        .enumerate()
        .map(|(i, (character, syllable))| {
            let highlight = if exact.contains(&i) {
                Highlight::Exact
            } else if partial.contains(&i) {
                Highlight::Partial
            } else {
                Highlight::None
            };
            CharacterPinyinPair {
                pinyin: pinyin::format_syllable(syllable),
                character,
                highlight,
            }
        })
        .collect();
    Ok(pairs)
}

/// Char indices of `haystack` covered by occurrences of the whole `needle`.
pub fn phrase_occurrences(needle: &str, haystack: &str) -> HashSet<usize> {
    let mut indices = HashSet::new();
    if needle.is_empty() {
        return indices;
    }
    let needle_len = needle.chars().count();
    for (byte_idx, _) in haystack.match_indices(needle) {
        let start = haystack[..byte_idx].chars().count();
        indices.extend(start..start + needle_len);
    }
    indices
}

/// Char indices of `haystack` where any individual character of `needle` occurs.
pub fn char_occurrences(needle: &str, haystack: &str) -> HashSet<usize> {
    let mut indices = HashSet::new();
    for needle_char in needle.chars() {
        for (i, c) in haystack.chars().enumerate() {
            if c == needle_char {
                indices.insert(i);
            }
        }
    }
    indices
}
