//! CBR core types and functions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One raw dictionary row as shipped in the dictfile.
///
/// Multiple definitions for one headword are stored as separate rows that
/// share the `traditional`/`simplified` forms; they are joined back together
/// at query time. `pinyin` is in the numeric-tone form, e.g. `ni3 hao3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRow {
    pub id: i32,
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    pub definition: String,
}

/// A dictionary headword with its definitions, ready for display.
///
/// `pinyin` and `definition` carry tone diacritics; the numeric-tone forms
/// only exist in `DictionaryRow` and inside the dictionary index.
/// The syllable count of `pinyin` matches the character count of both
/// `traditional` and `simplified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: i32,
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    pub definition: String,
}

/// How a character relates to the string the user is currently inspecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Highlight {
    #[default]
    None,
    /// Covered by an occurrence of the whole inspected string.
    Exact,
    /// Matches some individual character of the inspected string.
    Partial,
}

/// A single Chinese character paired with its pinyin syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPinyinPair {
    pub pinyin: String,
    pub character: char,
    pub highlight: Highlight,
}

/// The two Chinese script forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChineseForm {
    #[default]
    Simplified,
    Traditional,
}

/// One word of a parsed sentence.
///
/// `original` is the exact text the word covers in the source sentence;
/// concatenating the `original`s of a sentence's parsed words reproduces
/// the sentence. Words without a dictionary entry have empty pair lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedWord {
    pub original: String,
    pub simplified_pairs: Vec<CharacterPinyinPair>,
    pub traditional_pairs: Vec<CharacterPinyinPair>,
    pub entry: Option<DictionaryEntry>,
}

impl ParsedWord {
    /// A word that could not be resolved in the dictionary.
    pub fn unrecognized(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            simplified_pairs: Vec::new(),
            traditional_pairs: Vec::new(),
            entry: None,
        }
    }

    pub fn pairs(&self, form: ChineseForm) -> &[CharacterPinyinPair] {
        match form {
            ChineseForm::Simplified => &self.simplified_pairs,
            ChineseForm::Traditional => &self.traditional_pairs,
        }
    }
}

/// Renders the text of a parsed sentence in the given script form.
///
/// Words without dictionary pairs keep their original text.
pub fn form_converted_text(words: &[ParsedWord], form: ChineseForm) -> String {
    let mut text = String::new();
    for word in words {
        let pairs = word.pairs(form);
        if pairs.is_empty() {
            text.push_str(&word.original);
        } else {
            text.extend(pairs.iter().map(|p| p.character));
        }
    }
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentenceId(Uuid);

impl SentenceId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A sentence of the text being read.
///
/// Parsed words and translations are kept in caches keyed by the sentence id
/// rather than as lazy fields on the sentence itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: SentenceId,
    pub original: String,
}

impl Sentence {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            id: SentenceId::new(),
            original: original.into(),
        }
    }
}

pub fn is_hanzi(c: char) -> bool {
    // Unicode CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&(c as u32)) || (0x3400..=0x4DBF).contains(&(c as u32))
}

pub fn hanzi_from_word(word: &str) -> impl Iterator<Item = &str> {
    word.char_indices()
        .filter(|(_, c)| is_hanzi(*c))
        .map(|(i, c)| &word[i..i + c.len_utf8()])
}
