//! Turns raw sentences into ordered lists of parsed words.

use crate::{aligner, dictionary::DictionaryIndex, sentence_splitter::SentenceSplitter};
use cbr_core::{is_hanzi, DictionaryEntry, ParsedWord, Sentence, SentenceId};
use jieba_rs::Jieba;
use moka::sync::Cache;
use std::{collections::HashMap, sync::Arc};

/// A block of text split into sentences, with room for translations supplied
/// by an external translator.
#[derive(Debug, Clone, Default)]
pub struct Document {
    sentences: Vec<Sentence>,
    translations: HashMap<SentenceId, String>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        // PDF extraction litters Chinese text with spurious spaces and
        // newlines, so both are removed before sentence splitting
        let text = text.replace(['\n', ' '], "");
        let sentences = SentenceSplitter::new(&text)
            .map(Sentence::new)
            .collect::<Vec<_>>();
        Self {
            sentences,
            translations: HashMap::new(),
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence(&self, id: SentenceId) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.id == id)
    }

    pub fn set_translation(&mut self, id: SentenceId, translation: String) {
        self.translations.insert(id, translation);
    }

    pub fn translation(&self, id: SentenceId) -> Option<&str> {
        self.translations.get(&id).map(String::as_str)
    }
}

/// Parses sentences into ordered [`ParsedWord`] lists.
///
/// Results are memoized per sentence id; parsing the same sentence twice
/// returns the same `Arc`. The pipeline never fails: tokens that cannot be
/// resolved degrade to words with empty pinyin pairs.
pub struct Pipeline {
    dictionary: Arc<DictionaryIndex>,
    segmenter: Jieba,
    cache: Cache<SentenceId, Arc<Vec<ParsedWord>>>,
}

impl Pipeline {
    const CACHED_SENTENCES: u64 = 1024;

    pub fn new(dictionary: Arc<DictionaryIndex>) -> Self {
        Self {
            dictionary,
            segmenter: Jieba::new(),
            cache: Cache::new(Self::CACHED_SENTENCES),
        }
    }

    pub fn dictionary(&self) -> &DictionaryIndex {
        &self.dictionary
    }

    pub fn parse(&self, sentence: &Sentence) -> Arc<Vec<ParsedWord>> {
        self.cache.get_with(sentence.id, || {
            tracing::debug!("parsing sentence {:?}", sentence.id);
            Arc::new(self.parse_text(&sentence.original))
        })
    }

    /// Parses `text` into words covering every character exactly once:
    /// concatenating the `original`s of the result reproduces `text`.
    pub fn parse_text(&self, text: &str) -> Vec<ParsedWord> {
        let tokens = self.segmenter.cut(text, true);
        let entries = self.dictionary.exact_many(&tokens);
        tracing::debug!("resolved {} entries for {} tokens", entries.len(), tokens.len());

        let chars = text.chars().collect::<Vec<_>>();
        let mut words = Vec::new();
        let mut char_idx = 0;
        for token in tokens {
            // emit standalone words for characters the segmenter skipped over
            for token_char in token.chars() {
                while char_idx < chars.len() && chars[char_idx] != token_char {
                    words.push(ParsedWord::unrecognized(chars[char_idx].to_string()));
                    char_idx += 1;
                }
                if char_idx < chars.len() {
                    char_idx += 1;
                } else {
                    tracing::error!("token '{token}' not found in its own sentence");
                    break;
                }
            }

            if let Some(entry) = entries.get(token) {
                words.push(self.word_from_entry(token, entry));
            } else if token.chars().count() > 1 {
                // fallback character-by-character lookup; misses on Latin
                // tokens and punctuation runs are expected and not worth a log
                if token.chars().any(is_hanzi) {
                    tracing::warn!("no entry for token '{token}'");
                }
                let characters = token.chars().map(String::from).collect::<Vec<_>>();
                let char_entries = self.dictionary.exact_many(&characters);
                for character in characters {
                    match char_entries.get(&character) {
                        Some(entry) => words.push(self.word_from_entry(&character, entry)),
                        None => words.push(ParsedWord::unrecognized(character)),
                    }
                }
            } else {
                words.push(ParsedWord::unrecognized(token));
            }
        }
        // characters after the last token
        while char_idx < chars.len() {
            words.push(ParsedWord::unrecognized(chars[char_idx].to_string()));
            char_idx += 1;
        }
        words
    }

    fn word_from_entry(&self, original: &str, entry: &DictionaryEntry) -> ParsedWord {
        let simplified_pairs = aligner::align(&entry.simplified, &entry.pinyin, None)
            .unwrap_or_else(|err| {
                tracing::warn!("failed to align '{}': {err}", entry.simplified);
                Vec::new()
            });
        let traditional_pairs = aligner::align(&entry.traditional, &entry.pinyin, None)
            .unwrap_or_else(|err| {
                tracing::warn!("failed to align '{}': {err}", entry.traditional);
                Vec::new()
            });
        ParsedWord {
            original: original.to_string(),
            simplified_pairs,
            traditional_pairs,
            entry: Some(entry.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cbr_core::DictionaryRow;

    fn row(id: i32, traditional: &str, simplified: &str, pinyin: &str, definition: &str) -> DictionaryRow {
        DictionaryRow {
            id,
            traditional: traditional.to_string(),
            simplified: simplified.to_string(),
            pinyin: pinyin.to_string(),
            definition: definition.to_string(),
        }
    }

    fn pipeline(rows: Vec<DictionaryRow>) -> Pipeline {
        Pipeline::new(Arc::new(DictionaryIndex::new(rows)))
    }

    fn original_text(words: &[ParsedWord]) -> String {
        words.iter().map(|w| w.original.as_str()).collect()
    }

    #[test]
    fn parses_recognized_words() {
        let pipeline = pipeline(vec![row(1, "學校", "学校", "xue2 xiao4", "school")]);
        let words = pipeline.parse_text("学校");
        assert_eq!(words.len(), 1);
        let word = &words[0];
        assert_eq!(word.original, "学校");
        assert_eq!(word.simplified_pairs[0].pinyin, "xué");
        assert_eq!(word.simplified_pairs[1].pinyin, "xiào");
        assert_eq!(word.traditional_pairs[0].character, '學');
        assert_eq!(word.entry.as_ref().unwrap().id, 1);
    }

    #[test]
    fn falls_back_to_characters() {
        // no entry for the whole token, but each character resolves
        let pipeline = pipeline(vec![
            row(1, "你", "你", "ni3", "you"),
            row(2, "好", "好", "hao3", "good"),
        ]);
        let words = pipeline.parse_text("你好");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].original, "你");
        assert_eq!(words[0].simplified_pairs[0].pinyin, "nǐ");
        assert_eq!(words[1].original, "好");
        assert_eq!(words[1].simplified_pairs[0].pinyin, "hǎo");
    }

    #[test]
    fn covers_every_character_exactly_once() {
        let pipeline = pipeline(vec![row(1, "學校", "学校", "xue2 xiao4", "school")]);
        let text = "我去学校，hello 你呢？";
        let words = pipeline.parse_text(text);
        assert_eq!(original_text(&words), text);
    }

    #[test]
    fn unresolved_tokens_get_empty_pairs() {
        let pipeline = pipeline(Vec::new());
        let words = pipeline.parse_text("你好！");
        assert_eq!(original_text(&words), "你好！");
        assert!(words.iter().all(|w| w.simplified_pairs.is_empty()));
        assert!(words.iter().all(|w| w.entry.is_none()));
    }

    #[test]
    fn memoizes_per_sentence() {
        let pipeline = pipeline(vec![row(1, "你", "你", "ni3", "you")]);
        let sentence = Sentence::new("你呢？");
        let first = pipeline.parse(&sentence);
        let second = pipeline.parse(&sentence);
        assert!(Arc::ptr_eq(&first, &second));

        // a different sentence with the same text is computed independently
        let other = Sentence::new("你呢？");
        let third = pipeline.parse(&other);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
    }

    #[test]
    fn splits_documents_into_sentences() {
        let document = Document::new("我去学校。你\n呢？");
        let originals = document
            .sentences()
            .iter()
            .map(|s| s.original.as_str())
            .collect::<Vec<_>>();
        assert_eq!(originals, ["我去学校。", "你呢？"]);
    }

    #[test]
    fn strips_spurious_whitespace_from_documents() {
        let document = Document::new("我 去 学\n校。");
        assert_eq!(document.sentences()[0].original, "我去学校。");
    }

    #[test]
    fn stores_translations_by_sentence_id() {
        let mut document = Document::new("你好。");
        let id = document.sentences()[0].id;
        assert_eq!(document.translation(id), None);
        document.set_translation(id, "Hello.".to_string());
        assert_eq!(document.translation(id), Some("Hello."));
    }
}
