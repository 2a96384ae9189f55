//! The in-memory dictionary index.
//!
//! Built once from the raw rows of a dictfile, read-only afterwards. Lookups
//! match against the raw numeric-tone rows; the returned entries carry
//! formatted pinyin and definitions.

use crate::pinyin;
use cbr_core::{hanzi_from_word, DictionaryEntry, DictionaryRow};
use itertools::Itertools;
use std::collections::HashMap;

pub const SUBSTRING_LIMIT: usize = 10;
pub const ANY_FIELD_LIMIT: usize = 30;

pub struct DictionaryIndex {
    rows: Vec<DictionaryRow>,
    // simplified and traditional form to row indices, in id order
    by_form: HashMap<String, Vec<usize>>,
    max_entry_length: usize,
}

/// Results for a single inspected word, see [`DictionaryIndex::word_lookup`].
#[derive(Debug, Clone, Default)]
pub struct WordLookup {
    pub exact: Option<DictionaryEntry>,
    pub more: Vec<DictionaryEntry>,
}

impl DictionaryIndex {
    pub fn new(mut rows: Vec<DictionaryRow>) -> Self {
        let mut by_form = HashMap::<String, Vec<usize>>::new();
        let mut max_entry_length = 0;
        rows.sort_by_key(|r| r.id);
        for (i, row) in rows.iter().enumerate() {
            max_entry_length = max_entry_length
                .max(row.simplified.chars().count())
                .max(row.traditional.chars().count());
            by_form.entry(row.simplified.clone()).or_default().push(i);
            if row.traditional != row.simplified {
                by_form.entry(row.traditional.clone()).or_default().push(i);
            }
        }
        Self {
            rows,
            by_form,
            max_entry_length,
        }
    }

    /// The longest headword in the index, in characters.
    ///
    /// Bounds how far callers look around a tapped character when extending
    /// it to a word.
    pub fn max_entry_length(&self) -> usize {
        self.max_entry_length
    }

    /// Looks up a word by its exact simplified or traditional form.
    ///
    /// Rows sharing a simplified form are merged into one entry with the
    /// definitions joined by newlines. When several distinct headwords match,
    /// the one with the shortest simplified form is returned.
    pub fn exact_one(&self, word: &str) -> Option<DictionaryEntry> {
        let groups = self.exact_groups(word);
        if groups.is_empty() {
            tracing::warn!("no exact match for '{word}'");
            return None;
        }
        if groups.len() > 1 {
            tracing::warn!("found multiple exact matches for '{word}', returning the first");
        }
        groups.first().map(|group| entry_from_rows(group))
    }

    /// Batched exact lookup.
    ///
    /// Each matched entry is inserted under both its simplified and its
    /// traditional form so callers can resolve tokens in either script.
    pub fn exact_many<S: AsRef<str>>(&self, words: &[S]) -> HashMap<String, DictionaryEntry> {
        let mut entries = HashMap::new();
        for word in words {
            for group in self.exact_groups(word.as_ref()) {
                let entry = entry_from_rows(&group);
                entries.insert(entry.traditional.clone(), entry.clone());
                entries.insert(entry.simplified.clone(), entry);
            }
        }
        entries
    }

    /// Entries where either form contains `word`, shortest simplified form
    /// first, at most [`SUBSTRING_LIMIT`] results.
    pub fn substring(&self, word: &str) -> Vec<DictionaryEntry> {
        self.rows
            .iter()
            .filter(|r| r.traditional.contains(word) || r.simplified.contains(word))
            .sorted_by_key(|r| (r.simplified.chars().count(), r.id))
            .take(SUBSTRING_LIMIT)
            .map(|r| entry_from_rows(&[r]))
            .collect()
    }

    /// Ranked search across all fields, at most [`ANY_FIELD_LIMIT`] results.
    ///
    /// Exact matches on a form or the pinyin rank first, then definition
    /// substring matches, then form/pinyin substring matches; ties are broken
    /// by simplified form length.
    pub fn any_field(&self, term: &str) -> Vec<DictionaryEntry> {
        self.rows
            .iter()
            .filter(|r| {
                r.simplified.contains(term)
                    || r.traditional.contains(term)
                    || r.pinyin.contains(term)
                    || r.definition.contains(term)
            })
            .sorted_by_key(|r| (rank(r, term), r.simplified.chars().count(), r.id))
            .take(ANY_FIELD_LIMIT)
            .map(|r| entry_from_rows(&[r]))
            .collect()
    }

    /// Dictionary view for one inspected word: the exact entry plus related
    /// substring matches.
    ///
    /// A multi-character word without an exact entry additionally pulls in
    /// substring matches for each of its hanzi.
    pub fn word_lookup(&self, word: &str) -> WordLookup {
        let exact = self.exact_one(word);
        let exact_id = exact.as_ref().map(|e| e.id);
        let mut more = self
            .substring(word)
            .into_iter()
            .filter(|e| Some(e.id) != exact_id)
            .collect::<Vec<_>>();
        if exact.is_none() && more.len() < SUBSTRING_LIMIT && word.chars().count() > 1 {
            for hanzi in hanzi_from_word(word) {
                more.extend(self.substring(hanzi));
            }
        }
        WordLookup { exact, more }
    }

    // rows matching `word` exactly by either form, grouped by simplified form,
    // groups ordered by simplified length then id
    fn exact_groups(&self, word: &str) -> Vec<Vec<&DictionaryRow>> {
        let Some(indices) = self.by_form.get(word) else {
            return Vec::new();
        };
        let mut groups = Vec::<Vec<&DictionaryRow>>::new();
        for &i in indices {
            let row = &self.rows[i];
            match groups
                .iter_mut()
                .find(|group| group[0].simplified == row.simplified)
            {
                Some(group) => group.push(row),
                None => groups.push(vec![row]),
            }
        }
        groups.sort_by_key(|group| (group[0].simplified.chars().count(), group[0].id));
        groups
    }
}

// `rows` must be non-empty; the id, forms and pinyin come from the first row
fn entry_from_rows(rows: &[&DictionaryRow]) -> DictionaryEntry {
    let first = rows[0];
    let definition = rows
        .iter()
        .map(|r| pinyin::format_pinyin(&r.definition))
        .join("\n");
    DictionaryEntry {
        id: first.id,
        traditional: first.traditional.clone(),
        simplified: first.simplified.clone(),
        pinyin: pinyin::format_pinyin(&first.pinyin),
        definition,
    }
}

// tier 3 is unreachable through the filter in `any_field` but kept as defined
// behavior for ranking purposes
fn rank(row: &DictionaryRow, term: &str) -> u8 {
    if row.simplified == term || row.traditional == term || row.pinyin == term {
        0
    } else if row.definition.contains(term) {
        1
    } else if row.simplified.contains(term)
        || row.traditional.contains(term)
        || row.pinyin.contains(term)
    {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn row(id: i32, traditional: &str, simplified: &str, pinyin: &str, definition: &str) -> DictionaryRow {
        DictionaryRow {
            id,
            traditional: traditional.to_string(),
            simplified: simplified.to_string(),
            pinyin: pinyin.to_string(),
            definition: definition.to_string(),
        }
    }

    fn index() -> DictionaryIndex {
        DictionaryIndex::new(vec![
            row(1, "學", "学", "xue2", "to learn"),
            row(2, "學", "学", "xue2", "to study"),
            row(3, "學校", "学校", "xue2 xiao4", "school"),
            row(4, "大學", "大学", "da4 xue2", "university"),
            row(5, "你", "你", "ni3", "you"),
            row(6, "好", "好", "hao3", "good"),
            row(7, "科學家", "科学家", "ke1 xue2 jia1", "scientist"),
            row(8, "教育", "教育", "jiao4 yu4", "education; to study 学 somewhere"),
        ])
    }

    #[test]
    fn exact_one_merges_definitions() {
        let entry = index().exact_one("学").unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.traditional, "學");
        assert_eq!(entry.pinyin, "xué");
        assert_eq!(entry.definition, "to learn\nto study");
    }

    #[test]
    fn exact_one_matches_either_form() {
        let entry = index().exact_one("學校").unwrap();
        assert_eq!(entry.simplified, "学校");
        assert_eq!(entry.pinyin, "xué xiào");
    }

    #[test]
    fn exact_one_misses_cleanly() {
        assert_eq!(index().exact_one("喝"), None);
    }

    #[test]
    fn exact_many_keys_both_forms() {
        let entries = index().exact_many(&["学校", "你", "喝"]);
        // 学校 under both scripts, 你 under its one shared form
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["学校"].id, 3);
        assert_eq!(entries["學校"].id, 3);
        assert_eq!(entries["你"].id, 5);
        assert!(!entries.contains_key("喝"));
    }

    #[test]
    fn substring_orders_by_simplified_length() {
        let entries = index().substring("学");
        let simplified = entries.iter().map(|e| e.simplified.as_str()).collect::<Vec<_>>();
        assert_eq!(simplified, ["学", "学", "学校", "大学", "科学家"]);
    }

    #[test]
    fn any_field_ranks_exact_before_definition_matches() {
        let entries = index().any_field("学");
        // exact simplified-field matches first, then the definition match,
        // then form substring matches
        assert_eq!(entries[0].simplified, "学");
        assert_eq!(entries[1].simplified, "学");
        assert_eq!(entries[2].simplified, "教育");
        assert!(entries[3..].iter().all(|e| e.simplified.contains('学')));
        assert_eq!(entries.len(), 6);
    }

    #[test]
    fn any_field_matches_pinyin() {
        let entries = index().any_field("xue2 xiao4");
        assert_eq!(entries[0].simplified, "学校");
    }

    #[test]
    fn word_lookup_falls_back_to_characters() {
        let lookup = index().word_lookup("你好");
        assert!(lookup.exact.is_none());
        let simplified = lookup.more.iter().map(|e| e.simplified.as_str()).collect::<Vec<_>>();
        assert_eq!(simplified, ["你", "好"]);
    }

    #[test]
    fn word_lookup_only_falls_back_on_hanzi() {
        let lookup = index().word_lookup("A学");
        assert!(lookup.exact.is_none());
        let simplified = lookup.more.iter().map(|e| e.simplified.as_str()).collect::<Vec<_>>();
        assert_eq!(simplified, ["学", "学", "学校", "大学", "科学家"]);
    }

    #[test]
    fn word_lookup_excludes_the_exact_entry_from_more() {
        let lookup = index().word_lookup("学校");
        assert_eq!(lookup.exact.unwrap().id, 3);
        assert!(lookup.more.iter().all(|e| e.id != 3));
    }

    #[test]
    fn tracks_max_entry_length() {
        assert_eq!(index().max_entry_length(), 3);
        assert_eq!(DictionaryIndex::new(Vec::new()).max_entry_length(), 0);
    }
}
