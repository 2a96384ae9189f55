//! Contains SentenceSplitter, an Iterator that iterates through the Chinese
//! sentences in a string.

const SENTENCE_ENDERS: &str = "。？！…‥.?!";
// closing quotes and brackets that stay with the sentence they end
const TRAILING_CLOSERS: &str = "」』”’）】";

/// Splits a string into sentences at runs of sentence-ending punctuation,
/// keeping the punctuation and any closing quotes with the sentence.
///
/// Every yielded item is a subslice of the input; only whitespace between
/// sentences is skipped.
#[derive(Debug, Clone)]
pub struct SentenceSplitter<'a> {
    s: &'a str,
    idx: usize,
}

impl<'a> SentenceSplitter<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s: s.trim(), idx: 0 }
    }
}

impl<'a> Iterator for SentenceSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // scroll past whitespace
        for c in self.s[self.idx..].chars() {
            if c.is_whitespace() {
                self.idx += c.len_utf8();
            } else {
                break;
            }
        }
        if self.idx >= self.s.len() {
            return None;
        }

        let start_idx = self.idx;
        let mut past_ender = false;
        for c in self.s[self.idx..].chars() {
            let ender = SENTENCE_ENDERS.contains(c);
            if past_ender && !ender && !TRAILING_CLOSERS.contains(c) {
                // sentence over
                break;
            }
            self.idx += c.len_utf8();
            if ender {
                past_ender = true;
            }
        }
        Some(self.s[start_idx..self.idx].trim_end())
    }
}
