//! Provides the core functionality of CBR, a project for studying Chinese by
//! reading: pinyin formatting, character/pinyin alignment, dictionary lookup
//! and sentence parsing.

pub mod aligner;
pub mod dictionary;
pub mod pinyin;
pub mod pipeline;
pub mod sentence_splitter;

pub use aligner::{align, AlignError};
pub use dictionary::{DictionaryIndex, WordLookup};
pub use pinyin::{format_pinyin, format_syllable};
pub use pipeline::{Document, Pipeline};
pub use sentence_splitter::SentenceSplitter;
