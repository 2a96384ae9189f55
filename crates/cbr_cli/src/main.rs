//! Command line interface for CBR.

mod cli;

use cbr::{Document, Pipeline};
use cbr_core::ChineseForm;
use cedata::dictfile::Dictfile;
use clap::Parser;
use cli::{Cli, Command};
use itertools::Itertools;
use std::sync::Arc;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let dictfile = Dictfile::open(&cli.dictfile)?;
    tracing::info!(
        "loaded {} dictionary rows, CC-CEDICT {}",
        dictfile.rows.len(),
        dictfile.header.source_version
    );
    let dictionary = Arc::new(cbr::DictionaryIndex::new(dictfile.rows));

    match cli.command {
        Command::Parse { text } => parse(dictionary, &text),
        Command::Search { term } => search(&dictionary, &term),
    }

    Ok(())
}

fn parse(dictionary: Arc<cbr::DictionaryIndex>, text: &str) {
    let pipeline = Pipeline::new(dictionary);
    let document = Document::new(text);
    for sentence in document.sentences() {
        println!("{}", sentence.original);
        for word in pipeline.parse(sentence).iter() {
            let pinyin = word
                .pairs(ChineseForm::Simplified)
                .iter()
                .map(|pair| pair.pinyin.as_str())
                .join(" ");
            match &word.entry {
                Some(entry) => {
                    let definition = entry.definition.lines().next().unwrap_or_default();
                    println!("  {}\t{pinyin}\t{definition}", word.original);
                }
                None => println!("  {}", word.original),
            }
        }
    }
}

fn search(dictionary: &cbr::DictionaryIndex, term: &str) {
    let entries = dictionary.any_field(term);
    if entries.is_empty() {
        println!("no results for '{term}'");
        return;
    }
    for entry in entries {
        let definition = entry.definition.lines().join("; ");
        println!(
            "{} ({})\t{}\t{definition}",
            entry.simplified, entry.traditional, entry.pinyin
        );
    }
}
