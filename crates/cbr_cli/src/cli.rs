use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The path to the dictfile created by cedata.
    #[arg(short, long)]
    pub dictfile: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parses Chinese text and prints each word with its pinyin and definition.
    Parse { text: String },
    /// Searches the dictionary across all fields.
    Search { term: String },
}
