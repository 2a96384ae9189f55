use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Dictfile {
        /// The path to the input CC-CEDICT file.
        #[arg(short, long)]
        cedict: PathBuf,
        /// The release date of the input CC-CEDICT file.
        #[arg(short = 'v', long)]
        cedict_version: String,
        /// The path to the output dictfile.
        #[arg(short, long)]
        output: PathBuf,
    },
}
