//! Creates the dictfile from a CC-CEDICT release.

mod cli;

use cedata::{cedict::Cedict, dictfile::Dictfile};
use clap::Parser;
use cli::{Cli, Command};
use eyre::WrapErr;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Dictfile {
            cedict,
            cedict_version,
            output,
        } => {
            create_dictfile(&cedict, cedict_version, &output)?;
        }
    }

    Ok(())
}

fn create_dictfile(cedict_path: &Path, version: String, output_path: &Path) -> eyre::Result<()> {
    tracing::info!("parsing {}", cedict_path.display());
    let cedict = File::open(cedict_path)
        .wrap_err_with(|| format!("failed to open {}", cedict_path.display()))?;
    let cedict = Cedict::from(BufReader::new(cedict))?;
    tracing::info!("parsed {} rows", cedict.rows.len());

    tracing::info!("writing output");
    let dictfile = Dictfile::from_cedict(cedict, version);
    let output = File::create(output_path)
        .wrap_err_with(|| format!("failed to create {}", output_path.display()))?;
    serde_json::to_writer(BufWriter::new(output), &dictfile)?;

    Ok(())
}
