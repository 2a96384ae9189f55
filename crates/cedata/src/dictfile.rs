//! Types and functionality for creating and reading the dictfile, the static
//! dictionary table loaded once at process start.

use crate::cedict::Cedict;
use cbr_core::DictionaryRow;
use eyre::WrapErr;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Dictfile {
    pub header: Header,
    pub rows: Vec<DictionaryRow>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Header {
    pub source_version: String,
}

impl Dictfile {
    pub fn from_cedict(cedict: Cedict, source_version: String) -> Self {
        Self {
            header: Header { source_version },
            rows: cedict.rows,
        }
    }

    pub fn read_from<R: Read>(r: R) -> eyre::Result<Self> {
        let dictfile = serde_json::from_reader(r)?;
        Ok(dictfile)
    }

    /// Dictionary data being unavailable is fatal at startup, never per-query.
    pub fn open(path: &Path) -> eyre::Result<Self> {
        let file = File::open(path)
            .wrap_err_with(|| format!("failed to open dictfile at {}", path.display()))?;
        Self::read_from(BufReader::new(file))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrips_through_json() {
        let cedict = Cedict::from("好 好 [hao3] /good/well/\n".as_bytes()).unwrap();
        let dictfile = Dictfile::from_cedict(cedict, "2024-08-19".to_string());
        let json = serde_json::to_vec(&dictfile).unwrap();
        let read = Dictfile::read_from(json.as_slice()).unwrap();
        assert_eq!(read.header.source_version, "2024-08-19");
        assert_eq!(read.rows, dictfile.rows);
    }
}
