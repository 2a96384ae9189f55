//! Models and parses the CC-CEDICT file.
//! See <https://cc-cedict.org/wiki/format:syntax>

use cbr_core::DictionaryRow;
use std::io::{BufRead, BufReader, Read};

pub struct Cedict {
    pub rows: Vec<DictionaryRow>,
}

impl Cedict {
    /// Parses a CC-CEDICT file into dictionary rows, one row per definition.
    ///
    /// Comment lines are skipped; malformed lines are skipped with a warning.
    pub fn from<R: Read>(r: R) -> eyre::Result<Self> {
        let mut rows = Vec::new();
        let mut next_id = 1;
        for line in BufReader::new(r).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(parsed) = parse_line(line) else {
                tracing::warn!("skipping malformed line '{line}'");
                continue;
            };
            for definition in parsed.definitions {
                rows.push(DictionaryRow {
                    id: next_id,
                    traditional: parsed.traditional.clone(),
                    simplified: parsed.simplified.clone(),
                    pinyin: parsed.pinyin.clone(),
                    definition,
                });
                next_id += 1;
            }
        }
        Ok(Self { rows })
    }
}

struct Line {
    traditional: String,
    simplified: String,
    pinyin: String,
    definitions: Vec<String>,
}

// lines are formatted {traditional} {simplified} [{pinyin}] /{definition}/.../
fn parse_line(line: &str) -> Option<Line> {
    let (traditional, rest) = line.split_once(' ')?;
    let (simplified, rest) = rest.split_once(' ')?;
    let rest = rest.strip_prefix('[')?;
    let (pinyin, rest) = rest.split_once(']')?;
    let definitions = rest
        .trim()
        .strip_prefix('/')?
        .strip_suffix('/')?
        .split('/')
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    if definitions.is_empty() {
        return None;
    }
    Some(Line {
        traditional: traditional.to_string(),
        simplified: simplified.to_string(),
        pinyin: normalise_pinyin(pinyin),
        definitions,
    })
}

// CC-CEDICT writes ü as u:
fn normalise_pinyin(pinyin: &str) -> String {
    pinyin.replace("u:", "ü").replace("U:", "Ü")
}
