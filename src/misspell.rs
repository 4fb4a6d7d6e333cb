// File: src/misspell.rs
//! Labeled misspelling lists.
//!
//! ```text
//! $receive
//! recieve
//! receve
//! $letter
//! leter
//! ```

use crate::corpus::open_maybe_gzipped;
use crate::error::{Result, SpellError};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A correct term and the ways it was seen misspelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisspellBlock {
    pub term: String,
    pub misspells: Vec<String>,
}

pub fn parse_misspells<R: Read>(reader: R) -> Result<Vec<MisspellBlock>> {
    let mut blocks: Vec<MisspellBlock> = Vec::new();
    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if let Some(term) = line.strip_prefix('$') {
            blocks.push(MisspellBlock {
                term: term.to_string(),
                misspells: Vec::new(),
            });
            continue;
        }
        match blocks.last_mut() {
            Some(block) => block.misspells.push(line.to_string()),
            None => {
                return Err(SpellError::MisspellParse {
                    line: number + 1,
                    message: format!("variant {line:?} before any $term header"),
                })
            }
        }
    }
    Ok(blocks)
}

/// Parses a misspelling list from disk, gunzipping `*.gz` files.
pub fn read_misspells_file(path: &Path) -> Result<Vec<MisspellBlock>> {
    parse_misspells(open_maybe_gzipped(path)?)
}
