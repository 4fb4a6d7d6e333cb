// File: src/corpus.rs
//! Raw-text tokenization for corpus training.

use crate::error::Result;
use flate2::read::GzDecoder;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}-]+").expect("term pattern is a valid regex"))
}

/// Lowercased letter/hyphen runs of at least `min_term_len` chars, with counts.
pub fn count_terms(text: &str, min_term_len: usize) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for token in term_pattern().find_iter(text) {
        let token = token.as_str();
        if token.chars().count() < min_term_len {
            continue;
        }
        *counts.entry(token.to_lowercase()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Reads a text file, gunzipping it when the name ends in `.gz`.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_text_file(path: &Path) -> Result<String> {
    let reader = open_maybe_gzipped(path)?;
    let mut bytes = Vec::new();
    BufReader::new(reader).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn open_maybe_gzipped(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    Ok(if is_gzip {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    })
}
