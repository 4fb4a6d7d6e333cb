// src/fuzzy/mod.rs
pub mod edits;
pub mod symspell;
