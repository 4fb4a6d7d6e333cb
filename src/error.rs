// File: src/error.rs
use thiserror::Error;

/// Errors surfaced by the speller. Distance computation, edit generation and
/// lookups never fail; only input parsing, artifacts and untrained ranking do.
#[derive(Debug, Error)]
pub enum SpellError {
    #[error("Malformed misspelling list at line {line}: {message}")]
    MisspellParse { line: usize, message: String },
    #[error("Scorer has no trained weights")]
    UntrainedScorer,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    InvalidConfig(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_error_display() {
        let error = SpellError::MisspellParse {
            line: 1,
            message: "variant before any $term header".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed misspelling list at line 1: variant before any $term header"
        );

        let error = SpellError::InvalidConfig("min_term_len must be at least 1".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid config value: min_term_len must be at least 1"
        );

        let error = SpellError::UntrainedScorer;
        assert_eq!(error.to_string(), "Scorer has no trained weights");
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.bin")?)
        }
        assert!(matches!(open_missing(), Err(SpellError::Io(_))));
    }
}
