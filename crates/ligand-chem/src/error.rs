use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChemError {
    #[error("failed to parse molfile: {details} (at line ~{line})")]
    Parse { line: usize, details: String },

    #[error("V3000 molfiles are not supported")]
    UnsupportedVersion,

    #[error("explicit valence {valence} for atom {atom} ({symbol}) exceeds the allowed maximum")]
    Valence {
        atom: usize,
        symbol: &'static str,
        valence: u32,
    },

    #[error("more than 99 ring closures open at once")]
    RingClosureOverflow,
}

impl ChemError {
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChemError>;
