use std::fmt;
use thiserror::Error;

/// Which rate output file a table came from. Reversible is the synthetic
/// table of netted production-minus-loss series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Production,
    Loss,
    Reversible,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Production => "production",
            Direction::Loss => "loss",
            Direction::Reversible => "reversible",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// error types of the rate analysis pipeline; every variant aborts the run
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Usage error: {0}")]
    Usage(String),
    #[error("Parse error in '{path}' at line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
    #[error("File '{0}' does not exist")]
    NotFound(String),
    #[error("Species '{species}' is not present in the {table} table")]
    MissingSpecies { species: String, table: String },
    #[error("Specified value ({0}) doesn't exist in the reaction dictionary")]
    Lookup(String),
    #[error("Time axes do not align: {0}")]
    UnalignedSeries(String),
    #[error("Invalid equation text '{text}': {message}")]
    Equation { text: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Rendering error: {0}")]
    Render(String),
}

pub type RateResult<T> = Result<T, RateError>;
