use std::io;
use std::path::PathBuf;

/// Why a single token could not be turned into a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Not valid SAN, or no (unique) legal move matches it in the position.
    #[error("{0}")]
    Illegal(String),
    /// The token is not something SAN parsing can even be attempted on.
    #[error("{0}")]
    Malformed(String),
    /// The rules engine failed in a way it does not report as an error.
    #[error("{0}")]
    Unexpected(String),
}

/// Failure of one game line. Carries what the diagnostic needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub token: String,
    pub line: String,
    pub source: MoveError,
}

impl LineError {
    /// The `ERROR: ...` string written in place of the converted game.
    pub fn diagnostic(&self) -> String {
        match &self.source {
            MoveError::Illegal(_) => {
                format!("ERROR: Could not parse '{}' in game: {}", self.token, self.line)
            }
            MoveError::Malformed(_) => {
                format!("ERROR: Malformed token '{}' in game: {}", self.token, self.line)
            }
            MoveError::Unexpected(_) => {
                format!("ERROR: Unexpected error with '{}' in game: {}", self.token, self.line)
            }
        }
    }
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.diagnostic())
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Errors that end a whole batch run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Input file '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    #[error("File I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Compression(String),
}
