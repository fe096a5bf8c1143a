use std::{io, num::ParseIntError, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("machine record is empty")]
    EmptyRecord,

    #[error("missing target group")]
    MissingTargetGroup,

    #[error("more than one target group")]
    DuplicateTargetGroup,

    #[error("unterminated '{open}' group")]
    UnterminatedGroup { open: char },

    #[error("invalid integer '{token}'")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("button {button} references counter {counter}, but the machine has {counters} counters")]
    CounterOutOfRange {
        button: usize,
        counter: usize,
        counters: usize,
    },

    #[error("counter {counter} unreachable: no button affects it")]
    UnreachableCounter { counter: usize },

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
