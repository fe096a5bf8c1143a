use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for AnalyzeError {
    fn from(err: toml::de::Error) -> Self {
        AnalyzeError::Config(format!("TOML parse error: {err}"))
    }
}
