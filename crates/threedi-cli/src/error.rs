use std::path::PathBuf;
use thiserror::Error;
use threedi::core::codebook::error::CodebookError;
use threedi::engine::error::EngineError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    ThreediCore(#[from] EngineError),

    #[error("Failed to load codebook '{path}': {source}\nHint: {hint}", path = path.display())]
    Codebook {
        path: PathBuf,
        #[source]
        source: CodebookError,
        hint: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data management error: {0}")]
    Data(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
