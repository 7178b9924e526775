use thiserror::Error;

use super::config::ConfigError;
use crate::core::codebook::error::CodebookError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Chain '{chain}' contains no residues")]
    EmptyChain { chain: char },

    #[error("Invalid encoder configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Codebook could not be loaded: {source}")]
    Codebook {
        #[from]
        source: CodebookError,
    },
}
