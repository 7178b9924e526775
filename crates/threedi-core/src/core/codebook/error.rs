use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodebookError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Failed to read network weights from '{path}': {source}")]
    Kerasify {
        path: String,
        source: KerasifyError,
    },

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid embedding network: {0}")]
    InvalidNetwork(String),

    #[error("Invalid centroid table: {0}")]
    InvalidCentroids(String),

    #[error("Invalid normalization: {0}")]
    InvalidNormalization(String),

    #[error("Manifest must define network weights either as a file or inline layers, not {0}")]
    WeightsSource(&'static str),
}

#[derive(Debug, Error)]
pub enum KerasifyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported layer type {code} at layer {index}")]
    UnsupportedLayer { index: usize, code: u32 },

    #[error("Unknown activation code {code} at layer {index}")]
    UnknownActivation { index: usize, code: u32 },

    #[error("Layer {index} declares {declared} biases for {outputs} outputs")]
    BiasMismatch {
        index: usize,
        declared: usize,
        outputs: usize,
    },

    #[error("Layer {index} has an implausible shape {rows}x{cols}")]
    ImplausibleShape { index: usize, rows: usize, cols: usize },

    #[error("Model contains no layers")]
    Empty,

    #[error("Layers do not form a valid network: {0}")]
    Inconsistent(String),
}
