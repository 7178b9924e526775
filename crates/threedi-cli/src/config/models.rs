use crate::cli::OutputFormat;
use threedi::engine::config::EncoderConfig;

/// Fully merged settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Codebook as given by the user (a path or a logical name), before resolution.
    pub codebook: String,
    pub unknown_char: Option<char>,
    pub format: OutputFormat,
    pub encoder: EncoderConfig,
}
