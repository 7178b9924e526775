use crate::cli::OutputFormat;
use threedi::engine::config::PartnerStrategy;

pub struct DefaultsConfig {
    pub codebook: String,
    pub format: OutputFormat,
    pub partner_strategy: PartnerStrategy,
    pub sequence_exclusion: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            codebook: "3di".to_string(),
            format: OutputFormat::Fasta,
            partner_strategy: PartnerStrategy::KdTree,
            sequence_exclusion: 0,
        }
    }
}
