use crate::core::geometry::VirtualCenterParams;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How nearest partners are searched. Both strategies return identical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartnerStrategy {
    /// Quadratic scan over all candidates.
    BruteForce,
    /// Exact k-nearest queries over a kd-tree of virtual centers.
    #[default]
    KdTree,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncoderConfig {
    pub virtual_center: VirtualCenterParams,
    pub partner_strategy: PartnerStrategy,
    /// Residues within this many positions of a query are never its partner.
    /// Zero excludes only the residue itself.
    pub sequence_exclusion: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            virtual_center: VirtualCenterParams::REFERENCE,
            partner_strategy: PartnerStrategy::default(),
            sequence_exclusion: 0,
        }
    }
}

/// Builds an [`EncoderConfig`]. Unset values take the reference settings.
#[derive(Default)]
pub struct EncoderConfigBuilder {
    virtual_center: Option<VirtualCenterParams>,
    partner_strategy: Option<PartnerStrategy>,
    sequence_exclusion: Option<usize>,
}

impl EncoderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn virtual_center(mut self, params: VirtualCenterParams) -> Self {
        self.virtual_center = Some(params);
        self
    }
    pub fn partner_strategy(mut self, strategy: PartnerStrategy) -> Self {
        self.partner_strategy = Some(strategy);
        self
    }
    pub fn sequence_exclusion(mut self, radius: usize) -> Self {
        self.sequence_exclusion = Some(radius);
        self
    }

    pub fn build(self) -> Result<EncoderConfig, ConfigError> {
        let virtual_center = self.virtual_center.unwrap_or(VirtualCenterParams::REFERENCE);
        for (name, value) in [
            ("alpha_degrees", virtual_center.alpha_degrees),
            ("beta_degrees", virtual_center.beta_degrees),
            ("distance", virtual_center.distance),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("must be finite, got {}", value),
                });
            }
        }
        if virtual_center.distance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "distance",
                reason: format!("must be positive, got {}", virtual_center.distance),
            });
        }
        Ok(EncoderConfig {
            virtual_center,
            partner_strategy: self.partner_strategy.unwrap_or_default(),
            sequence_exclusion: self.sequence_exclusion.unwrap_or(0),
        })
    }
}
