//! # Codebook Module
//!
//! The frozen model that turns residue descriptors into discrete states: a
//! per-feature normalization, a small feed-forward embedding network, a table
//! of twenty centroids in the embedding space, and the alphabet used to print
//! the resulting states.
//!
//! A [`Codebook`] is validated once when it is built and never mutated
//! afterwards, so a single instance can be shared by any number of encoders
//! and threads.
//!
//! - [`alphabet`] - State letters and the unknown marker
//! - [`network`] - Dense layers and activations
//! - [`kerasify`] - Binary weight files exported with Kerasify
//! - [`manifest`] - TOML manifests bundling all parts of a codebook
//! - [`reference`] - Constants of the published 3Di alphabet

pub mod alphabet;
pub mod error;
pub mod kerasify;
pub mod manifest;
pub mod network;
pub mod reference;

use crate::core::models::state::{DESCRIPTOR_LEN, Descriptor, STATE_COUNT};
use alphabet::Alphabet;
use error::CodebookError;
use network::EmbeddingNetwork;
use serde::Deserialize;

/// Per-feature affine normalization `(x - center) / scale`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Normalization {
    pub center: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Normalization {
    pub fn identity() -> Self {
        Self {
            center: vec![0.0; DESCRIPTOR_LEN],
            scale: vec![1.0; DESCRIPTOR_LEN],
        }
    }

    fn validate(&self) -> Result<(), CodebookError> {
        if self.center.len() != DESCRIPTOR_LEN || self.scale.len() != DESCRIPTOR_LEN {
            return Err(CodebookError::InvalidNormalization(format!(
                "expected {} centers and scales, found {} and {}",
                DESCRIPTOR_LEN,
                self.center.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| *s == 0.0 || !s.is_finite())
        {
            return Err(CodebookError::InvalidNormalization(format!(
                "scale of feature {} must be finite and non-zero",
                i
            )));
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(CodebookError::InvalidNormalization(
                "centers must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn apply(&self, descriptor: &Descriptor) -> Descriptor {
        let mut out = *descriptor;
        for ((v, c), s) in out.iter_mut().zip(&self.center).zip(&self.scale) {
            *v = (*v - c) / s;
        }
        out
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Codebook {
    version: Option<String>,
    alphabet: Alphabet,
    normalization: Normalization,
    network: EmbeddingNetwork,
    centroids: Vec<Vec<f64>>,
}

impl Codebook {
    /// Assembles and validates a codebook.
    ///
    /// # Errors
    ///
    /// Fails if the network does not take a descriptor as input, if there are
    /// not exactly twenty centroids of the network's output width, or if the
    /// normalization is malformed.
    pub fn new(
        alphabet: Alphabet,
        normalization: Normalization,
        network: EmbeddingNetwork,
        centroids: Vec<Vec<f64>>,
    ) -> Result<Self, CodebookError> {
        if network.input_dim() != DESCRIPTOR_LEN {
            return Err(CodebookError::InvalidNetwork(format!(
                "network takes {} inputs, descriptors have {}",
                network.input_dim(),
                DESCRIPTOR_LEN
            )));
        }
        if centroids.len() != STATE_COUNT {
            return Err(CodebookError::InvalidCentroids(format!(
                "expected {} centroids, found {}",
                STATE_COUNT,
                centroids.len()
            )));
        }
        if let Some(i) = centroids
            .iter()
            .position(|c| c.len() != network.output_dim())
        {
            return Err(CodebookError::InvalidCentroids(format!(
                "centroid {} has dimension {}, network produces {}",
                i,
                centroids[i].len(),
                network.output_dim()
            )));
        }
        if centroids.iter().flatten().any(|v| !v.is_finite()) {
            return Err(CodebookError::InvalidCentroids(
                "centroid coordinates must be finite".to_string(),
            ));
        }
        normalization.validate()?;

        Ok(Self {
            version: None,
            alphabet,
            normalization,
            network,
            centroids,
        })
    }

    /// The published alphabet and centroid table with the given network.
    pub fn reference(network: EmbeddingNetwork) -> Result<Self, CodebookError> {
        let centroids = reference::REFERENCE_CENTROIDS
            .iter()
            .map(|c| c.to_vec())
            .collect();
        Self::new(
            Alphabet::reference(),
            Normalization::identity(),
            network,
            centroids,
        )
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Replaces the alphabet, keeping the trained parts.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    pub fn network(&self) -> &EmbeddingNetwork {
        &self.network
    }

    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    pub fn embedding_dim(&self) -> usize {
        self.network.output_dim()
    }
}
