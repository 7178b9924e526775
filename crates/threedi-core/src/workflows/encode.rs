use crate::core::codebook::Codebook;
use crate::core::models::chain::Chain;
use crate::core::models::state::{Descriptor, State};
use crate::core::models::structure::Structure;
use crate::engine::centers::compute_virtual_centers;
use crate::engine::config::EncoderConfig;
use crate::engine::descriptors::compute_descriptors;
use crate::engine::discretizer::discretize_all;
use crate::engine::error::EngineError;
use crate::engine::partners::{Partner, find_partners};
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Point3;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Every intermediate of one chain encoding, indexed by chain position.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedChain {
    pub chain_id: char,
    pub centers: Vec<Option<Point3<f64>>>,
    pub partners: Vec<Partner>,
    pub descriptors: Vec<Option<Descriptor>>,
    pub states: Vec<State>,
}

impl EncodedChain {
    /// The partner table with [`Partner::SENTINEL`] for residues without a partner.
    pub fn partner_indices(&self) -> Vec<usize> {
        self.partners.iter().map(|p| p.to_sentinel()).collect()
    }
}

/// The rendered 3Di string of one chain of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSequence {
    pub chain_id: char,
    pub states: Vec<State>,
    pub sequence: String,
}

fn ensure_not_empty(chain: &Chain) -> Result<(), EngineError> {
    if chain.is_empty() {
        return Err(EngineError::EmptyChain { chain: chain.id });
    }
    Ok(())
}

type CentersAndPartners = (Vec<Option<Point3<f64>>>, Vec<Partner>);

fn locate_partners(chain: &Chain, config: &EncoderConfig) -> Result<CentersAndPartners, EngineError> {
    ensure_not_empty(chain)?;
    let centers = compute_virtual_centers(chain, &config.virtual_center);
    let partners = find_partners(&centers, config.partner_strategy, config.sequence_exclusion);
    Ok((centers, partners))
}

/// Produces only the partner table of a chain.
#[derive(Debug, Clone, Default)]
pub struct PartnerIndexEncoder {
    config: EncoderConfig,
}

impl PartnerIndexEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Partner of every residue in chain order.
    pub fn partners(&self, chain: &Chain) -> Result<Vec<Partner>, EngineError> {
        locate_partners(chain, &self.config).map(|(_, partners)| partners)
    }

    /// Zero-based partner position of every residue, or [`Partner::SENTINEL`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyChain`] for a chain without residues.
    #[instrument(skip_all, name = "partner_index_encoding", fields(chain = %chain.id))]
    pub fn encode_chain(&self, chain: &Chain) -> Result<Vec<usize>, EngineError> {
        let partners = self.partners(chain)?;
        Ok(partners.into_iter().map(Partner::to_sentinel).collect())
    }
}

/// Produces the descriptor of every residue without discretizing it.
#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    config: EncoderConfig,
}

impl FeatureEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    #[instrument(skip_all, name = "feature_encoding", fields(chain = %chain.id))]
    pub fn encode_chain(&self, chain: &Chain) -> Result<Vec<Option<Descriptor>>, EngineError> {
        let (centers, partners) = locate_partners(chain, &self.config)?;
        Ok(compute_descriptors(&centers, &partners))
    }
}

/// Encodes chains into 3Di states against one codebook.
#[derive(Debug, Clone)]
pub struct Encoder {
    codebook: Arc<Codebook>,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(codebook: Arc<Codebook>) -> Self {
        Self::with_config(codebook, EncoderConfig::default())
    }

    pub fn with_config(codebook: Arc<Codebook>, config: EncoderConfig) -> Self {
        Self { codebook, config }
    }

    /// Loads the codebook manifest at `path` and builds an encoder around it.
    ///
    /// # Errors
    ///
    /// Any load failure is returned as [`EngineError::Codebook`].
    pub fn from_manifest(path: &Path, config: EncoderConfig) -> Result<Self, EngineError> {
        let codebook = Codebook::load(path)?;
        info!(
            "Loaded codebook {} from {:?}",
            codebook.version().unwrap_or("(unversioned)"),
            path
        );
        Ok(Self::with_config(Arc::new(codebook), config))
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// One state per residue, in chain order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyChain`] for a chain without residues.
    pub fn encode_chain(&self, chain: &Chain) -> Result<Vec<State>, EngineError> {
        self.encode_chain_with_partners(chain)
            .map(|encoded| encoded.states)
    }

    /// Runs the whole pipeline and keeps every intermediate.
    #[instrument(skip_all, name = "chain_encoding", fields(chain = %chain.id))]
    pub fn encode_chain_with_partners(&self, chain: &Chain) -> Result<EncodedChain, EngineError> {
        let (centers, partners) = locate_partners(chain, &self.config)?;
        let descriptors = compute_descriptors(&centers, &partners);
        let states = discretize_all(&self.codebook, &descriptors);
        debug!(
            residues = chain.len(),
            unresolved = chain.len() - chain.resolved_count(),
            missing = states.iter().filter(|s| s.is_missing()).count(),
            "Encoded chain"
        );
        Ok(EncodedChain {
            chain_id: chain.id,
            centers,
            partners,
            descriptors,
            states,
        })
    }

    /// Renders states with the codebook's alphabet; same length as `states`.
    pub fn build_sequence(&self, states: &[State]) -> String {
        self.codebook.alphabet().render(states)
    }

    pub fn encode_structure(&self, structure: &Structure) -> Result<Vec<ChainSequence>, EngineError> {
        self.encode_structure_with_progress(structure, &ProgressReporter::new())
    }

    /// Encodes every chain of a structure, keeping the structure's chain order.
    #[instrument(skip_all, name = "structure_encoding", fields(structure = %structure.id))]
    pub fn encode_structure_with_progress(
        &self,
        structure: &Structure,
        reporter: &ProgressReporter,
    ) -> Result<Vec<ChainSequence>, EngineError> {
        reporter.report(Progress::StructureStart {
            id: structure.id.clone(),
            total_chains: structure.chains.len() as u64,
        });

        #[cfg(feature = "parallel")]
        let chains = structure.chains.par_iter();
        #[cfg(not(feature = "parallel"))]
        let chains = structure.chains.iter();

        let sequences = chains
            .map(|chain| {
                let states = self.encode_chain(chain)?;
                let sequence = self.build_sequence(&states);
                reporter.report(Progress::ChainFinish {
                    chain: chain.id,
                    residues: chain.len(),
                });
                Ok(ChainSequence {
                    chain_id: chain.id,
                    states,
                    sequence,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        reporter.report(Progress::StructureFinish);
        info!(chains = sequences.len(), "Structure encoded");
        Ok(sequences)
    }
}
