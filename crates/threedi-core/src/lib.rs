//! # threedi
//!
//! Encodes protein backbone geometry into the 3Di structural alphabet: one
//! letter per residue describing its local tertiary context, so structures
//! can be compared with sequence tools.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Stateless chain models, virtual-center
//!   geometry, the frozen codebook (alphabet, embedding network, centroids)
//!   with its loaders, and PDB input.
//!
//! - **[`engine`]: The Pipeline.** The encoding stages (virtual centers,
//!   partner search, descriptors, discretization) with their configuration,
//!   errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** [`Encoder`](workflows::encode::Encoder),
//!   [`PartnerIndexEncoder`](workflows::encode::PartnerIndexEncoder) and
//!   structure-level encoding built on the engine.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use threedi::core::io::pdb::PdbFile;
//! use threedi::core::io::traits::StructureFile;
//! use threedi::engine::config::EncoderConfig;
//! use threedi::workflows::encode::Encoder;
//!
//! let encoder = Encoder::from_manifest(Path::new("data/3di/codebook.toml"), EncoderConfig::default())?;
//! let structure = PdbFile::read_from_path("1abc.pdb")?;
//! for chain in encoder.encode_structure(&structure)? {
//!     println!(">{}\n{}", chain.chain_id, chain.sequence);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
