//! # Core Module
//!
//! Stateless building blocks of the 3Di encoder: the chain data model, the
//! virtual-center geometry, the frozen codebook resource and the readers that
//! bring structures into memory.
//!
//! ## Architecture
//!
//! - **Chain Representation** ([`models`]) - Residues, backbones, chains, structures and states
//! - **Geometry** ([`geometry`]) - Idealized CB placement and virtual-center construction
//! - **Trained Model** ([`codebook`]) - Alphabet, embedding network, centroids and their loaders
//! - **File I/O** ([`io`]) - Reading protein structure files into chains
//!
//! Nothing in this module keeps global state. Every value is built once,
//! validated at construction and read-only afterwards, which is what lets the
//! engine share them across threads.

pub mod codebook;
pub mod geometry;
pub mod io;
pub mod models;
