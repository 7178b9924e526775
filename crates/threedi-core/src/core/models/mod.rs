//! # Core Models Module
//!
//! Plain data types describing the input and output of the encoders: residues
//! with an optional backbone, ordered chains, multi-chain structures, and the
//! per-residue descriptor and state types.
//!
//! - [`residue`] - `Residue` and its validated `Backbone` (N, CA, C)
//! - [`chain`] - Ordered `Chain`; residue positions are the indices used downstream
//! - [`structure`] - `Structure`, the chains of one file
//! - [`state`] - `State` (twenty classes or missing) and the `Descriptor` vector
//!
//! All types are immutable once built; masking a residue produces a new chain.

pub mod chain;
pub mod residue;
pub mod state;
pub mod structure;
