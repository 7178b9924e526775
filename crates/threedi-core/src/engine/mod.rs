//! # Engine Module
//!
//! The staged encoding pipeline that turns a chain into per-residue states.
//!
//! ## Overview
//!
//! Encoding runs in two passes separated by one barrier. First every resolved
//! residue gets a virtual center. Once all centers are known, each residue
//! looks up its nearest spatial partner, and from then on descriptors and
//! states are pure per-residue functions of read-only data.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Virtual-center parameters and partner search settings
//! - **Virtual Centers** ([`centers`]) - First pass over the chain
//! - **Partner Search** ([`partners`]) - Exact nearest-neighbor lookup, brute force or kd-tree
//! - **Descriptors** ([`descriptors`]) - The ten geometric features per residue
//! - **Discretization** ([`discretizer`]) - Embedding and nearest-centroid assignment
//! - **Progress Monitoring** ([`progress`]) - Callbacks for long multi-chain runs
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod centers;
pub mod config;
pub mod descriptors;
pub mod discretizer;
pub mod error;
pub mod partners;
pub mod progress;
