//! # Workflows Module
//!
//! The public entry points of the library. Each encoder runs a prefix of the
//! engine pipeline over a chain and returns one value per residue:
//!
//! - [`encode::PartnerIndexEncoder`] - Virtual centers and partner search only
//! - [`encode::FeatureEncoder`] - Up to the ten-feature descriptors
//! - [`encode::Encoder`] - The full pipeline down to 3Di states and strings,
//!   for single chains or whole structures
//!
//! Encoders hold only immutable data, so one instance can serve any number of
//! threads.

pub mod encode;
