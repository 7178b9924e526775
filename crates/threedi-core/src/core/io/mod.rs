//! Reading protein structure files into [`Structure`](crate::core::models::structure::Structure) values.
//!
//! Parsers implement the [`traits::StructureFile`] trait so callers can read
//! from any buffered source or directly from a path.

pub mod pdb;
pub mod traits;
