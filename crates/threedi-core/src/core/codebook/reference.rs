//! Constants of the published 3Di alphabet.

use crate::core::models::state::STATE_COUNT;

/// State letters in class order.
pub const REFERENCE_LETTERS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Character the reference encoder writes for residues without a state.
///
/// The reference sequences render missing residues with the letter of class 2.
pub const REFERENCE_UNKNOWN: char = 'D';

/// Dimension of the embedding space the centroids live in.
pub const REFERENCE_EMBEDDING_DIM: usize = 2;

pub const REFERENCE_CENTROIDS: [[f64; REFERENCE_EMBEDDING_DIM]; STATE_COUNT] = [
    [-1.0729, -0.3600],
    [-0.1356, -1.8914],
    [0.4948, -0.4205],
    [-0.9874, 0.8128],
    [-1.6621, -0.4259],
    [2.1394, 0.0486],
    [1.5558, -0.1503],
    [2.9179, 1.1437],
    [-2.8814, 0.9956],
    [-1.1400, -2.0068],
    [3.2025, 1.7356],
    [1.7769, -1.3037],
    [0.6901, -1.2554],
    [-1.1061, -1.3397],
    [2.1495, -0.8030],
    [2.3060, -1.4988],
    [2.5522, 0.6046],
    [0.7786, -2.1660],
    [-2.3030, 0.3813],
    [1.0290, 0.8772],
];
