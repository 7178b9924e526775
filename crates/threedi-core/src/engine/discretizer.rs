use crate::core::codebook::Codebook;
use crate::core::models::state::{Descriptor, State};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps an embedding to the index of the closest centroid.
///
/// Ties go to the lowest index. Returns `None` if no distance compares as
/// finite, which only happens for a non-finite embedding.
pub fn nearest_centroid(centroids: &[Vec<f64>], embedding: &[f64]) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for (index, centroid) in centroids.iter().enumerate() {
        let d: f64 = centroid
            .iter()
            .zip(embedding)
            .map(|(c, e)| (c - e) * (c - e))
            .sum();
        if best.is_none_or(|(best_d, _)| d < best_d) && d.is_finite() {
            best = Some((d, index));
        }
    }
    best.map(|(_, index)| index)
}

/// Position of a descriptor in the codebook's embedding space.
pub fn embed(codebook: &Codebook, descriptor: &Descriptor) -> Vec<f64> {
    let normalized = codebook.normalization().apply(descriptor);
    codebook.network().forward(&normalized)
}

/// Assigns the state of one residue. Residues without a descriptor are
/// [`State::Missing`].
pub fn discretize(codebook: &Codebook, descriptor: Option<&Descriptor>) -> State {
    descriptor
        .and_then(|d| nearest_centroid(codebook.centroids(), &embed(codebook, d)))
        .and_then(State::class)
        .unwrap_or(State::Missing)
}

/// States for a whole chain of descriptors, in order.
pub fn discretize_all(codebook: &Codebook, descriptors: &[Option<Descriptor>]) -> Vec<State> {
    #[cfg(feature = "parallel")]
    let iter = descriptors.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = descriptors.iter();

    iter.map(|d| discretize(codebook, d.as_ref())).collect()
}
