use super::config::PartnerStrategy;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use std::collections::HashMap;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The nearest spatial partner of a residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partner {
    /// Zero-based position of the partner in the chain.
    Residue(usize),
    /// No eligible residue exists.
    None,
}

impl Partner {
    /// Value used for [`Partner::None`] in flat partner tables. Position 0 is
    /// a chain terminus and can never be a partner, so it is free.
    pub const SENTINEL: usize = 0;

    pub fn index(self) -> Option<usize> {
        match self {
            Partner::Residue(j) => Some(j),
            Partner::None => None,
        }
    }

    pub fn to_sentinel(self) -> usize {
        self.index().unwrap_or(Self::SENTINEL)
    }

    pub fn from_sentinel(value: usize) -> Self {
        if value == Self::SENTINEL {
            Partner::None
        } else {
            Partner::Residue(value)
        }
    }
}

/// Finds the nearest eligible partner of every residue.
///
/// Only interior residues (positions `1..=n-2`) with a virtual center take
/// part, both as queries and as candidates. A candidate is skipped when it
/// lies within `sequence_exclusion` positions of the query; the query itself
/// is always skipped. Distances are squared Euclidean distances between
/// virtual centers and ties go to the lowest position.
pub fn find_partners(
    centers: &[Option<Point3<f64>>],
    strategy: PartnerStrategy,
    sequence_exclusion: usize,
) -> Vec<Partner> {
    let partners = if centers.len() < 3 {
        vec![Partner::None; centers.len()]
    } else {
        match strategy {
            PartnerStrategy::BruteForce => brute_force(centers, sequence_exclusion),
            PartnerStrategy::KdTree => kd_tree(centers, sequence_exclusion),
        }
    };
    trace!(
        ?strategy,
        paired = partners.iter().filter(|p| p.index().is_some()).count(),
        total = partners.len(),
        "Partner search finished"
    );
    partners
}

#[inline]
fn squared_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}

#[inline]
fn interior_center(centers: &[Option<Point3<f64>>], i: usize) -> Option<&Point3<f64>> {
    if i == 0 || i + 1 >= centers.len() {
        return None;
    }
    centers[i].as_ref()
}

#[inline]
fn is_excluded(i: usize, j: usize, sequence_exclusion: usize) -> bool {
    i.abs_diff(j) <= sequence_exclusion
}

fn brute_force(centers: &[Option<Point3<f64>>], sequence_exclusion: usize) -> Vec<Partner> {
    let n = centers.len();

    #[cfg(feature = "parallel")]
    let queries = (0..n).into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let queries = 0..n;

    queries
        .map(|i| {
            let Some(query) = interior_center(centers, i) else {
                return Partner::None;
            };
            let mut best: Option<(f64, usize)> = None;
            for j in 1..n - 1 {
                if is_excluded(i, j, sequence_exclusion) {
                    continue;
                }
                let Some(candidate) = &centers[j] else {
                    continue;
                };
                let d = squared_distance(query, candidate);
                if best.is_none_or(|(best_d, _)| d < best_d) {
                    best = Some((d, j));
                }
            }
            best.map_or(Partner::None, |(_, j)| Partner::Residue(j))
        })
        .collect()
}

/// Points per leaf of kiddo's `KdTree`; a leaf cannot be split when all of
/// its points share the value on the split axis.
const KD_TREE_BUCKET_SIZE: usize = 32;

/// Whether some axis repeats one coordinate often enough to fill a leaf.
fn has_crowded_axis(points: &[[f64; 3]]) -> bool {
    (0..3).any(|axis| {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        points.iter().any(|p| {
            // Adding 0.0 folds -0.0 into 0.0.
            let count = counts.entry((p[axis] + 0.0).to_bits()).or_insert(0);
            *count += 1;
            *count >= KD_TREE_BUCKET_SIZE
        })
    })
}

fn kd_tree(centers: &[Option<Point3<f64>>], sequence_exclusion: usize) -> Vec<Partner> {
    let n = centers.len();
    let candidates: Vec<(usize, [f64; 3])> = centers
        .iter()
        .enumerate()
        .take(n - 1)
        .skip(1)
        .filter_map(|(j, center)| center.map(|c| (j, [c.x, c.y, c.z])))
        .collect();
    if candidates.is_empty() {
        return vec![Partner::None; n];
    }

    let points: Vec<[f64; 3]> = candidates.iter().map(|&(_, p)| p).collect();
    if has_crowded_axis(&points) {
        debug!(
            candidates = candidates.len(),
            "Virtual centers repeat a coordinate too often for the k-d tree, using brute force"
        );
        return brute_force(centers, sequence_exclusion);
    }

    let mut tree: KdTree<f64, 3> = KdTree::with_capacity(candidates.len());
    for (j, point) in &candidates {
        tree.add(point, *j as u64);
    }
    let size = candidates.len();

    #[cfg(feature = "parallel")]
    let queries = (0..n).into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let queries = 0..n;

    queries
        .map(|i| match interior_center(centers, i) {
            Some(query) => nearest_in_tree(&tree, size, i, query, sequence_exclusion),
            None => Partner::None,
        })
        .collect()
}

/// Asks the tree for more and more neighbours until the closest eligible one
/// is strictly nearer than the farthest returned point. At that point every
/// tied candidate has been seen, so the lowest position can be chosen.
fn nearest_in_tree(
    tree: &KdTree<f64, 3>,
    size: usize,
    i: usize,
    query: &Point3<f64>,
    sequence_exclusion: usize,
) -> Partner {
    let q = [query.x, query.y, query.z];
    let mut k = sequence_exclusion
        .saturating_mul(2)
        .saturating_add(2)
        .min(size);
    loop {
        let found = tree.nearest_n::<SquaredEuclidean>(&q, k);
        let best = found
            .iter()
            .map(|nn| (nn.distance, nn.item as usize))
            .filter(|&(_, j)| !is_excluded(i, j, sequence_exclusion))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let farthest = found
            .iter()
            .map(|nn| nn.distance)
            .fold(f64::NEG_INFINITY, f64::max);

        match best {
            Some((d, j)) if farthest > d || k >= size => return Partner::Residue(j),
            None if k >= size => return Partner::None,
            _ => k = k.saturating_mul(2).min(size),
        }
    }
}
