use super::residue::Residue;
use std::ops::Range;

/// An ordered polypeptide chain.
///
/// The order of `residues` is authoritative: every index used by the encoders
/// (partner tables, state sequences) is a position in this list.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,             // Chain identifier (e.g., 'A', 'B')
    residues: Vec<Residue>,   // Residues in sequence order
}

impl Chain {
    pub fn new(id: char, residues: Vec<Residue>) -> Self {
        Self { id, residues }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.residues.iter().filter(|r| r.is_resolved()).count()
    }

    /// Returns a copy of the chain in which every residue whose position falls
    /// in `positions` is unresolved. Positions past the end are ignored.
    pub fn with_masked(&self, positions: Range<usize>) -> Self {
        let residues = self
            .residues
            .iter()
            .enumerate()
            .map(|(i, r)| {
                if positions.contains(&i) {
                    r.masked()
                } else {
                    r.clone()
                }
            })
            .collect();
        Self {
            id: self.id,
            residues,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::models::residue::Backbone;
    use nalgebra::{Point3, Vector3};

    /// A regular spiral backbone: every atom advances 100/3 degrees and 0.5 A.
    pub(crate) fn helix_chain(id: char, len: usize) -> Chain {
        let residues = (0..len)
            .map(|i| {
                let atom = |k: usize| {
                    let t = (3 * i + k) as f64;
                    let theta = t * (100.0f64 / 3.0).to_radians();
                    Point3::new(2.3 * theta.cos(), 2.3 * theta.sin(), t * 0.5)
                };
                let backbone = Backbone::new(atom(0), atom(1), atom(2)).unwrap();
                Residue::resolved(i as isize + 1, "ALA", backbone)
            })
            .collect();
        Chain::new(id, residues)
    }

    /// One backbone repeated `len` times, each copy shifted `rise` A along x.
    /// With an exactly representable `rise` every virtual center shares its y
    /// and z coordinates.
    pub(crate) fn straight_chain(id: char, len: usize, rise: f64) -> Chain {
        let residues = (0..len)
            .map(|i| {
                let x = i as f64 * rise;
                let backbone = Backbone::new(
                    Point3::new(x - 0.5, 1.3, 0.2),
                    Point3::new(x, 0.0, 0.0),
                    Point3::new(x + 1.5, 0.0, 0.0),
                )
                .unwrap();
                Residue::resolved(i as isize + 1, "ALA", backbone)
            })
            .collect();
        Chain::new(id, residues)
    }

    /// A seeded random walk with 3.8 A CA steps, folded back on itself often
    /// enough to give non-local partners.
    pub(crate) fn compact_chain(id: char, len: usize, seed: u64) -> Chain {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 11) as f64) / ((1u64 << 53) as f64) * 2.0 - 1.0
        };
        let mut ca = Point3::origin();
        let mut dir = Vector3::x();
        let residues = (0..len)
            .map(|i| {
                let turn = Vector3::new(next(), next(), next());
                dir = (dir + turn * 1.2).normalize();
                ca += dir * 3.8;
                let pull = -ca.coords * 0.02;
                dir = (dir + pull).normalize();
                let perp = dir.cross(&Vector3::new(next(), next(), 1.0)).normalize();
                let backbone =
                    Backbone::new(ca - dir * 1.2 + perp * 0.8, ca, ca + dir * 1.3 + perp * 0.4)
                        .unwrap();
                Residue::resolved(i as isize + 1, "GLY", backbone)
            })
            .collect();
        Chain::new(id, residues)
    }

    fn residue(number: isize) -> Residue {
        let x = number as f64 * 3.8;
        let backbone = Backbone::new(
            Point3::new(x - 0.5, 1.3, 0.0),
            Point3::new(x, 0.0, 0.0),
            Point3::new(x + 1.5, 0.0, 0.0),
        )
        .unwrap();
        Residue::resolved(number, "ALA", backbone)
    }

    #[test]
    fn new_chain_preserves_residue_order() {
        let chain = Chain::new('A', vec![residue(5), residue(6), residue(7)]);
        let numbers: Vec<isize> = chain.residues().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![5, 6, 7]);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
    }

    #[test]
    fn with_masked_unresolves_only_requested_positions() {
        let chain = Chain::new('B', (1..=6).map(residue).collect());
        let masked = chain.with_masked(2..4);
        assert_eq!(masked.len(), 6);
        assert_eq!(masked.resolved_count(), 4);
        assert!(masked.residues()[1].is_resolved());
        assert!(!masked.residues()[2].is_resolved());
        assert!(!masked.residues()[3].is_resolved());
        assert!(masked.residues()[4].is_resolved());
        assert_eq!(chain.resolved_count(), 6);
    }

    #[test]
    fn with_masked_ignores_out_of_range_positions() {
        let chain = Chain::new('C', (1..=3).map(residue).collect());
        let masked = chain.with_masked(2..10);
        assert_eq!(masked.len(), 3);
        assert_eq!(masked.resolved_count(), 2);
    }
}
