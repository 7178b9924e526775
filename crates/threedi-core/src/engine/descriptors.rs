use super::partners::Partner;
use crate::core::models::state::{DESCRIPTOR_LEN, Descriptor};
use nalgebra::{Point3, Vector3};

/// Largest sequence separation that feature 8 distinguishes.
const MAX_SEPARATION: f64 = 4.0;

#[inline]
fn unit(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    (to - from).normalize()
}

/// Builds the descriptor of residue `i`.
///
/// Returns `None` unless `i` has a partner `j` and the residues `i-1`, `i`,
/// `i+1`, `j-1`, `j` and `j+1` all lie inside the chain and have virtual
/// centers. A descriptor that comes out non-finite (coincident centers) is
/// also `None`.
pub fn compute_descriptor(
    i: usize,
    centers: &[Option<Point3<f64>>],
    partners: &[Partner],
) -> Option<Descriptor> {
    let j = partners.get(i)?.index()?;
    let center = |k: usize| centers.get(k).copied().flatten();
    let xi_prev = center(i.checked_sub(1)?)?;
    let xi = center(i)?;
    let xi_next = center(i + 1)?;
    let xj_prev = center(j.checked_sub(1)?)?;
    let xj = center(j)?;
    let xj_next = center(j + 1)?;

    let u1 = unit(&xi_prev, &xi);
    let u2 = unit(&xi, &xi_next);
    let u3 = unit(&xj_prev, &xj);
    let u4 = unit(&xj, &xj_next);
    let u5 = unit(&xi, &xj);

    let separation = j as f64 - i as f64;

    let features: Descriptor = [
        u1.dot(&u2),
        u3.dot(&u4),
        u1.dot(&u5),
        u3.dot(&u5),
        u1.dot(&u4),
        u2.dot(&u3),
        u1.dot(&u3),
        (xi - xj).norm(),
        separation.clamp(-MAX_SEPARATION, MAX_SEPARATION),
        separation.signum() * (separation.abs() + 1.0).ln(),
    ];
    debug_assert_eq!(features.len(), DESCRIPTOR_LEN);

    features.iter().all(|f| f.is_finite()).then_some(features)
}

/// Descriptors for every residue in chain order.
pub fn compute_descriptors(
    centers: &[Option<Point3<f64>>],
    partners: &[Partner],
) -> Vec<Option<Descriptor>> {
    (0..centers.len())
        .map(|i| compute_descriptor(i, centers, partners))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    /// Six points of a planar zig-zag with residue 2 partnered to residue 5.
    fn fixture() -> (Vec<Option<Point3<f64>>>, Vec<Partner>) {
        let centers = vec![
            Some(Point3::new(0.0, 0.0, 0.0)),
            Some(Point3::new(1.0, 0.0, 0.0)),
            Some(Point3::new(2.0, 0.0, 0.0)),
            Some(Point3::new(2.0, 1.0, 0.0)),
            Some(Point3::new(2.0, 2.0, 0.0)),
            Some(Point3::new(2.0, 3.0, 0.0)),
            Some(Point3::new(3.0, 3.0, 0.0)),
            Some(Point3::new(4.0, 3.0, 0.0)),
        ];
        let mut partners = vec![Partner::None; centers.len()];
        partners[2] = Partner::Residue(5);
        (centers, partners)
    }

    #[test]
    fn features_follow_the_frozen_formula() {
        let (centers, partners) = fixture();
        let d = compute_descriptor(2, &centers, &partners).unwrap();

        // u1 = +x, u2 = +y, u3 = +y, u4 = +x, u5 = unit(0, 3, 0) = +y
        let expected = [
            0.0,
            0.0,
            0.0,
            1.0,
            1.0,
            1.0,
            0.0,
            3.0,
            3.0,
            (4.0f64).ln(),
        ];
        for (k, (got, want)) in d.iter().zip(expected).enumerate() {
            assert!((got - want).abs() < EPS, "feature {}: {} != {}", k, got, want);
        }
    }

    #[test]
    fn separation_features_are_signed_and_clamped() {
        let (centers, mut partners) = fixture();
        partners[5] = Partner::Residue(1);
        let d = compute_descriptor(5, &centers, &partners).unwrap();
        assert_eq!(d[8], -4.0);
        assert!((d[9] + (5.0f64).ln()).abs() < EPS);
    }

    #[test]
    fn residue_without_partner_has_no_descriptor() {
        let (centers, partners) = fixture();
        assert_eq!(compute_descriptor(3, &centers, &partners), None);
    }

    #[test]
    fn missing_neighbour_of_residue_or_partner_voids_descriptor() {
        for masked in [1, 2, 3, 4, 5, 6] {
            let (mut centers, partners) = fixture();
            centers[masked] = None;
            assert_eq!(
                compute_descriptor(2, &centers, &partners),
                None,
                "masking {} should void the descriptor",
                masked
            );
        }
    }

    #[test]
    fn unrelated_gap_keeps_descriptor() {
        let (mut centers, partners) = fixture();
        centers[0] = None;
        centers[7] = None;
        assert!(compute_descriptor(2, &centers, &partners).is_some());
    }

    #[test]
    fn partner_at_chain_edge_is_out_of_bounds() {
        let (centers, mut partners) = fixture();
        partners[2] = Partner::Residue(7);
        assert_eq!(compute_descriptor(2, &centers, &partners), None);
        partners[3] = Partner::Residue(0);
        assert_eq!(compute_descriptor(3, &centers, &partners), None);
    }

    #[test]
    fn coincident_centers_give_no_descriptor() {
        let (mut centers, partners) = fixture();
        centers[3] = centers[2];
        assert_eq!(compute_descriptor(2, &centers, &partners), None);
    }

    #[test]
    fn compute_descriptors_covers_every_residue() {
        let (centers, partners) = fixture();
        let all = compute_descriptors(&centers, &partners);
        assert_eq!(all.len(), centers.len());
        assert_eq!(all.iter().filter(|d| d.is_some()).count(), 1);
        assert!(all[2].is_some());
    }
}
