use crate::core::geometry::{VirtualCenterParams, backbone_virtual_center};
use crate::core::models::chain::Chain;
use nalgebra::Point3;
use tracing::trace;

/// Virtual center of every residue in chain order; `None` for residues
/// without a backbone.
///
/// A degenerate backbone (coincident or collinear atoms) has no defined frame
/// and is treated like an unresolved residue.
pub fn compute_virtual_centers(
    chain: &Chain,
    params: &VirtualCenterParams,
) -> Vec<Option<Point3<f64>>> {
    let centers: Vec<Option<Point3<f64>>> = chain
        .residues()
        .iter()
        .map(|residue| {
            residue
                .backbone()
                .map(|backbone| backbone_virtual_center(backbone, params))
                .filter(|center| center.iter().all(|v| v.is_finite()))
        })
        .collect();
    trace!(
        chain = %chain.id,
        defined = centers.iter().filter(|c| c.is_some()).count(),
        total = centers.len(),
        "Computed virtual centers"
    );
    centers
}
