use crate::core::models::residue::Backbone;
use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Ideal CA-CB bond length in Angstroms.
pub const CA_CB_BOND_LENGTH: f64 = 1.5336;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualCenterParams {
    /// Rotation of the CA->CB vector within the CB-CA-N plane, in degrees.
    pub alpha_degrees: f64,
    /// Dihedral rotation around the CA->N axis, in degrees.
    pub beta_degrees: f64,
    /// Scale applied to the rotated CA->CB vector.
    pub distance: f64,
}

impl VirtualCenterParams {
    /// Parameters the reference 3Di codebook was trained with.
    pub const REFERENCE: Self = Self {
        alpha_degrees: 270.0,
        beta_degrees: 0.0,
        distance: 2.0,
    };
}

impl Default for VirtualCenterParams {
    fn default() -> Self {
        Self::REFERENCE
    }
}

pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_degrees.to_radians())
}

/// Places an ideal CB from the backbone, assuming a tetrahedral CA.
pub fn approximate_cb_position(
    n_pos: &Point3<f64>,
    ca_pos: &Point3<f64>,
    c_pos: &Point3<f64>,
) -> Point3<f64> {
    let v1 = (c_pos - ca_pos).normalize();
    let v2 = (n_pos - ca_pos).normalize();

    let b1 = v2 + v1 * (1.0 / 3.0);
    let b2 = v1.cross(&b1);

    let u1 = b1.normalize();
    let u2 = b2.normalize();

    let v4 = v1 * (-1.0 / 3.0)
        + (u1 * -0.5 - u2 * (3.0f64.sqrt() / 2.0)) * (8.0f64.sqrt() / 3.0);

    ca_pos + v4 * CA_CB_BOND_LENGTH
}

/// Computes the virtual center of a residue from its CA, CB and N positions.
pub fn calculate_virtual_center(
    ca_pos: &Point3<f64>,
    cb_pos: &Point3<f64>,
    n_pos: &Point3<f64>,
    params: &VirtualCenterParams,
) -> Point3<f64> {
    let ca_cb = cb_pos - ca_pos;
    let ca_n = n_pos - ca_pos;

    let in_plane = rotation_from_axis_angle(&ca_cb.cross(&ca_n), params.alpha_degrees);
    let dihedral = rotation_from_axis_angle(&ca_n, params.beta_degrees);
    let v = dihedral * (in_plane * ca_cb);

    ca_pos + v * params.distance
}

/// Virtual center of a resolved residue, using an idealized CB.
pub fn backbone_virtual_center(backbone: &Backbone, params: &VirtualCenterParams) -> Point3<f64> {
    let cb = approximate_cb_position(backbone.n(), backbone.ca(), backbone.c());
    calculate_virtual_center(backbone.ca(), &cb, backbone.n(), params)
}
