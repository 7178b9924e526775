use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Non-finite coordinate for backbone atom '{atom}': ({x}, {y}, {z})")]
    NonFiniteCoordinate {
        atom: &'static str,
        x: f64,
        y: f64,
        z: f64,
    },
}

/// The three backbone atoms a residue needs in order to be encoded.
///
/// A `Backbone` can only be built from finite coordinates, so every value of
/// this type is usable geometry. Residues with missing or partial backbones
/// carry no `Backbone` at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backbone {
    n: Point3<f64>,
    ca: Point3<f64>,
    c: Point3<f64>,
}

impl Backbone {
    /// Builds a backbone from the N, CA and C positions.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonFiniteCoordinate`] if any component is NaN or
    /// infinite.
    pub fn new(n: Point3<f64>, ca: Point3<f64>, c: Point3<f64>) -> Result<Self, ModelError> {
        check_finite("N", &n)?;
        check_finite("CA", &ca)?;
        check_finite("C", &c)?;
        Ok(Self { n, ca, c })
    }

    pub fn n(&self) -> &Point3<f64> {
        &self.n
    }

    pub fn ca(&self) -> &Point3<f64> {
        &self.ca
    }

    pub fn c(&self) -> &Point3<f64> {
        &self.c
    }
}

fn check_finite(atom: &'static str, p: &Point3<f64>) -> Result<(), ModelError> {
    if p.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ModelError::NonFiniteCoordinate {
            atom,
            x: p.x,
            y: p.y,
            z: p.z,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub number: isize,                  // Residue sequence number from source file
    pub insertion_code: Option<char>,   // PDB insertion code, if any
    pub name: String,                   // Residue name (e.g., "ALA", "GLY")
    pub(crate) backbone: Option<Backbone>, // None when the residue is unresolved
}

impl Residue {
    pub fn resolved(number: isize, name: &str, backbone: Backbone) -> Self {
        Self {
            number,
            insertion_code: None,
            name: name.to_string(),
            backbone: Some(backbone),
        }
    }

    pub fn unresolved(number: isize, name: &str) -> Self {
        Self {
            number,
            insertion_code: None,
            name: name.to_string(),
            backbone: None,
        }
    }

    pub fn with_insertion_code(mut self, code: char) -> Self {
        self.insertion_code = Some(code);
        self
    }

    pub fn backbone(&self) -> Option<&Backbone> {
        self.backbone.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.backbone.is_some()
    }

    /// Returns a copy of this residue with its backbone removed.
    pub fn masked(&self) -> Self {
        Self {
            backbone: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal_backbone() -> Backbone {
        Backbone::new(
            Point3::new(-0.525, 1.363, 0.0),
            Point3::origin(),
            Point3::new(1.526, 0.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn backbone_rejects_nan_coordinates() {
        let result = Backbone::new(
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::origin(),
            Point3::new(1.5, 0.0, 0.0),
        );
        assert!(matches!(
            result,
            Err(ModelError::NonFiniteCoordinate { atom: "N", .. })
        ));
    }

    #[test]
    fn backbone_rejects_infinite_coordinates() {
        let result = Backbone::new(
            Point3::origin(),
            Point3::origin(),
            Point3::new(0.0, f64::INFINITY, 0.0),
        );
        assert!(matches!(
            result,
            Err(ModelError::NonFiniteCoordinate { atom: "C", .. })
        ));
    }

    #[test]
    fn resolved_residue_exposes_backbone() {
        let residue = Residue::resolved(12, "ALA", ideal_backbone());
        assert!(residue.is_resolved());
        assert_eq!(residue.number, 12);
        assert_eq!(residue.backbone().unwrap().ca(), &Point3::origin());
    }

    #[test]
    fn masked_residue_keeps_identity_but_drops_backbone() {
        let residue = Residue::resolved(3, "GLY", ideal_backbone()).with_insertion_code('A');
        let masked = residue.masked();
        assert!(!masked.is_resolved());
        assert_eq!(masked.number, 3);
        assert_eq!(masked.insertion_code, Some('A'));
        assert_eq!(masked.name, "GLY");
    }
}
