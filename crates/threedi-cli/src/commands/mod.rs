pub mod data;
pub mod encode;
pub mod partners;

use crate::error::{CliError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use threedi::core::io::{pdb::PdbFile, traits::StructureFile};
use threedi::core::models::structure::Structure;
use tracing::{info, warn};

/// Reads every input file, keeping only `chain` when it is given.
///
/// A chain filter that matches nothing in any input is an argument error.
pub(crate) fn load_structures(inputs: &[PathBuf], chain: Option<char>) -> Result<Vec<Structure>> {
    let mut structures = Vec::with_capacity(inputs.len());
    for path in inputs {
        info!("Loading input structure from {:?}", path);
        let mut structure = PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;

        if let Some(id) = chain {
            structure.chains.retain(|c| c.id == id);
            if structure.chains.is_empty() {
                warn!("Structure '{}' has no chain '{}'.", structure.id, id);
            }
        }
        structures.push(structure);
    }

    if let Some(id) = chain {
        if structures.iter().all(|s| s.chains.is_empty()) {
            return Err(CliError::Argument(format!(
                "Chain '{}' was not found in any input structure.",
                id
            )));
        }
    }
    Ok(structures)
}

pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
