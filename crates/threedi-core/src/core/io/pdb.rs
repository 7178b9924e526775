use crate::core::io::traits::StructureFile;
use crate::core::models::chain::Chain;
use crate::core::models::residue::{Backbone, ModelError, Residue};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Invalid backbone for residue {residue} in chain '{chain}': {source}")]
    InvalidBackbone {
        chain: char,
        residue: isize,
        source: ModelError,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: format!("{}-{}", start + 1, end),
                value: value.into(),
            },
        })
}

/// One backbone atom candidate; later alternate locations replace it only
/// with a strictly higher occupancy.
#[derive(Debug, Clone, Copy)]
struct AtomSite {
    position: Point3<f64>,
    occupancy: f64,
}

#[derive(Debug)]
struct ResidueRecord {
    number: isize,
    insertion_code: Option<char>,
    name: String,
    n: Option<AtomSite>,
    ca: Option<AtomSite>,
    c: Option<AtomSite>,
}

impl ResidueRecord {
    fn offer(&mut self, atom_name: &str, site: AtomSite) {
        let slot = match atom_name {
            "N" => &mut self.n,
            "CA" => &mut self.ca,
            "C" => &mut self.c,
            _ => return,
        };
        if slot.is_none_or(|existing| existing.occupancy < site.occupancy) {
            *slot = Some(site);
        }
    }

    fn into_residue(self, chain: char) -> Result<Option<Residue>, PdbError> {
        let Some(ca) = self.ca else {
            return Ok(None);
        };
        let residue = match (self.n, self.c) {
            (Some(n), Some(c)) => {
                let backbone = Backbone::new(n.position, ca.position, c.position).map_err(
                    |source| PdbError::InvalidBackbone {
                        chain,
                        residue: self.number,
                        source,
                    },
                )?;
                Residue::resolved(self.number, &self.name, backbone)
            }
            _ => Residue::unresolved(self.number, &self.name),
        };
        Ok(Some(match self.insertion_code {
            Some(code) => residue.with_insertion_code(code),
            None => residue,
        }))
    }
}

#[derive(Debug, Default)]
struct ChainRecord {
    residues: Vec<ResidueRecord>,
    index: HashMap<(bool, isize, Option<char>), usize>,
}

/// Reader for the fixed-column PDB format.
///
/// Only ATOM and HETATM records of the first model are read. Residues without
/// a CA atom are skipped, and a residue lacking N or C is kept as unresolved.
/// Records with an empty chain column form their own chain,
/// [`PdbFile::BLANK_CHAIN_ID`].
pub struct PdbFile;

impl PdbFile {
    pub const BLANK_CHAIN_ID: char = ' ';
}

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut chain_order: Vec<char> = Vec::new();
        let mut chains: HashMap<char, ChainRecord> = HashMap::new();
        let mut atom_count = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {}
                "ENDMDL" => break,
                _ => continue,
            }

            if line.len() < 54 {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            let atom_name = slice_and_trim(&line, 12, 16);
            if atom_name.is_empty() {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::MissingRequiredField {
                        columns: "13-16".into(),
                    },
                });
            }
            let res_name = slice_and_trim(&line, 17, 20);
            let chain_id = slice_and_trim(&line, 21, 22)
                .chars()
                .next()
                .unwrap_or(Self::BLANK_CHAIN_ID);
            let res_seq_str = slice_and_trim(&line, 22, 26);
            let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidInt {
                    columns: "23-26".into(),
                    value: res_seq_str.into(),
                },
            })?;
            let insertion_code = slice_and_trim(&line, 26, 27).chars().next();

            let x = parse_coordinate(&line, line_num, 30, 38)?;
            let y = parse_coordinate(&line, line_num, 38, 46)?;
            let z = parse_coordinate(&line, line_num, 46, 54)?;

            let occupancy_str = slice_and_trim(&line, 54, 60);
            let occupancy = if occupancy_str.is_empty() {
                1.0
            } else {
                occupancy_str.parse::<f64>().map_err(|_| PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::InvalidFloat {
                        columns: "55-60".into(),
                        value: occupancy_str.into(),
                    },
                })?
            };

            atom_count += 1;
            let chain = chains.entry(chain_id).or_insert_with(|| {
                chain_order.push(chain_id);
                ChainRecord::default()
            });
            let key = (record_type == "HETATM", res_seq, insertion_code);
            let residue_index = match chain.index.get(&key) {
                Some(&index) => index,
                None => {
                    chain.residues.push(ResidueRecord {
                        number: res_seq,
                        insertion_code,
                        name: res_name.to_string(),
                        n: None,
                        ca: None,
                        c: None,
                    });
                    chain.index.insert(key, chain.residues.len() - 1);
                    chain.residues.len() - 1
                }
            };
            chain.residues[residue_index].offer(
                atom_name,
                AtomSite {
                    position: Point3::new(x, y, z),
                    occupancy,
                },
            );
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM".to_string()));
        }

        let mut result = Vec::with_capacity(chain_order.len());
        for chain_id in chain_order {
            let Some(record) = chains.remove(&chain_id) else {
                continue;
            };
            let mut residues = Vec::with_capacity(record.residues.len());
            for residue in record.residues {
                if let Some(residue) = residue.into_residue(chain_id)? {
                    residues.push(residue);
                }
            }
            if !residues.is_empty() {
                result.push(Chain::new(chain_id, residues));
            }
        }

        debug!(
            atoms = atom_count,
            chains = result.len(),
            "Parsed PDB structure"
        );
        Ok(Structure::new("", result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[allow(clippy::too_many_arguments)]
    fn atom_line(
        record: &str,
        name: &str,
        alt: char,
        res_name: &str,
        chain: char,
        res_seq: isize,
        icode: char,
        pos: (f64, f64, f64),
        occupancy: f64,
    ) -> String {
        format!(
            "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}",
            record, 1, name, alt, res_name, chain, res_seq, icode, pos.0, pos.1, pos.2, occupancy, 20.0
        )
    }

    fn backbone_lines(chain: char, res_seq: isize, x: f64) -> Vec<String> {
        vec![
            atom_line("ATOM", " N", ' ', "ALA", chain, res_seq, ' ', (x - 0.5, 1.3, 0.0), 1.0),
            atom_line("ATOM", " CA", ' ', "ALA", chain, res_seq, ' ', (x, 0.0, 0.0), 1.0),
            atom_line("ATOM", " C", ' ', "ALA", chain, res_seq, ' ', (x + 1.5, 0.0, 0.0), 1.0),
            atom_line("ATOM", " O", ' ', "ALA", chain, res_seq, ' ', (x + 2.0, 1.0, 0.0), 1.0),
        ]
    }

    fn read(lines: &[String]) -> Result<Structure, PdbError> {
        let content = lines.join("\n");
        let mut reader = BufReader::new(Cursor::new(content));
        PdbFile::read_from(&mut reader)
    }

    #[test]
    fn reads_chains_in_order_of_appearance() {
        let mut lines = Vec::new();
        lines.extend(backbone_lines('B', 1, 0.0));
        lines.extend(backbone_lines('B', 2, 3.8));
        lines.push("TER".to_string());
        lines.extend(backbone_lines('A', 10, 20.0));
        let structure = read(&lines).unwrap();

        assert_eq!(structure.chain_ids().collect::<Vec<_>>(), vec!['B', 'A']);
        assert_eq!(structure.chain('B').unwrap().len(), 2);
        let a = structure.chain('A').unwrap();
        assert_eq!(a.residues()[0].number, 10);
        assert!(a.residues()[0].is_resolved());
        assert_eq!(a.residues()[0].backbone().unwrap().ca(), &Point3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn residue_without_n_or_c_is_unresolved() {
        let mut lines = backbone_lines('A', 1, 0.0);
        lines.push(atom_line("ATOM", " CA", ' ', "GLY", 'A', 2, ' ', (3.8, 0.0, 0.0), 1.0));
        lines.push(atom_line("ATOM", " N", ' ', "GLY", 'A', 2, ' ', (3.3, 1.3, 0.0), 1.0));
        let structure = read(&lines).unwrap();
        let chain = structure.chain('A').unwrap();
        assert_eq!(chain.len(), 2);
        assert!(chain.residues()[0].is_resolved());
        assert!(!chain.residues()[1].is_resolved());
        assert_eq!(chain.residues()[1].name, "GLY");
    }

    #[test]
    fn residue_without_ca_is_skipped() {
        let mut lines = backbone_lines('A', 1, 0.0);
        lines.push(atom_line("HETATM", " O", ' ', "HOH", 'A', 101, ' ', (9.0, 9.0, 9.0), 1.0));
        let structure = read(&lines).unwrap();
        assert_eq!(structure.chain('A').unwrap().len(), 1);
    }

    #[test]
    fn insertion_codes_form_separate_residues() {
        let mut lines = backbone_lines('A', 52, 0.0);
        lines.push(atom_line("ATOM", " N", ' ', "SER", 'A', 52, 'A', (3.3, 1.3, 0.0), 1.0));
        lines.push(atom_line("ATOM", " CA", ' ', "SER", 'A', 52, 'A', (3.8, 0.0, 0.0), 1.0));
        lines.push(atom_line("ATOM", " C", ' ', "SER", 'A', 52, 'A', (5.3, 0.0, 0.0), 1.0));
        let structure = read(&lines).unwrap();
        let chain = structure.chain('A').unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.residues()[0].insertion_code, None);
        assert_eq!(chain.residues()[1].insertion_code, Some('A'));
        assert_eq!(chain.residues()[1].number, 52);
    }

    #[test]
    fn alternate_location_with_highest_occupancy_wins() {
        let lines = vec![
            atom_line("ATOM", " N", ' ', "LEU", 'A', 1, ' ', (-0.5, 1.3, 0.0), 1.0),
            atom_line("ATOM", " CA", 'A', "LEU", 'A', 1, ' ', (0.0, 0.0, 0.0), 0.40),
            atom_line("ATOM", " CA", 'B', "LEU", 'A', 1, ' ', (0.2, 0.1, 0.0), 0.60),
            atom_line("ATOM", " CA", 'C', "LEU", 'A', 1, ' ', (0.4, 0.2, 0.0), 0.60),
            atom_line("ATOM", " C", ' ', "LEU", 'A', 1, ' ', (1.5, 0.0, 0.0), 1.0),
        ];
        let structure = read(&lines).unwrap();
        let ca = *structure.chain('A').unwrap().residues()[0]
            .backbone()
            .unwrap()
            .ca();
        assert!((ca - Point3::new(0.2, 0.1, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn only_first_model_is_read() {
        let mut lines = vec!["MODEL        1".to_string()];
        lines.extend(backbone_lines('A', 1, 0.0));
        lines.push("ENDMDL".to_string());
        lines.push("MODEL        2".to_string());
        lines.extend(backbone_lines('A', 1, 50.0));
        lines.extend(backbone_lines('A', 2, 53.8));
        lines.push("ENDMDL".to_string());
        let structure = read(&lines).unwrap();
        let chain = structure.chain('A').unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.residues()[0].backbone().unwrap().ca().x, 0.0);
    }

    #[test]
    fn missing_occupancy_defaults_to_full() {
        let mut line = atom_line("ATOM", " CA", ' ', "ALA", 'A', 1, ' ', (1.0, 2.0, 3.0), 1.0);
        line.truncate(54);
        let structure = read(&[line]).unwrap();
        assert_eq!(structure.chain('A').unwrap().len(), 1);
    }

    #[test]
    fn invalid_residue_number_is_a_parse_error() {
        let mut line = atom_line("ATOM", " CA", ' ', "ALA", 'A', 1, ' ', (1.0, 2.0, 3.0), 1.0);
        line.replace_range(22..26, "  x1");
        let result = read(&[line]);
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::InvalidInt { .. }
            })
        ));
    }

    #[test]
    fn non_finite_coordinate_is_a_parse_error() {
        let mut line = atom_line("ATOM", " CA", ' ', "ALA", 'A', 1, ' ', (1.0, 2.0, 3.0), 1.0);
        line.replace_range(30..38, "     NaN");
        let result = read(&[line]);
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { .. },
                ..
            })
        ));
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let result = read(&["ATOM      1  CA  ALA A   1       1.000".to_string()]);
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            })
        ));
    }

    #[test]
    fn blank_chain_id_is_kept_apart_from_chain_a() {
        let mut lines = backbone_lines('A', 1, 0.0);
        lines.extend(backbone_lines(' ', 1, 10.0));
        lines.extend(backbone_lines(' ', 2, 13.8));
        let structure = read(&lines).unwrap();

        assert_eq!(
            structure.chain_ids().collect::<Vec<_>>(),
            vec!['A', PdbFile::BLANK_CHAIN_ID]
        );
        assert_eq!(structure.chain('A').unwrap().len(), 1);
        let blank = structure.chain(PdbFile::BLANK_CHAIN_ID).unwrap();
        assert_eq!(blank.len(), 2);
        assert_eq!(blank.residues()[0].backbone().unwrap().ca(), &Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn file_without_atoms_is_missing_record() {
        let result = read(&["HEADER    EMPTY".to_string(), "END".to_string()]);
        assert!(matches!(result, Err(PdbError::MissingRecord(_))));
    }

    #[test]
    fn read_from_path_uses_file_stem_as_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1abc.pdb");
        std::fs::write(&path, backbone_lines('A', 1, 0.0).join("\n")).unwrap();
        let structure = PdbFile::read_from_path(&path).unwrap();
        assert_eq!(structure.id, "1abc");
    }

    #[test]
    fn read_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("absent.pdb"));
        assert!(matches!(result, Err(PdbError::Io(_))));
    }
}
