use crate::errors::{FeatureError, Result};
use crate::structure::Structure;
use itertools::Itertools;
use log::debug;
use pdbtbx::{Format, ReadOptions, StrictnessLevel, PDB};
use std::borrow::Cow;
use std::io::BufReader;
use std::ops::Range;

const RECORD_WIDTH: usize = 80;
const ATOM_NAME: Range<usize> = 12..16;
const OCCUPANCY: Range<usize> = 54..60;
const B_FACTOR: Range<usize> = 60..66;
const ELEMENT: Range<usize> = 76..78;

impl From<&PDB> for Structure {
    // the PDB API requires us to iterate:
    // PDB --> Model --> Chain --> Residue --> Atom if we want data from all.
    // Only the first model is read; the atom table is collected in one go.
    fn from(pdb_data: &PDB) -> Self {
        let (coords, atom_names, res_ids, ins_codes, res_names, is_hetero, chain_ids): (
            Vec<[f64; 3]>,
            Vec<String>,
            Vec<i32>,
            Vec<Option<String>>,
            Vec<String>,
            Vec<bool>,
            Vec<String>,
        ) = pdb_data
            .models()
            .take(1)
            .flat_map(|model| model.chains())
            .flat_map(|chain| {
                let chain_id = chain.id().to_string();
                chain.residues().flat_map(move |residue| {
                    let (res_number, insertion_code) = residue.id();
                    let res_id = res_number as i32;
                    let ins_code = insertion_code.map(str::to_string);
                    let res_name = residue.name().unwrap_or_default().to_string();
                    let chain_id = chain_id.clone();
                    residue.atoms().map(move |atom| {
                        let (x, y, z) = atom.pos();
                        (
                            [x, y, z],
                            atom.name().to_string(),
                            res_id,
                            ins_code.clone(),
                            res_name.clone(),
                            atom.hetero(),
                            chain_id.clone(),
                        )
                    })
                })
            })
            .multiunzip();

        Structure::new(
            coords, atom_names, res_ids, ins_codes, res_names, is_hetero, chain_ids,
        )
    }
}

/// Parse PDB-format text into a [`Structure`].
///
/// Fails with [`FeatureError::Parse`] when the text holds no atom records. Multi-model
/// files contribute their first model only.
pub fn parse_pdb(raw: &str) -> Result<Structure> {
    if raw.trim().is_empty() {
        return Err(FeatureError::parse("structure text is empty"));
    }
    let normalised = normalise_atom_records(raw);
    let reader = BufReader::new(normalised.as_bytes());
    let (pdb, warnings) = ReadOptions::default()
        .set_format(Format::Pdb)
        .set_level(StrictnessLevel::Loose)
        .read_raw(reader)
        .map_err(|errors| FeatureError::parse(errors.iter().join("; ")))?;
    if !warnings.is_empty() {
        debug!("pdbtbx reported {} warnings while parsing", warnings.len());
    }

    let structure = Structure::from(&pdb);
    if structure.get_size() == 0 {
        return Err(FeatureError::parse("no ATOM/HETATM records found"));
    }
    Ok(structure)
}

/// Pad short ATOM/HETATM records to the full fixed width.
///
/// Many writers stop after the coordinates (54 columns) or after the B-factor (66
/// columns). Blank occupancy and B-factor fields become `1.00` and `0.00`; a blank
/// element is taken from the atom name.
fn normalise_atom_records(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let is_atom = line.starts_with("ATOM") || line.starts_with("HETATM");
            if !is_atom || !line.is_ascii() || line.len() >= RECORD_WIDTH {
                return Cow::Borrowed(line);
            }
            let mut record = format!("{:<width$}", line, width = RECORD_WIDTH);
            fill_blank(&mut record, OCCUPANCY, "  1.00");
            fill_blank(&mut record, B_FACTOR, "  0.00");
            if let Some(element) = element_from_name(&record) {
                fill_blank(&mut record, ELEMENT, &format!("{:>2}", element));
            }
            Cow::Owned(record)
        })
        .join("\n")
}

fn fill_blank(record: &mut String, columns: Range<usize>, value: &str) {
    if record[columns.clone()].trim().is_empty() {
        record.replace_range(columns, value);
    }
}

/// One-letter elements sit in column 14; a HETATM name of one or two letters
/// starting in column 13 is an ion (`ZN`, `MG`).
fn element_from_name(record: &str) -> Option<String> {
    let name = &record[ATOM_NAME];
    let trimmed = name.trim();
    if record.starts_with("HETATM")
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && trimmed.len() <= 2
        && trimmed.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Some(trimmed.to_string());
    }
    name.chars()
        .find(char::is_ascii_alphabetic)
        .map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use pdbfeat_test_data::{PdbBuilder, TestFile};

    #[test]
    fn test_pdb_from() {
        let structure = parse_pdb(TestFile::peptide_01().contents()).unwrap();
        // 8 chain A residues (GLY without CB), 3 chain B residues (SER without CA), 3 HETATM
        assert_eq!(structure.get_size(), 39 + 13 + 3);

        let hetero: Vec<&str> = (0..structure.get_size())
            .filter(|&i| structure.get_is_hetero(i))
            .map(|i| structure.get_res_name(i))
            .collect();
        assert_eq!(hetero, ["CA", "HOH", "HOH"]);

        let res_ids: Vec<i32> = (0..structure.get_size())
            .map(|i| structure.get_res_id(i))
            .unique()
            .collect();
        assert_eq!(res_ids, [1, 2, 3, 4, 6, 7, 8, 9, 101, 201, 202]);
    }

    #[test]
    fn test_first_model_only() {
        let structure = parse_pdb(TestFile::multimodel_01().contents()).unwrap();
        assert_eq!(structure.iter_residues_all().count(), 4);
        assert_eq!(structure.get_size(), 20);
        let first_ca = structure
            .iter_residues_all()
            .next()
            .and_then(|residue| residue.alpha_carbon().copied());
        // model 2 is shifted by 5 A along x
        assert_eq!(first_ca, Some([2.3, 0.0, 0.0]));
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let err = parse_pdb("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        let err = parse_pdb("   \n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_no_atom_records_is_parse_error() {
        let text = "HEADER    DE NOVO PROTEIN                         19-OCT-26   XXXX\nEND\n";
        let err = parse_pdb(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_builder_round_trip() {
        let text = PdbBuilder::ca_trace(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [6.0, 0.0, 0.0]]).build();
        let structure = parse_pdb(&text).unwrap();
        assert_eq!(structure.get_size(), 3);
        assert_eq!(structure.get_coord(1), &[3.0, 0.0, 0.0]);
        assert_eq!(structure.get_atom_name(2), "CA");
        assert_eq!(structure.get_chain_id(0), "A");
    }

    #[test]
    fn test_coordinate_only_records() {
        // 54 columns: nothing after z
        let text = "ATOM      1  CA  ALA A   1       0.000   0.000   0.000\n\
                    ATOM      2  CA  ALA A   2       3.800   0.000   0.000\n";
        let structure = parse_pdb(text).unwrap();
        assert_eq!(structure.get_size(), 2);
        assert_eq!(structure.get_coord(1), &[3.8, 0.0, 0.0]);
        assert_eq!(structure.get_res_name(0), "ALA");
    }

    #[test]
    fn test_records_ending_at_b_factor() {
        // 66 columns: occupancy and B-factor present, no element
        let text = "ATOM      1  N   GLY A   1      -1.200   0.400   0.000  1.00 11.20\n\
                    ATOM      2  CA  GLY A   1       0.000   0.000   0.000  1.00 10.50\n\
                    HETATM    3  O   HOH A 101       5.000   5.000   5.000  1.00 30.00\n";
        let structure = parse_pdb(text).unwrap();
        assert_eq!(structure.get_size(), 3);
        assert_eq!(structure.get_atom_name(1), "CA");
        assert!(structure.get_is_hetero(2));
        assert_eq!(structure.get_coord(2), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_normalise_fills_blank_fields() {
        let text = "HETATM    1 ZN    ZN A 301      10.000  10.000  10.000\n\
                    ATOM      2  CA  ALA A   1       0.000   0.000   0.000  0.50 20.00\n\
                    REMARK   1 SHORT LINES OTHER THAN ATOM RECORDS ARE KEPT";
        let normalised = normalise_atom_records(text);
        let lines: Vec<&str> = normalised.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), RECORD_WIDTH);
        assert_eq!(&lines[0][OCCUPANCY], "  1.00");
        assert_eq!(&lines[0][B_FACTOR], "  0.00");
        assert_eq!(&lines[0][ELEMENT], "ZN");
        assert_eq!(&lines[1][OCCUPANCY], "  0.50");
        assert_eq!(&lines[1][B_FACTOR], " 20.00");
        assert_eq!(&lines[1][ELEMENT], " C");
        assert_eq!(lines[2], "REMARK   1 SHORT LINES OTHER THAN ATOM RECORDS ARE KEPT");
    }
}
