use super::distance;
use crate::errors::{FeatureError, Result};
use crate::info::constants::kyte_doolittle;
use crate::structure::{ResidueMetric, Structure};

/// Neighbourhood radius for hydrophobicity sums, in Å.
pub const DEFAULT_NEIGHBOUR_CUTOFF: f64 = 8.0;

/// Kyte-Doolittle hydropathy of each standard residue summed with that of every other
/// residue of the same chain whose CA lies strictly within `cutoff` of its own CA.
/// Residues without a CA keep only their own value.
///
/// Residues are scored by their one-letter code, so `LYS` is `K` and `MSE` is `M`;
/// the first letter of the residue name is never used.
pub fn residue_hydrophobicity(structure: &Structure, cutoff: f64) -> Vec<ResidueMetric> {
    let mut out = Vec::new();
    for chain in structure.chains() {
        let residues: Vec<_> = chain.standard().collect();
        for residue in &residues {
            let own = kyte_doolittle(residue.one_letter());
            let neighbours: f64 = match residue.alpha_carbon() {
                Some(ca) => residues
                    .iter()
                    .filter(|other| other.start_idx != residue.start_idx)
                    .filter_map(|other| other.alpha_carbon().map(|other_ca| (other, other_ca)))
                    .filter(|(_, other_ca)| distance(ca, other_ca) < cutoff)
                    .map(|(other, _)| kyte_doolittle(other.one_letter()))
                    .sum(),
                None => 0.0,
            };
            out.push(ResidueMetric {
                key: residue.key(),
                value: own + neighbours,
            });
        }
    }
    out
}

/// Mean of [`residue_hydrophobicity`] over all standard residues.
pub fn average_hydrophobicity(structure: &Structure, cutoff: f64) -> Result<f64> {
    let values = residue_hydrophobicity(structure, cutoff);
    if values.is_empty() {
        return Err(FeatureError::geometry(
            "no standard residues for hydrophobicity",
        ));
    }
    Ok(values.iter().map(|m| m.value).sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversions::parse_pdb;
    use crate::errors::ErrorKind;
    use approx::assert_relative_eq;
    use pdbfeat_test_data::PdbBuilder;

    #[test]
    fn test_neighbour_sums() {
        // ILE (4.5) - 5 Å - ARG (-4.5) - 5 Å - VAL (4.2)
        let text = PdbBuilder::new()
            .atom('A', 1, "ILE", "CA", [0.0, 0.0, 0.0])
            .atom('A', 2, "ARG", "CA", [5.0, 0.0, 0.0])
            .atom('A', 3, "VAL", "CA", [10.0, 0.0, 0.0])
            .build();
        let structure = parse_pdb(&text).unwrap();
        let values = residue_hydrophobicity(&structure, 8.0);
        assert_relative_eq!(values[0].value, 4.5 - 4.5);
        assert_relative_eq!(values[1].value, -4.5 + 4.5 + 4.2);
        assert_relative_eq!(values[2].value, 4.2 - 4.5);

        // the cutoff is strict
        let isolated = residue_hydrophobicity(&structure, 5.0);
        assert_relative_eq!(isolated[1].value, -4.5);

        assert_relative_eq!(
            average_hydrophobicity(&structure, 8.0).unwrap(),
            (0.0 + 4.2 + -0.3) / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_alpha_carbon_keeps_own_value() {
        let text = PdbBuilder::new()
            .atom('A', 1, "LEU", "CA", [0.0, 0.0, 0.0])
            .atom('A', 2, "LYS", "N", [1.0, 0.0, 0.0])
            .build();
        let values = residue_hydrophobicity(&parse_pdb(&text).unwrap(), 8.0);
        assert_relative_eq!(values[0].value, 3.8);
        assert_relative_eq!(values[1].value, -3.9);
    }

    #[test]
    fn test_residues_scored_by_one_letter_code() {
        // isolated residues whose name does not start with their code
        let text = PdbBuilder::new()
            .atom('A', 1, "LYS", "CA", [0.0, 0.0, 0.0])
            .hetatm('A', 2, "MSE", "CA", [20.0, 0.0, 0.0])
            .atom('A', 3, "TRP", "CA", [40.0, 0.0, 0.0])
            .atom('A', 4, "GLN", "CA", [60.0, 0.0, 0.0])
            .build();
        let values = residue_hydrophobicity(&parse_pdb(&text).unwrap(), 8.0);
        let scores: Vec<f64> = values.iter().map(|metric| metric.value).collect();
        assert_eq!(scores, [-3.9, 1.9, -0.9, -3.5]);
    }

    #[test]
    fn test_no_standard_residues() {
        let text = PdbBuilder::new()
            .hetatm('A', 1, "HOH", "O", [0.0, 0.0, 0.0])
            .build();
        let err = average_hydrophobicity(&parse_pdb(&text).unwrap(), 8.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Geometry);
    }
}
