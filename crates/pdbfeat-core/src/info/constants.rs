//! # Constants
//!
//! Residue-level lookup tables.
//!
//! - `aa3to1()` - three-letter to one-letter amino acid codes
//! - `is_water()` - solvent residue names
//! - `is_polymer_residue()` - amino acids, including HETATM modified residues
//! - `kyte_doolittle()` - hydropathy scale keyed by one-letter code
//!

#[rustfmt::skip]
pub fn aa3to1(aa: &str) -> char {
    match aa {
        "ALA" => 'A', "CYS" => 'C', "ASP" => 'D',
        "GLU" => 'E', "PHE" => 'F', "GLY" => 'G',
        "HIS" => 'H', "ILE" => 'I', "LYS" => 'K',
        "LEU" => 'L', "MET" => 'M', "ASN" => 'N',
        "PRO" => 'P', "GLN" => 'Q', "ARG" => 'R',
        "SER" => 'S', "THR" => 'T', "VAL" => 'V',
        "TRP" => 'W', "TYR" => 'Y', "MSE" => 'M',
        _     => 'X',
    }
}

pub fn is_water(res_name: &str) -> bool {
    matches!(res_name, "HOH" | "WAT" | "DOD" | "H2O" | "SOL")
}

/// Polymer residues are ATOM records other than solvent, plus HETATM records of
/// modified amino acids with a one-letter code (MSE). Ligands and ions are not.
pub fn is_polymer_residue(res_name: &str, is_hetero: bool) -> bool {
    !is_water(res_name) && (!is_hetero || aa3to1(res_name) != 'X')
}

/// Kyte & Doolittle (1982) hydropathy index. Unknown residues score 0.
#[rustfmt::skip]
pub fn kyte_doolittle(aa: char) -> f64 {
    match aa {
        'A' =>  1.8, 'R' => -4.5, 'N' => -3.5, 'D' => -3.5,
        'C' =>  2.5, 'Q' => -3.5, 'E' => -3.5, 'G' => -0.4,
        'H' => -3.2, 'I' =>  4.5, 'L' =>  3.8, 'K' => -3.9,
        'M' =>  1.9, 'F' =>  2.8, 'P' => -1.6, 'S' => -0.8,
        'T' => -0.7, 'W' => -0.9, 'Y' => -1.3, 'V' =>  4.2,
        _   =>  0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_codes() {
        assert_eq!(aa3to1("ALA"), 'A');
        assert_eq!(aa3to1("TRP"), 'W');
        assert_eq!(aa3to1("HOH"), 'X');
        assert!(is_water("HOH"));
        assert!(!is_water("HIS"));
    }

    #[test]
    fn test_polymer_residues() {
        assert!(is_polymer_residue("ALA", false));
        assert!(is_polymer_residue("MSE", true));
        assert!(!is_polymer_residue("CA", true));
        assert!(!is_polymer_residue("SO4", true));
        assert!(!is_polymer_residue("HOH", true));
        assert!(!is_polymer_residue("HOH", false));
    }

    #[test]
    fn test_hydropathy() {
        assert_eq!(kyte_doolittle('I'), 4.5);
        assert_eq!(kyte_doolittle('R'), -4.5);
        assert_eq!(kyte_doolittle('X'), 0.0);
    }
}
