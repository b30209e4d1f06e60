//! pdbfeat-test-data
//!
//! Test fixtures embedded in the crate for use in tests across the workspace.
//!
//! Structure and alignment files are represented as `TestFile` objects which expose
//! the raw text. Small hand-placed structures can be written with [`PdbBuilder`].
//!
//! ```
//! use pdbfeat_test_data::TestFile;
//! let pdb_text = TestFile::peptide_01().contents();
//! assert!(pdb_text.starts_with("HEADER"));
//! ```
mod synthetic;

pub use synthetic::PdbBuilder;

#[derive(Debug)]
/// Test File
pub struct TestFile {
    contents: &'static str,
}

impl TestFile {
    /// Synthetic helical peptide.
    ///
    /// Chain A: 8 residues numbered 1-4 and 6-9 (`MKTAYIGK`), followed by a calcium
    /// ion and two waters as HETATM records. Chain B: `GLY`, `SER` (no CA), `TRP`.
    pub fn peptide_01() -> Self {
        Self {
            contents: include_str!("../data/structures/peptide_01.pdb"),
        }
    }
    /// Two models of chain A. Model 1 has 4 residues (`AELK`), model 2 has 5.
    pub fn multimodel_01() -> Self {
        Self {
            contents: include_str!("../data/structures/multimodel_01.pdb"),
        }
    }
    /// Designed helical hairpin laid out the way deposited entries are.
    ///
    /// Chain A: 52 residues numbered 3-53 with an insertion at 30A
    /// (`SPEELLKKAEELASKAIELAKKGDPNGSPEVIKLAEEMLKLAEEALKRGDKG`). Residue 39 is a
    /// selenomethionine written as `HETATM MSE`; SER 16 has two side-chain
    /// conformers (altlocs A/B). A sulfate (101) and waters follow the chains.
    /// Chain B: 10 residues (`GSHMAELLKR`) whose records stop after the B-factor
    /// (66 columns). Waters carry coordinates only (54 columns).
    pub fn designed_01() -> Self {
        Self {
            contents: include_str!("../data/structures/designed_01.pdb"),
        }
    }
    /// Aligned FASTA (width 60) with `designed_01` chain A and a longer ortholog.
    pub fn designed_alignment_01() -> Self {
        Self {
            contents: include_str!("../data/alignments/designed_01.fasta"),
        }
    }
    /// Aligned FASTA (width 11) covering `peptide_01` chain A and `multimodel_01`.
    pub fn alignment_01() -> Self {
        Self {
            contents: include_str!("../data/alignments/peptides_01.fasta"),
        }
    }

    pub fn contents(&self) -> &'static str {
        self.contents
    }
}
