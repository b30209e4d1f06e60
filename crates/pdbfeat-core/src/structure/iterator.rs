use super::residue::ResidueAtoms;
use super::Structure;

/// Walks a [`Structure`] one residue at a time using precomputed residue starts.
pub struct ResidueIter<'a> {
    structure: &'a Structure,
    residue_starts: Vec<usize>,
    current_idx: usize,
}

impl<'a> ResidueIter<'a> {
    pub(crate) fn new(structure: &'a Structure, residue_starts: Vec<usize>) -> Self {
        ResidueIter {
            structure,
            residue_starts,
            current_idx: 0,
        }
    }
}

impl<'a> Iterator for ResidueIter<'a> {
    type Item = ResidueAtoms<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // residue_starts ends with a sentinel equal to the atom count
        if self.current_idx + 1 >= self.residue_starts.len() {
            return None;
        }
        let start_idx = self.residue_starts[self.current_idx];
        let end_idx = self.residue_starts[self.current_idx + 1];
        self.current_idx += 1;
        Some(ResidueAtoms::new(self.structure, start_idx, end_idx))
    }
}
