use super::distance;
use crate::alignment::AlignedSequence;
use crate::errors::Result;
use crate::structure::Structure;
use serde::{Serialize, Serializer};

/// Square matrix indexed by alignment position. NaN marks PAD.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedMatrix {
    size: usize,
    values: Vec<f64>,
}

impl AlignedMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry at 1-based alignment positions; `None` outside the matrix or at a PAD.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row == 0 || col == 0 || row > self.size || col > self.size {
            return None;
        }
        let value = self.values[(row - 1) * self.size + (col - 1)];
        (!value.is_nan()).then_some(value)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.size.max(1))
    }
}

/// Serialized as a list of rows, PAD as `null`.
impl Serialize for AlignedMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows().map(|row| {
            row.iter()
                .map(|v| if v.is_nan() { None } else { Some(*v) })
                .collect::<Vec<Option<f64>>>()
        }))
    }
}

/// CA-CA distances between primary-chain residues placed at their alignment positions.
///
/// Gap positions and residues without a CA give PAD rows and columns.
pub fn aligned_distance_matrix(
    structure: &Structure,
    aligned: &AlignedSequence,
) -> Result<AlignedMatrix> {
    let residues = structure.primary_chain_residues();
    aligned.check_residue_count(residues.len())?;

    let alpha: Vec<Option<&[f64; 3]>> = aligned
        .residue_positions()
        .into_iter()
        .map(|slot| slot.and_then(|i| residues[i].alpha_carbon()))
        .collect();

    let size = aligned.len();
    let mut values = vec![f64::NAN; size * size];
    for (i, a) in alpha.iter().enumerate() {
        for (j, b) in alpha.iter().enumerate() {
            if let (Some(a), Some(b)) = (a, b) {
                values[i * size + j] = distance(a, b);
            }
        }
    }
    Ok(AlignedMatrix { size, values })
}
