//! Map per-residue values from structure coordinates onto alignment coordinates.
//!
//! An aligned sequence of length L assigns every alignment position (1..L) either a
//! residue or a gap. Values follow the residues; gaps carry an explicit
//! [`AlignedValue::Pad`].
mod fasta;

pub use fasta::{parse_aligned_fasta, Alignment};

use crate::errors::{FeatureError, Result};
use crate::structure::ResidueMetric;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const GAP: char = '-';

/// A gapped sequence from a multiple sequence alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    chars: Vec<char>,
}

impl AlignedSequence {
    /// Letters and `-` only; whitespace is dropped. Any other character is an input error.
    pub fn new(text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(bad) = chars
            .iter()
            .find(|c| !(c.is_ascii_alphabetic() || **c == GAP))
        {
            return Err(FeatureError::input(format!(
                "invalid character '{}' in aligned sequence",
                bad
            )));
        }
        Ok(AlignedSequence { chars })
    }

    /// Alignment length L.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of non-gap characters.
    pub fn residue_count(&self) -> usize {
        self.chars.iter().filter(|&&c| c != GAP).count()
    }

    pub fn ungapped(&self) -> String {
        self.chars.iter().filter(|&&c| c != GAP).collect()
    }

    /// For each alignment position, the 0-based index of the residue placed there,
    /// or `None` for a gap.
    pub fn residue_positions(&self) -> Vec<Option<usize>> {
        let mut structural_position = 0;
        self.chars
            .iter()
            .map(|&c| {
                if c == GAP {
                    None
                } else {
                    structural_position += 1;
                    Some(structural_position - 1)
                }
            })
            .collect()
    }

    /// Fails with an alignment mismatch unless the non-gap count equals `residues`.
    pub fn check_residue_count(&self, residues: usize) -> Result<()> {
        let aligned = self.residue_count();
        if aligned != residues {
            return Err(FeatureError::AlignmentMismatch {
                aligned,
                structure: residues,
            });
        }
        Ok(())
    }
}

impl FromStr for AlignedSequence {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        AlignedSequence::new(s)
    }
}

impl fmt::Display for AlignedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

/// A value at one alignment position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignedValue {
    Value(f64),
    Pad,
}

impl AlignedValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            AlignedValue::Value(v) => Some(*v),
            AlignedValue::Pad => None,
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, AlignedValue::Pad)
    }
}

impl Serialize for AlignedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AlignedValue::Value(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

/// A per-residue feature in alignment coordinates. Serializes as a map keyed by the
/// 1-based alignment position.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFeature {
    values: Vec<AlignedValue>,
}

impl AlignedFeature {
    /// Value at 1-based alignment position `position`.
    pub fn get(&self, position: usize) -> Option<AlignedValue> {
        position
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(alignment_position, value)` pairs, positions starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AlignedValue)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (i + 1, *v))
    }

    pub fn non_pad_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_pad()).count()
    }
}

impl Serialize for AlignedFeature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (position, value) in self.iter() {
            map.serialize_entry(&position.to_string(), &value)?;
        }
        map.end()
    }
}

/// Place per-residue values (in structural order) at their alignment positions.
///
/// Walks the aligned sequence once: every character advances the alignment position,
/// non-gap characters also advance the structural position and take that residue's
/// value. The number of non-gap characters must equal `values.len()`; nothing is
/// truncated or padded to make them agree.
pub fn align(values: &[ResidueMetric], aligned: &AlignedSequence) -> Result<AlignedFeature> {
    aligned.check_residue_count(values.len())?;
    let mapped = aligned
        .residue_positions()
        .into_iter()
        .map(|slot| match slot {
            Some(structural_position) => AlignedValue::Value(values[structural_position].value),
            None => AlignedValue::Pad,
        })
        .collect();
    Ok(AlignedFeature { values: mapped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::structure::ResidueKey;

    fn metrics(values: &[f64]) -> Vec<ResidueMetric> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| ResidueMetric {
                key: ResidueKey::new("A", i as i32 + 1),
                value,
            })
            .collect()
    }

    #[test]
    fn test_align_with_gap() {
        let aligned: AlignedSequence = "A-AB".parse().unwrap();
        let feature = align(&metrics(&[0.5, 1.5, 2.5]), &aligned).unwrap();
        assert_eq!(feature.len(), 4);
        assert_eq!(feature.get(1), Some(AlignedValue::Value(0.5)));
        assert_eq!(feature.get(2), Some(AlignedValue::Pad));
        assert_eq!(feature.get(3), Some(AlignedValue::Value(1.5)));
        assert_eq!(feature.get(4), Some(AlignedValue::Value(2.5)));
        assert_eq!(feature.get(0), None);
        assert_eq!(feature.get(5), None);
        assert_eq!(feature.non_pad_count(), 3);
    }

    #[test]
    fn test_align_without_gaps_keeps_order() {
        let aligned = AlignedSequence::new("MKTA").unwrap();
        let values = [4.0, 3.0, 2.0, 1.0];
        let feature = align(&metrics(&values), &aligned).unwrap();
        for (position, value) in feature.iter() {
            assert_eq!(value, AlignedValue::Value(values[position - 1]));
        }
    }

    #[test]
    fn test_count_mismatch() {
        let aligned = AlignedSequence::new("--AB").unwrap();
        let err = align(&metrics(&[1.0, 2.0, 3.0]), &aligned).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlignmentMismatch);
        assert_eq!(
            err,
            FeatureError::AlignmentMismatch {
                aligned: 2,
                structure: 3
            }
        );
    }

    #[test]
    fn test_all_gaps() {
        let aligned = AlignedSequence::new("---").unwrap();
        let feature = align(&[], &aligned).unwrap();
        assert_eq!(feature.len(), 3);
        assert_eq!(feature.non_pad_count(), 0);
    }

    #[test]
    fn test_aligned_sequence() {
        let aligned = AlignedSequence::new("MK-TA\nYI--").unwrap();
        assert_eq!(aligned.len(), 9);
        assert_eq!(aligned.residue_count(), 6);
        assert_eq!(aligned.ungapped(), "MKTAYI");
        assert_eq!(aligned.to_string(), "MK-TAYI--");
        assert_eq!(
            aligned.residue_positions()[..4],
            [Some(0), Some(1), None, Some(2)]
        );
        assert_eq!(
            AlignedSequence::new("MK*").unwrap_err().kind(),
            ErrorKind::Input
        );
    }

    #[test]
    fn test_serialize_pads_as_null() {
        let aligned = AlignedSequence::new("A-A").unwrap();
        let feature = align(&metrics(&[1.0, f64::NAN]), &aligned).unwrap();
        let json = serde_json::to_string(&feature).unwrap();
        assert_eq!(json, r#"{"1":1.0,"2":null,"3":null}"#);
    }
}
