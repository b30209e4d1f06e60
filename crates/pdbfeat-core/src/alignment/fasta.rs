//! Aligned FASTA, as produced by the MSA tool.
use super::AlignedSequence;
use crate::errors::{FeatureError, Result};
use std::collections::BTreeMap;

/// Identifier to gapped sequence, every sequence of the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    sequences: BTreeMap<String, AlignedSequence>,
    width: usize,
}

impl Alignment {
    pub fn get(&self, id: &str) -> Option<&AlignedSequence> {
        self.sequences.get(id)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Alignment length L shared by every sequence.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sequences sorted by identifier.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AlignedSequence)> {
        self.sequences.iter().map(|(id, seq)| (id.as_str(), seq))
    }
}

/// Parse aligned FASTA. The identifier is the first word of the header line;
/// sequence lines are concatenated.
pub fn parse_aligned_fasta(text: &str) -> Result<Alignment> {
    let mut records: Vec<(String, String)> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            let id = header.split_whitespace().next().ok_or_else(|| {
                FeatureError::input(format!("empty FASTA header on line {}", line_no + 1))
            })?;
            records.push((id.to_string(), String::new()));
        } else {
            match records.last_mut() {
                Some((_, sequence)) => sequence.push_str(line),
                None => {
                    return Err(FeatureError::input(format!(
                        "sequence data before the first header on line {}",
                        line_no + 1
                    )))
                }
            }
        }
    }
    if records.is_empty() {
        return Err(FeatureError::input("alignment text holds no records"));
    }

    let mut sequences = BTreeMap::new();
    let mut width = None;
    for (id, raw) in records {
        if raw.is_empty() {
            return Err(FeatureError::input(format!("record '{}' has no sequence", id)));
        }
        let sequence = AlignedSequence::new(&raw)?;
        match width {
            None => width = Some(sequence.len()),
            Some(w) if w != sequence.len() => {
                return Err(FeatureError::input(format!(
                    "record '{}' has width {}, expected {}",
                    id,
                    sequence.len(),
                    w
                )))
            }
            Some(_) => {}
        }
        if sequences.contains_key(&id) {
            return Err(FeatureError::input(format!("duplicate record id '{}'", id)));
        }
        sequences.insert(id, sequence);
    }

    Ok(Alignment {
        sequences,
        width: width.unwrap_or_default(),
    })
}
