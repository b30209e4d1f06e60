//! Short/medium/long-range classification of CA-CA distances within one chain.
use crate::errors::Result;
use crate::geometry::distance;
use crate::structure::{ResidueKey, Structure};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Distance bounds in Å. `d <= short_max` is short, `medium_min <= d <= medium_max`
/// is medium, anything else is long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionThresholds {
    pub short_max: f64,
    pub medium_min: f64,
    pub medium_max: f64,
}

impl Default for InteractionThresholds {
    fn default() -> Self {
        InteractionThresholds {
            short_max: 2.0,
            medium_min: 3.0,
            medium_max: 4.0,
        }
    }
}

impl InteractionThresholds {
    pub fn classify(&self, d: f64) -> InteractionRange {
        if d <= self.short_max {
            InteractionRange::Short
        } else if d >= self.medium_min && d <= self.medium_max {
            InteractionRange::Medium
        } else {
            InteractionRange::Long
        }
    }

    /// Bounds must be non-negative and ordered.
    pub fn is_ordered(&self) -> bool {
        0.0 <= self.short_max && self.short_max <= self.medium_min && self.medium_min <= self.medium_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InteractionRange {
    Short,
    Medium,
    Long,
}

/// Summed distances per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RangeTotals {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl RangeTotals {
    fn add(&mut self, range: InteractionRange, d: f64) {
        match range {
            InteractionRange::Short => self.short += d,
            InteractionRange::Medium => self.medium += d,
            InteractionRange::Long => self.long += d,
        }
    }

    pub fn get(&self, range: InteractionRange) -> f64 {
        match range {
            InteractionRange::Short => self.short,
            InteractionRange::Medium => self.medium,
            InteractionRange::Long => self.long,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionSummary {
    pub chain_id: String,
    /// Residues in the chain, hetero groups and solvent included.
    pub residue_count: usize,
    pub totals: RangeTotals,
    pub per_residue: Vec<(ResidueKey, RangeTotals)>,
}

impl InteractionSummary {
    pub fn average(&self, range: InteractionRange) -> f64 {
        if self.residue_count == 0 {
            return 0.0;
        }
        self.totals.get(range) / self.residue_count as f64
    }

    pub fn average_short(&self) -> f64 {
        self.average(InteractionRange::Short)
    }

    pub fn average_medium(&self) -> f64 {
        self.average(InteractionRange::Medium)
    }

    pub fn average_long(&self) -> f64 {
        self.average(InteractionRange::Long)
    }
}

/// Bucket every ordered pair of distinct CA-bearing residues of `chain_id`.
///
/// Each unordered pair is visited in both directions, so bucket sums count it twice.
/// Averages divide the sums by the number of residues in the chain. A chain absent
/// from the structure is an input error.
pub fn classify_interactions(
    structure: &Structure,
    chain_id: &str,
    thresholds: &InteractionThresholds,
) -> Result<InteractionSummary> {
    let chain_structure = structure.select_chain(chain_id)?;
    let residue_count = chain_structure.iter_residues_all().count();

    let alpha: Vec<(ResidueKey, &[f64; 3])> = chain_structure
        .iter_residues_standard()
        .filter_map(|residue| residue.alpha_carbon().map(|ca| (residue.key(), ca)))
        .collect();

    let mut totals = RangeTotals::default();
    let mut per_residue = Vec::with_capacity(alpha.len());
    for (i, (key, a)) in alpha.iter().enumerate() {
        let mut own = RangeTotals::default();
        for (j, (_, b)) in alpha.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = distance(a, b);
            own.add(thresholds.classify(d), d);
        }
        totals.short += own.short;
        totals.medium += own.medium;
        totals.long += own.long;
        per_residue.push((key.clone(), own));
    }

    Ok(InteractionSummary {
        chain_id: chain_id.to_string(),
        residue_count,
        totals,
        per_residue,
    })
}
