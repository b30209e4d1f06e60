//! Batch feature assembly.
//!
//! Each input row is parsed once and every configured feature is computed from the
//! resulting structure. Rows are independent and run on a rayon pool; results keep
//! input order.
use crate::config::{
    ConfigError, FeatureConfig, FeatureKind, BURIEDNESS_COLUMN, DISTANCE_MATRIX_COLUMN,
    HYDROPHOBICITY_COLUMN, LONG_RANGE_COLUMN, LRO_COLUMN, MEDIUM_RANGE_COLUMN,
    SHORT_RANGE_COLUMN,
};
use log::{debug, info, warn};
use pdbfeat_core::geometry::{
    aligned_distance_matrix, average_hydrophobicity, buriedness, contact_count, long_range_order,
};
use pdbfeat_core::{
    align, classify_interactions, parse_pdb, AlignedFeature, AlignedMatrix, AlignedSequence,
    Alignment, ErrorKind, FeatureError, ResidueMetric, Structure,
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// One structure to featurize.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInput {
    pub id: String,
    pub pdb: String,
    /// Gapped sequence of the primary chain from the MSA.
    pub aligned: Option<String>,
}

impl FeatureInput {
    pub fn new(id: impl Into<String>, pdb: impl Into<String>, aligned: Option<String>) -> Self {
        FeatureInput {
            id: id.into(),
            pdb: pdb.into(),
            aligned,
        }
    }

    /// Pair each `(id, pdb)` with its sequence from `alignment`, when it has one.
    pub fn batch_from_alignment(
        structures: impl IntoIterator<Item = (String, String)>,
        alignment: &Alignment,
    ) -> Vec<FeatureInput> {
        structures
            .into_iter()
            .map(|(id, pdb)| {
                let aligned = alignment.get(&id).map(|seq| seq.to_string());
                FeatureInput { id, pdb, aligned }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Scalar(f64),
    PerResidue(Vec<ResidueMetric>),
    Aligned(AlignedFeature),
    Matrix(AlignedMatrix),
}

impl FeatureValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FeatureValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

/// A feature that could not be computed for a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureFailure {
    pub feature: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// A row whose structure could not be used at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub id: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl RowFailure {
    fn new(id: &str, err: &FeatureError) -> Self {
        RowFailure {
            id: id.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub id: String,
    pub features: BTreeMap<String, FeatureValue>,
    pub failures: Vec<FeatureFailure>,
}

impl FeatureRow {
    fn new(id: &str) -> Self {
        FeatureRow {
            id: id.to_string(),
            features: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureValue> {
        self.features.get(feature)
    }

    pub fn failure(&self, feature: &str) -> Option<&FeatureFailure> {
        self.failures.iter().find(|f| f.feature == feature)
    }

    fn record(&mut self, feature: &str, result: Result<FeatureValue, FeatureError>) {
        match result {
            Ok(value) => {
                self.features.insert(feature.to_string(), value);
            }
            Err(err) => {
                warn!("{}: {} failed: {}", self.id, feature, err);
                self.failures.push(FeatureFailure {
                    feature: feature.to_string(),
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Row(FeatureRow),
    Failed(RowFailure),
    /// Not started because the batch was cancelled.
    Skipped(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    pub rows: Vec<FeatureRow>,
    pub failures: Vec<RowFailure>,
    pub skipped: Vec<String>,
}

impl From<Vec<RowOutcome>> for BatchOutput {
    fn from(outcomes: Vec<RowOutcome>) -> Self {
        let mut output = BatchOutput::default();
        for outcome in outcomes {
            match outcome {
                RowOutcome::Row(row) => output.rows.push(row),
                RowOutcome::Failed(failure) => output.failures.push(failure),
                RowOutcome::Skipped(id) => output.skipped.push(id),
            }
        }
        output
    }
}

#[derive(Debug)]
pub struct FeatureAssembler {
    config: FeatureConfig,
    pool: Option<ThreadPool>,
}

impl FeatureAssembler {
    /// Validate `config` and build a dedicated pool when it asks for a thread count.
    pub fn new(config: FeatureConfig) -> Result<Self, ConfigError> {
        config.check()?;
        let pool = match config.threads {
            Some(threads) => Some(ThreadPoolBuilder::new().num_threads(threads).build()?),
            None => None,
        };
        Ok(FeatureAssembler { config, pool })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn assemble_row(&self, input: &FeatureInput) -> Result<FeatureRow, RowFailure> {
        debug!("assembling features for {}", input.id);
        let structure = parse_pdb(&input.pdb).map_err(|err| {
            warn!("{}: {}", input.id, err);
            RowFailure::new(&input.id, &err)
        })?;
        let aligned: Result<Option<AlignedSequence>, FeatureError> = input
            .aligned
            .as_deref()
            .map(AlignedSequence::new)
            .transpose();

        let mut row = FeatureRow::new(&input.id);
        for kind in &self.config.features {
            match kind {
                FeatureKind::LongRangeOrder => {
                    row.record(LRO_COLUMN, Ok(FeatureValue::Scalar(long_range_order(&structure))))
                }
                FeatureKind::Contacts => {
                    for spec in &self.config.contacts {
                        let count = contact_count(&structure, spec.cutoff, &spec.atom_name);
                        row.record(&spec.column_name(), Ok(FeatureValue::Scalar(count as f64)));
                    }
                }
                FeatureKind::Buriedness => {
                    row.record(BURIEDNESS_COLUMN, buriedness_feature(&structure, &aligned))
                }
                FeatureKind::Interactions => {
                    let names = [SHORT_RANGE_COLUMN, MEDIUM_RANGE_COLUMN, LONG_RANGE_COLUMN];
                    match classify_interactions(
                        &structure,
                        &self.config.interaction_chain,
                        &self.config.interaction_thresholds,
                    ) {
                        Ok(summary) => {
                            let averages = [
                                summary.average_short(),
                                summary.average_medium(),
                                summary.average_long(),
                            ];
                            for (name, value) in names.into_iter().zip(averages) {
                                row.record(name, Ok(FeatureValue::Scalar(value)));
                            }
                        }
                        Err(err) => {
                            for name in names {
                                row.record(name, Err(err.clone()));
                            }
                        }
                    }
                }
                FeatureKind::Hydrophobicity => row.record(
                    HYDROPHOBICITY_COLUMN,
                    average_hydrophobicity(&structure, self.config.hydrophobicity_cutoff)
                        .map(FeatureValue::Scalar),
                ),
                FeatureKind::DistanceMatrix => {
                    row.record(DISTANCE_MATRIX_COLUMN, distance_matrix_feature(&structure, &aligned))
                }
            }
        }
        Ok(row)
    }

    /// One outcome per input, in input order. `cancel` is checked before each row
    /// starts; rows already running finish.
    pub fn assemble_each(&self, inputs: &[FeatureInput], cancel: &AtomicBool) -> Vec<RowOutcome> {
        let run = || {
            inputs
                .par_iter()
                .map(|input| {
                    if cancel.load(Ordering::Relaxed) {
                        return RowOutcome::Skipped(input.id.clone());
                    }
                    match self.assemble_row(input) {
                        Ok(row) => RowOutcome::Row(row),
                        Err(failure) => RowOutcome::Failed(failure),
                    }
                })
                .collect::<Vec<RowOutcome>>()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    pub fn assemble_batch(&self, inputs: &[FeatureInput]) -> BatchOutput {
        self.assemble_batch_with_cancel(inputs, &AtomicBool::new(false))
    }

    pub fn assemble_batch_with_cancel(
        &self,
        inputs: &[FeatureInput],
        cancel: &AtomicBool,
    ) -> BatchOutput {
        let output = BatchOutput::from(self.assemble_each(inputs, cancel));
        info!(
            "assembled {} rows ({} failed, {} skipped)",
            output.rows.len(),
            output.failures.len(),
            output.skipped.len()
        );
        output
    }
}

/// Aligned buriedness of the primary chain, or all residues when there is no alignment.
fn buriedness_feature(
    structure: &Structure,
    aligned: &Result<Option<AlignedSequence>, FeatureError>,
) -> Result<FeatureValue, FeatureError> {
    let aligned = aligned.as_ref().map_err(Clone::clone)?;
    let values = buriedness(structure)?;
    match aligned {
        None => Ok(FeatureValue::PerResidue(values)),
        Some(aligned) => {
            let primary = structure
                .primary_chain()
                .map(|chain| chain.chain_id.to_string())
                .unwrap_or_default();
            let primary_values: Vec<ResidueMetric> = values
                .into_iter()
                .filter(|metric| metric.key.chain_id == primary)
                .collect();
            Ok(FeatureValue::Aligned(align(&primary_values, aligned)?))
        }
    }
}

fn distance_matrix_feature(
    structure: &Structure,
    aligned: &Result<Option<AlignedSequence>, FeatureError>,
) -> Result<FeatureValue, FeatureError> {
    match aligned.as_ref().map_err(Clone::clone)? {
        Some(aligned) => Ok(FeatureValue::Matrix(aligned_distance_matrix(structure, aligned)?)),
        None => Err(FeatureError::input(
            "distance matrix needs an aligned sequence",
        )),
    }
}
