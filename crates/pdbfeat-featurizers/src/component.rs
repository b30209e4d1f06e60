//! DataFrame adapter: reads structure text (and optionally aligned sequences) from
//! columns and appends one column per feature.
use crate::assembler::{FeatureAssembler, FeatureInput, FeatureRow, RowOutcome};
use crate::config::FeatureConfig;
use anyhow::{Context, Result};
use log::info;
use polars::prelude::*;
use std::sync::atomic::AtomicBool;

pub const PDB_COLUMN: &str = "pdb_string";
pub const MSA_COLUMN: &str = "msa_sequence";
pub const ERROR_COLUMN: &str = "pdb_features_error";

#[derive(Debug)]
pub struct PdbFeaturesComponent {
    assembler: FeatureAssembler,
    id_column: Option<String>,
}

impl PdbFeaturesComponent {
    pub fn new(config: FeatureConfig) -> Result<Self> {
        let assembler = FeatureAssembler::new(config).context("invalid feature configuration")?;
        Ok(PdbFeaturesComponent {
            assembler,
            id_column: None,
        })
    }

    /// Name rows by this column in logs and failure records; rows are numbered otherwise.
    pub fn with_id_column(mut self, column: &str) -> Self {
        self.id_column = Some(column.to_string());
        self
    }

    pub fn run(&self, df: DataFrame) -> Result<DataFrame> {
        self.run_with_cancel(df, &AtomicBool::new(false))
    }

    /// Scalar features become `Float64` columns and the rest JSON strings. Features that
    /// failed are null, and the reasons are collected in the error column.
    pub fn run_with_cancel(&self, mut df: DataFrame, cancel: &AtomicBool) -> Result<DataFrame> {
        let inputs = self.read_inputs(&df)?;
        let outcomes = self.assembler.assemble_each(&inputs, cancel);

        for (name, kind) in self.assembler.config().output_columns() {
            let series = if kind.is_scalar() {
                let values: Vec<Option<f64>> = outcomes
                    .iter()
                    .map(|outcome| row_of(outcome).and_then(|row| row.get(&name)?.as_scalar()))
                    .collect();
                Series::new(name.as_str().into(), values)
            } else {
                let values = outcomes
                    .iter()
                    .map(|outcome| {
                        row_of(outcome)
                            .and_then(|row| row.get(&name))
                            .map(serde_json::to_string)
                            .transpose()
                    })
                    .collect::<serde_json::Result<Vec<Option<String>>>>()
                    .with_context(|| format!("failed to serialize {}", name))?;
                Series::new(name.as_str().into(), values)
            };
            df.with_column(series)?;
        }

        let errors: Vec<Option<String>> = outcomes.iter().map(error_message).collect();
        df.with_column(Series::new(ERROR_COLUMN.into(), errors))?;
        info!("added structural features to {} rows", df.height());
        Ok(df)
    }

    fn read_inputs(&self, df: &DataFrame) -> Result<Vec<FeatureInput>> {
        let pdbs = df
            .column(PDB_COLUMN)
            .with_context(|| format!("missing column '{}'", PDB_COLUMN))?
            .as_materialized_series()
            .str()
            .with_context(|| format!("column '{}' must hold strings", PDB_COLUMN))?;
        let msas = match df.column(MSA_COLUMN) {
            Ok(column) => Some(
                column
                    .as_materialized_series()
                    .str()
                    .with_context(|| format!("column '{}' must hold strings", MSA_COLUMN))?,
            ),
            Err(_) => None,
        };
        let ids: Vec<String> = match &self.id_column {
            Some(name) => df
                .column(name)
                .with_context(|| format!("missing id column '{}'", name))?
                .as_materialized_series()
                .cast(&DataType::String)?
                .str()?
                .into_iter()
                .enumerate()
                .map(|(i, id)| id.map(str::to_string).unwrap_or_else(|| i.to_string()))
                .collect(),
            None => (0..df.height()).map(|i| i.to_string()).collect(),
        };

        Ok(ids
            .into_iter()
            .zip(pdbs)
            .enumerate()
            .map(|(i, (id, pdb))| {
                let aligned = msas.and_then(|msas| msas.get(i)).map(str::to_string);
                FeatureInput::new(id, pdb.unwrap_or_default(), aligned)
            })
            .collect())
    }
}

fn row_of(outcome: &RowOutcome) -> Option<&FeatureRow> {
    match outcome {
        RowOutcome::Row(row) => Some(row),
        _ => None,
    }
}

fn error_message(outcome: &RowOutcome) -> Option<String> {
    match outcome {
        RowOutcome::Row(row) if row.failures.is_empty() => None,
        RowOutcome::Row(row) => Some(
            row.failures
                .iter()
                .map(|f| format!("{}: {}", f.feature, f.message))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        RowOutcome::Failed(failure) => Some(failure.message.clone()),
        RowOutcome::Skipped(_) => Some("skipped: batch cancelled".to_string()),
    }
}
