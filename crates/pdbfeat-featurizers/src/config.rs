//! Which features to compute and with which parameters.
//!
//! Loaded from JSON; every field has a default so `{}` is a complete configuration.
use pdbfeat_core::InteractionThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;
use validator::Validate;

pub const LRO_COLUMN: &str = "pdb_lro";
pub const BURIEDNESS_COLUMN: &str = "pdb_buriedness";
pub const SHORT_RANGE_COLUMN: &str = "pdb_avg_short_range";
pub const MEDIUM_RANGE_COLUMN: &str = "pdb_avg_medium_range";
pub const LONG_RANGE_COLUMN: &str = "pdb_avg_long_range";
pub const HYDROPHOBICITY_COLUMN: &str = "pdb_avg_hydrophobicity";
pub const DISTANCE_MATRIX_COLUMN: &str = "pdb_aa_distances_matrix";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    LongRangeOrder,
    Contacts,
    Buriedness,
    Interactions,
    Hydrophobicity,
    DistanceMatrix,
}

impl FeatureKind {
    /// Scalar features become numeric columns; the others are JSON.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FeatureKind::Buriedness | FeatureKind::DistanceMatrix)
    }

    /// Output names produced by this feature.
    pub fn columns(&self, contacts: &[ContactSpec]) -> Vec<String> {
        match self {
            FeatureKind::LongRangeOrder => vec![LRO_COLUMN.to_string()],
            FeatureKind::Contacts => contacts.iter().map(ContactSpec::column_name).collect(),
            FeatureKind::Buriedness => vec![BURIEDNESS_COLUMN.to_string()],
            FeatureKind::Interactions => vec![
                SHORT_RANGE_COLUMN.to_string(),
                MEDIUM_RANGE_COLUMN.to_string(),
                LONG_RANGE_COLUMN.to_string(),
            ],
            FeatureKind::Hydrophobicity => vec![HYDROPHOBICITY_COLUMN.to_string()],
            FeatureKind::DistanceMatrix => vec![DISTANCE_MATRIX_COLUMN.to_string()],
        }
    }
}

/// One contact count: residue pairs whose `atom_name` atoms lie within `cutoff` Å.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactSpec {
    #[validate(range(exclusive_min = 0.0))]
    pub cutoff: f64,
    #[validate(length(min = 1))]
    pub atom_name: String,
}

impl ContactSpec {
    pub fn new(cutoff: f64, atom_name: &str) -> Self {
        ContactSpec {
            cutoff,
            atom_name: atom_name.to_string(),
        }
    }

    /// `pdb_contacts_8A_ca` for 8 Å on CA.
    pub fn column_name(&self) -> String {
        format!(
            "pdb_contacts_{}A_{}",
            self.cutoff,
            self.atom_name.to_lowercase()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FeatureConfig {
    #[validate(length(min = 1))]
    pub features: Vec<FeatureKind>,
    #[validate(nested)]
    pub contacts: Vec<ContactSpec>,
    /// Chain classified by the interaction feature.
    #[validate(length(min = 1))]
    pub interaction_chain: String,
    pub interaction_thresholds: InteractionThresholds,
    #[validate(range(exclusive_min = 0.0))]
    pub hydrophobicity_cutoff: f64,
    /// Worker threads; `None` uses the global rayon pool.
    #[validate(range(min = 1))]
    pub threads: Option<usize>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        FeatureConfig {
            features: vec![
                FeatureKind::LongRangeOrder,
                FeatureKind::Contacts,
                FeatureKind::Buriedness,
            ],
            contacts: vec![ContactSpec::new(8.0, "CA"), ContactSpec::new(14.0, "CA")],
            interaction_chain: "A".to_string(),
            interaction_thresholds: InteractionThresholds::default(),
            hydrophobicity_cutoff: pdbfeat_core::geometry::DEFAULT_NEIGHBOUR_CUTOFF,
            threads: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(
        "interaction thresholds must satisfy 0 <= short_max <= medium_min <= medium_max, got {0:?}"
    )]
    Thresholds(InteractionThresholds),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FeatureConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FeatureConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Field rules plus the ordering of the interaction thresholds.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if !self.interaction_thresholds.is_ordered() {
            return Err(ConfigError::Thresholds(self.interaction_thresholds));
        }
        Ok(())
    }

    /// Every output name with the feature producing it, sorted by name.
    pub fn output_columns(&self) -> Vec<(String, FeatureKind)> {
        let columns: BTreeMap<String, FeatureKind> = self
            .features
            .iter()
            .flat_map(|kind| {
                kind.columns(&self.contacts)
                    .into_iter()
                    .map(move |name| (name, *kind))
            })
            .collect();
        columns.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_defaults() {
        let config = FeatureConfig::default();
        assert!(config.check().is_ok());
        let names: Vec<String> = config
            .output_columns()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "pdb_buriedness",
                "pdb_contacts_14A_ca",
                "pdb_contacts_8A_ca",
                "pdb_lro"
            ]
        );
        assert_eq!(FeatureConfig::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_feature_kind_names() {
        let names: Vec<String> = FeatureKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "long_range_order",
                "contacts",
                "buriedness",
                "interactions",
                "hydrophobicity",
                "distance_matrix"
            ]
        );
        assert_eq!(
            FeatureKind::from_str("distance_matrix").unwrap(),
            FeatureKind::DistanceMatrix
        );
        assert!(FeatureKind::Interactions.is_scalar());
        assert!(!FeatureKind::Buriedness.is_scalar());
    }

    #[test]
    fn test_contact_column_name() {
        assert_eq!(ContactSpec::new(6.5, "CB").column_name(), "pdb_contacts_6.5A_cb");
    }

    #[test]
    fn test_from_json() {
        let config = FeatureConfig::from_json_str(
            r#"{
                "features": ["interactions", "hydrophobicity"],
                "interaction_chain": "B",
                "interaction_thresholds": {"short_max": 4.0, "medium_min": 6.0, "medium_max": 8.0},
                "threads": 2
            }"#,
        )
        .unwrap();
        assert_eq!(config.interaction_chain, "B");
        assert_eq!(config.interaction_thresholds.medium_max, 8.0);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.output_columns().len(), 4);
    }

    #[test]
    fn test_rejected_configs() {
        let invalid = [
            r#"{"features": []}"#,
            r#"{"contacts": [{"cutoff": 0.0, "atom_name": "CA"}]}"#,
            r#"{"contacts": [{"cutoff": 8.0, "atom_name": ""}]}"#,
            r#"{"interaction_chain": ""}"#,
            r#"{"hydrophobicity_cutoff": -1.0}"#,
            r#"{"threads": 0}"#,
        ];
        for json in invalid {
            assert!(
                matches!(FeatureConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "accepted {}",
                json
            );
        }
        assert!(matches!(
            FeatureConfig::from_json_str(r#"{"interaction_thresholds": {"short_max": 5.0}}"#),
            Err(ConfigError::Thresholds(_))
        ));
        assert!(matches!(
            FeatureConfig::from_json_str(r#"{"features": ["sasa"]}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            FeatureConfig::from_path("/nonexistent/pdbfeat.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
