//! pdbfeat-featurizers
//!
//! Runs the structural features of `pdbfeat-core` over batches of structures and
//! writes them into a polars `DataFrame`.
//!
//! - [`config`]: feature selection and parameters, loaded from JSON.
//! - [`assembler`]: per-row feature assembly on a rayon pool.
//! - [`component`]: the DataFrame-facing component.
pub mod assembler;
pub mod component;
pub mod config;

pub use assembler::{
    BatchOutput, FeatureAssembler, FeatureFailure, FeatureInput, FeatureRow, FeatureValue,
    RowFailure, RowOutcome,
};
pub use component::PdbFeaturesComponent;
pub use config::{ConfigError, ContactSpec, FeatureConfig, FeatureKind};
