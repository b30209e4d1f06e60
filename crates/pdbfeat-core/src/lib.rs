//! pdbfeat-core
//!
//! Structural features of protein structures for sequence pipelines.
//!
//! - [`parse_pdb`] reads PDB text into a columnar [`Structure`].
//! - [`geometry`] computes contact counts, long-range order, convex-hull buriedness,
//!   an alignment-indexed distance matrix and neighbourhood hydrophobicity.
//! - [`alignment`] moves per-residue values into gapped alignment coordinates.
//! - [`interactions`] buckets CA-CA distances of a chain into short/medium/long ranges.
//!
//! ```
//! use pdbfeat_core::{geometry, parse_pdb};
//! use pdbfeat_test_data::TestFile;
//!
//! let structure = parse_pdb(TestFile::peptide_01().contents()).unwrap();
//! assert_eq!(structure.sequence("A").unwrap(), "MKTAYIGK");
//! assert!(geometry::long_range_order(&structure) > 0.0);
//! ```
pub mod alignment;
pub mod conversions;
pub mod errors;
pub mod geometry;
pub(crate) mod info;
pub mod interactions;
pub mod structure;

pub use alignment::{align, parse_aligned_fasta, AlignedFeature, AlignedSequence, AlignedValue, Alignment};
pub use conversions::parse_pdb;
pub use errors::{ErrorKind, FeatureError, Result};
pub use geometry::AlignedMatrix;
pub use interactions::{classify_interactions, InteractionSummary, InteractionThresholds};
pub use structure::{ResidueKey, ResidueMetric, Structure};
