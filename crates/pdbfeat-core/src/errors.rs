//! Error types shared by every structural feature.

use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Failure of a parse, a geometric computation or an input check.
///
/// Each variant is scoped: a `Parse` error makes the whole row unusable while the
/// other variants only invalidate the feature that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// The structure text holds no usable atom records.
    #[error("parse error: {0}")]
    Parse(String),

    /// A geometric quantity is undefined for the input (e.g. a flat convex hull).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// The aligned sequence does not describe the structure's residues.
    #[error(
        "alignment mismatch: aligned sequence has {aligned} residues, structure has {structure}"
    )]
    AlignmentMismatch { aligned: usize, structure: usize },

    /// A named chain or companion input is missing or malformed.
    #[error("input error: {0}")]
    Input(String),
}

impl FeatureError {
    pub fn parse(message: impl Into<String>) -> Self {
        FeatureError::Parse(message.into())
    }

    pub fn geometry(message: impl Into<String>) -> Self {
        FeatureError::Geometry(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        FeatureError::Input(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::Parse(_) => ErrorKind::Parse,
            FeatureError::Geometry(_) => ErrorKind::Geometry,
            FeatureError::AlignmentMismatch { .. } => ErrorKind::AlignmentMismatch,
            FeatureError::Input(_) => ErrorKind::Input,
        }
    }
}

/// Discriminant of [`FeatureError`] carried by failure records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Parse,
    Geometry,
    AlignmentMismatch,
    Input,
}

pub type Result<T> = std::result::Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let err = FeatureError::AlignmentMismatch {
            aligned: 3,
            structure: 4,
        };
        assert_eq!(err.kind(), ErrorKind::AlignmentMismatch);
        assert_eq!(err.kind().to_string(), "alignment_mismatch");
        assert_eq!(
            err.to_string(),
            "alignment mismatch: aligned sequence has 3 residues, structure has 4"
        );
        assert_eq!(FeatureError::parse("empty").kind().to_string(), "parse");
        assert_eq!(
            serde_json::to_string(&ErrorKind::Geometry).unwrap(),
            "\"geometry\""
        );
    }
}
