use thiserror::Error;

use super::config::ConfigError;
use super::energy::TotalMismatch;
use crate::core::io::error::SourceError;
use crate::core::models::term::CanonicalTerm;
use crate::core::terms::map::TermMapError;
use std::fmt;

/// One of the two sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("Energy label '{label}' has no canonical mapping and is not ignored")]
    UnmappedTerm { label: String },

    #[error("Canonical term '{term}' is missing on side {missing}")]
    MissingTerm { term: CanonicalTerm, missing: Side },

    #[error("Force arrays differ in length: {left} particles on side A, {right} on side B")]
    LengthMismatch { left: usize, right: usize },

    #[error(
        "Non-finite force on side {side} at particle {index}: ({:?}, {:?}, {:?})",
        .vector[0], .vector[1], .vector[2]
    )]
    InvalidVector {
        side: Side,
        index: usize,
        vector: [f64; 3],
    },

    #[error("Total energy check failed: {0}")]
    TotalMismatch(TotalMismatch),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    TermMap(#[from] TermMapError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
