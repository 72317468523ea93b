//! Error types for fusionmodel.

use thiserror::Error;

/// Errors raised while resolving genes or building fusions.
#[derive(Debug, Error)]
pub enum FusionError {
    /// No gene matches the identifier or symbol.
    #[error("no gene found for identifier or symbol {name}")]
    GeneNotFound { name: String },

    /// A gene symbol matches more than one gene.
    #[error("gene symbol {name} is ambiguous ({count} genes share it)")]
    AmbiguousGeneName { name: String, count: usize },

    /// A breakpoint lies outside the span of the gene it was given for.
    #[error("breakpoint {position} lies outside {gene} ({contig}:{start}-{end})")]
    BreakpointOutOfRange {
        gene: String,
        contig: String,
        position: i64,
        start: i64,
        end: i64,
    },

    /// An annotation bundle failed a structural check.
    #[error("invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl FusionError {
    /// Whether the error concerns an unresolved gene identifier or symbol.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(
            self,
            FusionError::GeneNotFound { .. } | FusionError::AmbiguousGeneName { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FusionError>;
