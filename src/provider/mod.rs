//! Data providers for gene models and domain annotations.
//!
//! The prediction engine never looks anything up on its own; callers pass a
//! provider into each call.

pub mod bundle;

pub use bundle::AnnotationBundle;

use crate::error::Result;
use crate::types::Gene;

/// A domain annotation as stored against a transcript, in residue coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAnnotation {
    pub accession: String,
    pub start: i64,
    pub end: i64,
}

impl DomainAnnotation {
    pub fn new(accession: String, start: i64, end: i64) -> Self {
        DomainAnnotation {
            accession,
            start,
            end,
        }
    }
}

/// Source of gene and transcript models.
pub trait GenomeProvider {
    /// Look a gene up by identifier, then by symbol.
    ///
    /// Fails with `GeneNotFound` when nothing matches and
    /// `AmbiguousGeneName` when a symbol matches several genes.
    fn resolve_gene(&self, name: &str) -> Result<&Gene>;
}

/// Source of protein domain annotations.
pub trait DomainProvider: Sync {
    /// Domains of a transcript's protein on one annotation track, in order.
    fn domains_for_transcript(&self, transcript_id: &str, track: &str) -> Vec<DomainAnnotation>;

    /// Human-readable name for a domain accession, if known.
    fn resolve_domain_label(&self, accession: &str) -> Option<String>;
}
