//! Gene fusion transcript, protein and domain prediction.
//!
//! Given two genes cut at one genomic breakpoint each, `fusionmodel` projects
//! the breakpoints onto every pair of transcripts, classifies the effect on
//! the reading frame, assembles the chimeric cDNA, CDS and protein, and maps
//! the parent proteins' domain annotations onto the fusion protein.

pub mod config;
pub mod domains;
pub mod error;
pub mod fusion;
pub mod output;
pub mod projection;
pub mod provider;
pub mod sequence;
pub mod types;

pub use config::Config;
pub use error::{FusionError, Result};
pub use fusion::{Fusion, FusionTranscript, GeneRef, TranscriptFilter};
pub use provider::{AnnotationBundle, DomainProvider, GenomeProvider};
