//! Fusion transcript prediction and enumeration.

pub mod enumerate;
pub mod transcript;

pub use enumerate::{Fusion, GeneRef, TranscriptFilter};
pub use transcript::{FusionTranscript, JunctionOffsets, NonCodingReason, PipelineState};
