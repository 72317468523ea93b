//! Reading-frame classification across the fusion junction.

use crate::types::SpliceEffect;

/// Frame effect of a junction together with its residue offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameJunction {
    pub effect: SpliceEffect,
    /// Residues of the 5' protein retained before the junction.
    pub protein_offset_5prime: usize,
    /// Residues of the 3' protein skipped before the junction (0 when out of frame).
    pub protein_offset_3prime: usize,
}

/// Classify the splice effect from the retained 5' and 3' CDS lengths.
///
/// The remainders of both fragments modulo 3 either vanish (in frame), add up
/// to exactly one codon (in frame, with a chimeric junction codon) or leave the
/// 3' fragment shifted (out of frame).
pub fn classify(cds_len_5prime: usize, cds_len_3prime: usize) -> SpliceEffect {
    let r5 = cds_len_5prime % 3;
    let r3 = cds_len_3prime % 3;

    if r5 == 0 && r3 == 0 {
        SpliceEffect::InFrame
    } else if r5 + r3 == 3 {
        SpliceEffect::InFrameWithMutation
    } else {
        SpliceEffect::OutOfFrame
    }
}

/// Classify the junction and derive protein-level offsets from CDS offsets.
pub fn junction(
    cds_offset_5prime: usize,
    cds_offset_3prime: usize,
    cds_len_5prime: usize,
    cds_len_3prime: usize,
) -> FrameJunction {
    let effect = classify(cds_len_5prime, cds_len_3prime);
    let protein_offset_3prime = match effect {
        SpliceEffect::InFrame | SpliceEffect::InFrameWithMutation => cds_offset_3prime / 3,
        SpliceEffect::OutOfFrame | SpliceEffect::NonCoding => 0,
    };

    FrameJunction {
        effect,
        protein_offset_5prime: cds_offset_5prime / 3,
        protein_offset_3prime,
    }
}
