//! Genomic breakpoint to transcript/CDS offset projection.
//!
//! Exon and CDS intervals are stored sorted by genomic start. The walk visits
//! them in transcription order instead: ascending on the positive strand,
//! descending on the negative strand. Measuring every position as a distance
//! from the interval's transcriptional start makes one rule serve both
//! strands.

use crate::types::{Interval, Region, Strand, Transcript};

/// Offsets of a breakpoint along one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Projection {
    /// Bases of mature transcript up to and including the breakpoint.
    pub cdna_offset: usize,
    /// Bases of coding sequence up to and including the breakpoint.
    pub cds_offset: usize,
}

/// Return the intervals in the order transcription visits them.
pub fn transcription_ordered(intervals: &[Interval], strand: Strand) -> Vec<Interval> {
    debug_assert!(
        intervals.windows(2).all(|w| w[0].start <= w[1].start),
        "intervals must be sorted by genomic start"
    );
    match strand {
        Strand::Positive => intervals.to_vec(),
        Strand::Negative => intervals.iter().rev().copied().collect(),
    }
}

/// Distance of `pos` from the interval's transcriptional start.
///
/// Negative when `pos` is upstream of the interval, `>= length` when it is
/// downstream of it.
fn distance_from_start(interval: &Interval, strand: Strand, pos: i64) -> i64 {
    match strand {
        Strand::Positive => pos - interval.start,
        Strand::Negative => interval.end - pos,
    }
}

/// Accumulate transcribed bases up to and including `breakpoint`.
///
/// `ordered` must already be in transcription order (see
/// [`transcription_ordered`]). A breakpoint on an interval's transcriptional
/// end counts that whole interval. A breakpoint on its transcriptional start
/// counts nothing from it, so the offset is that of the preceding interval.
/// A breakpoint between or beyond all intervals yields the bases transcribed
/// before it.
pub fn accumulate_offset(ordered: &[Interval], strand: Strand, breakpoint: i64) -> usize {
    let mut offset: i64 = 0;

    for interval in ordered {
        let distance = distance_from_start(interval, strand, breakpoint);
        if distance >= interval.length() - 1 {
            offset += interval.length();
            continue;
        }
        if distance <= 0 {
            // At or before the interval's first transcribed base
            break;
        }
        offset += distance + 1;
        break;
    }

    debug_assert!(offset >= 0);
    offset as usize
}

/// Project a breakpoint onto a transcript's cDNA and CDS.
pub fn project(transcript: &Transcript, breakpoint: i64) -> Projection {
    let exons = transcription_ordered(&transcript.exons, transcript.strand);
    let cds = transcription_ordered(&transcript.cds, transcript.strand);

    Projection {
        cdna_offset: accumulate_offset(&exons, transcript.strand, breakpoint),
        cds_offset: accumulate_offset(&cds, transcript.strand, breakpoint),
    }
}

/// Classify where a breakpoint lands on a transcript.
///
/// `cdna_offset` is the breakpoint's projected cDNA offset, used to place
/// exonic non-coding breakpoints in the 5' or 3' UTR of complete transcripts.
pub fn classify_region(transcript: &Transcript, breakpoint: i64, cdna_offset: usize) -> Region {
    if transcript.cds.iter().any(|c| c.contains(breakpoint)) {
        return Region::Cds;
    }

    if transcript.exons.iter().any(|e| e.contains(breakpoint)) {
        if !transcript.is_complete || transcript.cds.is_empty() {
            return Region::Exon;
        }
        let utr5 = transcript.five_prime_utr_length();
        let coding_end = utr5 + transcript.cds_length() as usize;
        return if cdna_offset <= utr5 {
            Region::FivePrimeUtr
        } else if cdna_offset > coding_end {
            Region::ThreePrimeUtr
        } else {
            Region::Exon
        };
    }

    if breakpoint >= transcript.start && breakpoint <= transcript.end {
        Region::Intron
    } else {
        Region::Intergenic
    }
}
