//! Core data structures for fusionmodel.
//!
//! This module contains the transcript models the prediction engine consumes
//! and the small tagged types it produces.

use std::fmt;

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
}

impl Strand {
    /// Parse strand from a string ('+' or '-').
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Strand::Positive),
            "-" => Some(Strand::Negative),
            _ => None,
        }
    }

    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a breakpoint lands relative to a transcript model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Cds,
    FivePrimeUtr,
    ThreePrimeUtr,
    Exon,
    Intron,
    Intergenic,
}

impl Region {
    /// Parse region from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CDS" => Some(Region::Cds),
            "5UTR" => Some(Region::FivePrimeUtr),
            "3UTR" => Some(Region::ThreePrimeUtr),
            "exon" => Some(Region::Exon),
            "intron" => Some(Region::Intron),
            "intergenic" => Some(Region::Intergenic),
            _ => None,
        }
    }

    /// Convert region to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Cds => "CDS",
            Region::FivePrimeUtr => "5UTR",
            Region::ThreePrimeUtr => "3UTR",
            Region::Exon => "exon",
            Region::Intron => "intron",
            Region::Intergenic => "intergenic",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effect of the fusion junction on the reading frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpliceEffect {
    InFrame,
    InFrameWithMutation,
    OutOfFrame,
    NonCoding,
}

impl SpliceEffect {
    /// Parse an effect from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "in-frame" => Some(SpliceEffect::InFrame),
            "in-frame (with mutation)" => Some(SpliceEffect::InFrameWithMutation),
            "out-of-frame" => Some(SpliceEffect::OutOfFrame),
            "non-coding" => Some(SpliceEffect::NonCoding),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpliceEffect::InFrame => "in-frame",
            SpliceEffect::InFrameWithMutation => "in-frame (with mutation)",
            SpliceEffect::OutOfFrame => "out-of-frame",
            SpliceEffect::NonCoding => "non-coding",
        }
    }

    /// Whether translation continues in frame across the junction.
    pub fn is_in_frame(&self) -> bool {
        matches!(
            self,
            SpliceEffect::InFrame | SpliceEffect::InFrameWithMutation
        )
    }
}

impl fmt::Display for SpliceEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 1-based inclusive genomic interval (exon or CDS segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Create a new interval with start and end coordinates.
    pub fn new(start: i64, end: i64) -> Self {
        Interval { start, end }
    }

    /// Get interval length.
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Whether `pos` lies inside the interval (both ends inclusive).
    pub fn contains(&self, pos: i64) -> bool {
        pos >= self.start && pos <= self.end
    }
}

/// A transcript model with its exon and CDS structure and sequences.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub transcript_id: String,
    pub transcript_name: String,
    pub gene_name: String,
    pub protein_id: String,
    pub contig: String,
    pub strand: Strand,
    pub exons: Vec<Interval>,
    /// Coding segments, sorted by genomic start like `exons`.
    pub cds: Vec<Interval>,
    /// Mature (spliced) transcript sequence in transcription orientation.
    pub sequence: String,
    pub coding_sequence: String,
    pub five_prime_utr_sequence: String,
    pub is_complete: bool,
    pub contains_start_codon: bool,
    pub contains_stop_codon: bool,
    /// Minimum start coordinate (initialized to i64::MAX).
    pub start: i64,
    /// Maximum end coordinate (initialized to 0).
    pub end: i64,
}

impl Transcript {
    /// Create a new transcript with the given ID on a contig and strand.
    pub fn new(transcript_id: String, contig: String, strand: Strand) -> Self {
        Transcript {
            transcript_name: transcript_id.clone(),
            transcript_id,
            gene_name: String::new(),
            protein_id: String::new(),
            contig,
            strand,
            exons: Vec::new(),
            cds: Vec::new(),
            sequence: String::new(),
            coding_sequence: String::new(),
            five_prime_utr_sequence: String::new(),
            is_complete: false,
            contains_start_codon: false,
            contains_stop_codon: false,
            start: i64::MAX,
            end: 0,
        }
    }

    /// Add an exon to this transcript.
    pub fn add_exon(&mut self, exon: Interval) {
        self.exons.push(exon);
    }

    /// Add a coding segment to this transcript.
    pub fn add_cds(&mut self, cds: Interval) {
        self.cds.push(cds);
    }

    /// Calculate transcript boundaries from exon coordinates.
    pub fn calculate_size(&mut self) {
        for exon in &self.exons {
            if exon.start < self.start {
                self.start = exon.start;
            }
            if exon.end > self.end {
                self.end = exon.end;
            }
        }
    }

    /// Sort exon and CDS intervals by genomic start, regardless of strand.
    pub fn sort_features(&mut self) {
        self.exons.sort_by_key(|e| e.start);
        self.cds.sort_by_key(|c| c.start);
    }

    /// Whether `[start, end]` on `contig` lies within the transcript span.
    pub fn contains(&self, contig: &str, start: i64, end: i64) -> bool {
        self.contig == contig && start >= self.start && end <= self.end
    }

    pub fn five_prime_utr_length(&self) -> usize {
        self.five_prime_utr_sequence.len()
    }

    /// Total CDS length summed over the coding segments.
    pub fn cds_length(&self) -> i64 {
        self.cds.iter().map(Interval::length).sum()
    }
}

/// A gene containing transcripts.
#[derive(Debug, Clone)]
pub struct Gene {
    pub gene_id: String,
    pub gene_name: String,
    pub contig: String,
    pub strand: Strand,
    pub transcripts: Vec<Transcript>,
    /// Minimum start coordinate (initialized to i64::MAX).
    pub start: i64,
    /// Maximum end coordinate (initialized to 0).
    pub end: i64,
}

impl Gene {
    /// Create a new gene with the given ID and strand.
    pub fn new(gene_id: String, gene_name: String, contig: String, strand: Strand) -> Self {
        Gene {
            gene_id,
            gene_name,
            contig,
            strand,
            transcripts: Vec::new(),
            start: i64::MAX,
            end: 0,
        }
    }

    /// Add a transcript to this gene.
    pub fn add_transcript(&mut self, transcript: Transcript) {
        self.transcripts.push(transcript);
    }

    /// Calculate gene boundaries from transcript coordinates.
    pub fn calculate_size(&mut self) {
        for transcript in &self.transcripts {
            if transcript.start < self.start {
                self.start = transcript.start;
            }
            if transcript.end > self.end {
                self.end = transcript.end;
            }
        }
    }

    /// Whether a genomic position falls inside the gene span.
    pub fn contains(&self, pos: i64) -> bool {
        pos >= self.start && pos <= self.end
    }
}

/// A protein domain annotation in residue coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub accession: String,
    /// Human-readable name, or the accession when no name is known.
    pub label: String,
    pub start: i64,
    pub end: i64,
}

impl DomainRecord {
    pub fn new(accession: String, label: String, start: i64, end: i64) -> Self {
        DomainRecord {
            accession,
            label,
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parsing() {
        assert_eq!(Strand::from_str("+"), Some(Strand::Positive));
        assert_eq!(Strand::from_str("-"), Some(Strand::Negative));
        assert_eq!(Strand::from_str("."), None);
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!(Region::from_str("CDS"), Some(Region::Cds));
        assert_eq!(Region::from_str("5UTR"), Some(Region::FivePrimeUtr));
        assert_eq!(Region::from_str("intergenic"), Some(Region::Intergenic));
        assert_eq!(Region::from_str("INVALID"), None);
    }

    #[test]
    fn test_effect_round_trip_names() {
        for effect in [
            SpliceEffect::InFrame,
            SpliceEffect::InFrameWithMutation,
            SpliceEffect::OutOfFrame,
            SpliceEffect::NonCoding,
        ] {
            assert_eq!(SpliceEffect::from_str(effect.as_str()), Some(effect));
        }
        assert!(SpliceEffect::InFrameWithMutation.is_in_frame());
        assert!(!SpliceEffect::OutOfFrame.is_in_frame());
    }

    #[test]
    fn test_interval_length_and_contains() {
        let interval = Interval::new(100, 200);
        assert_eq!(interval.length(), 101);
        assert!(interval.contains(100));
        assert!(interval.contains(200));
        assert!(!interval.contains(201));
    }

    #[test]
    fn test_transcript_size_and_contains() {
        let mut transcript =
            Transcript::new("T1".to_string(), "chr1".to_string(), Strand::Positive);
        transcript.add_exon(Interval::new(500, 600));
        transcript.add_exon(Interval::new(100, 200));
        transcript.calculate_size();
        transcript.sort_features();

        assert_eq!(transcript.start, 100);
        assert_eq!(transcript.end, 600);
        assert_eq!(transcript.exons[0].start, 100);
        assert!(transcript.contains("chr1", 300, 300));
        assert!(!transcript.contains("chr2", 300, 300));
        assert!(!transcript.contains("chr1", 601, 601));
    }

    #[test]
    fn test_gene_calculate_size() {
        let mut gene = Gene::new(
            "G1".to_string(),
            "ABC".to_string(),
            "chr1".to_string(),
            Strand::Negative,
        );
        let mut t1 = Transcript::new("T1".to_string(), "chr1".to_string(), Strand::Negative);
        t1.add_exon(Interval::new(100, 300));
        t1.calculate_size();
        let mut t2 = Transcript::new("T2".to_string(), "chr1".to_string(), Strand::Negative);
        t2.add_exon(Interval::new(250, 900));
        t2.calculate_size();
        gene.add_transcript(t1);
        gene.add_transcript(t2);
        gene.calculate_size();

        assert_eq!(gene.start, 100);
        assert_eq!(gene.end, 900);
        assert!(gene.contains(900));
        assert!(!gene.contains(99));
    }
}
