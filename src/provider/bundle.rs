//! JSON annotation bundle with gzip support.
//!
//! A bundle carries gene models, per-transcript domain tracks and domain
//! names in one document:
//!
//! ```json
//! {
//!   "genes": [{"id": "G1", "name": "ABC", "contig": "chr1", "strand": "+",
//!              "transcripts": [{"id": "T1", "exons": [[100, 400]], ...}]}],
//!   "domains": {"T1": {"pfam": [["PF00001", 10, 40]]}},
//!   "domain_names": {"PF00001": "7tm_1"}
//! }
//! ```

use ahash::AHashMap;
use flate2::read::GzDecoder;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{FusionError, Result};
use crate::provider::{DomainAnnotation, DomainProvider, GenomeProvider};
use crate::types::{Gene, Interval, Strand, Transcript};

#[derive(Debug, Deserialize)]
struct BundleRecord {
    genes: Vec<GeneRecord>,
    #[serde(default)]
    domains: HashMap<String, HashMap<String, Vec<(String, i64, i64)>>>,
    #[serde(default)]
    domain_names: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct GeneRecord {
    id: String,
    name: String,
    contig: String,
    strand: String,
    transcripts: Vec<TranscriptRecord>,
}

#[derive(Debug, Deserialize)]
struct TranscriptRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    protein_id: String,
    exons: Vec<(i64, i64)>,
    #[serde(default)]
    cds: Vec<(i64, i64)>,
    sequence: String,
    #[serde(default)]
    coding_sequence: String,
    #[serde(default)]
    five_prime_utr_sequence: String,
    #[serde(default)]
    complete: bool,
    #[serde(default)]
    start_codon: bool,
    #[serde(default)]
    stop_codon: bool,
}

/// In-memory gene models and domain annotations.
#[derive(Debug, Default)]
pub struct AnnotationBundle {
    genes: Vec<Gene>,
    by_id: AHashMap<String, usize>,
    by_name: AHashMap<String, Vec<usize>>,
    /// transcript id -> track -> domains
    domains: AHashMap<String, AHashMap<String, Vec<DomainAnnotation>>>,
    domain_names: AHashMap<String, String>,
}

fn interval(contig: &str, id: &str, (start, end): (i64, i64)) -> Result<Interval> {
    if start > end || start < 1 {
        return Err(FusionError::InvalidAnnotation(format!(
            "transcript {} has invalid interval {}:{}-{}",
            id, contig, start, end
        )));
    }
    Ok(Interval::new(start, end))
}

/// Sequences are spliced by byte offset, so only ASCII letters are accepted.
fn nucleotides(id: &str, field: &str, seq: String) -> Result<String> {
    match seq.bytes().position(|b| !b.is_ascii_alphabetic()) {
        Some(pos) => Err(FusionError::InvalidAnnotation(format!(
            "transcript {} has a non-nucleotide character in {} at byte {}",
            id, field, pos
        ))),
        None => Ok(seq),
    }
}

fn build_gene(record: GeneRecord) -> Result<Gene> {
    let strand = Strand::from_str(&record.strand).ok_or_else(|| {
        FusionError::InvalidAnnotation(format!(
            "gene {} has invalid strand '{}'",
            record.id, record.strand
        ))
    })?;

    let mut gene = Gene::new(record.id, record.name, record.contig, strand);

    for tr in record.transcripts {
        if tr.exons.is_empty() {
            return Err(FusionError::InvalidAnnotation(format!(
                "transcript {} has no exons",
                tr.id
            )));
        }

        let mut transcript = Transcript::new(tr.id, gene.contig.clone(), strand);
        for exon in tr.exons {
            let exon = interval(&gene.contig, &transcript.transcript_id, exon)?;
            transcript.add_exon(exon);
        }
        for cds in tr.cds {
            let cds = interval(&gene.contig, &transcript.transcript_id, cds)?;
            transcript.add_cds(cds);
        }
        if let Some(name) = tr.name {
            transcript.transcript_name = name;
        }
        transcript.gene_name = gene.gene_name.clone();
        transcript.protein_id = tr.protein_id;
        let id = transcript.transcript_id.as_str();
        transcript.sequence = nucleotides(id, "sequence", tr.sequence)?;
        transcript.coding_sequence = nucleotides(id, "coding_sequence", tr.coding_sequence)?;
        transcript.five_prime_utr_sequence =
            nucleotides(id, "five_prime_utr_sequence", tr.five_prime_utr_sequence)?;
        transcript.is_complete = tr.complete;
        transcript.contains_start_codon = tr.start_codon;
        transcript.contains_stop_codon = tr.stop_codon;
        transcript.sort_features();
        transcript.calculate_size();

        gene.add_transcript(transcript);
    }

    gene.calculate_size();
    Ok(gene)
}

impl AnnotationBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a bundle from a JSON file.
    ///
    /// Supports both plain and gzip-compressed files.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        let reader: Box<dyn BufRead> = if path.to_string_lossy().ends_with(".gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Self::from_reader(reader)
    }

    /// Load a bundle from any reader yielding JSON.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let record: BundleRecord = serde_json::from_reader(reader)?;
        Self::from_record(record)
    }

    /// Load a bundle from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: BundleRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }

    fn from_record(record: BundleRecord) -> Result<Self> {
        let mut bundle = AnnotationBundle::new();

        for gene in record.genes {
            bundle.add_gene(build_gene(gene)?);
        }

        for (transcript_id, tracks) in record.domains {
            for (track, rows) in tracks {
                for (accession, start, end) in rows {
                    bundle.add_domain(
                        &transcript_id,
                        &track,
                        DomainAnnotation::new(accession, start, end),
                    );
                }
            }
        }

        for (accession, name) in record.domain_names {
            bundle.add_domain_name(accession, name);
        }

        debug!(
            "Loaded {} genes, domains for {} transcripts, {} domain names",
            bundle.genes.len(),
            bundle.domains.len(),
            bundle.domain_names.len()
        );
        Ok(bundle)
    }

    /// Add a gene, indexing it by identifier and symbol.
    pub fn add_gene(&mut self, gene: Gene) {
        let idx = self.genes.len();
        self.by_id.insert(gene.gene_id.clone(), idx);
        self.by_name
            .entry(gene.gene_name.clone())
            .or_default()
            .push(idx);
        self.genes.push(gene);
    }

    /// Attach a domain annotation to a transcript on a track.
    pub fn add_domain(&mut self, transcript_id: &str, track: &str, domain: DomainAnnotation) {
        self.domains
            .entry(transcript_id.to_string())
            .or_default()
            .entry(track.to_string())
            .or_default()
            .push(domain);
    }

    /// Register a human-readable name for a domain accession.
    pub fn add_domain_name(&mut self, accession: String, name: String) {
        self.domain_names.insert(accession, name);
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }
}

impl GenomeProvider for AnnotationBundle {
    fn resolve_gene(&self, name: &str) -> Result<&Gene> {
        if let Some(&idx) = self.by_id.get(name) {
            return Ok(&self.genes[idx]);
        }
        match self.by_name.get(name).map(Vec::as_slice) {
            Some([idx]) => Ok(&self.genes[*idx]),
            Some(matches) if matches.len() > 1 => Err(FusionError::AmbiguousGeneName {
                name: name.to_string(),
                count: matches.len(),
            }),
            _ => Err(FusionError::GeneNotFound {
                name: name.to_string(),
            }),
        }
    }
}

impl DomainProvider for AnnotationBundle {
    fn domains_for_transcript(&self, transcript_id: &str, track: &str) -> Vec<DomainAnnotation> {
        self.domains
            .get(transcript_id)
            .and_then(|tracks| tracks.get(track))
            .cloned()
            .unwrap_or_default()
    }

    fn resolve_domain_label(&self, accession: &str) -> Option<String> {
        self.domain_names.get(accession).cloned()
    }
}
