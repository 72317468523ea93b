//! Unit tests for breakpoint projection, frame classification and domain
//! re-anchoring across the public API.
//!
//! The end-to-end fixtures use a 5' gene on the positive strand with a single
//! CDS interval 100-400 and a 3' gene on the negative strand with a single CDS
//! interval 500-800.

use fusionmodel::config::Config;
use fusionmodel::domains::{project_3prime, project_5prime};
use fusionmodel::fusion::{
    Fusion, FusionTranscript, GeneRef, NonCodingReason, PipelineState, TranscriptFilter,
};
use fusionmodel::projection::{classify, classify_region, project};
use fusionmodel::provider::{AnnotationBundle, DomainAnnotation, GenomeProvider};
use fusionmodel::sequence::{splice, translate};
use fusionmodel::types::{DomainRecord, Gene, Interval, Region, SpliceEffect, Strand, Transcript};
use fusionmodel::FusionError;

// -------------------------------------------------------------------------
// Helper functions
// -------------------------------------------------------------------------

/// 301 bases: ATG, 99 alanine codons, one trailing base.
fn cds_5prime() -> String {
    format!("ATG{}G", "GCC".repeat(99))
}

/// 301 bases: one leading base, 99 alanine codons, a TAA stop.
fn cds_3prime() -> String {
    format!("A{}TAA", "GCC".repeat(99))
}

fn coding_transcript(
    id: &str,
    contig: &str,
    strand: Strand,
    start: i64,
    end: i64,
    sequence: String,
) -> Transcript {
    let mut t = Transcript::new(id.to_string(), contig.to_string(), strand);
    t.add_exon(Interval::new(start, end));
    t.add_cds(Interval::new(start, end));
    t.protein_id = format!("P{}", id);
    t.coding_sequence = sequence.clone();
    t.sequence = sequence;
    t.is_complete = true;
    t.contains_start_codon = true;
    t.contains_stop_codon = true;
    t.calculate_size();
    t
}

fn gene_with(id: &str, name: &str, transcript: Transcript) -> Gene {
    let mut gene = Gene::new(
        id.to_string(),
        name.to_string(),
        transcript.contig.clone(),
        transcript.strand,
    );
    let mut transcript = transcript;
    transcript.gene_name = name.to_string();
    gene.add_transcript(transcript);
    gene.calculate_size();
    gene
}

fn fixture_bundle() -> AnnotationBundle {
    let mut bundle = AnnotationBundle::new();
    bundle.add_gene(gene_with(
        "ENSG_A",
        "GENEA",
        coding_transcript("TA1", "chr1", Strand::Positive, 100, 400, cds_5prime()),
    ));
    bundle.add_gene(gene_with(
        "ENSG_B",
        "GENEB",
        coding_transcript("TB1", "chr2", Strand::Negative, 500, 800, cds_3prime()),
    ));

    let parent_5prime = [("PF_K", 10, 40), ("PF_S", 45, 60), ("PF_T", 46, 70), ("PF_L", 60, 90)];
    for (acc, start, end) in parent_5prime {
        bundle.add_domain("TA1", "pfam", DomainAnnotation::new(acc.to_string(), start, end));
    }
    for (acc, start, end) in [("PF_E", 10, 40), ("PF_F", 40, 60), ("PF_G", 70, 90)] {
        bundle.add_domain("TB1", "pfam", DomainAnnotation::new(acc.to_string(), start, end));
    }
    bundle.add_domain_name("PF_K".to_string(), "Kinase".to_string());
    bundle.add_domain_name("PF_F".to_string(), "Fibronectin".to_string());
    bundle
}

fn domain(label: &str, start: i64, end: i64) -> DomainRecord {
    DomainRecord::new(label.to_string(), label.to_string(), start, end)
}

// -------------------------------------------------------------------------
// 1. Coordinate projection
// -------------------------------------------------------------------------

mod test_projection {
    use super::*;

    #[test]
    fn test_single_interval_both_strands() {
        let t1 = coding_transcript("A", "chr1", Strand::Positive, 100, 400, cds_5prime());
        let t2 = coding_transcript("B", "chr2", Strand::Negative, 500, 800, cds_3prime());

        assert_eq!(project(&t1, 250).cds_offset, 151);
        assert_eq!(project(&t2, 650).cds_offset, 151);
        assert_eq!(project(&t1, 250).cdna_offset, 151);
    }

    #[test]
    fn test_interval_boundaries() {
        let t1 = coding_transcript("A", "chr1", Strand::Positive, 100, 400, cds_5prime());
        let t2 = coding_transcript("B", "chr2", Strand::Negative, 500, 800, cds_3prime());

        // First transcribed base counts nothing, last counts the whole interval
        assert_eq!(project(&t1, 100).cds_offset, 0);
        assert_eq!(project(&t1, 400).cds_offset, 301);
        assert_eq!(project(&t2, 800).cds_offset, 0);
        assert_eq!(project(&t2, 500).cds_offset, 301);
    }

    fn two_exon_coding(id: &str, first: &str, second: &str) -> Transcript {
        let mut t = Transcript::new(id.to_string(), "chr1".to_string(), Strand::Positive);
        for (start, end) in [(100, 111), (200, 211)] {
            t.add_exon(Interval::new(start, end));
            t.add_cds(Interval::new(start, end));
        }
        t.coding_sequence = format!("{}{}", first, second);
        t.sequence = t.coding_sequence.clone();
        t.is_complete = true;
        t.contains_start_codon = true;
        t.contains_stop_codon = true;
        t.calculate_size();
        t
    }

    #[test]
    fn test_exon_start_junction_keeps_frame() {
        let t1 = two_exon_coding("A", "ATGGCCGCCGCC", "GCCGCCGCCGCC");
        let t2 = two_exon_coding("B", "GGGGGGGGGGGG", "TGGTGGTGGTAA");

        // 5' cut at the end of exon 1, 3' cut at the start of exon 2
        assert_eq!(project(&t1, 111).cds_offset, 12);
        assert_eq!(project(&t2, 200).cds_offset, 12);

        let bundle = AnnotationBundle::new();
        let fusion = FusionTranscript::new(&t1, &t2, 111, 200, &bundle, &Config::new());
        assert_eq!(fusion.effect, SpliceEffect::InFrame);
        assert_eq!(fusion.cds, "ATGGCCGCCGCCTGGTGGTGGTAA");
        assert_eq!(fusion.protein, "MAAAWWW");
    }

    #[test]
    fn test_multi_exon_negative_strand() {
        // Transcription runs 900 -> 100 through exons 700-900, 400-500, 100-200
        let mut t = Transcript::new("T".to_string(), "chr1".to_string(), Strand::Negative);
        t.add_exon(Interval::new(100, 200));
        t.add_exon(Interval::new(400, 500));
        t.add_exon(Interval::new(700, 900));
        t.add_cds(Interval::new(150, 200));
        t.add_cds(Interval::new(400, 500));
        t.add_cds(Interval::new(700, 750));
        t.calculate_size();

        let p = project(&t, 450);
        assert_eq!(p.cdna_offset, 201 + 51);
        assert_eq!(p.cds_offset, 51 + 51);

        // Intronic breakpoint: everything transcribed before it
        let p = project(&t, 600);
        assert_eq!(p.cdna_offset, 201);
        assert_eq!(p.cds_offset, 51);
        assert_eq!(classify_region(&t, 600, p.cdna_offset), Region::Intron);
    }

    #[test]
    fn test_breakpoint_before_cds_has_zero_cds_offset() {
        let mut t = Transcript::new("T".to_string(), "chr1".to_string(), Strand::Positive);
        t.add_exon(Interval::new(100, 400));
        t.add_cds(Interval::new(200, 300));
        t.five_prime_utr_sequence = "A".repeat(100);
        t.is_complete = true;
        t.calculate_size();

        let p = project(&t, 150);
        assert_eq!(p.cds_offset, 0);
        assert_eq!(classify_region(&t, 150, p.cdna_offset), Region::FivePrimeUtr);
    }
}

// -------------------------------------------------------------------------
// 2. Frame classification, splicing and translation
// -------------------------------------------------------------------------

mod test_frame_and_sequence {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify(3, 6), SpliceEffect::InFrame);
        assert_eq!(classify(4, 5), SpliceEffect::InFrameWithMutation);
        assert_eq!(classify(4, 4), SpliceEffect::OutOfFrame);
    }

    #[test]
    fn test_splice_round_trip() {
        let a = cds_5prime();
        let b = cds_3prime();
        let chimera = splice(&a, 151, &b, 149, None);

        assert_eq!(&chimera[..151], &a[..151]);
        assert_eq!(&chimera[151..], &b[149..]);
        assert_eq!(chimera.len(), 151 + 152);
    }

    #[test]
    fn test_translation_halts_at_stop() {
        let t = translate("ATGGCCTGAGCCGCC", None);
        assert_eq!(t.protein, "MA");
        assert!(!t.protein.contains('*'));

        let chimera = splice(&cds_5prime(), 151, &cds_3prime(), 149, None);
        let t = translate(&chimera, None);
        // 303 bases = 101 codons, the last one a stop
        assert_eq!(t.length, chimera.len() / 3 - 1);
    }
}

// -------------------------------------------------------------------------
// 3. Domain projection
// -------------------------------------------------------------------------

mod test_domains {
    use super::*;

    #[test]
    fn test_5prime_domain_past_junction_dropped() {
        assert!(project_5prime(&[domain("d", 51, 60)], 50, 5).is_empty());
    }

    #[test]
    fn test_5prime_overlap_threshold() {
        let min = 5;
        // Retains min - 1 residues
        assert!(project_5prime(&[domain("d", 50 - (min - 1), 80)], 50, min).is_empty());
        // Retains exactly min residues
        let kept = project_5prime(&[domain("d", 50 - min, 80)], 50, min);
        assert_eq!(kept, vec![domain("d", 45, 50)]);
    }

    #[test]
    fn test_3prime_null_shift_identity() {
        let domains = vec![domain("a", 3, 9), domain("b", 12, 30)];
        assert_eq!(project_3prime(&domains, 0, 0), domains);
    }

    /// The minimum retained length applies only to 5' domains. Kept as is
    /// until the 3' behaviour is settled.
    #[test]
    fn test_min_length_rule_is_asymmetric() {
        // One residue past the junction on the 3' side survives
        let kept = project_3prime(&[domain("d", 10, 49)], 50, 49);
        assert_eq!(kept, vec![domain("d", 50, 50)]);
        // One residue before the junction on the 5' side does not
        assert!(project_5prime(&[domain("d", 49, 80)], 50, 5).is_empty());
    }
}

// -------------------------------------------------------------------------
// 4. End-to-end fusion prediction
// -------------------------------------------------------------------------

mod test_fusion {
    use super::*;

    #[test]
    fn test_out_of_frame_scenario() {
        let bundle = fixture_bundle();
        let g5 = GeneRef::new(&bundle, "GENEA", 250).unwrap();
        let g3 = GeneRef::new(&bundle, "GENEB", 650).unwrap();
        let fusion = Fusion::new(g5, g3, &bundle, &Config::new(), &TranscriptFilter::default());

        assert_eq!(fusion.name, "GENEA-GENEB");
        let t = &fusion.transcripts["TA1-TB1"];
        assert_eq!(t.junction.cds_5prime, 151);
        assert_eq!(t.junction.cds_3prime, 151);
        // 151 % 3 = 1 and 150 % 3 = 0 do not complete a codon
        assert_eq!(t.effect, SpliceEffect::OutOfFrame);
        assert_eq!(t.state, PipelineState::OutOfFrame);
        assert!(t.domains.is_empty());
        assert_eq!(fusion.coding_transcripts().count(), 0);
    }

    #[test]
    fn test_in_frame_with_mutation_scenario() {
        let bundle = fixture_bundle();
        let g5 = GeneRef::new(&bundle, "ENSG_A", 250).unwrap();
        let g3 = GeneRef::new(&bundle, "ENSG_B", 652).unwrap();
        let fusion = Fusion::new(g5, g3, &bundle, &Config::new(), &TranscriptFilter::default());
        let t = &fusion.transcripts["TA1-TB1"];

        assert_eq!(t.region_5prime, Region::Cds);
        assert_eq!(t.region_3prime, Region::Cds);
        assert_eq!(t.effect, SpliceEffect::InFrameWithMutation);
        assert_eq!(t.junction.protein_5prime, 50);
        assert_eq!(t.junction.protein_3prime, 49);
        assert_eq!(t.cds_length, 303);
        assert_eq!(t.protein_length, 303 / 3 - 1);
        assert_eq!(t.protein, format!("M{}", "A".repeat(99)));
        assert!(t.molecular_weight > 0.0);
        assert_eq!(t.protein_names, "PTA1-PTB1");

        let expected = vec![
            DomainRecord::new("PF_K".into(), "Kinase".into(), 10, 40),
            DomainRecord::new("PF_S".into(), "PF_S".into(), 45, 50),
            DomainRecord::new("PF_F".into(), "Fibronectin".into(), 50, 61),
            DomainRecord::new("PF_G".into(), "PF_G".into(), 71, 91),
        ];
        assert_eq!(t.domains["pfam"], expected);
    }

    #[test]
    fn test_missing_start_codon_is_recorded() {
        let mut t1 = coding_transcript("A", "chr1", Strand::Positive, 100, 400, cds_5prime());
        t1.contains_start_codon = false;
        let t2 = coding_transcript("B", "chr2", Strand::Negative, 500, 800, cds_3prime());
        let bundle = fixture_bundle();
        let fusion = FusionTranscript::new(&t1, &t2, 250, 652, &bundle, &Config::new());

        assert!(!fusion.has_coding_potential());
        assert!(!fusion.has_start_codon_5prime);
        assert_eq!(fusion.non_coding_reason, Some(NonCodingReason::MissingCodonFlags));
        assert_eq!(fusion.effect, SpliceEffect::NonCoding);
        assert_eq!(fusion.cdna.len(), 151 + 152);
    }

    #[test]
    fn test_breakpoint_out_of_gene() {
        let bundle = fixture_bundle();
        let err = GeneRef::new(&bundle, "GENEA", 401).unwrap_err();
        assert!(matches!(err, FusionError::BreakpointOutOfRange { position: 401, .. }));
        assert!(!err.is_invalid_identifier());
    }

    #[test]
    fn test_unknown_gene() {
        let bundle = fixture_bundle();
        let err = GeneRef::new(&bundle, "NOPE", 1).unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(bundle.resolve_gene("GENEB").is_ok());
    }

    #[test]
    fn test_transcript_filter() {
        let bundle = fixture_bundle();
        let g5 = GeneRef::new(&bundle, "GENEA", 250).unwrap();
        let g3 = GeneRef::new(&bundle, "GENEB", 652).unwrap();
        let filter = TranscriptFilter {
            transcripts_5prime: Some(vec!["TA9".to_string()]),
            transcripts_3prime: None,
        };
        let fusion = Fusion::new(g5, g3, &bundle, &Config::new(), &filter);
        assert!(fusion.transcripts.is_empty());
    }
}

// -------------------------------------------------------------------------
// 5. Output files
// -------------------------------------------------------------------------

mod test_output {
    use super::*;
    use fusionmodel::output::{write_domains_csv, write_summary};

    #[test]
    fn test_domain_labels_with_delimiters_are_quoted() {
        let mut bundle = fixture_bundle();
        bundle.add_domain_name("PF_K".to_string(), "Kinase, \"catalytic\"".to_string());
        let g5 = GeneRef::new(&bundle, "GENEA", 250).unwrap();
        let g3 = GeneRef::new(&bundle, "GENEB", 652).unwrap();
        let fusion = Fusion::new(g5, g3, &bundle, &Config::new(), &TranscriptFilter::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.csv");
        write_domains_csv(&path, &fusion, "pfam").unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header = reader.headers().unwrap().clone();
        assert_eq!(
            header.iter().collect::<Vec<_>>(),
            vec!["Gene", "transcript", "domain", "protein_start", "protein_end"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(&rows[0][2], "Kinase, \"catalytic\"");
        assert_eq!(&rows[0][3], "10");
    }

    #[test]
    fn test_empty_outputs_keep_headers() {
        let bundle = fixture_bundle();
        let g5 = GeneRef::new(&bundle, "GENEA", 250).unwrap();
        let g3 = GeneRef::new(&bundle, "GENEB", 652).unwrap();
        let filter = TranscriptFilter {
            transcripts_5prime: Some(vec!["TA9".to_string()]),
            transcripts_3prime: None,
        };
        let fusion = Fusion::new(g5, g3, &bundle, &Config::new(), &filter);

        let dir = tempfile::tempdir().unwrap();
        let domains = dir.path().join("domains.csv");
        let summary = dir.path().join("summary.tsv");
        write_domains_csv(&domains, &fusion, "pfam").unwrap();
        write_summary(&summary, &fusion).unwrap();

        assert_eq!(
            std::fs::read_to_string(domains).unwrap(),
            "Gene,transcript,domain,protein_start,protein_end\n"
        );
        assert!(std::fs::read_to_string(summary)
            .unwrap()
            .starts_with("Transcripts\tGenes\tRegion5p"));
    }
}
