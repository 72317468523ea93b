//! Writers for predicted fusion sequences, domains and summaries.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::fusion::{Fusion, FusionTranscript};

/// Residues or bases per FASTA sequence line.
const FASTA_LINE_WIDTH: usize = 60;

/// Write one FASTA record, wrapping the sequence.
pub fn write_fasta_record<W: Write>(
    writer: &mut W,
    id: &str,
    description: &str,
    sequence: &str,
) -> std::io::Result<()> {
    writeln!(writer, ">{} {}", id, description)?;
    for line in sequence.as_bytes().chunks(FASTA_LINE_WIDTH) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Write `cdna.fa`, `cds.fa` and `protein.fa` for a fusion into `out_dir`.
///
/// Every fusion transcript contributes its chimeric cDNA; only those with
/// coding potential contribute a CDS and a protein.
pub fn write_sequences(out_dir: &Path, fusion: &Fusion) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let mut cdna = create(&out_dir.join("cdna.fa"))?;
    let mut cds = create(&out_dir.join("cds.fa"))?;
    let mut protein = create(&out_dir.join("protein.fa"))?;

    for transcript in fusion.transcripts.values() {
        write_fasta_record(
            &mut cdna,
            &transcript.name,
            &transcript.cdna_description(),
            &transcript.cdna,
        )?;

        if !transcript.has_coding_potential() {
            continue;
        }
        write_fasta_record(
            &mut cds,
            &transcript.name,
            &transcript.cds_description(),
            &transcript.cds,
        )?;
        write_fasta_record(
            &mut protein,
            &transcript.protein_names,
            &transcript.protein_description(),
            &transcript.protein,
        )?;
    }

    cdna.flush()?;
    cds.flush()?;
    protein.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct DomainRow<'a> {
    #[serde(rename = "Gene")]
    gene: &'a str,
    transcript: &'a str,
    domain: &'a str,
    protein_start: i64,
    protein_end: i64,
}

/// Write the projected domains of one annotation track as CSV.
pub fn write_domains_csv(path: &Path, fusion: &Fusion, track: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for transcript in fusion.transcripts.values() {
        let Some(domains) = transcript.domains.get(track) else {
            continue;
        };
        for domain in domains {
            writer.serialize(DomainRow {
                gene: &fusion.name,
                transcript: &transcript.name,
                domain: &domain.label,
                protein_start: domain.start,
                protein_end: domain.end,
            })?;
            rows += 1;
        }
    }

    // serialize() only emits the header alongside the first row
    if rows == 0 {
        writer.write_record(["Gene", "transcript", "domain", "protein_start", "protein_end"])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryRow<'a> {
    transcripts: &'a str,
    genes: &'a str,
    #[serde(rename = "Region5p")]
    region_5prime: &'static str,
    #[serde(rename = "Region3p")]
    region_3prime: &'static str,
    effect: &'static str,
    protein_junction: usize,
    protein_length: usize,
    molecular_weight: String,
    note: &'static str,
}

impl<'a> SummaryRow<'a> {
    fn new(transcript: &'a FusionTranscript) -> Self {
        SummaryRow {
            transcripts: &transcript.name,
            genes: &transcript.gene_names,
            region_5prime: transcript.region_5prime.as_str(),
            region_3prime: transcript.region_3prime.as_str(),
            effect: transcript.effect.as_str(),
            protein_junction: transcript.junction.protein_5prime,
            protein_length: transcript.protein_length,
            molecular_weight: format!("{:.3}", transcript.molecular_weight),
            note: transcript
                .non_coding_reason
                .map(|r| r.as_str())
                .unwrap_or(""),
        }
    }
}

/// Write one tab-separated summary line per fusion transcript.
pub fn write_summary(path: &Path, fusion: &Fusion) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;
    if fusion.transcripts.is_empty() {
        writer.write_record([
            "Transcripts",
            "Genes",
            "Region5p",
            "Region3p",
            "Effect",
            "ProteinJunction",
            "ProteinLength",
            "MolecularWeight",
            "Note",
        ])?;
    }
    for transcript in fusion.transcripts.values() {
        writer.serialize(SummaryRow::new(transcript))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fasta_wrapping() {
        let mut buf = Vec::new();
        let seq = "A".repeat(130);
        write_fasta_record(&mut buf, "T1-T2", "length=130", &seq).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ">T1-T2 length=130");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 60);
        assert_eq!(lines[3].len(), 10);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_fasta_empty_sequence() {
        let mut buf = Vec::new();
        write_fasta_record(&mut buf, "x", "length=0", "").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ">x length=0\n");
    }
}
