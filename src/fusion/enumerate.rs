//! Enumeration of fusion transcripts for a pair of genes.

use indexmap::IndexMap;
use log::{debug, info};
use rayon::prelude::*;

use crate::config::Config;
use crate::error::{FusionError, Result};
use crate::fusion::transcript::FusionTranscript;
use crate::provider::{DomainProvider, GenomeProvider};
use crate::types::{Gene, Transcript};

/// A resolved gene and the breakpoint at which it is cut.
#[derive(Debug, Clone, Copy)]
pub struct GeneRef<'a> {
    pub gene: &'a Gene,
    pub breakpoint: i64,
}

impl<'a> GeneRef<'a> {
    /// Resolve a gene by identifier or symbol and check the breakpoint lies
    /// within it.
    pub fn new<G: GenomeProvider + ?Sized>(
        provider: &'a G,
        name: &str,
        breakpoint: i64,
    ) -> Result<Self> {
        let gene = provider.resolve_gene(name)?;
        Self::from_gene(gene, breakpoint)
    }

    /// Wrap an already resolved gene.
    pub fn from_gene(gene: &'a Gene, breakpoint: i64) -> Result<Self> {
        if !gene.contains(breakpoint) {
            return Err(FusionError::BreakpointOutOfRange {
                gene: gene.gene_name.clone(),
                contig: gene.contig.clone(),
                position: breakpoint,
                start: gene.start,
                end: gene.end,
            });
        }
        Ok(GeneRef { gene, breakpoint })
    }

    /// Transcripts whose span contains the breakpoint, optionally restricted
    /// to an allow-list of transcript identifiers.
    fn candidate_transcripts(&self, allowed: Option<&[String]>) -> Vec<&'a Transcript> {
        self.gene
            .transcripts
            .iter()
            .filter(|t| allowed.map_or(true, |ids| ids.iter().any(|id| *id == t.transcript_id)))
            .filter(|t| {
                let inside = t.contains(&t.contig, self.breakpoint, self.breakpoint);
                if !inside {
                    debug!(
                        "Skipping {}: breakpoint {} outside {}-{}",
                        t.transcript_id, self.breakpoint, t.start, t.end
                    );
                }
                inside
            })
            .collect()
    }
}

/// Restricts enumeration to chosen transcripts of either gene.
#[derive(Debug, Clone, Default)]
pub struct TranscriptFilter {
    pub transcripts_5prime: Option<Vec<String>>,
    pub transcripts_3prime: Option<Vec<String>>,
}

/// Every predicted fusion transcript between two genes.
#[derive(Debug)]
pub struct Fusion<'a> {
    /// `G1-G2` gene names.
    pub name: String,
    pub gene_5prime: GeneRef<'a>,
    pub gene_3prime: GeneRef<'a>,
    /// Fusion transcripts keyed by `T1-T2`, in 5' x 3' transcript order.
    pub transcripts: IndexMap<String, FusionTranscript<'a>>,
}

impl<'a> Fusion<'a> {
    /// Build one fusion transcript per (5' transcript, 3' transcript) pair
    /// whose spans contain their breakpoints.
    ///
    /// Pairs are predicted in parallel; the result keeps pair order.
    pub fn new<P: DomainProvider + ?Sized>(
        gene_5prime: GeneRef<'a>,
        gene_3prime: GeneRef<'a>,
        provider: &P,
        config: &Config,
        filter: &TranscriptFilter,
    ) -> Self {
        let name = format!(
            "{}-{}",
            gene_5prime.gene.gene_name, gene_3prime.gene.gene_name
        );

        let candidates_5prime =
            gene_5prime.candidate_transcripts(filter.transcripts_5prime.as_deref());
        let candidates_3prime =
            gene_3prime.candidate_transcripts(filter.transcripts_3prime.as_deref());

        let pairs: Vec<(&'a Transcript, &'a Transcript)> = candidates_5prime
            .iter()
            .flat_map(|&t1| candidates_3prime.iter().map(move |&t2| (t1, t2)))
            .collect();

        info!("{}: predicting {} transcript combinations", name, pairs.len());

        let predicted: Vec<FusionTranscript<'a>> = pairs
            .par_iter()
            .map(|&(t1, t2)| {
                FusionTranscript::new(
                    t1,
                    t2,
                    gene_5prime.breakpoint,
                    gene_3prime.breakpoint,
                    provider,
                    config,
                )
            })
            .collect();

        let transcripts = predicted
            .into_iter()
            .map(|fusion| (fusion.name.clone(), fusion))
            .collect();

        Fusion {
            name,
            gene_5prime,
            gene_3prime,
            transcripts,
        }
    }

    /// Fusion transcripts with a predicted protein.
    pub fn coding_transcripts(&self) -> impl Iterator<Item = &FusionTranscript<'a>> {
        self.transcripts.values().filter(|t| t.has_coding_potential())
    }
}
