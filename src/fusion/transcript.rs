//! Prediction pipeline for a single fusion transcript.
//!
//! A [`FusionTranscript`] runs the whole pipeline once, in its constructor:
//!
//! ```text
//! Unclassified -> RegionClassified -> NonCoding
//!                                  -> CdsPending -> FrameClassified -> OutOfFrame
//!                                                                   -> InFrame
//! InFrame -> Assembled -> Translated -> DomainsProjected
//! ```
//!
//! Every terminal state other than `DomainsProjected` leaves the coding fields
//! at their defaults: empty sequences, zero length and no domains.

use indexmap::IndexMap;
use log::debug;

use crate::config::Config;
use crate::domains::{load_domains, project_3prime, project_5prime};
use crate::projection::{classify_region, junction, project};
use crate::provider::DomainProvider;
use crate::sequence::{fragments, splice, translate};
use crate::types::{DomainRecord, Region, SpliceEffect, Transcript};

/// Pipeline progress of a fusion transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Unclassified,
    RegionClassified,
    NonCoding,
    CdsPending,
    FrameClassified,
    OutOfFrame,
    InFrame,
    Assembled,
    Translated,
    DomainsProjected,
}

impl PipelineState {
    /// Whether the pipeline stops in this state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::NonCoding | PipelineState::OutOfFrame | PipelineState::DomainsProjected
        )
    }
}

/// Why a fusion transcript has no coding potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonCodingReason {
    /// At least one breakpoint lies outside the coding sequence.
    BreakpointOutsideCds,
    /// A parent transcript lacks a confirmed start or stop codon.
    MissingCodonFlags,
    /// The 3' fragment is not read in frame.
    OutOfFrame,
}

impl NonCodingReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NonCodingReason::BreakpointOutsideCds => "breakpoint outside CDS",
            NonCodingReason::MissingCodonFlags => "missing start/stop codon",
            NonCodingReason::OutOfFrame => "out-of-frame",
        }
    }
}

/// Junction positions on the 5' and 3' transcripts.
///
/// 5' offsets count retained bases/residues from the start; 3' offsets count
/// bases/residues skipped before the junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JunctionOffsets {
    pub cdna_5prime: usize,
    pub cdna_3prime: usize,
    pub cds_5prime: usize,
    pub cds_3prime: usize,
    pub protein_5prime: usize,
    pub protein_3prime: usize,
}

/// The predicted product of joining two transcripts at their breakpoints.
#[derive(Debug, Clone)]
pub struct FusionTranscript<'a> {
    pub transcript_5prime: &'a Transcript,
    pub transcript_3prime: &'a Transcript,
    pub breakpoint_5prime: i64,
    pub breakpoint_3prime: i64,

    /// `T1-T2` transcript identifiers.
    pub name: String,
    /// `G1-G2` gene names.
    pub gene_names: String,
    /// `P1-P2` protein identifiers.
    pub protein_names: String,

    pub state: PipelineState,
    pub effect: SpliceEffect,
    pub region_5prime: Region,
    pub region_3prime: Region,
    pub non_coding_reason: Option<NonCodingReason>,
    pub junction: JunctionOffsets,

    pub has_start_codon_5prime: bool,
    pub has_stop_codon_5prime: bool,
    pub has_start_codon_3prime: bool,
    pub has_stop_codon_3prime: bool,

    pub cdna: String,
    pub cds: String,
    /// Unmarked length of the chimeric CDS.
    pub cds_length: usize,
    pub protein: String,
    pub protein_length: usize,
    /// Kilodaltons.
    pub molecular_weight: f64,
    /// Nucleotide index of the junction marker in `cds`, when marking is on.
    pub marker_position: Option<usize>,
    /// Projected domains per annotation track.
    pub domains: IndexMap<String, Vec<DomainRecord>>,
}

impl<'a> FusionTranscript<'a> {
    /// Predict the fusion of `transcript_5prime` cut at `breakpoint_5prime` with
    /// `transcript_3prime` cut at `breakpoint_3prime`.
    pub fn new<P: DomainProvider + ?Sized>(
        transcript_5prime: &'a Transcript,
        transcript_3prime: &'a Transcript,
        breakpoint_5prime: i64,
        breakpoint_3prime: i64,
        provider: &P,
        config: &Config,
    ) -> Self {
        let mut fusion = FusionTranscript {
            transcript_5prime,
            transcript_3prime,
            breakpoint_5prime,
            breakpoint_3prime,
            name: format!(
                "{}-{}",
                transcript_5prime.transcript_id, transcript_3prime.transcript_id
            ),
            gene_names: format!(
                "{}-{}",
                transcript_5prime.gene_name, transcript_3prime.gene_name
            ),
            protein_names: format!(
                "{}-{}",
                transcript_5prime.protein_id, transcript_3prime.protein_id
            ),
            state: PipelineState::Unclassified,
            effect: SpliceEffect::NonCoding,
            region_5prime: Region::Intergenic,
            region_3prime: Region::Intergenic,
            non_coding_reason: None,
            junction: JunctionOffsets::default(),
            has_start_codon_5prime: transcript_5prime.contains_start_codon,
            has_stop_codon_5prime: transcript_5prime.contains_stop_codon,
            has_start_codon_3prime: transcript_3prime.contains_start_codon,
            has_stop_codon_3prime: transcript_3prime.contains_stop_codon,
            cdna: String::new(),
            cds: String::new(),
            cds_length: 0,
            protein: String::new(),
            protein_length: 0,
            molecular_weight: 0.0,
            marker_position: None,
            domains: IndexMap::new(),
        };
        fusion.predict_effect(provider, config);
        fusion
    }

    /// Whether a fusion protein was predicted.
    pub fn has_coding_potential(&self) -> bool {
        self.state == PipelineState::DomainsProjected
    }

    fn predict_effect<P: DomainProvider + ?Sized>(&mut self, provider: &P, config: &Config) {
        while !self.state.is_terminal() {
            self.state = match self.state {
                PipelineState::Unclassified => self.classify_regions(config),
                PipelineState::RegionClassified => self.check_coding_potential(),
                PipelineState::CdsPending => self.classify_frame(),
                PipelineState::FrameClassified => {
                    if self.effect.is_in_frame() {
                        PipelineState::InFrame
                    } else {
                        self.non_coding_reason = Some(NonCodingReason::OutOfFrame);
                        PipelineState::OutOfFrame
                    }
                }
                PipelineState::InFrame => self.assemble_cds(config),
                PipelineState::Assembled => self.translate_cds(config),
                PipelineState::Translated => self.annotate(provider, config),
                PipelineState::NonCoding
                | PipelineState::OutOfFrame
                | PipelineState::DomainsProjected => unreachable!("terminal state"),
            };
        }
        debug!(
            "{}: {} ({} / {})",
            self.name, self.effect, self.region_5prime, self.region_3prime
        );
    }

    /// Project both breakpoints, assemble the chimeric cDNA and tag regions.
    fn classify_regions(&mut self, config: &Config) -> PipelineState {
        let p5 = project(self.transcript_5prime, self.breakpoint_5prime);
        let p3 = project(self.transcript_3prime, self.breakpoint_3prime);

        self.junction.cdna_5prime = p5.cdna_offset;
        self.junction.cdna_3prime = p3.cdna_offset;
        self.junction.cds_5prime = p5.cds_offset;
        self.junction.cds_3prime = p3.cds_offset;

        self.cdna = splice(
            &self.transcript_5prime.sequence,
            p5.cdna_offset,
            &self.transcript_3prime.sequence,
            p3.cdna_offset,
            config.marker(),
        );

        self.region_5prime =
            classify_region(self.transcript_5prime, self.breakpoint_5prime, p5.cdna_offset);
        self.region_3prime =
            classify_region(self.transcript_3prime, self.breakpoint_3prime, p3.cdna_offset);

        PipelineState::RegionClassified
    }

    fn check_coding_potential(&mut self) -> PipelineState {
        let reason = if self.region_5prime != Region::Cds || self.region_3prime != Region::Cds {
            Some(NonCodingReason::BreakpointOutsideCds)
        } else if !(self.has_start_codon_5prime
            && self.has_stop_codon_5prime
            && self.has_start_codon_3prime
            && self.has_stop_codon_3prime)
        {
            Some(NonCodingReason::MissingCodonFlags)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                self.non_coding_reason = Some(reason);
                PipelineState::NonCoding
            }
            None => PipelineState::CdsPending,
        }
    }

    fn classify_frame(&mut self) -> PipelineState {
        let (cds_5prime, cds_3prime) = fragments(
            &self.transcript_5prime.coding_sequence,
            self.junction.cds_5prime,
            &self.transcript_3prime.coding_sequence,
            self.junction.cds_3prime,
        );

        let frame = junction(
            self.junction.cds_5prime,
            self.junction.cds_3prime,
            cds_5prime.len(),
            cds_3prime.len(),
        );
        self.effect = frame.effect;
        self.junction.protein_5prime = frame.protein_offset_5prime;
        self.junction.protein_3prime = frame.protein_offset_3prime;
        self.cds_length = cds_5prime.len() + cds_3prime.len();

        PipelineState::FrameClassified
    }

    fn assemble_cds(&mut self, config: &Config) -> PipelineState {
        self.cds = splice(
            &self.transcript_5prime.coding_sequence,
            self.junction.cds_5prime,
            &self.transcript_3prime.coding_sequence,
            self.junction.cds_3prime,
            config.marker(),
        );
        PipelineState::Assembled
    }

    fn translate_cds(&mut self, config: &Config) -> PipelineState {
        let translation = translate(&self.cds, config.marker());
        self.protein = translation.protein;
        self.protein_length = translation.length;
        self.molecular_weight = translation.molecular_weight;
        self.marker_position = translation.marker_position;
        PipelineState::Translated
    }

    /// Project each configured track's parent domains onto the fusion protein.
    fn annotate<P: DomainProvider + ?Sized>(
        &mut self,
        provider: &P,
        config: &Config,
    ) -> PipelineState {
        let j5 = self.junction.protein_5prime as i64;
        let j3 = self.junction.protein_3prime as i64;

        for track in &config.tracks {
            let domains_5prime =
                load_domains(provider, &self.transcript_5prime.transcript_id, track);
            let domains_3prime =
                load_domains(provider, &self.transcript_3prime.transcript_id, track);

            let mut projected = project_5prime(&domains_5prime, j5, config.min_domain_length);
            projected.extend(project_3prime(&domains_3prime, j5, j3));
            self.domains.insert(track.clone(), projected);
        }

        PipelineState::DomainsProjected
    }

    /// FASTA description of the chimeric cDNA.
    pub fn cdna_description(&self) -> String {
        format!(
            "length={}, alternative transcript names: {}, {}",
            self.cdna.len(),
            self.transcript_5prime.transcript_name,
            self.transcript_3prime.transcript_name
        )
    }

    /// FASTA description of the chimeric CDS.
    pub fn cds_description(&self) -> String {
        format!("length={}, genes: {}", self.cds_length, self.gene_names)
    }

    /// FASTA description of the fusion protein.
    pub fn protein_description(&self) -> String {
        format!(
            "length={}, kD: {:.3}, transcripts: {}, genes: {}, effect: {}",
            self.protein_length, self.molecular_weight, self.name, self.gene_names, self.effect
        )
    }
}
