//! CLI entry point for fusionmodel.
//!
//! Predicts the fusion transcripts, proteins and domains for two genes cut at
//! the given breakpoints, and writes them to an output directory.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use fusionmodel::config::Config;
use fusionmodel::fusion::{Fusion, GeneRef, TranscriptFilter};
use fusionmodel::output::{write_domains_csv, write_sequences, write_summary};
use fusionmodel::provider::AnnotationBundle;

/// Gene fusion transcript and protein prediction.
///
/// Annotates a fusion between a 5' and a 3' gene from an annotation bundle.
#[derive(Parser, Debug)]
#[command(name = "fusionmodel")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Annotation bundle (JSON, optionally gzipped)
    #[arg(short = 'a', long = "annotation")]
    annotation: PathBuf,

    /// 5' gene identifier or symbol
    #[arg(short = 'g', long = "gene5prime")]
    gene5prime: String,

    /// Genomic breakpoint in the 5' gene
    #[arg(short = 'j', long = "junction5prime")]
    junction5prime: i64,

    /// 3' gene identifier or symbol
    #[arg(short = 'G', long = "gene3prime")]
    gene3prime: String,

    /// Genomic breakpoint in the 3' gene
    #[arg(short = 'J', long = "junction3prime")]
    junction3prime: i64,

    /// Output directory
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// Domain annotation tracks (comma-separated)
    #[arg(short = 't', long = "tracks", default_value = "pfam")]
    tracks: String,

    /// Restrict 5' transcripts (comma-separated IDs)
    #[arg(long = "transcripts5prime")]
    transcripts5prime: Option<String>,

    /// Restrict 3' transcripts (comma-separated IDs)
    #[arg(long = "transcripts3prime")]
    transcripts3prime: Option<String>,

    /// Mark the junction with '*' in the output sequences
    #[arg(short = 'm', long = "middlestar")]
    middlestar: bool,

    /// Minimum residues a truncated 5' domain must keep
    #[arg(long = "min-domain-length", default_value = "5")]
    min_domain_length: i64,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(short = 'p', long = "threads")]
    threads: Option<usize>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn split_ids(ids: Option<String>) -> Option<Vec<String>> {
    ids.map(|s| {
        s.split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Validate inputs
    if !args.annotation.exists() {
        bail!("Annotation file not found: {}", args.annotation.display());
    }

    // Build configuration
    let mut config = Config::new();
    config.junction_marker = args.middlestar;

    if args.min_domain_length >= 0 {
        config.min_domain_length = args.min_domain_length;
    } else {
        bail!("The minimum domain length cannot be lower than 0 residues.");
    }

    if !config.parse_tracks(&args.tracks) {
        bail!("Tracks not properly passed.");
    }

    match args.threads {
        Some(0) => bail!("The number of threads must be at least 1."),
        Some(n) => config.threads = Some(n),
        None => config.threads = Some(num_cpus::get()),
    }
    if let Some(threads) = config.threads {
        if rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .is_err()
        {
            warn!(
                "Global thread pool already configured, using {} threads",
                rayon::current_num_threads()
            );
        }
    }

    let filter = TranscriptFilter {
        transcripts_5prime: split_ids(args.transcripts5prime),
        transcripts_3prime: split_ids(args.transcripts3prime),
    };

    info!("Loading annotation: {}", args.annotation.display());
    let bundle = AnnotationBundle::from_path(&args.annotation)
        .with_context(|| format!("Failed to load annotation {}", args.annotation.display()))?;

    let gene5prime = GeneRef::new(&bundle, &args.gene5prime, args.junction5prime)
        .with_context(|| format!("Invalid 5' gene {}", args.gene5prime))?;
    let gene3prime = GeneRef::new(&bundle, &args.gene3prime, args.junction3prime)
        .with_context(|| format!("Invalid 3' gene {}", args.gene3prime))?;

    info!("Predicting fusion transcripts...");
    let fusion = Fusion::new(gene5prime, gene3prime, &bundle, &config, &filter);

    if fusion.transcripts.is_empty() {
        warn!("No transcript pair contains both breakpoints");
    }
    info!(
        "{}: {} fusion transcripts, {} with coding potential",
        fusion.name,
        fusion.transcripts.len(),
        fusion.coding_transcripts().count()
    );

    info!("Writing output to: {}", args.out.display());
    write_sequences(&args.out, &fusion)?;
    write_summary(&args.out.join("summary.tsv"), &fusion)?;
    for track in &config.tracks {
        let path = args.out.join(format!("{}.{}.csv", fusion.name, track));
        write_domains_csv(&path, &fusion, track)?;
    }

    info!("Done!");
    Ok(())
}
