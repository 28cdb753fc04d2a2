//! Command-line interface for tr-dropout.
//!
//! ## Usage
//!
//! ```text
//! # Report regions with dropouts or failed reads
//! tr-dropout repeats.bed.gz sample.spanning.bam > dropouts.tsv
//!
//! # One chromosome, with male ploidy for chrX/chrY
//! tr-dropout repeats.bed.gz sample.spanning.bam --chrom chrX --ploidy male.ploidy.bed
//!
//! # Every region, as JSON Lines
//! tr-dropout repeats.bed.gz sample.spanning.bam --print-all --format json
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::report::OutputFormat;

pub mod find;

pub use find::run;

#[derive(Parser, Debug)]
#[command(name = "tr-dropout")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Identify tandem repeat loci affected by haplotype-specific coverage dropouts")]
#[command(
    long_about = "tr-dropout counts haplotagged spanning reads per tandem repeat region and flags regions whose coverage is too low to genotype reliably.\n\nEach region is labeled:\n- HaplotypeDropout: one haplotype is covered, the other is not\n- PhasingDropout: neither haplotype is covered, but total depth is adequate\n- FullDropout: total depth is below the expectation for the region's ploidy"
)]
pub struct Cli {
    /// Regions of interest, BED4+ (chrom, start, end, label containing ID=...)
    #[arg(required = true)]
    pub regions: PathBuf,

    /// Spanning reads (BAM or SAM) tagged with TR, HP and rq
    #[arg(required = true)]
    pub reads: PathBuf,

    /// Chromosome to analyze
    #[arg(long)]
    pub chrom: Option<String>,

    /// Expected ploidy per interval, BED5 (chrom, start, end, name, ploidy).
    /// Regions not contained in any interval are diploid.
    #[arg(long)]
    pub ploidy: Option<PathBuf>,

    /// Minimum per-haplotype coverage for a region
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(1..))]
    pub coverage: u32,

    /// Print all regions, not just those with dropouts or failed reads
    #[arg(long)]
    pub print_all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
