//! # tr-dropout
//!
//! A library for finding tandem repeat loci whose spanning-read coverage is
//! too low to genotype reliably.
//!
//! Tandem repeat genotypers such as TRGT emit a BAM of reads spanning each
//! repeat, tagged with the repeat identifier (`TR`), the read's haplotype
//! (`HP`) and its accuracy (`rq`). Repeat expansions often cause one or both
//! haplotypes to lose coverage, so a missing allele can hide behind an
//! apparently homozygous call.
//!
//! `tr-dropout` counts spanning reads per region and haplotype and labels
//! each region:
//!
//! - **`HaplotypeDropout`**: one haplotype has enough reads, the other does not
//! - **`PhasingDropout`**: neither haplotype does, but total depth is adequate
//! - **`FullDropout`**: total depth is below expectation
//!
//! Expectations follow the region's ploidy: a ploidy file can mark chrX as
//! haploid in male samples, or chrY as absent in female samples.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tr_dropout::{PloidyMap, RegionAggregator, RegionCatalog};
//! use tr_dropout::parsing::alignment::read_alignments;
//! use tr_dropout::report::{ReportConfig, Reporter};
//! use std::path::Path;
//!
//! let catalog = RegionCatalog::load(Path::new("repeats.bed.gz"), None).unwrap();
//! let ploidy = PloidyMap::load(None).unwrap();
//!
//! let mut aggregator = RegionAggregator::new(catalog);
//! read_alignments(Path::new("spanning.bam"), None, |reads| aggregator.consume(reads))
//!     .unwrap()
//!     .unwrap();
//!
//! let catalog = aggregator.into_catalog();
//! let reporter = Reporter::new(&ploidy, ReportConfig::default());
//! reporter.write(&catalog, &mut std::io::stdout()).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Region catalog and ploidy file loading
//! - [`core`]: Core data types for regions, reads, and calls
//! - [`dropout`]: Read bucketing, aggregation, and dropout classification
//! - [`parsing`]: Text and SAM/BAM input
//! - [`report`]: Report rendering
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod dropout;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use catalog::ploidy::PloidyMap;
pub use catalog::regions::RegionCatalog;
pub use core::read::AlignedRead;
pub use core::region::{ReadCounts, RegionId, TandemRepeatRegion};
pub use core::types::*;
pub use dropout::{classify, classify_read, RegionAggregator};
