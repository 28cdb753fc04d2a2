//! Tandem repeat catalog and ploidy annotation loading.
//!
//! The region catalog is a BED4+ file whose fourth column is a `;`-delimited
//! label carrying the repeat identifier (`ID=...`), as produced for TRGT:
//!
//! ```text
//! chr4	3074876	3074966	ID=HTT;MOTIFS=CAG,CCG;STRUC=(CAG)n
//! ```
//!
//! The optional ploidy file assigns an expected copy number to sub-ranges of
//! chromosomes, e.g. to mark chrY absent in a female sample:
//!
//! ```text
//! chrX	0	156040895	chrX	1
//! chrY	0	57227415	chrY	0
//! ```
//!
//! Both files may be gzip/bgzip compressed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tr_dropout::catalog::{ploidy::PloidyMap, regions::RegionCatalog};
//! use std::path::Path;
//!
//! let catalog = RegionCatalog::load(Path::new("repeats.bed.gz"), Some("chrX")).unwrap();
//! let ploidy = PloidyMap::load(Some(Path::new("male.ploidy.bed"))).unwrap();
//!
//! for region in catalog.iter() {
//!     println!("{}\t{}", region.id, ploidy.ploidy_for(region));
//! }
//! ```

use thiserror::Error;

use crate::core::region::MissingRegionId;
use crate::core::types::InvalidPloidy;

pub mod ploidy;
pub mod regions;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line_num}: {source}")]
    MissingRegionId {
        line_num: usize,
        #[source]
        source: MissingRegionId,
    },

    #[error("Line {line_num}: invalid {column} '{value}'")]
    InvalidCoordinate {
        line_num: usize,
        column: &'static str,
        value: String,
    },

    #[error("Line {line_num}: end {end} is not greater than start {start}")]
    EmptyInterval { line_num: usize, start: u64, end: u64 },

    #[error("Line {line_num}: {source}")]
    InvalidPloidy {
        line_num: usize,
        #[source]
        source: InvalidPloidy,
    },

    #[error("Line {line_num}: ploidy '{value}' is not an integer")]
    UnparseablePloidy { line_num: usize, value: String },
}

/// Parse a 0-based BED coordinate column
fn parse_coordinate(value: &str, column: &'static str, line_num: usize) -> Result<u64, CatalogError> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::InvalidCoordinate {
            line_num,
            column,
            value: value.to_string(),
        })
}

/// Parse the start and end columns of a BED row, requiring `end > start`
fn parse_interval(start: &str, end: &str, line_num: usize) -> Result<(u64, u64), CatalogError> {
    let start = parse_coordinate(start, "start", line_num)?;
    let end = parse_coordinate(end, "end", line_num)?;
    if end <= start {
        return Err(CatalogError::EmptyInterval {
            line_num,
            start,
            end,
        });
    }
    Ok((start, end))
}
