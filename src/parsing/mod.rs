//! Input parsing.
//!
//! - **Text files** ([`text`]): plain or gzip/bgzip compressed tab-delimited
//!   files, used for the region catalog and the ploidy file
//! - **Alignments** ([`alignment`]): SAM/BAM spanning reads via noodles,
//!   reduced to the tags dropout detection needs
//!
//! ## Example
//!
//! ```rust,no_run
//! use tr_dropout::parsing::alignment::read_alignments;
//! use std::path::Path;
//!
//! let tagged = read_alignments(Path::new("spanning.bam"), Some("chr1"), |reads| {
//!     reads.filter_map(Result::ok).filter(|r| r.region_id.is_some()).count()
//! })
//! .unwrap();
//! ```

pub mod alignment;
pub mod text;
