//! Coverage dropout detection.
//!
//! Detection runs in three steps:
//!
//! 1. **Read bucketing** ([`classify_read`]): each spanning read is counted as
//!    haplotype 1, haplotype 2, unphased, or failed (accuracy below 0.99).
//! 2. **Aggregation** ([`RegionAggregator`]): reads are routed to their
//!    catalog region by the `TR` tag and tallied.
//! 3. **Classification** ([`classify`]): each region's tallies are compared
//!    against the minimum per-haplotype coverage for its expected ploidy.
//!
//! ## Example
//!
//! ```rust
//! use tr_dropout::core::read::AlignedRead;
//! use tr_dropout::core::types::{Dropout, Ploidy};
//! use tr_dropout::catalog::regions::RegionCatalog;
//! use tr_dropout::dropout::{classify, RegionAggregator};
//!
//! let catalog = RegionCatalog::from_reader("chr1\t100\t200\tID=trA\n".as_bytes(), None).unwrap();
//! let mut aggregator = RegionAggregator::new(catalog);
//! for _ in 0..3 {
//!     aggregator.add_read(&AlignedRead::new("trA").with_read_quality(0.999).with_haplotype(1));
//! }
//!
//! let catalog = aggregator.into_catalog();
//! let region = catalog.get("trA").unwrap();
//! assert_eq!(classify(&region.counts, 2, Ploidy::Two), Dropout::HaplotypeDropout);
//! ```

pub mod aggregator;
pub mod classifier;
pub mod reads;

pub use aggregator::{AggregationStats, RegionAggregator};
pub use classifier::{classify, classify_reads, DEFAULT_MIN_COVERAGE};
pub use reads::{classify_read, MIN_READ_QUALITY};
