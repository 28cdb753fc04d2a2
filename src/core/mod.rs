//! Core data types for tandem repeat dropout detection.
//!
//! - [`TandemRepeatRegion`]: a catalog region with its identifier and read counts
//! - [`RegionId`]: identifier parsed from the `ID=` field of a catalog label
//! - [`ReadCounts`]: per-haplotype read tallies for one region
//! - [`AlignedRead`]: the tags of a spanning read that drive bucketing
//! - [`ReadBucket`], [`Ploidy`], [`Dropout`]: classification types
//!
//! [`TandemRepeatRegion`]: region::TandemRepeatRegion
//! [`RegionId`]: region::RegionId
//! [`ReadCounts`]: region::ReadCounts
//! [`AlignedRead`]: read::AlignedRead
//! [`ReadBucket`]: types::ReadBucket
//! [`Ploidy`]: types::Ploidy
//! [`Dropout`]: types::Dropout

pub mod read;
pub mod region;
pub mod types;
