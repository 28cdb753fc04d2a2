use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::ReadBucket;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing ID=... in label: {0}")]
pub struct MissingRegionId(pub String);

/// Tandem repeat identifier, as carried by the `TR` tag of spanning reads
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Extract the identifier from a catalog label such as
    /// `ID=HTT;MOTIFS=CAG;STRUC=(CAG)n`.
    ///
    /// The label is a `;`-delimited list of `KEY=VALUE` fields; the first
    /// field whose key is exactly `ID` wins.
    ///
    /// # Errors
    ///
    /// Returns `MissingRegionId` if no `ID=` field is present.
    pub fn from_label(label: &str) -> Result<Self, MissingRegionId> {
        label
            .split(';')
            .find_map(|field| field.strip_prefix("ID="))
            .map(Self::new)
            .ok_or_else(|| MissingRegionId(label.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Per-region read counts, one counter per [`ReadBucket`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCounts {
    pub hap1: u64,
    pub hap2: u64,
    pub unphased: u64,
    pub fail: u64,
}

impl ReadCounts {
    pub fn add(&mut self, bucket: ReadBucket) {
        match bucket {
            ReadBucket::Hap1 => self.hap1 += 1,
            ReadBucket::Hap2 => self.hap2 += 1,
            ReadBucket::Unphased => self.unphased += 1,
            ReadBucket::Fail => self.fail += 1,
        }
    }

    /// Reads that passed quality filtering. Failed reads never count
    /// towards coverage.
    #[must_use]
    pub fn passing(&self) -> u64 {
        self.hap1 + self.hap2 + self.unphased
    }
}

impl AddAssign for ReadCounts {
    fn add_assign(&mut self, other: Self) {
        self.hap1 += other.hap1;
        self.hap2 += other.hap2;
        self.unphased += other.unphased;
        self.fail += other.fail;
    }
}

/// A tandem repeat region from the catalog, with its accumulated read counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TandemRepeatRegion {
    pub chrom: String,
    /// 0-based, inclusive
    pub start: u64,
    /// 0-based, exclusive
    pub end: u64,
    /// Raw label column, reported verbatim
    pub label: String,
    pub id: RegionId,
    pub counts: ReadCounts,
}

impl TandemRepeatRegion {
    /// # Errors
    ///
    /// Returns `MissingRegionId` if the label carries no `ID=` field.
    pub fn new(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        label: impl Into<String>,
    ) -> Result<Self, MissingRegionId> {
        let label = label.into();
        let id = RegionId::from_label(&label)?;
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
            label,
            id,
            counts: ReadCounts::default(),
        })
    }

    pub fn add_read(&mut self, bucket: ReadBucket) {
        self.counts.add(bucket);
    }
}
