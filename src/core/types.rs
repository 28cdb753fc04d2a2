use serde::{Serialize, Serializer};
use thiserror::Error;

/// Bucket a spanning read is counted into for its region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadBucket {
    /// Read carries no haplotype tag (or an unrecognized one)
    Unphased,
    /// Read tagged `HP:1`
    Hap1,
    /// Read tagged `HP:2`
    Hap2,
    /// Read quality below the pass threshold, regardless of haplotype
    Fail,
}

impl ReadBucket {
    /// Map a haplotype tag value to its bucket. Anything other than 1 or 2
    /// is treated as unphased.
    #[must_use]
    pub fn from_haplotype(haplotype: Option<i64>) -> Self {
        match haplotype {
            Some(1) => Self::Hap1,
            Some(2) => Self::Hap2,
            Some(_) | None => Self::Unphased,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid ploidy {0}: expected 0, 1 or 2")]
pub struct InvalidPloidy(pub i64);

/// Expected number of haplotype copies at a locus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Ploidy {
    /// Not expected to be present (e.g. chrY in a female sample)
    Zero,
    /// Hemizygous
    One,
    /// Diploid
    #[default]
    Two,
}

impl Ploidy {
    #[must_use]
    pub fn copies(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<i64> for Ploidy {
    type Error = InvalidPloidy;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(InvalidPloidy(other)),
        }
    }
}

impl std::fmt::Display for Ploidy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.copies())
    }
}

impl Serialize for Ploidy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.copies())
    }
}

/// Coverage dropout call for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dropout {
    /// Adequate coverage for the expected ploidy
    None,
    /// One haplotype is covered, the other is not
    HaplotypeDropout,
    /// Neither haplotype is covered on its own, but total depth is adequate
    PhasingDropout,
    /// Total depth is below the expectation
    FullDropout,
}

impl Dropout {
    /// Label written to the report; no dropout is the empty string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::HaplotypeDropout => "HaplotypeDropout",
            Self::PhasingDropout => "PhasingDropout",
            Self::FullDropout => "FullDropout",
        }
    }

    #[must_use]
    pub fn is_dropout(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for Dropout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Dropout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
