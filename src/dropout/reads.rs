use tracing::warn;

use crate::core::read::{read_quality_from_base_qualities, AlignedRead};
use crate::core::types::ReadBucket;

/// Reads below this accuracy are counted as failed
pub const MIN_READ_QUALITY: f64 = 0.99;

/// Where a read's quality came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QualitySource {
    /// `rq` tag
    Tag(f64),
    /// Estimated from base qualities (0.0 if those are missing too)
    Derived(f64),
}

impl QualitySource {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Tag(q) | Self::Derived(q) => q,
        }
    }
}

/// Resolve a read's accuracy: the `rq` tag if present, otherwise the
/// estimate from its base qualities.
#[must_use]
pub fn read_quality(read: &AlignedRead) -> QualitySource {
    match (read.read_quality, read.base_qualities.as_deref()) {
        (Some(rq), _) => QualitySource::Tag(f64::from(rq)),
        (None, Some(quals)) => QualitySource::Derived(read_quality_from_base_qualities(quals)),
        (None, None) => QualitySource::Derived(0.0),
    }
}

/// Assign a read to exactly one bucket. Low-quality reads are `Fail`
/// whatever their haplotype tag says.
#[must_use]
pub fn classify_read(read: &AlignedRead) -> ReadBucket {
    let quality = read_quality(read);

    if let QualitySource::Derived(q) = quality {
        warn!(
            read = read.name.as_deref().unwrap_or(""),
            quality = q,
            "Read missing rq tag; computing from base qualities"
        );
    }

    if quality.value() < MIN_READ_QUALITY {
        ReadBucket::Fail
    } else {
        ReadBucket::from_haplotype(read.haplotype)
    }
}
