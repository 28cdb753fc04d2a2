use crate::core::region::ReadCounts;
use crate::core::types::{Dropout, Ploidy};

/// Default minimum number of spanning reads expected per haplotype
pub const DEFAULT_MIN_COVERAGE: u32 = 2;

/// Classify a region's coverage given its passing read counts, the minimum
/// per-haplotype coverage, and the expected ploidy.
///
/// | ploidy | condition | call |
/// |--------|-----------|------|
/// | 0 | always | none |
/// | 1 | total < coverage | `FullDropout` |
/// | 2 | both haplotypes < coverage, total < 2 × coverage | `FullDropout` |
/// | 2 | both haplotypes < coverage, total ≥ 2 × coverage | `PhasingDropout` |
/// | 2 | exactly one haplotype < coverage | `HaplotypeDropout` |
///
/// `total` is hap1 + hap2 + unphased; reads that failed the quality filter
/// are never counted.
#[must_use]
pub fn classify(counts: &ReadCounts, coverage: u32, ploidy: Ploidy) -> Dropout {
    classify_reads(counts.hap1, counts.hap2, counts.unphased, coverage, ploidy)
}

/// [`classify`] on raw counts
#[must_use]
pub fn classify_reads(hap1: u64, hap2: u64, unphased: u64, coverage: u32, ploidy: Ploidy) -> Dropout {
    let coverage = u64::from(coverage);
    let total = hap1 + hap2 + unphased;

    match ploidy {
        Ploidy::Zero => Dropout::None,
        Ploidy::One => {
            if total < coverage {
                Dropout::FullDropout
            } else {
                Dropout::None
            }
        }
        Ploidy::Two => match (hap1 < coverage, hap2 < coverage) {
            (true, true) if total < 2 * coverage => Dropout::FullDropout,
            (true, true) => Dropout::PhasingDropout,
            (true, false) | (false, true) => Dropout::HaplotypeDropout,
            (false, false) => Dropout::None,
        },
    }
}
