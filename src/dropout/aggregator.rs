use tracing::debug;

use crate::catalog::regions::RegionCatalog;
use crate::core::read::AlignedRead;
use crate::core::types::ReadBucket;
use crate::dropout::reads::classify_read;

/// Record tallies from an aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    /// Records seen on the stream
    pub records: u64,
    /// Records whose `TR` tag named a loaded region
    pub assigned: u64,
    /// Assigned records counted as failed
    pub failed: u64,
}

impl std::ops::AddAssign for AggregationStats {
    fn add_assign(&mut self, other: Self) {
        self.records += other.records;
        self.assigned += other.assigned;
        self.failed += other.failed;
    }
}

/// Routes spanning reads to their catalog regions and tallies them.
///
/// Counting is a pure sum, so the final counts do not depend on record order.
#[derive(Debug)]
pub struct RegionAggregator {
    catalog: RegionCatalog,
    stats: AggregationStats,
}

impl RegionAggregator {
    pub fn new(catalog: RegionCatalog) -> Self {
        Self {
            catalog,
            stats: AggregationStats::default(),
        }
    }

    /// Count one record. Returns the bucket it was counted in, or `None` if
    /// it has no `TR` tag or names a region that is not loaded.
    pub fn add_read(&mut self, read: &AlignedRead) -> Option<ReadBucket> {
        self.stats.records += 1;

        let region = self.catalog.get_mut(read.region_id.as_deref()?)?;
        let bucket = classify_read(read);
        region.add_read(bucket);

        self.stats.assigned += 1;
        if bucket == ReadBucket::Fail {
            self.stats.failed += 1;
        }
        Some(bucket)
    }

    /// Count every record of a stream. The first stream error aborts the
    /// pass: partial counts are not meaningful.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by `reads`.
    pub fn consume<I, E>(&mut self, reads: I) -> Result<AggregationStats, E>
    where
        I: IntoIterator<Item = Result<AlignedRead, E>>,
    {
        let before = self.stats;
        for read in reads {
            self.add_read(&read?);
        }

        let pass = AggregationStats {
            records: self.stats.records - before.records,
            assigned: self.stats.assigned - before.assigned,
            failed: self.stats.failed - before.failed,
        };
        debug!(
            records = pass.records,
            assigned = pass.assigned,
            failed = pass.failed,
            "Finished aggregation pass"
        );
        Ok(pass)
    }

    /// Fold in an aggregation over another partition of the catalog, e.g.
    /// another chromosome. Regions present in both have their counts summed.
    pub fn merge(&mut self, other: RegionAggregator) {
        self.stats += other.stats;
        for region in other.catalog.into_regions() {
            match self.catalog.get_mut(region.id.as_str()) {
                Some(existing) => existing.counts += region.counts,
                None => self.catalog.insert(region),
            }
        }
    }

    pub fn stats(&self) -> AggregationStats {
        self.stats
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> RegionCatalog {
        self.catalog
    }
}
