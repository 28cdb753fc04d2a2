use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalog::{parse_interval, CatalogError};
use crate::core::region::TandemRepeatRegion;
use crate::core::types::Ploidy;
use crate::parsing::text::{data_lines, open_text};

/// Minimum number of columns in a ploidy row: chrom, start, end, name, ploidy
pub const MIN_PLOIDY_FIELDS: usize = 5;

/// A ploidy assignment for a sub-range of a chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PloidyInterval {
    pub start: u64,
    pub end: u64,
    pub ploidy: Ploidy,
}

impl PloidyInterval {
    /// True if `[start, end)` lies entirely within this interval
    #[must_use]
    pub fn contains(&self, start: u64, end: u64) -> bool {
        self.start <= start && end <= self.end
    }
}

/// Expected ploidy per chromosome interval. Regions not covered by any
/// interval are diploid.
#[derive(Debug, Default)]
pub struct PloidyMap {
    /// Chromosome -> intervals in load order
    intervals: HashMap<String, Vec<PloidyInterval>>,
}

impl PloidyMap {
    /// An empty map: every region is diploid
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ploidy file, or return an empty map when no path is given.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or a parse error
    /// for invalid coordinates or a ploidy outside {0, 1, 2}.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            debug!("No ploidy file given, all regions are diploid");
            return Ok(Self::new());
        };

        let io_err = |source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        };

        let reader = open_text(path).map_err(io_err)?;
        let map = Self::from_reader(reader).map_err(|e| match e {
            CatalogError::Io { source, .. } => io_err(source),
            other => other,
        })?;

        info!(path = %path.display(), "Loaded {} ploidy intervals", map.len());
        Ok(map)
    }

    /// Parse ploidy rows from a reader. The fourth column is a free-form name
    /// and is ignored. Rows with fewer than five columns are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnparseablePloidy` or `CatalogError::InvalidPloidy`
    /// for a bad ploidy column, or a coordinate error for bad start/end.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut map = Self::new();

        for result in data_lines(reader) {
            let line = result.map_err(|source| CatalogError::Io {
                path: "<reader>".to_string(),
                source,
            })?;
            let fields = line.fields();

            if fields.len() < MIN_PLOIDY_FIELDS {
                warn!(line = line.line_num, "Skipping malformed ploidy line: {}", line.text);
                continue;
            }

            let (start, end) = parse_interval(fields[1], fields[2], line.line_num)?;
            let raw: i64 = fields[4]
                .trim()
                .parse()
                .map_err(|_| CatalogError::UnparseablePloidy {
                    line_num: line.line_num,
                    value: fields[4].to_string(),
                })?;
            let ploidy = Ploidy::try_from(raw).map_err(|source| CatalogError::InvalidPloidy {
                line_num: line.line_num,
                source,
            })?;

            map.insert(fields[0], PloidyInterval { start, end, ploidy });
        }

        Ok(map)
    }

    pub fn insert(&mut self, chrom: impl Into<String>, interval: PloidyInterval) {
        self.intervals.entry(chrom.into()).or_default().push(interval);
    }

    /// Ploidy of `chrom:[start, end)`: the first interval on the chromosome,
    /// in load order, that contains the whole range. Defaults to diploid.
    #[must_use]
    pub fn lookup(&self, chrom: &str, start: u64, end: u64) -> Ploidy {
        let Some(intervals) = self.intervals.get(chrom) else {
            return Ploidy::Two;
        };

        intervals
            .iter()
            .find(|interval| interval.contains(start, end))
            .map_or(Ploidy::Two, |interval| interval.ploidy)
    }

    #[must_use]
    pub fn ploidy_for(&self, region: &TandemRepeatRegion) -> Ploidy {
        self.lookup(&region.chrom, region.start, region.end)
    }

    /// Total number of intervals across all chromosomes
    pub fn len(&self) -> usize {
        self.intervals.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MALE: &str = "\
#chrom\tstart\tend\tname\tploidy
chrX\t0\t2781479\tPAR1\t2
chrX\t0\t156040895\tchrX\t1
chrY\t0\t57227415\tchrY\t1
";

    #[test]
    fn test_lookup_first_containing_wins() {
        let map = PloidyMap::from_reader(MALE.as_bytes()).unwrap();
        assert_eq!(map.len(), 3);

        // Inside PAR1: both entries contain it, first one wins
        assert_eq!(map.lookup("chrX", 1000, 2000), Ploidy::Two);
        // Outside PAR1
        assert_eq!(map.lookup("chrX", 3_000_000, 3_000_100), Ploidy::One);
        // Straddles the PAR1 boundary: only the second contains it
        assert_eq!(map.lookup("chrX", 2_781_400, 2_781_500), Ploidy::One);
        assert_eq!(map.lookup("chrY", 10, 20), Ploidy::One);
    }

    #[test]
    fn test_lookup_defaults_to_diploid() {
        let map = PloidyMap::from_reader(MALE.as_bytes()).unwrap();
        assert_eq!(map.lookup("chr1", 10, 20), Ploidy::Two);
        // Not fully contained by any interval
        assert_eq!(map.lookup("chrY", 57_227_400, 57_227_500), Ploidy::Two);

        let empty = PloidyMap::load(None).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.lookup("chrY", 10, 20), Ploidy::Two);
    }

    #[test]
    fn test_ploidy_for_region() {
        let map = PloidyMap::from_reader("chrY\t0\t1000\tchrY\t0\n".as_bytes()).unwrap();
        let region = TandemRepeatRegion::new("chrY", 100, 200, "ID=trY").unwrap();
        assert_eq!(map.ploidy_for(&region), Ploidy::Zero);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = "chrX\t0\t100\t1\nchrY\t0\t100\tchrY\t0\n";
        let map = PloidyMap::from_reader(text.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.lookup("chrX", 10, 20), Ploidy::Two);
    }

    #[test]
    fn test_invalid_ploidy_is_fatal() {
        let err = PloidyMap::from_reader("chrX\t0\t100\tchrX\t3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPloidy { line_num: 1, .. }));

        let err = PloidyMap::from_reader("chrX\t0\t100\tchrX\tone\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::UnparseablePloidy { .. }));
    }
}
