use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::{info, warn};

use crate::catalog::{parse_interval, CatalogError};
use crate::core::region::{RegionId, TandemRepeatRegion};
use crate::parsing::text::{data_lines, open_text};

/// Minimum number of columns in a region catalog row (BED4)
pub const MIN_REGION_FIELDS: usize = 4;

/// Regions of interest keyed by repeat identifier, in catalog order
#[derive(Debug, Default)]
pub struct RegionCatalog {
    regions: Vec<TandemRepeatRegion>,

    /// Index: region ID -> index in regions vec
    id_to_index: HashMap<RegionId, usize>,
}

impl RegionCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a BED4+ catalog, optionally restricted to one chromosome.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or a parse error
    /// for any included row with a missing identifier or invalid coordinates.
    pub fn load(path: &Path, chrom: Option<&str>) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        };

        let reader = open_text(path).map_err(io_err)?;
        let catalog = Self::from_reader(reader, chrom).map_err(|e| match e {
            CatalogError::Io { source, .. } => io_err(source),
            other => other,
        })?;

        match chrom {
            Some(chrom) => info!(
                path = %path.display(),
                chrom,
                "Loaded {} tandem repeat regions",
                catalog.len()
            ),
            None => info!(
                path = %path.display(),
                "Loaded {} tandem repeat regions",
                catalog.len()
            ),
        }

        Ok(catalog)
    }

    /// Parse catalog rows from a reader.
    ///
    /// Rows with fewer than four columns are skipped with a warning. Rows on
    /// other chromosomes are skipped before their label is inspected. A later
    /// row with an already-seen identifier replaces the earlier region.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingRegionId` if an included row's label has
    /// no `ID=` field, or `CatalogError::InvalidCoordinate`/`EmptyInterval`
    /// for bad coordinates.
    pub fn from_reader<R: BufRead>(reader: R, chrom: Option<&str>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for result in data_lines(reader) {
            let line = result.map_err(|source| CatalogError::Io {
                path: "<reader>".to_string(),
                source,
            })?;
            let fields = line.fields();

            if fields.len() < MIN_REGION_FIELDS {
                warn!(line = line.line_num, "Skipping malformed BED line: {}", line.text);
                continue;
            }

            if chrom.is_some_and(|c| fields[0] != c) {
                continue;
            }

            let (start, end) = parse_interval(fields[1], fields[2], line.line_num)?;
            let region = TandemRepeatRegion::new(fields[0], start, end, fields[3]).map_err(
                |source| CatalogError::MissingRegionId {
                    line_num: line.line_num,
                    source,
                },
            )?;

            catalog.insert(region);
        }

        Ok(catalog)
    }

    /// Add a region, replacing any region with the same identifier in place
    pub fn insert(&mut self, region: TandemRepeatRegion) {
        if let Some(&index) = self.id_to_index.get(&region.id) {
            self.regions[index] = region;
        } else {
            self.id_to_index.insert(region.id.clone(), self.regions.len());
            self.regions.push(region);
        }
    }

    pub fn get(&self, id: &str) -> Option<&TandemRepeatRegion> {
        self.id_to_index.get(id).map(|&i| &self.regions[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TandemRepeatRegion> {
        self.id_to_index.get(id).map(|&i| &mut self.regions[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TandemRepeatRegion> {
        self.regions.iter()
    }

    pub fn into_regions(self) -> Vec<TandemRepeatRegion> {
        self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
# chrom\tstart\tend\tlabel
chr1\t100\t200\tID=trA;MOTIFS=CAG
chr1\t300\t400\tID=trB;MOTIFS=GAA

chr2\t500\t600\tMOTIFS=AT;ID=trC
chrX\t700\t800\tID=trX
";

    #[test]
    fn test_load_all() {
        let catalog = RegionCatalog::from_reader(CATALOG.as_bytes(), None).unwrap();
        assert_eq!(catalog.len(), 4);

        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["trA", "trB", "trC", "trX"]);

        let tr_c = catalog.get("trC").unwrap();
        assert_eq!(tr_c.chrom, "chr2");
        assert_eq!(tr_c.start, 500);
        assert_eq!(tr_c.end, 600);
        assert_eq!(tr_c.label, "MOTIFS=AT;ID=trC");
    }

    #[test]
    fn test_load_chrom_filter() {
        let catalog = RegionCatalog::from_reader(CATALOG.as_bytes(), Some("chr1")).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("trA"));
        assert!(catalog.contains("trB"));
        assert!(!catalog.contains("trX"));
    }

    #[test]
    fn test_chrom_filter_skips_id_extraction() {
        // Row on another chromosome has no ID, but is never parsed
        let text = "chr1\t100\t200\tID=trA\nchr2\t100\t200\tMOTIFS=CAG\n";
        let catalog = RegionCatalog::from_reader(text.as_bytes(), Some("chr1")).unwrap();
        assert_eq!(catalog.len(), 1);

        assert!(RegionCatalog::from_reader(text.as_bytes(), None).is_err());
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = "chr1\t100\t200\nchr1\t300\t400\tID=trB\n";
        let catalog = RegionCatalog::from_reader(text.as_bytes(), None).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("trB"));
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let text = "chr1\t100\t200\tID=trA\nchr1\t300\t400\tMOTIFS=CAG\n";
        let err = RegionCatalog::from_reader(text.as_bytes(), None).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingRegionId { line_num: 2, .. }
        ));
    }

    #[test]
    fn test_invalid_coordinates() {
        let err = RegionCatalog::from_reader("chr1\tabc\t200\tID=trA\n".as_bytes(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCoordinate { column: "start", .. }
        ));

        let err = RegionCatalog::from_reader("chr1\t200\t200\tID=trA\n".as_bytes(), None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyInterval { .. }));
    }

    #[test]
    fn test_duplicate_id_overwrites() {
        let text = "\
chr1\t100\t200\tID=dup;MOTIFS=A
chr1\t300\t400\tID=other
chr2\t900\t950\tID=dup;MOTIFS=B
";
        let catalog = RegionCatalog::from_reader(text.as_bytes(), None).unwrap();
        assert_eq!(catalog.len(), 2);

        let dup = catalog.get("dup").unwrap();
        assert_eq!(dup.chrom, "chr2");
        assert_eq!(dup.start, 900);
        assert_eq!(dup.end, 950);
        assert_eq!(dup.label, "ID=dup;MOTIFS=B");

        // Replacement keeps the first occurrence's position
        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "other"]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let text = "chr1\t100\t200\tID=trA\tCAG\textra\n";
        let catalog = RegionCatalog::from_reader(text.as_bytes(), None).unwrap();
        assert_eq!(catalog.get("trA").unwrap().label, "ID=trA");
    }
}
