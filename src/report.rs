//! Tab-delimited (or JSON Lines) dropout report.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::catalog::ploidy::PloidyMap;
use crate::catalog::regions::RegionCatalog;
use crate::core::region::TandemRepeatRegion;
use crate::core::types::{Dropout, Ploidy};
use crate::dropout::{classify, DEFAULT_MIN_COVERAGE};

/// Report columns, in output order
pub const HEADER: [&str; 10] = [
    "chrom",
    "start",
    "end",
    "trid",
    "expected_ploidy",
    "hap1_count",
    "hap2_count",
    "unphased_count",
    "fail_read_count",
    "dropout",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tab-delimited with a header row
    #[default]
    Tsv,
    /// One JSON object per row
    Json,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Minimum spanning reads per expected haplotype
    pub coverage: u32,
    /// Report every region, not just those with dropouts or failed reads
    pub print_all: bool,
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            coverage: DEFAULT_MIN_COVERAGE,
            print_all: false,
            format: OutputFormat::Tsv,
        }
    }
}

/// One region's line in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow<'a> {
    pub chrom: &'a str,
    pub start: u64,
    pub end: u64,
    /// The catalog label, reported verbatim
    #[serde(rename = "trid")]
    pub label: &'a str,
    pub expected_ploidy: Ploidy,
    pub hap1_count: u64,
    pub hap2_count: u64,
    pub unphased_count: u64,
    pub fail_read_count: u64,
    pub dropout: Dropout,
}

impl<'a> ReportRow<'a> {
    #[must_use]
    pub fn new(region: &'a TandemRepeatRegion, ploidy: Ploidy, coverage: u32) -> Self {
        Self {
            chrom: &region.chrom,
            start: region.start,
            end: region.end,
            label: &region.label,
            expected_ploidy: ploidy,
            hap1_count: region.counts.hap1,
            hap2_count: region.counts.hap2,
            unphased_count: region.counts.unphased,
            fail_read_count: region.counts.fail,
            dropout: classify(&region.counts, coverage, ploidy),
        }
    }

    /// Rows without a dropout are still interesting if any reads failed
    #[must_use]
    pub fn is_notable(&self) -> bool {
        self.dropout.is_dropout() || self.fail_read_count > 0
    }

    fn write_tsv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.label,
            self.expected_ploidy,
            self.hap1_count,
            self.hap2_count,
            self.unphased_count,
            self.fail_read_count,
            self.dropout,
        )
    }
}

/// What a report run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Regions evaluated
    pub regions: usize,
    /// Rows written (excluding the header)
    pub rows: usize,
    /// Regions per dropout call, including unreported ones
    pub calls: BTreeMap<Dropout, usize>,
}

impl ReportSummary {
    #[must_use]
    pub fn count(&self, dropout: Dropout) -> usize {
        self.calls.get(&dropout).copied().unwrap_or(0)
    }
}

/// Classifies every region and writes the report
pub struct Reporter<'a> {
    ploidy: &'a PloidyMap,
    config: ReportConfig,
}

impl<'a> Reporter<'a> {
    pub fn new(ploidy: &'a PloidyMap, config: ReportConfig) -> Self {
        Self { ploidy, config }
    }

    /// Rows for every region in catalog order, before filtering
    pub fn rows<'c>(&self, catalog: &'c RegionCatalog) -> impl Iterator<Item = ReportRow<'c>> + 'c
    where
        'a: 'c,
    {
        let ploidy: &'c PloidyMap = self.ploidy;
        let coverage = self.config.coverage;
        catalog
            .iter()
            .map(move |region| ReportRow::new(region, ploidy.ploidy_for(region), coverage))
    }

    /// Write the header and one row per reported region.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write<W: Write>(&self, catalog: &RegionCatalog, writer: &mut W) -> io::Result<ReportSummary> {
        let mut summary = ReportSummary::default();

        if self.config.format == OutputFormat::Tsv {
            writeln!(writer, "{}", HEADER.join("\t"))?;
        }

        for row in self.rows(catalog) {
            summary.regions += 1;
            *summary.calls.entry(row.dropout).or_default() += 1;

            if !self.config.print_all && !row.is_notable() {
                continue;
            }

            match self.config.format {
                OutputFormat::Tsv => row.write_tsv(writer)?,
                OutputFormat::Json => {
                    serde_json::to_writer(&mut *writer, &row)?;
                    writeln!(writer)?;
                }
            }
            summary.rows += 1;
        }

        writer.flush()?;
        Ok(summary)
    }
}
