use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::Context;
use tracing::{info, warn};

use crate::catalog::ploidy::PloidyMap;
use crate::catalog::regions::RegionCatalog;
use crate::cli::Cli;
use crate::core::types::Dropout;
use crate::dropout::RegionAggregator;
use crate::parsing::alignment::read_alignments;
use crate::report::{ReportConfig, ReportSummary, Reporter};

/// Load the catalogs, count spanning reads, and write the dropout report.
///
/// Every input is fully loaded and every record counted before the first
/// line of the report is written, so a fatal error never leaves a partial
/// report behind.
///
/// # Errors
///
/// Returns an error if a catalog cannot be loaded (including a region without
/// an `ID=` field or an invalid ploidy), the reads cannot be read, or the
/// report cannot be written.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    info!("Starting tr-dropout (version {})", env!("CARGO_PKG_VERSION"));

    let chrom = cli.chrom.as_deref();

    let catalog = RegionCatalog::load(&cli.regions, chrom)
        .with_context(|| format!("Failed to load regions from {}", cli.regions.display()))?;
    if catalog.is_empty() {
        warn!("No tandem repeat regions loaded; the report will be empty");
    }

    let ploidy = PloidyMap::load(cli.ploidy.as_deref()).with_context(|| {
        format!(
            "Failed to load ploidy from {}",
            cli.ploidy
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    let mut aggregator = RegionAggregator::new(catalog);
    let stats = read_alignments(&cli.reads, chrom, |reads| aggregator.consume(reads))
        .with_context(|| format!("Failed to open {}", cli.reads.display()))?
        .with_context(|| format!("Failed to read records from {}", cli.reads.display()))?;
    info!(
        records = stats.records,
        assigned = stats.assigned,
        failed = stats.failed,
        "Counted spanning reads"
    );

    let catalog = aggregator.into_catalog();
    let reporter = Reporter::new(
        &ploidy,
        ReportConfig {
            coverage: cli.coverage,
            print_all: cli.print_all,
            format: cli.format,
        },
    );

    let summary = if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        reporter.write(&catalog, &mut BufWriter::new(file))
    } else {
        reporter.write(&catalog, &mut BufWriter::new(io::stdout().lock()))
    }
    .context("Failed to write report")?;

    log_summary(&summary);
    info!("Completed processing");
    Ok(())
}

fn log_summary(summary: &ReportSummary) {
    info!(
        regions = summary.regions,
        rows = summary.rows,
        haplotype_dropout = summary.count(Dropout::HaplotypeDropout),
        phasing_dropout = summary.count(Dropout::PhasingDropout),
        full_dropout = summary.count(Dropout::FullDropout),
        "Wrote dropout report"
    );
}
