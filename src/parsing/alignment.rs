//! Spanning-read input from SAM/BAM files using noodles.
//!
//! Records are reduced to an [`AlignedRead`] holding the tags dropout
//! detection needs:
//!
//! | Tag | Type | Meaning |
//! |-----|------|---------|
//! | TR  | Z    | Tandem repeat identifier the read spans |
//! | rq  | f    | Read accuracy |
//! | HP  | i    | Haplotype |
//! | PS  | i    | Phase set |
//!
//! A BAM file is queried through its index when a chromosome is requested and
//! a `.bai`/`.csi` index is present; otherwise the whole file is scanned.

use std::io;
use std::path::{Path, PathBuf};

use noodles::sam::alignment::record::data::field::{Tag, Value};
use noodles::sam::alignment::Record;
use noodles::{bam, core::Region, sam};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::read::AlignedRead;

/// Tandem repeat identifier
pub const REGION_TAG: Tag = Tag::new(b'T', b'R');
/// Read accuracy
pub const READ_QUALITY_TAG: Tag = Tag::new(b'r', b'q');
/// Haplotype
pub const HAPLOTYPE_TAG: Tag = Tag::new(b'H', b'P');
/// Phase set
pub const PHASE_SET_TAG: Tag = Tag::new(b'P', b'S');

/// BAM encodes missing base qualities as 0xFF
const MISSING_QUALITY: u8 = 0xff;

#[derive(Error, Debug)]
pub enum AlignmentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported alignment format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid chromosome '{chrom}': {message}")]
    InvalidRegion { chrom: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Sam,
    Bam,
}

impl AlignmentFormat {
    /// Detect the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns `AlignmentError::UnsupportedFormat` for anything other than
    /// `.sam` or `.bam`.
    pub fn from_path(path: &Path) -> Result<Self, AlignmentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("bam") => Ok(Self::Bam),
            Some("sam") => Ok(Self::Sam),
            Some(ext) => Err(AlignmentError::UnsupportedFormat(ext.to_string())),
            None => Err(AlignmentError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Stream of reads handed to a [`read_alignments`] visitor
pub type ReadStream<'a> = dyn Iterator<Item = io::Result<AlignedRead>> + 'a;

/// Open an alignment file and pass its reads to `visit`.
///
/// With `chrom` set, an indexed BAM is queried for that chromosome only.
/// Without an index (or for SAM) every record is streamed; callers filter by
/// region identifier, so the result is the same.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, its header cannot be read,
/// or `chrom` is not a valid region for the indexed query.
pub fn read_alignments<T, F>(path: &Path, chrom: Option<&str>, visit: F) -> Result<T, AlignmentError>
where
    F: FnOnce(&mut ReadStream<'_>) -> T,
{
    match AlignmentFormat::from_path(path)? {
        AlignmentFormat::Bam => match (chrom, find_bam_index(path)) {
            (Some(chrom), Some(index)) => {
                info!(path = %path.display(), index = %index.display(), chrom, "Querying indexed BAM");
                read_bam_region(path, chrom, visit)
            }
            (chrom, _) => {
                if chrom.is_some() {
                    debug!(path = %path.display(), "No BAM index found, scanning whole file");
                }
                info!(path = %path.display(), "Reading BAM");
                read_bam(path, visit)
            }
        },
        AlignmentFormat::Sam => {
            info!(path = %path.display(), "Reading SAM");
            read_sam(path, visit)
        }
    }
}

/// Look for `<path>.bai` or `<path>.csi` next to a BAM file
pub fn find_bam_index(path: &Path) -> Option<PathBuf> {
    ["bai", "csi"].iter().find_map(|ext| {
        let mut candidate = path.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        candidate.exists().then_some(candidate)
    })
}

fn read_bam<T, F>(path: &Path, visit: F) -> Result<T, AlignmentError>
where
    F: FnOnce(&mut ReadStream<'_>) -> T,
{
    let mut reader = bam::io::reader::Builder::default().build_from_path(path)?;
    reader.read_header()?;

    let mut reads = reader
        .records()
        .map(|result| result.and_then(|record| aligned_read_from_record(&record)));
    Ok(visit(&mut reads))
}

fn read_bam_region<T, F>(path: &Path, chrom: &str, visit: F) -> Result<T, AlignmentError>
where
    F: FnOnce(&mut ReadStream<'_>) -> T,
{
    let region = whole_contig(chrom);

    let mut reader = bam::io::indexed_reader::Builder::default().build_from_path(path)?;
    let header = reader.read_header()?;

    if !header.reference_sequences().keys().any(|name| name == chrom) {
        return Err(AlignmentError::InvalidRegion {
            chrom: chrom.to_string(),
            message: "not found in BAM header".to_string(),
        });
    }

    let query = reader.query(&header, &region)?;
    let mut reads = query.map(|result| result.and_then(|record| aligned_read_from_record(&record)));
    Ok(visit(&mut reads))
}

/// The whole of a reference sequence. Contig names may contain `:`
/// (e.g. `HLA-A*01:01:01:01`), so the name is never parsed as a region string.
fn whole_contig(chrom: &str) -> Region {
    Region::new(chrom, ..)
}

fn read_sam<T, F>(path: &Path, visit: F) -> Result<T, AlignmentError>
where
    F: FnOnce(&mut ReadStream<'_>) -> T,
{
    let mut reader = sam::io::reader::Builder::default().build_from_path(path)?;
    reader.read_header()?;

    let mut reads = reader
        .records()
        .map(|result| result.and_then(|record| aligned_read_from_record(&record)));
    Ok(visit(&mut reads))
}

/// Extract the dropout-relevant tags from an alignment record.
///
/// Base qualities are only collected when the `rq` tag is absent, since they
/// are not consulted otherwise.
///
/// # Errors
///
/// Returns an I/O error if the record's data or quality fields are malformed.
pub fn aligned_read_from_record<R>(record: &R) -> io::Result<AlignedRead>
where
    R: Record + ?Sized,
{
    let data = record.data();

    let region_id = match data.get(&REGION_TAG).transpose()? {
        Some(Value::String(s)) => Some(String::from_utf8_lossy(s).into_owned()),
        Some(value) => int_value(&value).map(|n| n.to_string()),
        None => None,
    };

    let read_quality = match data.get(&READ_QUALITY_TAG).transpose()? {
        Some(Value::Float(rq)) => Some(rq),
        #[allow(clippy::cast_precision_loss)]
        Some(value) => int_value(&value).map(|n| n as f32),
        None => None,
    };

    let haplotype = data
        .get(&HAPLOTYPE_TAG)
        .transpose()?
        .and_then(|value| int_value(&value));
    let phase_set = data
        .get(&PHASE_SET_TAG)
        .transpose()?
        .and_then(|value| int_value(&value));

    let base_qualities = if read_quality.is_none() {
        let scores: Vec<u8> = record.quality_scores().iter().collect::<io::Result<_>>()?;
        if scores.is_empty() || scores.iter().all(|&q| q == MISSING_QUALITY) {
            None
        } else {
            Some(scores)
        }
    } else {
        None
    };

    Ok(AlignedRead {
        name: record
            .name()
            .map(|name| String::from_utf8_lossy(name).into_owned()),
        region_id,
        read_quality,
        base_qualities,
        haplotype,
        phase_set,
    })
}

fn int_value(value: &Value<'_>) -> Option<i64> {
    match *value {
        Value::Int8(n) => Some(i64::from(n)),
        Value::UInt8(n) => Some(i64::from(n)),
        Value::Int16(n) => Some(i64::from(n)),
        Value::UInt16(n) => Some(i64::from(n)),
        Value::Int32(n) => Some(i64::from(n)),
        Value::UInt32(n) => Some(i64::from(n)),
        _ => None,
    }
}
