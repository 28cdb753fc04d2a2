//! BAM input: full scans, indexed chromosome queries and tag decoding.

mod common;

use std::io;
use std::path::PathBuf;

use tempfile::TempDir;
use tr_dropout::core::read::AlignedRead;
use tr_dropout::parsing::alignment::{read_alignments, AlignmentError};

const SAM: &str = "\
@HD\tVN:1.6\tSO:coordinate
@SQ\tSN:chr1\tLN:10000
@SQ\tSN:chr2\tLN:10000
@SQ\tSN:HLA-A*01:01:01\tLN:3000
@SQ\tSN:HLA-A*01:01:01:01\tLN:3000
r1\t0\tchr1\t90\t60\t4M\t*\t0\t0\tACGT\tIIII\tTR:Z:trA\trq:f:0.999\tHP:i:1\tPS:i:90
r2\t0\tchr1\t95\t60\t4M\t*\t0\t0\tACGT\t++++\tTR:Z:trA
r3\t0\tchr1\t95\t60\t4M\t*\t0\t0\tACGT\t*\tTR:Z:trB
r4\t0\tchr2\t50\t60\t4M\t*\t0\t0\tACGT\tIIII\tTR:Z:trC\trq:f:0.995\tHP:i:2
r5\t0\tHLA-A*01:01:01\t10\t60\t4M\t*\t0\t0\tACGT\tIIII\tTR:Z:trHLA3\trq:f:0.995
r6\t0\tHLA-A*01:01:01:01\t10\t60\t4M\t*\t0\t0\tACGT\tIIII\tTR:Z:trHLA4\trq:f:0.995
";

fn bam(dir: &TempDir, indexed: bool) -> PathBuf {
    let path = dir.path().join("spanning.bam");
    common::write_bam(SAM, &path, indexed).unwrap();
    path
}

fn reads(path: &std::path::Path, chrom: Option<&str>) -> Result<Vec<AlignedRead>, AlignmentError> {
    read_alignments(path, chrom, |reads| reads.collect::<io::Result<Vec<_>>>())
        .map(|result| result.unwrap())
}

fn names(reads: &[AlignedRead]) -> Vec<&str> {
    reads.iter().filter_map(|r| r.name.as_deref()).collect()
}

#[test]
fn test_bam_tags_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let reads = reads(&bam(&dir, false), None).unwrap();
    assert_eq!(names(&reads), ["r1", "r2", "r3", "r4", "r5", "r6"]);

    let r1 = &reads[0];
    assert_eq!(r1.region_id.as_deref(), Some("trA"));
    assert!((r1.read_quality.unwrap() - 0.999).abs() < 1e-6);
    assert_eq!(r1.haplotype, Some(1));
    assert_eq!(r1.phase_set, Some(90));
    assert!(r1.base_qualities.is_none());

    // No rq: base qualities are kept, '+' is phred 10
    let r2 = &reads[1];
    assert!(r2.read_quality.is_none());
    assert_eq!(r2.base_qualities.as_deref(), Some(&[10u8, 10, 10, 10][..]));

    // '*' is stored as 0xFF in BAM and treated as missing
    let r3 = &reads[2];
    assert!(r3.read_quality.is_none());
    assert!(r3.base_qualities.is_none());

    assert_eq!(reads[3].haplotype, Some(2));
    assert!(reads[3].phase_set.is_none());
}

#[test]
fn test_unindexed_bam_with_chrom_scans_everything() {
    let dir = tempfile::tempdir().unwrap();
    let reads = reads(&bam(&dir, false), Some("chr2")).unwrap();
    assert_eq!(reads.len(), 6);
}

#[test]
fn test_indexed_bam_queries_one_chromosome() {
    let dir = tempfile::tempdir().unwrap();
    let path = bam(&dir, true);
    assert!(dir.path().join("spanning.bam.bai").exists());

    assert_eq!(names(&reads(&path, Some("chr1")).unwrap()), ["r1", "r2", "r3"]);
    assert_eq!(names(&reads(&path, Some("chr2")).unwrap()), ["r4"]);
}

#[test]
fn test_indexed_query_takes_contig_name_literally() {
    let dir = tempfile::tempdir().unwrap();
    let path = bam(&dir, true);

    assert_eq!(names(&reads(&path, Some("HLA-A*01:01:01:01")).unwrap()), ["r6"]);
    assert_eq!(names(&reads(&path, Some("HLA-A*01:01:01")).unwrap()), ["r5"]);
}

#[test]
fn test_indexed_query_unknown_chrom() {
    let dir = tempfile::tempdir().unwrap();
    let err = reads(&bam(&dir, true), Some("chr9")).unwrap_err();

    assert!(matches!(&err, AlignmentError::InvalidRegion { chrom, .. } if chrom == "chr9"));
    assert!(err.to_string().contains("not found in BAM header"));
}
