//! BAM fixtures built from SAM text.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use noodles::bam::{self, bai};
use noodles::csi::binning_index::{index::reference_sequence::bin::Chunk, Indexer};
use noodles::sam::{self, alignment::Record as _};

/// Convert SAM text to a BAM at `dst`, writing `<dst>.bai` alongside when
/// `indexed` is set. Records must be coordinate-sorted for the index.
pub fn write_bam(sam_text: &str, dst: &Path, indexed: bool) -> io::Result<()> {
    let mut reader = sam::io::Reader::new(sam_text.as_bytes());
    let header = reader.read_header()?;

    let mut writer = bam::io::Writer::new(File::create(dst)?);
    writer.write_header(&header)?;
    for result in reader.records() {
        let record = result?;
        sam::alignment::io::Write::write_alignment_record(&mut writer, &header, &record)?;
    }
    writer.try_finish()?;
    drop(writer);

    if indexed {
        write_bai(dst)?;
    }
    Ok(())
}

fn write_bai(src: &Path) -> io::Result<()> {
    let mut reader = bam::io::reader::Builder.build_from_path(src)?;
    let header = reader.read_header()?;

    let mut record = bam::Record::default();
    let mut indexer = Indexer::default();
    let mut start_position = reader.get_ref().virtual_position();

    while reader.read_record(&mut record)? != 0 {
        let end_position = reader.get_ref().virtual_position();
        let context = match (
            record.reference_sequence_id().transpose()?,
            record.alignment_start().transpose()?,
            record.alignment_end().transpose()?,
        ) {
            (Some(id), Some(start), Some(end)) => Some((id, start, end, !record.flags().is_unmapped())),
            _ => None,
        };
        indexer.add_record(context, Chunk::new(start_position, end_position))?;
        start_position = end_position;
    }

    let index: bai::Index = indexer.build(header.reference_sequences().len());

    let mut dst = src.as_os_str().to_owned();
    dst.push(".bai");
    bai::io::Writer::new(File::create(PathBuf::from(dst))?).write_index(&index)
}
