//! Line-oriented reading of plain or gzip/bgzip compressed text files.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text file for buffered reading, transparently decompressing
/// `.gz`/`.bgz` files. bgzip output is a series of gzip members, so a
/// multi-member decoder is used.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened.
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// A data line from a tab-delimited file, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine {
    pub line_num: usize,
    pub text: String,
}

impl DataLine {
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.text.split('\t').collect()
    }
}

/// Iterate the non-blank, non-comment (`#`) lines of a reader.
/// Trailing newlines (`\n` or `\r\n`) are stripped.
pub fn data_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<DataLine>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, result)| match result {
            Ok(line) => {
                if line.trim().is_empty() || line.starts_with('#') {
                    return None;
                }
                let text = line.strip_suffix('\r').unwrap_or(&line).to_string();
                Some(Ok(DataLine {
                    line_num: i + 1,
                    text,
                }))
            }
            Err(e) => Some(Err(e)),
        })
}
