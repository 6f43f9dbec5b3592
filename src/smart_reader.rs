use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// Nested compression layers peeled before giving up.
const MAX_DEPTH: usize = 4;

/// Read a whole input file into memory, transparently decompressing GZIP
/// (including BGZF and nested `.gz.gz`) layers.
pub fn read_to_string(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    let mut reader: Box<dyn BufRead> = Box::new(BufReader::new(file));

    for _ in 0..MAX_DEPTH {
        let buf = reader
            .fill_buf()
            .with_context(|| format!("failed to read {}", path.display()))?;
        // GZIP magic: 1f 8b
        if buf.len() < 2 || buf[0] != 0x1f || buf[1] != 0x8b {
            break;
        }
        tracing::debug!("detected GZIP layer in {}", path.display());
        reader = Box::new(BufReader::new(MultiGzDecoder::new(reader)));
    }

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_context(|| format!("failed to read {} as UTF-8 text", path.display()))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn reads_plain_text() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("plain.txt");
        input.write_str("SNP\tchr\tpos\tInd1\n").unwrap();
        assert_eq!(read_to_string(input.path()).unwrap(), "SNP\tchr\tpos\tInd1\n");
    }

    #[test]
    fn reads_nested_gzip() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("report.txt.gz.gz");
        input
            .write_binary(&gzip(&gzip(b"[Header]\n[Data]\n")))
            .unwrap();
        assert_eq!(read_to_string(input.path()).unwrap(), "[Header]\n[Data]\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_to_string(Path::new("/nonexistent/report.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/report.txt"));
    }

    #[test]
    fn empty_file_is_empty_text() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("empty.txt");
        input.touch().unwrap();
        assert_eq!(read_to_string(input.path()).unwrap(), "");
    }
}
