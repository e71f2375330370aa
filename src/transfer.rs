// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::{self};
use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use anyhow::Context;
use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use flate2::GzBuilder;

/// Copies a file byte-for-byte, overwriting any existing destination.
/// The source stays in place; its deletion belongs to the host.
pub fn plain_copy(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest)
        .with_context(|| format!("failed to copy {} -> {}", src.display(), dest.display()))?;
    Ok(())
}

// Compresses a file with gzip into the destination, overwriting it.
// The gzip header carries the source mtime and the original file name.
pub fn gzip_copy(src: &Path, dest_gz: &Path, level: Compression) -> Result<()> {
    let src_file = File::open(src)
        .with_context(|| format!("failed to open source file: {}", src.display()))?;

    // get mtime from source file
    let mtime_secs = src_file
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as u32)
        .unwrap_or_else(|| {
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as u32).unwrap_or(0)
        });

    let out_file = File::create(dest_gz)
        .with_context(|| format!("failed to create destination file: {}", dest_gz.display()))?;

    // extract original filename without .gz extension for gzip header
    let filename_in_gz =
        dest_gz.file_stem().and_then(|s| s.to_str()).unwrap_or("archive.log").to_string();

    let gz_builder = GzBuilder::new().mtime(mtime_secs).filename(filename_in_gz);

    let mut encoder: GzEncoder<File> = gz_builder.write(out_file, level);

    // todo: tune buffer size
    let mut reader = BufReader::with_capacity(2 << 20, src_file); // 2 MiB buffer
    io::copy(&mut reader, &mut encoder).context("failed to compress file")?;

    let out_file = encoder.finish().context("failed to finalize gzip compression")?;
    out_file.sync_all().context("failed to sync compressed file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::GzDecoder;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_plain_copy() -> Result<()> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("source.log");
        let dest = tmp.path().join("dest.log");

        fs::write(&src, b"test data")?;
        plain_copy(&src, &dest)?;

        assert!(src.exists());
        assert_eq!(fs::read(&dest)?, b"test data");
        Ok(())
    }

    #[test]
    fn test_plain_copy_overwrites() -> Result<()> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("source.log");
        let dest = tmp.path().join("dest.log");

        fs::write(&src, b"new contents")?;
        fs::write(&dest, b"stale contents that are longer")?;
        plain_copy(&src, &dest)?;

        assert_eq!(fs::read(&dest)?, b"new contents");
        Ok(())
    }

    #[test]
    fn test_gzip_copy_roundtrip() -> Result<()> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("source.log");
        let dest = tmp.path().join("source.log.gz");

        let payload = b"log line one\nlog line two\n".repeat(100);
        fs::write(&src, &payload)?;
        gzip_copy(&src, &dest, Compression::fast())?;

        // source is left for the host to delete
        assert!(src.exists());

        let mut decoded = Vec::new();
        GzDecoder::new(File::open(&dest)?).read_to_end(&mut decoded)?;
        assert_eq!(decoded, payload);
        Ok(())
    }

    #[test]
    fn test_gzip_copy_overwrites() -> Result<()> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("source.log");
        let dest = tmp.path().join("source.log.gz");

        fs::write(&src, b"fresh")?;
        fs::write(&dest, b"not even gzip")?;
        gzip_copy(&src, &dest, Compression::default())?;

        let mut decoded = Vec::new();
        GzDecoder::new(File::open(&dest)?).read_to_end(&mut decoded)?;
        assert_eq!(decoded, b"fresh");
        Ok(())
    }

    #[test]
    fn test_gzip_copy_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("absent.log");
        let dest = tmp.path().join("absent.log.gz");

        assert!(gzip_copy(&src, &dest, Compression::default()).is_err());
    }
}
