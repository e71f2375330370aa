// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

/// The log-stream identifier shared by every rotated file of one stream:
/// the file name with its extension stripped, truncated at the first `_`.
/// "app_2024-01-01.log" -> "app".
pub fn stream_base_name(path: &Path) -> Option<&str> {
    let stem = path.file_stem()?.to_str()?;
    stem.split('_').next()
}

// Orders archived file names oldest-to-newest. Recency is inferred from the
// name alone: a longer name is newer (timestamp components never shrink in
// digit count over time), ties break case-insensitively on the full name.
// Relies on the rotation naming convention embedding an order-preserving
// textual timestamp; a documented limitation, kept instead of file mtimes.
fn recency(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Deletes archived files beyond `limit` for the stream `just_archived_source`
/// belongs to.
///
/// Scans `directory` for files carrying the active archive suffix (`.gz` when
/// `compressed`, any file otherwise) whose stem starts with the stream base
/// name, keeps the `limit` newest per [`recency`], and deletes the rest. Each
/// deletion is independent; one failure is logged and does not stop the others.
pub fn remove_excess_files(
    directory: &Path,
    just_archived_source: &Path,
    limit: usize,
    compressed: bool,
) -> Result<()> {
    let Some(base) = stream_base_name(just_archived_source) else {
        return Ok(());
    };

    let mut matching: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("failed to read archive directory {}", directory.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if compressed && path.extension().and_then(OsStr::to_str) != Some("gz") {
            continue;
        }
        // prefix match on the stem: "svc2" archives also count toward "svc"
        let stem_matches =
            path.file_stem().and_then(OsStr::to_str).is_some_and(|s| s.starts_with(base));
        if !stem_matches {
            continue;
        }
        if let Some(name) = path.file_name().and_then(OsStr::to_str) {
            matching.push((name.to_string(), path));
        }
    }

    // newest first
    matching.sort_by(|(a, _), (b, _)| recency(b, a));

    for (_, stale) in matching.iter().skip(limit) {
        if let Err(err) = fs::remove_file(stale) {
            tracing::warn!(
                file = %stale.display(),
                error = %err,
                "could not delete excess archived file"
            );
        }
    }

    Ok(())
}
