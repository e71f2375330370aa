// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use parking_lot::Mutex;

use crate::paths::resolve_destination;
use crate::retention::remove_excess_files;
use crate::settings::ArchiveSettings;
use crate::settings::SettingsError;
use crate::template::TokenExpander;
use crate::transfer;

/// Entry point for the host's retention manager: one call per expiring file,
/// made before the host deletes it.
///
/// All mutating work (directory creation, transfer, pruning) runs under one
/// process-wide lock, so concurrent invocations are totally ordered. Archival
/// cadence is bounded by log rotation, so the coarse lock is acceptable.
pub struct LogArchiver<E: TokenExpander> {
    settings: ArchiveSettings,
    expander: E,
    io_lock: Mutex<()>,
}

impl<E: TokenExpander> LogArchiver<E> {
    /// Validates `settings` against `expander` and builds the archiver.
    pub fn new(settings: ArchiveSettings, expander: E) -> Result<Self, SettingsError> {
        settings.validate(&expander)?;
        Ok(LogArchiver { settings, expander, io_lock: Mutex::new(()) })
    }

    pub fn settings(&self) -> &ArchiveSettings {
        &self.settings
    }

    /// Archives `source` and returns the path of the archived copy.
    ///
    /// Failures are logged with the source path and propagated: the host may
    /// treat a failed archive as a reason not to delete the original.
    pub fn archive(&self, source: &Path) -> anyhow::Result<PathBuf> {
        match self.archive_inner(source) {
            Ok(dest) => {
                tracing::debug!(
                    source = %source.display(),
                    dest = %dest.display(),
                    "archived expiring log file"
                );
                Ok(dest)
            }
            Err(err) => {
                tracing::error!(
                    source = %source.display(),
                    error = %err,
                    "failed to archive expiring log file"
                );
                Err(err)
            }
        }
    }

    fn archive_inner(&self, source: &Path) -> anyhow::Result<PathBuf> {
        let dest = resolve_destination(source, &self.settings, &self.expander)?;

        // guard released on every exit path, including errors
        let _guard = self.io_lock.lock();

        fs::create_dir_all(&dest.directory)
            .with_context(|| format!("failed to create dir {}", dest.directory.display()))?;

        let target = dest.full_path();
        match self.settings.compression.to_flate2() {
            Some(level) => transfer::gzip_copy(source, &target, level)?,
            None => transfer::plain_copy(source, &target)?,
        }

        if let Some(limit) = self.settings.retained_files {
            // pruning only makes sense over one fixed directory; a tokenised
            // target resolves to a different directory per invocation
            let tokenised = self
                .settings
                .target_directory
                .as_deref()
                .is_some_and(|t| self.expander.is_templated(t));
            if !tokenised {
                remove_excess_files(
                    &dest.directory,
                    source,
                    limit,
                    self.settings.compression.is_enabled(),
                )?;
            }
        }

        Ok(target)
    }
}
