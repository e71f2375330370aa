// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use thiserror::Error;
use typed_builder::TypedBuilder;

use crate::template::TokenExpander;

/// How each archived copy is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Plain byte-for-byte copy, no archive suffix.
    #[default]
    None,
    Fastest,
    Optimal,
    Smallest,
}

impl CompressionLevel {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CompressionLevel::None)
    }

    pub(crate) fn to_flate2(self) -> Option<flate2::Compression> {
        match self {
            CompressionLevel::None => None,
            CompressionLevel::Fastest => Some(flate2::Compression::fast()),
            CompressionLevel::Optimal => Some(flate2::Compression::default()),
            CompressionLevel::Smallest => Some(flate2::Compression::best()),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Archiving without compression into the source directory does nothing. Enable compression or set a target directory.")]
    NothingToDo,

    #[error("The retained file count must be a positive number.")]
    NonPositiveRetainedCount,

    #[error("A retained file count cannot be combined with a tokenised target directory. Pruning needs one fixed directory to scan.")]
    TokenisedTargetWithRetention,
}

/// Archival rules, fixed at construction and shared by every invocation.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ArchiveSettings {
    /// Compression applied to each archived copy
    #[builder(default)]
    pub compression: CompressionLevel,

    /// Directory to archive into. May contain tokens that expand differently
    /// per invocation. None means "next to the source file".
    #[builder(default, setter(strip_option, into))]
    pub target_directory: Option<String>,

    /// Keep at most this many archived files per log stream. None disables pruning.
    #[builder(default, setter(strip_option))]
    pub retained_files: Option<usize>,
}

impl ArchiveSettings {
    /// Checks the cross-field invariants against the expander that will
    /// resolve the target directory.
    pub(crate) fn validate(&self, expander: &impl TokenExpander) -> Result<(), SettingsError> {
        if !self.compression.is_enabled() && self.target_directory.is_none() {
            return Err(SettingsError::NothingToDo);
        }
        if let Some(limit) = self.retained_files {
            if limit == 0 {
                return Err(SettingsError::NonPositiveRetainedCount);
            }
            if self.target_directory.as_deref().is_some_and(|t| expander.is_templated(t)) {
                return Err(SettingsError::TokenisedTargetWithRetention);
            }
        }
        Ok(())
    }
}
