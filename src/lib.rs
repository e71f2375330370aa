// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//
//! Archival hook for rotated log files.
//!
//! The host's log-retention manager calls [`LogArchiver::archive`] for each
//! file it is about to delete; the archiver copies (optionally gzipping) the
//! file into a configured directory and then prunes excess archived copies of
//! the same log stream.

mod archiver;
mod paths;
mod retention;
mod settings;
mod template;
mod transfer;


pub use archiver::LogArchiver;
pub use paths::resolve_destination;
pub use paths::ResolvedDestination;
pub use settings::ArchiveSettings;
pub use settings::CompressionLevel;
pub use settings::SettingsError;
pub use template::StrftimeExpander;
pub use template::TokenExpander;
