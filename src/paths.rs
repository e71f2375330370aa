// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::path::Path;
use std::path::PathBuf;

use crate::settings::ArchiveSettings;
use crate::template::TokenExpander;

/// Where one archived copy goes. Computed fresh for every request: a
/// tokenised target directory can expand differently on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    pub directory: PathBuf,
    pub file_name: PathBuf,
}

impl ResolvedDestination {
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Computes the archive destination for `source`. Does not touch the file system.
pub fn resolve_destination(
    source: &Path,
    settings: &ArchiveSettings,
    expander: &impl TokenExpander,
) -> anyhow::Result<ResolvedDestination> {
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("source path has no file name: {}", source.display()))?;

    // <original-file-name>.gz when compressing, unchanged otherwise
    let file_name: PathBuf = if settings.compression.is_enabled() {
        let mut s = file_name.to_os_string();
        s.push(".gz");
        PathBuf::from(s)
    } else {
        PathBuf::from(file_name)
    };

    let directory = match &settings.target_directory {
        Some(template) => PathBuf::from(expander.expand(template)),
        None => {
            let parent = source.parent().ok_or_else(|| {
                anyhow::anyhow!("cannot infer archive directory from {}", source.display())
            })?;
            if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            }
        }
    };

    Ok(ResolvedDestination { directory, file_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CompressionLevel;
    use crate::template::StrftimeExpander;

    #[test]
    fn test_compressed_name_gets_gz_suffix() {
        let settings = ArchiveSettings::builder()
            .compression(CompressionLevel::Optimal)
            .target_directory("archive")
            .build();

        let dest = resolve_destination(
            Path::new("/var/log/app_2024-01-01.log"),
            &settings,
            &StrftimeExpander,
        )
        .unwrap();

        assert_eq!(dest.file_name, PathBuf::from("app_2024-01-01.log.gz"));
        assert_eq!(dest.full_path(), PathBuf::from("archive/app_2024-01-01.log.gz"));
    }

    #[test]
    fn test_uncompressed_name_unchanged() {
        let settings = ArchiveSettings::builder().target_directory("archive").build();

        let dest = resolve_destination(
            Path::new("/var/log/app_2024-01-01.log"),
            &settings,
            &StrftimeExpander,
        )
        .unwrap();

        assert_eq!(dest.file_name, PathBuf::from("app_2024-01-01.log"));
    }

    #[test]
    fn test_no_target_directory_falls_back_to_source_dir() {
        let settings =
            ArchiveSettings::builder().compression(CompressionLevel::Fastest).build();

        let dest =
            resolve_destination(Path::new("/var/log/app.log"), &settings, &StrftimeExpander)
                .unwrap();

        assert_eq!(dest.directory, PathBuf::from("/var/log"));
    }

    #[test]
    fn test_bare_file_name_resolves_to_current_dir() {
        let settings =
            ArchiveSettings::builder().compression(CompressionLevel::Fastest).build();

        let dest =
            resolve_destination(Path::new("app.log"), &settings, &StrftimeExpander).unwrap();

        assert_eq!(dest.directory, PathBuf::from("."));
    }

    #[test]
    fn test_templated_directory_is_expanded() {
        use chrono::Datelike;

        let settings = ArchiveSettings::builder().target_directory("archive/%Y").build();

        let dest =
            resolve_destination(Path::new("/var/log/app.log"), &settings, &StrftimeExpander)
                .unwrap();

        let year = chrono::Utc::now().year().to_string();
        assert_eq!(dest.directory, PathBuf::from(format!("archive/{year}")));
    }

    #[test]
    fn test_path_without_file_name_is_an_error() {
        let settings = ArchiveSettings::builder().target_directory("archive").build();
        assert!(resolve_destination(Path::new("/"), &settings, &StrftimeExpander).is_err());
    }
}
