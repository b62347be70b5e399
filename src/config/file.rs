//! Configuration file location, loading and saving.

use crate::config::Config;
use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the config file in the platform config directory.
///
/// For example `~/.config/kiwi-finder/config.toml` on Linux.
pub fn config_file_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

impl Config {
    /// Read a TOML config file. A missing file gives the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let config = toml::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Read the config from the platform location, or the defaults when the
    /// platform has no config directory.
    pub fn load() -> Result<Self> {
        config_file_path().map_or_else(|_| Ok(Self::default()), |path| Self::from_file(&path))
    }

    /// Write the config as TOML, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let write_error = |source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        let contents =
            toml::to_string_pretty(self).map_err(|source| Error::ConfigSerialize { source })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, contents).map_err(write_error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::detection::{BoundaryCheck, SubWindowIndexing};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::from_file(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.model.directory.is_none());
        assert_eq!(config.detection.min_run_length, 4);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[model]
directory = "/path/to/model"

[detection]
min_calls_density = 0.75
boundary_check = "single"
subwindow_indexing = "region"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(
            config.model.directory.as_deref(),
            Some(Path::new("/path/to/model"))
        );
        assert_eq!(config.detection.min_calls_density, 0.75);
        assert_eq!(config.detection.boundary_check, BoundaryCheck::Single);
        assert_eq!(config.detection.subwindow_indexing, SubWindowIndexing::Region);
        assert_eq!(config.detection.min_run_length, 4);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[detection\nmin_run_length = ").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.detection.merge_overlapping = true;
        config.detection.border_run_length = 2;
        config.write_to(&path).unwrap();

        let reread = Config::from_file(&path).unwrap();
        assert!(reread.detection.merge_overlapping);
        assert_eq!(reread.detection.border_run_length, 2);
    }

    #[test]
    fn test_config_file_path_is_app_specific() {
        let path = config_file_path().unwrap();
        assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
    }
}
