use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub(crate) const APP_DIR: &str = "lazytxt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Storage roots for the first screen. Empty means home plus `/`.
    pub(crate) roots: Vec<PathBuf>,
    /// Extensions the viewer accepts, without the dot.
    pub(crate) text_extensions: Vec<String>,
    pub(crate) watch: bool,
    pub(crate) tick_rate_ms: u64,
    pub(crate) status_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            text_extensions: vec!["txt".to_string()],
            watch: true,
            tick_rate_ms: 100,
            status_ttl_ms: 3000,
        }
    }
}

impl Config {
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.json"))
    }

    /// Loads `explicit` if given (it must exist), else the default location
    /// when present, else defaults.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    pub(crate) fn is_openable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.text_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    pub(crate) fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub(crate) fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "watch": false, "text_extensions": ["txt", "md"] }"#).unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        assert!(!cfg.watch);
        assert_eq!(cfg.tick_rate_ms, 100);
        assert!(cfg.is_openable(Path::new("README.MD")));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = tempdir().unwrap();
        assert!(matches!(
            Config::load(Some(&tmp.path().join("absent.json"))),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/config.json");
        let cfg = Config {
            roots: vec![tmp.path().to_path_buf()],
            status_ttl_ms: 500,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn only_txt_opens_by_default() {
        let cfg = Config::default();
        assert!(cfg.is_openable(Path::new("/a/Notes.TXT")));
        assert!(!cfg.is_openable(Path::new("/a/image.png")));
        assert!(!cfg.is_openable(Path::new("/a/Makefile")));
    }
}
