//! Larder - Store Configuration
//! Defines the backing-file location and compression behavior.

use std::path::{Path, PathBuf};

/// Compression behavior for the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressMode {
    /// Infer from the file name: gzip when it ends in `.gz`.
    #[default]
    Auto,
    /// Always gzip, regardless of the file name.
    On,
    /// Never gzip, regardless of the file name.
    Off,
}

/// Configuration for a Larder store.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backing file used by `save()` and `set_and_save()`.
    /// A store without a location is memory-only until `save_to` is
    /// called with an explicit path.
    pub location: Option<PathBuf>,

    /// Whether persistence gzips the encoded bytes.
    pub compress: CompressMode,
}

impl Config {
    /// Create a new Config with a backing file location.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    /// Set the compression mode.
    pub fn with_compress(mut self, mode: CompressMode) -> Self {
        self.compress = mode;
        self
    }

    /// The path `save()` writes to, computed from location + mode:
    /// `On` appends `.gz` when the location lacks it, `Off` strips a
    /// trailing `.gz`, `Auto` returns the location as configured.
    /// The stored location itself is never modified.
    pub fn effective_location(&self) -> Option<PathBuf> {
        self.location
            .as_deref()
            .map(|loc| effective_path(loc, self.compress))
    }

    /// Whether a file at `path` is written/read gzipped under this config.
    pub fn compress_for(&self, path: &Path) -> bool {
        match self.compress {
            CompressMode::On => true,
            CompressMode::Off => false,
            CompressMode::Auto => has_gz_suffix(path),
        }
    }
}

/// Apply a compression mode to a base path, without mutating anything.
fn effective_path(path: &Path, mode: CompressMode) -> PathBuf {
    match mode {
        CompressMode::On if !has_gz_suffix(path) => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".gz");
            PathBuf::from(name)
        }
        CompressMode::Off if has_gz_suffix(path) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

fn has_gz_suffix(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        let config = Config::default();
        assert_eq!(config.compress, CompressMode::Auto);
        assert!(config.location.is_none());
        assert!(config.effective_location().is_none());
    }

    #[test]
    fn test_auto_infers_from_suffix() {
        let config = Config::new("store.json");
        assert!(!config.compress_for(Path::new("store.json")));
        assert!(config.compress_for(Path::new("store.json.gz")));
    }

    #[test]
    fn test_on_appends_gz() {
        let config = Config::new("store.json").with_compress(CompressMode::On);
        assert_eq!(
            config.effective_location(),
            Some(PathBuf::from("store.json.gz"))
        );
        assert!(config.compress_for(Path::new("store.json")));
    }

    #[test]
    fn test_on_keeps_existing_gz() {
        let config = Config::new("store.json.gz").with_compress(CompressMode::On);
        assert_eq!(
            config.effective_location(),
            Some(PathBuf::from("store.json.gz"))
        );
    }

    #[test]
    fn test_off_strips_gz() {
        let config = Config::new("store.json.gz").with_compress(CompressMode::Off);
        assert_eq!(
            config.effective_location(),
            Some(PathBuf::from("store.json"))
        );
        assert!(!config.compress_for(Path::new("store.json.gz")));
    }

    #[test]
    fn test_auto_leaves_location_alone() {
        let config = Config::new("store.json.gz");
        assert_eq!(
            config.effective_location(),
            Some(PathBuf::from("store.json.gz"))
        );
        // The configured location is untouched either way.
        assert_eq!(config.location, Some(PathBuf::from("store.json.gz")));
    }
}
