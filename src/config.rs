//! Engine configuration
//!
//! Settings that decide what a fresh [`Registry`](crate::frontend::registry::Registry) contains and
//! where `require`d extensions are looked up.

use std::env;
use std::path::PathBuf;

/// Environment variable holding extension search folders, in platform path-list syntax
/// (`:`-separated on Unix, `;`-separated on Windows).
pub const EXTS_PATH_ENV: &str = "KL_EXTS_PATH";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Register the built-in `array`, `dict` and `String` units on construction
    pub seed_intrinsics: bool,
    /// Folders searched for extension manifests, in order
    pub extension_paths: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_intrinsics: true,
            extension_paths: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings plus the search folders listed in [`EXTS_PATH_ENV`].
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(paths) = env::var_os(EXTS_PATH_ENV) {
            config.extension_paths = env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        config
    }

    /// Enable or disable intrinsic seeding
    pub fn with_seed_intrinsics(mut self, seed: bool) -> Self {
        self.seed_intrinsics = seed;
        self
    }

    /// Append one extension search folder
    pub fn with_extension_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.extension_paths.push(path.into());
        self
    }

    /// Put `paths` in front of the configured search folders.
    ///
    /// Used for command-line folders, which take precedence over the environment.
    pub fn with_leading_extension_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut merged: Vec<PathBuf> = paths.into_iter().collect();
        merged.append(&mut self.extension_paths);
        self.extension_paths = merged;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new();
        assert!(config.seed_intrinsics);
        assert!(config.extension_paths.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_seed_intrinsics(false)
            .with_extension_path("/opt/exts")
            .with_leading_extension_paths([PathBuf::from("./exts")]);
        assert!(!config.seed_intrinsics);
        assert_eq!(
            config.extension_paths,
            vec![PathBuf::from("./exts"), PathBuf::from("/opt/exts")]
        );
    }
}
