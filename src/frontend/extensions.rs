//! Extension loading
//!
//! A `require Name;` refers to an extension: a folder containing `Name.fpm.json` plus the KL files
//! the manifest lists. Extensions are looked up breadth-first below the configured search folders.
//!
//! ## Manifest
//!
//! ```json
//! { "code": ["Vec3.kl", "Mat44"] }
//! ```
//!
//! `"code"` may also be a single string. File names are relative to the manifest folder; `.kl` is
//! appended when missing. Other manifest keys are ignored. A manifest without `"code"` registers one
//! empty `(Name, Name)` unit so the extension still counts as loaded.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use kl_core::lang::types;

use super::registry::{Registry, RegistryError, UnitHandle};
use super::unit::ParsedUnit;
use crate::config::EngineConfig;

const MANIFEST_SUFFIX: &str = ".fpm.json";
const SOURCE_EXTENSION: &str = "kl";

/// Errors raised while loading an extension.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    #[error("no extension search path configured")]
    NoSearchPath,
    #[error("extension '{name}' not found in search paths")]
    NotFound { name: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid manifest {}: {reason}", path.display())]
    ManifestShape { path: PathBuf, reason: &'static str },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Finds and registers extensions.
#[derive(Debug, Clone, Default)]
pub struct ExtensionLoader {
    search_paths: Vec<PathBuf>,
}

impl ExtensionLoader {
    pub fn new(search_paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            search_paths: search_paths.into_iter().collect(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.extension_paths.iter().cloned())
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Path of the manifest for extension `name`.
    pub fn find_manifest(&self, name: &str) -> Result<PathBuf, ExtensionError> {
        if self.search_paths.is_empty() {
            return Err(ExtensionError::NoSearchPath);
        }
        let file_name = format!("{name}{MANIFEST_SUFFIX}");
        let mut queue: VecDeque<PathBuf> = self.search_paths.iter().cloned().collect();
        while let Some(folder) = queue.pop_front() {
            let candidate = folder.join(&file_name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            queue.extend(subfolders(&folder));
        }
        Err(ExtensionError::NotFound { name: name.to_string() })
    }

    /// Load extension `name` and register each of its files as `(name, file stem)`.
    #[tracing::instrument(skip_all, fields(name = name))]
    pub fn load(&self, registry: &Registry, name: &str) -> Result<Vec<UnitHandle>, ExtensionError> {
        let manifest = self.find_manifest(name)?;
        let folder = manifest.parent().unwrap_or(Path::new(".")).to_path_buf();
        let files = read_manifest(&manifest)?;
        if files.is_empty() {
            // Nothing to parse, but the owner must be known so later requires count as loaded.
            tracing::debug!(manifest = %manifest.display(), "extension has no KL code");
            return Ok(vec![registry.get_or_create(name, name, Some(""))?]);
        }

        let mut handles = Vec::with_capacity(files.len());
        for file in files {
            let mut path = folder.join(&file);
            if path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION) {
                path = folder.join(format!("{file}.{SOURCE_EXTENSION}"));
            }
            let code = fs::read_to_string(&path).map_err(|source| ExtensionError::Io {
                path: path.clone(),
                source,
            })?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.clone());
            handles.push(registry.get_or_create(name, &stem, Some(&code))?);
        }
        tracing::info!(files = handles.len(), manifest = %manifest.display(), "loaded extension");
        Ok(handles)
    }

    /// Load every extension `unit` requires that is not registered yet, including what the loaded
    /// files require in turn.
    ///
    /// Returns the names that could not be loaded.
    pub fn load_requires(&self, registry: &Registry, unit: &ParsedUnit) -> Vec<String> {
        let mut unresolved = Vec::new();
        let mut pending: VecDeque<String> = unit.requires().iter().cloned().collect();
        while let Some(name) = pending.pop_front() {
            if types::is_builtin(&name) || registry.has_owner(&name) || unresolved.contains(&name) {
                continue;
            }
            match self.load(registry, &name) {
                Ok(handles) => {
                    for handle in handles {
                        pending.extend(handle.snapshot().requires().iter().cloned());
                    }
                }
                Err(err) => {
                    tracing::warn!(name = %name, error = %err, "unresolved require");
                    unresolved.push(name);
                }
            }
        }
        unresolved
    }
}

/// Immediate subfolders of `folder` in name order; unreadable folders have none.
fn subfolders(folder: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(folder = %folder.display(), error = %err, "skipping search folder");
            return Vec::new();
        }
    };
    let mut folders: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    folders
}

/// File names listed under `"code"`.
fn read_manifest(path: &Path) -> Result<Vec<String>, ExtensionError> {
    let text = fs::read_to_string(path).map_err(|source| ExtensionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|source| ExtensionError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    let shape_error = |reason| ExtensionError::ManifestShape {
        path: path.to_path_buf(),
        reason,
    };
    match json.get("code") {
        None => Ok(Vec::new()),
        Some(serde_json::Value::String(file)) => Ok(vec![file.clone()]),
        Some(serde_json::Value::Array(files)) => files
            .iter()
            .map(|file| {
                file.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| shape_error("\"code\" entries must be strings"))
            })
            .collect(),
        Some(_) => Err(shape_error("\"code\" must be a string or an array of strings")),
    }
}
