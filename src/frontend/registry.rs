//! Parser registry
//!
//! The registry caches parsed units keyed by `(owner, name)`. It is an explicit, shareable object
//! (put it behind an `Arc` to share it between threads) rather than process-global state.
//!
//! ## Snapshots
//!
//! Each key maps to a [`UnitHandle`]. A handle holds an immutable [`ParsedUnit`] snapshot; re-parsing
//! a key builds a new unit and swaps it into the same handle. Holders of the handle see the update
//! on their next [`UnitHandle::snapshot`], while a query already working on an older snapshot keeps
//! consistent symbol indices until it finishes.
//!
//! ## Examples
//!
//! ```rust
//! use klsense::frontend::registry::Registry;
//!
//! let registry = Registry::new();
//! let handle = registry
//!     .get_or_create("Geometry", "Pt", Some("struct Pt { Float32 x; }"))
//!     .unwrap();
//! assert_eq!(handle.snapshot().structs()[0].name, "Pt");
//! assert_eq!(registry.type_of_member("Pt", "x").as_deref(), Some("Float32"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::intrinsics;
use super::resolver::{self, MemberInfo};
use super::unit::ParsedUnit;
use crate::config::EngineConfig;

/// Error returned by [`Registry::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unit key needs a non-empty owner and name (got owner '{owner}', name '{name}')")]
    EmptyKey { owner: String, name: String },
    #[error("unit '{owner}/{name}' is not registered and no source was given")]
    NotRegistered { owner: String, name: String },
}

/// Shared handle to a registered unit.
///
/// Cloning the handle is cheap; all clones observe re-parses of the key.
#[derive(Debug, Clone)]
pub struct UnitHandle {
    inner: Arc<RwLock<Arc<ParsedUnit>>>,
}

impl UnitHandle {
    fn new(unit: ParsedUnit) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(unit))),
        }
    }

    /// The current parsed state.
    pub fn snapshot(&self) -> Arc<ParsedUnit> {
        self.inner.read().clone()
    }

    fn replace(&self, unit: ParsedUnit) {
        *self.inner.write() = Arc::new(unit);
    }

    /// `true` if both handles refer to the same registry entry.
    pub fn same_unit(&self, other: &UnitHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

type UnitKey = (String, String);

/// Cache of parsed units keyed by `(owner, name)`, iterated in key order.
#[derive(Debug, Default)]
pub struct Registry {
    units: RwLock<BTreeMap<UnitKey, UnitHandle>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry prepared according to `config`.
    pub fn with_config(config: &EngineConfig) -> Self {
        let registry = Self::new();
        if config.seed_intrinsics {
            intrinsics::seed(&registry);
        }
        registry
    }

    /// Return the unit for `(owner, name)`, parsing `code` into it when given.
    ///
    /// - Existing key, `code` given: the unit is re-parsed in place and the same handle returned.
    /// - Existing key, no `code`: the cached handle is returned unchanged.
    /// - New key: `code` is parsed and registered; without `code` this is an error.
    pub fn get_or_create(&self, owner: &str, name: &str, code: Option<&str>) -> Result<UnitHandle, RegistryError> {
        if owner.is_empty() || name.is_empty() {
            return Err(RegistryError::EmptyKey {
                owner: owner.to_string(),
                name: name.to_string(),
            });
        }

        let existing = self.get(owner, name);
        let Some(code) = code else {
            return existing.ok_or_else(|| RegistryError::NotRegistered {
                owner: owner.to_string(),
                name: name.to_string(),
            });
        };

        // Parse without holding the map lock.
        let unit = ParsedUnit::parse(owner, name, code);
        if let Some(handle) = existing {
            tracing::debug!(owner, name, "re-parsed unit");
            handle.replace(unit);
            return Ok(handle);
        }

        let mut units = self.units.write();
        let key = (owner.to_string(), name.to_string());
        if let Some(handle) = units.get(&key) {
            // Registered by someone else since the lookup above.
            handle.replace(unit);
            return Ok(handle.clone());
        }
        tracing::debug!(owner, name, "registered unit");
        let handle = UnitHandle::new(unit);
        units.insert(key, handle.clone());
        Ok(handle)
    }

    /// Cached handle for `(owner, name)`, if registered.
    pub fn get(&self, owner: &str, name: &str) -> Option<UnitHandle> {
        self.units.read().get(&(owner.to_string(), name.to_string())).cloned()
    }

    /// `true` if any unit is registered under `owner`.
    pub fn has_owner(&self, owner: &str) -> bool {
        self.units.read().keys().any(|(o, _)| o == owner)
    }

    pub fn len(&self) -> usize {
        self.units.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.read().is_empty()
    }

    /// The `index`-th unit in key order.
    pub fn unit_at(&self, index: usize) -> Option<UnitHandle> {
        self.units.read().values().nth(index).cloned()
    }

    /// All handles, in key order.
    pub fn handles(&self) -> Vec<UnitHandle> {
        self.units.read().values().cloned().collect()
    }

    /// Current snapshots of all units, in key order.
    pub fn snapshots(&self) -> Vec<Arc<ParsedUnit>> {
        self.units.read().values().map(UnitHandle::snapshot).collect()
    }

    /// Drop every unit. Outstanding handles stay valid but are no longer reachable from the registry.
    pub fn reset_all(&self) {
        let mut units = self.units.write();
        tracing::debug!(count = units.len(), "reset registry");
        units.clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Inferred type of the symbol at `index` in `unit`.
    pub fn type_of(&self, unit: &ParsedUnit, index: usize) -> Option<String> {
        resolver::type_of(self, unit, index)
    }

    /// Declared type of `owner.member` across all registered units.
    pub fn type_of_member(&self, owner: &str, member: &str) -> Option<String> {
        resolver::type_of_member(&self.snapshots(), owner, member)
    }

    /// Every member and method known for `owner`, for completion lists.
    pub fn members_of(&self, owner: &str) -> Vec<MemberInfo> {
        resolver::members_of(&self.snapshots(), owner)
    }
}
