//! Names that may not be used for operator ports.
//!
//! A port name is bound into the generated operator signature, so it must be neither a KL keyword
//! nor one of the names the graph runtime injects itself.
//!
//! ## Examples
//! ```rust
//! use kl_core::lang::reserved::{self, ReservedReason};
//!
//! assert_eq!(reserved::check_port_name("index"), Some(ReservedReason::RuntimeName));
//! assert_eq!(reserved::check_port_name("while"), Some(ReservedReason::Keyword));
//! assert_eq!(reserved::check_port_name("points"), None);
//! ```

use super::keywords;

/// Names injected by the graph runtime into operator scope.
pub const RESERVED_PORT_NAMES: &[&str] = &["index", "name", "self", "null", "context"];

/// Why a name is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedReason {
    RuntimeName,
    Keyword,
}

/// Check a candidate port name against the reserved vocabularies.
pub fn check_port_name(name: &str) -> Option<ReservedReason> {
    if RESERVED_PORT_NAMES.contains(&name) {
        return Some(ReservedReason::RuntimeName);
    }
    keywords::from_str(name).map(|_| ReservedReason::Keyword)
}
