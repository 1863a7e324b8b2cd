//! Syntax frontend for KL: lexer, symbol store and structural declaration extractor.
//!
//! This crate is dependency-light and intended for reuse by the registry, the CLI and the language server.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not keep a registry of units and does not infer types.
//! - Nothing here fails. Malformed input yields fewer symbols or fewer declarations, never an error.
//! - Vocabulary identity (keywords/character classes) comes from `kl_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use kl_syntax::{decl, store::SymbolStore};
//!
//! let store = SymbolStore::new("require Math;\nstruct Pt { Float32 x; }\n");
//! let decls = decl::extract(&store);
//! assert_eq!(decls.requires, vec!["Math".to_string()]);
//! assert_eq!(decls.structs[0].name, "Pt");
//! ```

pub mod decl;
pub mod lexer;
pub mod store;

pub use lexer::{Symbol, SymbolKind};
pub use store::SymbolStore;
