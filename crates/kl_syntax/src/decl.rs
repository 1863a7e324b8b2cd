//! Structural extractor for KL
//!
//! Recovers the declarations of a unit (requires, constants, variables, structs/objects,
//! interfaces, operators, functions) from its symbol stream. This is not a parser: there is no
//! AST, and nothing inside bodies is interpreted. Each declaration is a light record pointing back
//! into the [`SymbolStore`] by index.
//!
//! ## Examples
//!
//! ```rust
//! use kl_syntax::{decl, SymbolStore};
//!
//! let store = SymbolStore::new("operator op(Scalar a, io Scalar b) {}");
//! let decls = decl::extract(&store);
//! let args = &decls.operators[0].arguments;
//! assert_eq!(args.len(), 2);
//! assert_eq!(args[1].mode.as_str(), "io");
//! ```
//!
//! ## Notes
//! - Extraction never fails. A declaration that does not satisfy its `is_valid()` predicate is
//!   dropped, and the scan continues after whatever the recognizer consumed.

use crate::lexer::SymbolKind;
use crate::store::SymbolStore;
use kl_core::lang::chars;
use kl_core::lang::keywords::KeywordId;

// NOTE: This module is split across multiple files using `include!` so the recognizers share the
// private `Extractor` cursor without widening its visibility.

include!("decl/records.rs");
include!("decl/core.rs");
include!("decl/shapes.rs");
include!("decl/variables.rs");
include!("decl/tests.rs");
