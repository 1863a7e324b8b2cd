//! KL language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, character classes,
//! operator merge tables, reserved port names and the built-in type names.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `CharClass`) and look up spellings/metadata via
//! registry tables instead of scattering string comparisons across the lexer and extractor.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no symbol types, no IO, no side effects.
//! - The lexer enforces merging; registries only answer “what is this character / spelling”.
//!
//! ## Examples
//! ```rust
//! use kl_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("operator"), Some(KeywordId::Operator));
//! assert_eq!(keywords::as_str(KeywordId::Operator), "operator");
//! ```

pub mod chars;
pub mod keywords;
pub mod reserved;
pub mod types;
