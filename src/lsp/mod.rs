//! KL Language Server Protocol (LSP) implementation
//!
//! Provides IDE features:
//! - Hover information (inferred type, declaration comments)
//! - Completions (members after `.`, keywords and declarations elsewhere)
//! - Warnings for unresolved `require`s

pub mod analysis;
pub mod backend;
pub mod diagnostics;
pub mod position;

pub use backend::KlLanguageServer;
