//! Provide the canonical KL vocabulary shared by the lexer, the structural extractor and tooling.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic tables that both:
//! - the lexer uses to classify characters and decide which adjacent characters merge, and
//! - the registry/binding layer uses to validate names against reserved spellings.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no lexer-specific types.

pub mod lang;
