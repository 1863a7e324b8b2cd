//! KL source intelligence frontend
//!
//! This module contains everything above the syntax layer:
//! - `unit`: one parsed source unit (symbols + declarations)
//! - `registry`: the shared cache of units keyed by `(owner, name)`
//! - `resolver`: type inference for a symbol, consulting the registry for members and methods
//! - `intrinsics`: built-in `array`, `dict` and `String` units
//! - `extensions`: loading `require`d extensions from disk
//! - `binding`: mapping operator arguments to graph ports

// Syntax components are provided by the shared kl_syntax crate.
pub use kl_syntax::{decl, lexer, store};

pub mod binding;
pub mod extensions;
pub mod intrinsics;
pub mod registry;
pub mod resolver;
pub mod unit;
