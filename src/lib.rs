#![forbid(unsafe_code)]
//! KL source intelligence
//!
//! klsense reads KL source (the kernel language of the Fabric graph runtime) and answers editor
//! questions about it: which declarations a file contains, what type a symbol has, which members
//! a value offers, and which ports an operator exposes. The syntax layer lives in `kl_syntax`; this
//! crate adds the shared unit registry, type resolution, extension loading, and the tooling on top
//! (CLI and LSP).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Queries**: Malformed source never fails a query. Lexing and extraction are total, and resolution answers
//!   `None` when it cannot tell.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod frontend;
pub mod lsp;

pub use frontend::{decl, lexer, store};

pub use config::EngineConfig;
pub use frontend::binding::{BindError, PortBinding, bind_operator, validate_port_name};
pub use frontend::extensions::{ExtensionError, ExtensionLoader};
pub use frontend::registry::{Registry, RegistryError, UnitHandle};
pub use frontend::resolver::{MemberInfo, MemberKind};
pub use frontend::unit::ParsedUnit;
