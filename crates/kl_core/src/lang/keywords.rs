//! Define the reserved keyword vocabulary for the KL language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings
//! and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - The table order matches the order in which the lexer reports keyword kinds; it is not
//!   semantically meaningful otherwise.
//!
//! ## Examples
//! ```rust
//! use kl_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("struct"), Some(KeywordId::Struct));
//! assert_eq!(keywords::category(KeywordId::Struct), KeywordCategory::Declaration);
//! assert_eq!(keywords::from_str("Struct"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    // Parameter modes
    In,
    Io,

    // Control flow / statements
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,

    // Receivers / literals
    This,
    Null,

    // Declarations
    Alias,
    Require,
    Const,
    Inline,
    Function,
    Operator,
    Struct,
    Object,
    Interface,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ParameterMode,
    ControlFlow,
    Receiver,
    Literal,
    Declaration,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Parameter modes
    info(
        KeywordId::In,
        "in",
        KeywordCategory::ParameterMode,
        "Read-only parameter (the default mode).",
    ),
    info(
        KeywordId::Io,
        "io",
        KeywordCategory::ParameterMode,
        "Read-write parameter.",
    ),
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, "Conditional branch."),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, "Alternative branch."),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow, "Multi-way branch."),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow, "Switch arm."),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow, "Fallback switch arm."),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, "Counted loop."),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, "Conditional loop."),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, "Post-condition loop."),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, "Leave the enclosing loop."),
    info(
        KeywordId::Continue,
        "continue",
        KeywordCategory::ControlFlow,
        "Skip to the next loop iteration.",
    ),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, "Return from a function."),
    // Receivers / literals
    info(
        KeywordId::This,
        "this",
        KeywordCategory::Receiver,
        "Receiver of the enclosing method.",
    ),
    info(KeywordId::Null, "null", KeywordCategory::Literal, "Null object reference."),
    // Declarations
    info(KeywordId::Alias, "alias", KeywordCategory::Declaration, "Type alias."),
    info(
        KeywordId::Require,
        "require",
        KeywordCategory::Declaration,
        "Load an extension or another KL unit.",
    ),
    info(KeywordId::Const, "const", KeywordCategory::Declaration, "Named constant."),
    info(
        KeywordId::Inline,
        "inline",
        KeywordCategory::Declaration,
        "Inline function declaration.",
    ),
    info(
        KeywordId::Function,
        "function",
        KeywordCategory::Declaration,
        "Function or method declaration.",
    ),
    info(
        KeywordId::Operator,
        "operator",
        KeywordCategory::Declaration,
        "Graph operator entry point.",
    ),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration, "Value type."),
    info(KeywordId::Object, "object", KeywordCategory::Declaration, "Reference type."),
    info(
        KeywordId::Interface,
        "interface",
        KeywordCategory::Declaration,
        "Set of method signatures.",
    ),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` for keywords that introduce a function declaration (`function`, `inline`).
pub fn introduces_function(id: KeywordId) -> bool {
    matches!(id, KeywordId::Function | KeywordId::Inline)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
    }
}
