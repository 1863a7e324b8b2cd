//! Symbol types for the KL lexer.
//!
//! A [`Symbol`] is a classified view into the source buffer of the unit that produced it:
//! it stores a byte offset and length, never the text itself.
//!
//! ## Notes
//! - Keyword symbols carry stable IDs from `kl_core::lang::keywords`.
//! - `Rt` is not produced by character classification; it is assigned after lexing to a name that
//!   is immediately followed by another name (KL has no separate type sigil).

use kl_core::lang::keywords::{self, KeywordId};

/// Kind of symbol produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Unclassifiable input; never present in a finished symbol stream.
    None,

    // ========== Layout / punctuation ==========
    Separator,
    Semicolon,
    Comma,
    Period,
    Comment,

    // ========== Keywords (ID-based) ==========
    Keyword(KeywordId),

    // ========== Names and literals ==========
    /// A name promoted to a type name.
    Rt,
    Name,
    Number,
    String,

    // ========== Operators ==========
    Assignment,
    Arithmetic,

    // ========== Delimiters ==========
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,
    /// `<<<`
    PexOpen,
    /// `>>>`
    PexClose,
}

impl SymbolKind {
    /// Stable display name, as printed by symbol dumps.
    pub fn type_name(&self) -> &'static str {
        match self {
            SymbolKind::None => "None",
            SymbolKind::Separator => "separator",
            SymbolKind::Semicolon => "semicolon",
            SymbolKind::Comma => "comma",
            SymbolKind::Period => "period",
            SymbolKind::Comment => "comment",
            SymbolKind::Keyword(id) => keywords::as_str(*id),
            SymbolKind::Rt => "rt",
            SymbolKind::Name => "name",
            SymbolKind::Number => "number",
            SymbolKind::String => "string",
            SymbolKind::Assignment => "assignment",
            SymbolKind::Arithmetic => "arithmetic",
            SymbolKind::BraceOpen => "brace1",
            SymbolKind::BraceClose => "brace2",
            SymbolKind::BracketOpen => "bracket1",
            SymbolKind::BracketClose => "bracket2",
            SymbolKind::CurlyOpen => "curly1",
            SymbolKind::CurlyClose => "curly2",
            SymbolKind::PexOpen => "pex1",
            SymbolKind::PexClose => "pex2",
        }
    }

    /// Return the keyword id, if this is a keyword symbol.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            SymbolKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, SymbolKind::Keyword(k) if *k == id)
    }

    /// Return `true` for `function` and `inline`.
    pub fn introduces_function(&self) -> bool {
        self.keyword_id().is_some_and(keywords::introduces_function)
    }

    /// Return `true` for symbols that carry no structural information downstream.
    pub fn is_trivia(&self) -> bool {
        matches!(self, SymbolKind::Separator | SymbolKind::None)
    }
}

/// A classified span of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Byte offset of the first character.
    pub offset: u32,
    /// Length in bytes.
    pub length: u32,
    pub kind: SymbolKind,
}

impl Symbol {
    /// Construct a new symbol.
    pub fn new(kind: SymbolKind, offset: usize, length: usize) -> Self {
        Self {
            offset: offset as u32,
            length: length as u32,
            kind,
        }
    }

    /// Byte offset of the first character.
    pub fn start(&self) -> usize {
        self.offset as usize
    }

    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        (self.offset + self.length) as usize
    }

    /// Resolve this symbol against the buffer it was lexed from.
    ///
    /// Returns an empty string if the symbol does not fit `source` (e.g. a stale symbol held
    /// across a re-parse).
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start()..self.end()).unwrap_or("")
    }
}
