//! Symbol store: the lexed, immutable symbol sequence of one source unit.
//!
//! The store owns the source buffer, so every [`Symbol`] it hands out can be resolved to text
//! without borrowing from anywhere else. All navigation is by index; helpers return a new index
//! (or `None` when walking off either end) and never mutate the store.

use crate::lexer::{self, Symbol, SymbolKind};

/// Source buffer plus its symbol sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolStore {
    source: String,
    symbols: Vec<Symbol>,
}

impl SymbolStore {
    /// Lex `source` and take ownership of it.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let symbols = lexer::tokenize(&source);
        Self { source, symbols }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    /// Kind of the symbol at `index`; out-of-range indices read as [`SymbolKind::None`].
    pub fn kind(&self, index: usize) -> SymbolKind {
        self.symbols.get(index).map_or(SymbolKind::None, |s| s.kind)
    }

    /// Text of the symbol at `index`; out-of-range indices read as `""`.
    pub fn text(&self, index: usize) -> &str {
        self.symbols.get(index).map_or("", |s| s.text(&self.source))
    }

    /// Index of the first symbol whose span contains `offset` (end inclusive).
    ///
    /// The inclusive end lets a cursor placed right after a name (the usual position while
    /// typing) still find that name. Offsets at or past the end of the source yield `None`.
    pub fn index_at_offset(&self, offset: usize) -> Option<usize> {
        if offset >= self.source.len() {
            return None;
        }
        // Symbols are sorted and disjoint.
        let candidate = self.symbols.partition_point(|s| s.end() < offset);
        (self.symbols.get(candidate)?.start() <= offset).then_some(candidate)
    }

    /// Index of the symbol whose span contains `offset`, end exclusive.
    ///
    /// Where two symbols touch, this picks the one starting at `offset`.
    pub fn index_covering(&self, offset: usize) -> Option<usize> {
        let candidate = self.symbols.partition_point(|s| s.end() <= offset);
        (self.symbols.get(candidate)?.start() <= offset).then_some(candidate)
    }

    /// Next symbol after `index`, optionally skipping comments.
    pub fn next(&self, index: usize, skip_comments: bool) -> Option<usize> {
        (index + 1..self.len()).find(|i| !skip_comments || self.kind(*i) != SymbolKind::Comment)
    }

    /// Previous symbol before `index`, optionally skipping comments.
    pub fn prev(&self, index: usize, skip_comments: bool) -> Option<usize> {
        (0..index.min(self.len()))
            .rev()
            .find(|i| !skip_comments || self.kind(*i) != SymbolKind::Comment)
    }

    /// Matching opener for the closer at `close`, walking backward with a depth counter.
    ///
    /// Returns `None` if `close` is not of kind `closer` or the opener is missing.
    pub fn matching_open(&self, close: usize, opener: SymbolKind, closer: SymbolKind) -> Option<usize> {
        if self.kind(close) != closer {
            return None;
        }
        let mut depth = 0usize;
        for i in (0..=close).rev() {
            let kind = self.kind(i);
            if kind == closer {
                depth += 1;
            } else if kind == opener {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Matching closer for the opener at `open`, walking forward with a depth counter.
    pub fn matching_close(&self, open: usize, opener: SymbolKind, closer: SymbolKind) -> Option<usize> {
        if self.kind(open) != opener {
            return None;
        }
        let mut depth = 0usize;
        for i in open..self.len() {
            let kind = self.kind(i);
            if kind == opener {
                depth += 1;
            } else if kind == closer {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Comments immediately preceding `index`, newline-joined in source order.
    pub fn comments_before(&self, index: usize) -> String {
        let mut first = index.min(self.len());
        while first > 0 && self.kind(first - 1) == SymbolKind::Comment {
            first -= 1;
        }
        (first..index.min(self.len()))
            .map(|i| self.text(i))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
