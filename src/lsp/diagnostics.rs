//! Diagnostics published for KL documents
//!
//! The engine never fails on malformed source, so the only diagnostics are `require`s that no
//! registered unit or extension satisfies.

use kl_core::lang::keywords::KeywordId;
use kl_syntax::SymbolKind;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity};

use super::position::span_to_range;
use crate::frontend::unit::ParsedUnit;

/// One warning per `require` statement naming an entry of `unresolved`.
pub fn unresolved_requires(unit: &ParsedUnit, unresolved: &[String]) -> Vec<Diagnostic> {
    let store = unit.store();
    (0..store.len())
        .filter(|i| store.kind(*i) == SymbolKind::Keyword(KeywordId::Require))
        .filter_map(|i| store.next(i, true))
        .filter(|name| unresolved.iter().any(|u| u == store.text(*name)))
        .filter_map(|name| store.get(name))
        .map(|symbol| Diagnostic {
            range: span_to_range(unit.source(), symbol.start(), symbol.end()),
            severity: Some(DiagnosticSeverity::WARNING),
            code: None,
            code_description: None,
            source: Some("klsense".to_string()),
            message: format!("extension '{}' not found in search paths", symbol.text(unit.source())),
            related_information: None,
            tags: None,
            data: None,
        })
        .collect()
}
