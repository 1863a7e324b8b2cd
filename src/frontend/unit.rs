//! Parsed source units
//!
//! A [`ParsedUnit`] is one named KL source blob together with everything derived from it. It is
//! immutable: re-registering the same key builds a new unit and swaps it into the existing
//! [`UnitHandle`](super::registry::UnitHandle).

use kl_syntax::decl::{self, Constant, Declarations, Function, Interface, Operator, Struct, Variable};
use kl_syntax::{Symbol, SymbolStore};

/// One parsed KL source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    owner: String,
    name: String,
    store: SymbolStore,
    decls: Declarations,
}

impl ParsedUnit {
    /// Lex and extract `source`.
    #[tracing::instrument(skip_all, fields(owner = owner, name = name, source_len = source.len()))]
    pub fn parse(owner: &str, name: &str, source: &str) -> Self {
        let store = SymbolStore::new(source);
        let decls = decl::extract(&store);
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            store,
            decls,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        self.store.source()
    }

    pub fn store(&self) -> &SymbolStore {
        &self.store
    }

    pub fn declarations(&self) -> &Declarations {
        &self.decls
    }

    // ========================================================================
    // Symbols
    // ========================================================================

    pub fn symbol_count(&self) -> usize {
        self.store.len()
    }

    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        self.store.get(index)
    }

    pub fn symbol_text(&self, index: usize) -> &str {
        self.store.text(index)
    }

    /// Index of the symbol under a byte offset (end inclusive).
    pub fn symbol_at_offset(&self, offset: usize) -> Option<usize> {
        self.store.index_at_offset(offset)
    }

    /// Index of the symbol under a cursor at `offset`: the symbol starting or continuing there,
    /// else one ending there.
    pub fn symbol_under_cursor(&self, offset: usize) -> Option<usize> {
        self.store
            .index_covering(offset)
            .or_else(|| self.store.index_at_offset(offset))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn requires(&self) -> &[String] {
        &self.decls.requires
    }

    pub fn constants(&self) -> &[Constant] {
        &self.decls.constants
    }

    pub fn variables(&self) -> &[Variable] {
        &self.decls.variables
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.decls.interfaces
    }

    pub fn structs(&self) -> &[Struct] {
        &self.decls.structs
    }

    pub fn operators(&self) -> &[Operator] {
        &self.decls.operators
    }

    pub fn functions(&self) -> &[Function] {
        &self.decls.functions
    }

    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.decls.operator(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let unit = ParsedUnit::parse(
            "Geometry",
            "points",
            "require Math;\nstruct Pt { Float32 x; }\noperator move(io Pt p) { p.x += 1.0; }\n",
        );
        assert_eq!(unit.owner(), "Geometry");
        assert_eq!(unit.name(), "points");
        assert_eq!(unit.requires(), ["Math".to_string()]);
        assert_eq!(unit.structs().len(), 1);
        assert!(unit.operator("move").is_some());
        assert!(unit.operator("other").is_none());

        let offset = unit.source().find("move").expect("operator name");
        let index = unit.symbol_at_offset(offset).expect("symbol");
        assert_eq!(unit.symbol_text(index), "move");
    }
}
