//! Type resolver
//!
//! Infers the declared type of a symbol for completion and hover. This is a heuristic, not a type
//! checker: it follows the nearest-prior-declaration rule for names and consults every registered
//! unit for members and methods.
//!
//! ## Rules (in priority order)
//!
//! 1. `this`: the owner of the nearest preceding function, or the function's name for free functions.
//! 2. `]`: the element type of the indexed expression.
//! 3. `)`: the return type of the called function or method.
//! 4. `name` after `.`: the member or method type on the left-hand side's type.
//! 5. Member lookup: functions matching `(owner, name)` first, then struct members, across all
//!    units in registry key order. Array and dictionary types fall back to the intrinsic
//!    `array`/`dict` owners.
//! 6. Any other name: the nearest variable declaration at or before the symbol.
//!
//! Every rule either answers or yields `None`. Each recursive step moves strictly backward through
//! the symbol stream, so resolution always terminates; chains deeper than [`MAX_DEPTH`] resolve to
//! `None`.

use std::sync::Arc;

use kl_core::lang::keywords::KeywordId;
use kl_core::lang::types;
use kl_syntax::SymbolKind;

use super::registry::Registry;
use super::unit::ParsedUnit;

/// Longest member, index or call chain followed before giving up.
///
/// Every step already moves backward, so the symbol count bounds recursion too. This cap keeps the
/// stack bounded on long generated chains; a deeper chain resolves to `None`.
pub const MAX_DEPTH: usize = 512;

/// What a completion entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

/// One member or method of an owner type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub kind: MemberKind,
    pub name: String,
    /// Member type, or method return type (may be empty for methods)
    pub ty: String,
    pub comments: String,
}

/// Inferred type of the symbol at `index` in `unit`.
pub fn type_of(registry: &Registry, unit: &ParsedUnit, index: usize) -> Option<String> {
    let resolver = Resolver {
        unit,
        units: LazyUnits::new(registry),
    };
    resolver.resolve(index, 0).filter(|ty| !ty.is_empty())
}

/// Declared type of `owner.member` in `units`.
///
/// A matching method with no return type ends the search with `None`.
pub fn type_of_member(units: &[Arc<ParsedUnit>], owner: &str, member: &str) -> Option<String> {
    match lookup_member(units, owner, member) {
        Some(ty) => Some(ty).filter(|ty| !ty.is_empty()),
        None => {
            let intrinsic = types::container_owner(owner)?;
            lookup_member(units, intrinsic, member).filter(|ty| !ty.is_empty())
        }
    }
}

/// Every struct member and method declared for `owner` in `units`.
pub fn members_of(units: &[Arc<ParsedUnit>], owner: &str) -> Vec<MemberInfo> {
    let owner = types::container_owner(owner).unwrap_or(owner);
    let mut members = Vec::new();
    for unit in units {
        for function in unit.functions().iter().filter(|f| f.owner == owner) {
            members.push(MemberInfo {
                kind: MemberKind::Method,
                name: function.name.clone(),
                ty: function.ty.clone(),
                comments: function.comments.clone(),
            });
        }
        for structure in unit.structs().iter().filter(|s| s.name == owner) {
            for member in &structure.members {
                members.push(MemberInfo {
                    kind: MemberKind::Field,
                    name: member.name.clone(),
                    ty: member.ty.clone(),
                    comments: String::new(),
                });
            }
        }
    }
    members
}

/// First declared type of `owner.member`, `Some("")` for a method without return type.
fn lookup_member(units: &[Arc<ParsedUnit>], owner: &str, member: &str) -> Option<String> {
    units.iter().find_map(|unit| {
        let method = unit
            .functions()
            .iter()
            .find(|f| f.owner == owner && f.name == member)
            .map(|f| f.ty.clone());
        method.or_else(|| {
            unit.structs()
                .iter()
                .filter(|s| s.name == owner)
                .find_map(|s| s.member(member))
                .map(|m| m.ty.clone())
        })
    })
}

/// Registry snapshots, taken on the first member lookup.
struct LazyUnits<'r> {
    registry: &'r Registry,
    units: std::cell::OnceCell<Vec<Arc<ParsedUnit>>>,
}

impl<'r> LazyUnits<'r> {
    fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            units: std::cell::OnceCell::new(),
        }
    }

    fn get(&self) -> &[Arc<ParsedUnit>] {
        self.units.get_or_init(|| self.registry.snapshots())
    }
}

struct Resolver<'a> {
    unit: &'a ParsedUnit,
    units: LazyUnits<'a>,
}

impl Resolver<'_> {
    fn resolve(&self, index: usize, depth: usize) -> Option<String> {
        if depth > MAX_DEPTH {
            return None;
        }
        let store = self.unit.store();
        match store.kind(index) {
            SymbolKind::Keyword(KeywordId::This) => {
                let function = self.unit.declarations().function_before(index)?;
                let owner = if function.owner.is_empty() { &function.name } else { &function.owner };
                Some(owner.clone())
            }
            SymbolKind::BracketClose => {
                let open = store.matching_open(index, SymbolKind::BracketOpen, SymbolKind::BracketClose)?;
                let indexed = self.resolve(store.prev(open, true)?, depth + 1)?;
                Some(types::element_type(&indexed).to_string())
            }
            SymbolKind::BraceClose => {
                let open = store.matching_open(index, SymbolKind::BraceOpen, SymbolKind::BraceClose)?;
                let target = store.prev(open, true)?;
                let name = store.text(target);
                match self.receiver_type(target, depth) {
                    Receiver::Typed(owner) => self.member(&owner, name),
                    Receiver::Unresolved => None,
                    Receiver::None => self.member("", name),
                }
            }
            SymbolKind::Name => match self.receiver_type(index, depth) {
                Receiver::Typed(owner) => self.member(&owner, store.text(index)),
                Receiver::Unresolved => None,
                Receiver::None => self.variable(index),
            },
            _ => None,
        }
    }

    /// Type of the expression left of `.` when `index` is preceded by one.
    fn receiver_type(&self, index: usize, depth: usize) -> Receiver {
        let store = self.unit.store();
        let Some(period) = store.prev(index, true).filter(|p| store.kind(*p) == SymbolKind::Period) else {
            return Receiver::None;
        };
        match store.prev(period, true).and_then(|lhs| self.resolve(lhs, depth + 1)) {
            Some(ty) if !ty.is_empty() => Receiver::Typed(ty),
            _ => Receiver::Unresolved,
        }
    }

    fn member(&self, owner: &str, member: &str) -> Option<String> {
        type_of_member(self.units.get(), owner, member)
    }

    fn variable(&self, index: usize) -> Option<String> {
        let name = self.unit.store().text(index);
        self.unit
            .variables()
            .iter()
            .rev()
            .find(|v| v.symbol <= index && v.name == name)
            .map(|v| v.ty.clone())
    }
}

enum Receiver {
    /// Not a member access.
    None,
    /// Member access on an expression of unknown type.
    Unresolved,
    Typed(String),
}
