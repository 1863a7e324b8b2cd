//! Editor queries over a parsed unit
//!
//! Hover and completion answers are computed here from a [`ParsedUnit`] snapshot and the shared
//! [`Registry`], independent of the LSP transport.

use kl_core::lang::keywords::KEYWORDS;
use kl_core::lang::types::BUILTIN_TYPES;
use kl_syntax::SymbolKind;

use crate::frontend::registry::Registry;
use crate::frontend::resolver::{MemberInfo, MemberKind};
use crate::frontend::unit::ParsedUnit;

/// Hover answer for one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    /// Symbol index the answer is about
    pub symbol: usize,
    pub text: String,
    pub ty: Option<String>,
    pub comments: String,
}

impl HoverInfo {
    pub fn to_markdown(&self) -> String {
        let mut markdown = match &self.ty {
            Some(ty) => format!("```kl\n{} {}\n```", ty, self.text),
            None => format!("```kl\n{}\n```", self.text),
        };
        if !self.comments.is_empty() {
            markdown.push_str("\n\n");
            markdown.push_str(&strip_comment_markers(&self.comments));
        }
        markdown
    }
}

/// What a completion entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Keyword,
    Type,
    Struct,
    Function,
    Operator,
    Constant,
    Field,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: Option<String>,
    pub documentation: Option<String>,
}

/// Type and documentation of the symbol under `offset`.
pub fn hover(registry: &Registry, unit: &ParsedUnit, offset: usize) -> Option<HoverInfo> {
    let index = unit.symbol_under_cursor(offset)?;
    let kind = unit.store().kind(index);
    if !matches!(kind, SymbolKind::Name | SymbolKind::Rt | SymbolKind::Keyword(_))
        && !matches!(kind, SymbolKind::BraceClose | SymbolKind::BracketClose)
    {
        return None;
    }
    let ty = registry.type_of(unit, index);
    let comments = declaration_comments(registry, unit, index);
    if ty.is_none() && comments.is_empty() {
        return None;
    }
    Some(HoverInfo {
        symbol: index,
        text: unit.symbol_text(index).to_string(),
        ty,
        comments,
    })
}

/// Completion entries for a cursor at `offset`.
///
/// After `.` (optionally followed by a partial name) the members of the receiver's type are
/// offered; anywhere else keywords, built-in types and registered declarations.
pub fn complete(registry: &Registry, unit: &ParsedUnit, offset: usize) -> Vec<Completion> {
    if let Some(receiver) = receiver_before(unit, offset) {
        return match registry.type_of(unit, receiver) {
            Some(owner) => registry.members_of(&owner).into_iter().map(member_completion).collect(),
            None => Vec::new(),
        };
    }

    let mut items: Vec<Completion> = KEYWORDS
        .iter()
        .map(|info| Completion {
            label: info.canonical.to_string(),
            kind: CompletionKind::Keyword,
            detail: Some(info.description.to_string()),
            documentation: None,
        })
        .collect();
    items.extend(BUILTIN_TYPES.iter().map(|ty| Completion {
        label: ty.to_string(),
        kind: CompletionKind::Type,
        detail: None,
        documentation: None,
    }));
    for unit in registry.snapshots() {
        declaration_completions(&unit, &mut items);
    }
    items
}

/// Symbol left of the `.` that precedes the cursor, if the cursor follows one.
fn receiver_before(unit: &ParsedUnit, offset: usize) -> Option<usize> {
    let store = unit.store();
    let mut index = unit.store().index_covering(offset.checked_sub(1)?)?;
    if store.kind(index) == SymbolKind::Name {
        index = store.prev(index, true)?;
    }
    if store.kind(index) != SymbolKind::Period {
        return None;
    }
    store.prev(index, true)
}

fn member_completion(member: MemberInfo) -> Completion {
    let kind = match member.kind {
        MemberKind::Field => CompletionKind::Field,
        MemberKind::Method => CompletionKind::Method,
    };
    Completion {
        label: member.name,
        kind,
        detail: (!member.ty.is_empty()).then_some(member.ty),
        documentation: documentation(&member.comments),
    }
}

fn declaration_completions(unit: &ParsedUnit, items: &mut Vec<Completion>) {
    for structure in unit.structs() {
        items.push(Completion {
            label: structure.name.clone(),
            kind: CompletionKind::Struct,
            detail: Some(format!("{} {}", structure.kind.as_str(), structure.name)),
            documentation: documentation(&structure.comments),
        });
    }
    for function in unit.functions().iter().filter(|f| f.owner.is_empty()) {
        items.push(Completion {
            label: function.name.clone(),
            kind: CompletionKind::Function,
            detail: (!function.ty.is_empty()).then(|| function.ty.clone()),
            documentation: documentation(&function.comments),
        });
    }
    for operator in unit.operators() {
        items.push(Completion {
            label: operator.name.clone(),
            kind: CompletionKind::Operator,
            detail: Some(format!("operator {}", operator.name)),
            documentation: documentation(&operator.comments),
        });
    }
    for constant in unit.constants() {
        items.push(Completion {
            label: constant.name.clone(),
            kind: CompletionKind::Constant,
            detail: Some(format!("const {} = {}", constant.ty, constant.value)),
            documentation: documentation(&constant.comments),
        });
    }
}

/// Comments of the declaration the symbol at `index` refers to.
fn declaration_comments(registry: &Registry, unit: &ParsedUnit, index: usize) -> String {
    let store = unit.store();
    let name = store.text(index);

    let receiver = store
        .prev(index, true)
        .filter(|p| store.kind(*p) == SymbolKind::Period)
        .and_then(|period| store.prev(period, true));
    if let Some(receiver) = receiver {
        return registry
            .type_of(unit, receiver)
            .and_then(|owner| registry.members_of(&owner).into_iter().find(|m| m.name == name))
            .map(|m| m.comments)
            .unwrap_or_default();
    }

    for unit in registry.snapshots() {
        let comments = unit
            .functions()
            .iter()
            .filter(|f| f.owner.is_empty() && f.name == name)
            .map(|f| &f.comments)
            .chain(unit.structs().iter().filter(|s| s.name == name).map(|s| &s.comments))
            .chain(unit.operators().iter().filter(|o| o.name == name).map(|o| &o.comments))
            .chain(unit.constants().iter().filter(|c| c.name == name).map(|c| &c.comments))
            .find(|c| !c.is_empty());
        if let Some(comments) = comments {
            return comments.clone();
        }
    }
    String::new()
}

fn documentation(comments: &str) -> Option<String> {
    (!comments.is_empty()).then(|| strip_comment_markers(comments))
}

/// Comment text without `//`, `/*` and `*/` markers.
fn strip_comment_markers(comments: &str) -> String {
    comments
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("//").or_else(|| line.strip_prefix("/*")).unwrap_or(line);
            let line = line.strip_suffix("*/").unwrap_or(line);
            line.trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn setup(source: &str) -> (Registry, std::sync::Arc<ParsedUnit>) {
        let registry = Registry::with_config(&EngineConfig::default());
        registry
            .get_or_create("lib", "pt", Some("// a point\nstruct Pt { Float32 x; }\n// length of the point\nfunction Float32 Pt.len() {}"))
            .unwrap();
        let unit = registry.get_or_create("doc", "main.kl", Some(source)).unwrap().snapshot();
        (registry, unit)
    }

    #[test]
    fn test_hover_member() {
        let source = "operator op() { Pt p; p.len(); }";
        let (registry, unit) = setup(source);
        let info = hover(&registry, &unit, source.find("len").unwrap()).unwrap();
        assert_eq!(info.text, "len");
        assert_eq!(info.ty.as_deref(), Some("Float32"));
        assert_eq!(info.comments, "// length of the point");
        assert_eq!(info.to_markdown(), "```kl\nFloat32 len\n```\n\nlength of the point");
    }

    #[test]
    fn test_hover_type_name() {
        let source = "operator op() { Pt p; }";
        let (registry, unit) = setup(source);
        let info = hover(&registry, &unit, source.find("Pt").unwrap()).unwrap();
        assert_eq!(info.ty, None);
        assert_eq!(info.comments, "// a point");
    }

    #[test]
    fn test_hover_nothing() {
        let source = "operator op() { q; }";
        let (registry, unit) = setup(source);
        assert!(hover(&registry, &unit, source.find('q').unwrap()).is_none());
        assert!(hover(&registry, &unit, source.find(';').unwrap()).is_none());
    }

    #[test]
    fn test_complete_members() {
        let source = "operator op() { Pt p; p. }";
        let (registry, unit) = setup(source);
        let offset = source.find("p.").unwrap() + 2;
        let items = complete(&registry, &unit, offset);
        let labels: Vec<_> = items.iter().map(|i| (i.label.as_str(), i.kind)).collect();
        assert_eq!(labels, vec![("len", CompletionKind::Method), ("x", CompletionKind::Field)]);
    }

    #[test]
    fn test_complete_partial_member_on_array() {
        let source = "operator op() { Pt ps[]; ps.si }";
        let (registry, unit) = setup(source);
        let offset = source.find(".si").unwrap() + 3;
        let labels: Vec<_> = complete(&registry, &unit, offset)
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["size".to_string(), "resize".to_string()]);
    }

    #[test]
    fn test_complete_everything_else() {
        let source = "operator op() {  }";
        let (registry, unit) = setup(source);
        let items = complete(&registry, &unit, source.find("  ").unwrap() + 1);
        let offered = |label: &str, kind: CompletionKind| items.iter().any(|i| i.label == label && i.kind == kind);
        assert!(offered("operator", CompletionKind::Keyword));
        assert!(offered("Float32", CompletionKind::Type));
        assert!(offered("Pt", CompletionKind::Struct));
        assert!(offered("op", CompletionKind::Operator));
        // Methods are only offered after a receiver.
        assert!(!items.iter().any(|i| i.label == "len"));
    }
}
