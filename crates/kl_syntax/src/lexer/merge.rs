//! Merge rules: whether the next character extends the current symbol.
//!
//! The lexer produces one candidate per character. [`transition`] looks at the symbol built so far
//! and the next character and either extends the symbol (possibly reclassifying it, e.g. `+` → `+=`
//! becomes an assignment) or closes it (possibly reclassifying it, e.g. a finished name that spells
//! a keyword).
//!
//! ## Notes
//! - Per-character decisions come from `kl_core::lang::chars` tables; this module only sequences them.
//! - `previous` is only consulted for a `-` directly followed by a digit and is therefore lazy.

use kl_core::lang::chars::{self, CharClass, DoubledOutcome, EqualsOutcome, PexSide};
use kl_core::lang::keywords;

use super::SymbolKind;

/// Outcome of offering one more character to the current symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The character belongs to the current symbol, which now has this kind.
    Extend(SymbolKind),
    /// The current symbol is finished with this kind; the character starts a new one.
    Stop(SymbolKind),
}

/// Symbol kinds after which a `-` directly followed by a digit is a sign, not a subtraction.
pub const VALUE_POSITION: &[SymbolKind] = &[
    SymbolKind::Assignment,
    SymbolKind::BraceOpen,
    SymbolKind::BracketOpen,
    SymbolKind::CurlyOpen,
    SymbolKind::Semicolon,
    SymbolKind::Comma,
];

/// Markers a numeric literal may contain once each, recorded as the literal grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberMarks {
    /// A decimal point was consumed.
    pub period: bool,
    /// A hex marker (`x`) was consumed.
    pub hex: bool,
}

/// Decide whether `next` extends the symbol `text` of kind `kind`.
///
/// ## Parameters
/// - `kind`: current classification of the symbol being built.
/// - `text`: the symbol's text so far (never empty).
/// - `next`: the next source character.
/// - `marks`: number markers of the current symbol; reset by the caller when a new symbol starts.
/// - `previous`: kind of the nearest earlier symbol that is not a separator or comment.
pub fn transition(
    kind: SymbolKind,
    text: &str,
    next: char,
    marks: &mut NumberMarks,
    previous: impl FnOnce() -> Option<SymbolKind>,
) -> Transition {
    let class = chars::classify(next);
    match kind {
        SymbolKind::Name => match class {
            CharClass::Name | CharClass::Number => Transition::Extend(SymbolKind::Name),
            _ => Transition::Stop(finish(kind, text)),
        },
        SymbolKind::Number => {
            let extends = match class {
                CharClass::Number => true,
                CharClass::Period if !marks.period => {
                    marks.period = true;
                    true
                }
                _ if next == 'x' && !marks.hex => {
                    marks.hex = true;
                    true
                }
                _ => false,
            };
            if extends {
                Transition::Extend(SymbolKind::Number)
            } else {
                Transition::Stop(SymbolKind::Number)
            }
        }
        // `.5`
        SymbolKind::Period if class == CharClass::Number => {
            marks.period = true;
            Transition::Extend(SymbolKind::Number)
        }
        SymbolKind::Arithmetic => arithmetic(text, next, class, previous),
        SymbolKind::Separator if class == CharClass::Separator => Transition::Extend(SymbolKind::Separator),
        SymbolKind::Comment => {
            let closed = if text.starts_with("/*") {
                text.len() >= 4 && text.ends_with("*/")
            } else {
                next == '\n'
            };
            if closed {
                Transition::Stop(SymbolKind::Comment)
            } else {
                Transition::Extend(SymbolKind::Comment)
            }
        }
        SymbolKind::String if string_is_closed(text) => Transition::Stop(SymbolKind::String),
        SymbolKind::String => Transition::Extend(SymbolKind::String),
        other => Transition::Stop(other),
    }
}

/// Final classification of a symbol that cannot grow any further.
///
/// Names are matched against the keyword registry and a lone `=` is an assignment.
pub fn finish(kind: SymbolKind, text: &str) -> SymbolKind {
    match kind {
        SymbolKind::Name => keywords::from_str(text).map_or(SymbolKind::Name, SymbolKind::Keyword),
        SymbolKind::Arithmetic if text == "=" => SymbolKind::Assignment,
        other => other,
    }
}

fn arithmetic(
    text: &str,
    next: char,
    class: CharClass,
    previous: impl FnOnce() -> Option<SymbolKind>,
) -> Transition {
    let mut it = text.chars();
    let (Some(first), second, third) = (it.next(), it.next(), it.next()) else {
        return Transition::Stop(SymbolKind::Arithmetic);
    };
    let single = second.is_none();

    if single && next == '=' {
        return match chars::followed_by_equals(first) {
            Some(EqualsOutcome::Assignment) => Transition::Extend(SymbolKind::Assignment),
            Some(EqualsOutcome::Comparison | EqualsOutcome::Keep) => Transition::Extend(SymbolKind::Arithmetic),
            None => Transition::Stop(finish(SymbolKind::Arithmetic, text)),
        };
    }

    if single && next == first {
        return match chars::doubled(first) {
            Some(DoubledOutcome::Arithmetic) => Transition::Extend(SymbolKind::Arithmetic),
            Some(DoubledOutcome::LineComment) => Transition::Extend(SymbolKind::Comment),
            None => Transition::Stop(finish(SymbolKind::Arithmetic, text)),
        };
    }

    if single && first == '/' && chars::opens_block_comment(next) {
        return Transition::Extend(SymbolKind::Comment);
    }

    if second == Some(first) && third.is_none() && next == first {
        return match chars::tripled(first) {
            Some(PexSide::Open) => Transition::Extend(SymbolKind::PexOpen),
            Some(PexSide::Close) => Transition::Extend(SymbolKind::PexClose),
            None => Transition::Stop(SymbolKind::Arithmetic),
        };
    }

    if single && first == '-' && class == CharClass::Number {
        let signed = previous().is_some_and(|kind| VALUE_POSITION.contains(&kind));
        return if signed {
            Transition::Extend(SymbolKind::Number)
        } else {
            Transition::Stop(SymbolKind::Arithmetic)
        };
    }

    Transition::Stop(finish(SymbolKind::Arithmetic, text))
}

/// A string is closed once it ends in its opening quote and that quote is not escaped.
fn string_is_closed(text: &str) -> bool {
    let Some(quote) = text.chars().next() else {
        return false;
    };
    if text.len() < 2 || !text.ends_with(quote) {
        return false;
    }
    let body = &text[..text.len() - quote.len_utf8()];
    let backslashes = body.chars().rev().take_while(|c| *c == '\\').count();
    backslashes % 2 == 0
}
