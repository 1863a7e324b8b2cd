//! Lexer for the KL language
//!
//! Handles tokenization including:
//! - Keywords (require, const, struct, object, interface, operator, function, ...)
//! - Names, numbers (decimal point, hex marker, leading sign in value position) and strings
//! - Operators, compound assignments and pex brackets (`<<<`, `>>>`)
//! - Line and block comments, which are kept as symbols
//!
//! ## Module Structure
//!
//! - `symbols` - Symbol types (SymbolKind, Symbol)
//! - `merge` - Character merge rules
//!
//! ## Notes
//! - The lexer is total: any input produces a symbol stream. Characters it cannot classify are dropped.
//! - Separators are dropped from the final stream; they carry no structural information downstream.

pub mod merge;
pub mod symbols;

pub use merge::{NumberMarks, Transition};
pub use symbols::{Symbol, SymbolKind};

use kl_core::lang::chars::{self, CharClass};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// One candidate per character, offered to the last symbol:
//
// [candidate] → merge::transition(last) → Extend → [last grows]
//                                       ↓
//                                      Stop → [last reclassified, candidate pushed]
//
// After the scan: drop separators/unknowns → promote `name name` to `rt name`.
// ============================================================================

/// Lexer for KL source code.
pub struct Lexer<'a> {
    source: &'a str,
    symbols: Vec<Symbol>,
    /// Number markers of the last symbol.
    marks: NumberMarks,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            symbols: Vec::new(),
            marks: NumberMarks::default(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns every symbol including separators. Use [`tokenize`] for the structural stream.
    pub fn tokenize_raw(mut self) -> Vec<Symbol> {
        for (pos, c) in self.source.char_indices() {
            self.scan_char(pos, c);
        }

        if let Some(last) = self.symbols.last_mut() {
            last.kind = merge::finish(last.kind, last.text(self.source));
        }

        self.symbols
    }

    /// Offer one character to the current symbol, or start a new one.
    fn scan_char(&mut self, pos: usize, c: char) {
        let source = self.source;
        if let Some((current, earlier)) = self.symbols.split_last_mut() {
            let previous = || {
                earlier
                    .iter()
                    .rev()
                    .map(|s| s.kind)
                    .find(|k| !k.is_trivia() && *k != SymbolKind::Comment)
            };
            match merge::transition(current.kind, current.text(source), c, &mut self.marks, previous) {
                Transition::Extend(kind) => {
                    current.kind = kind;
                    current.length += c.len_utf8() as u32;
                    return;
                }
                Transition::Stop(kind) => current.kind = kind,
            }
        }
        self.marks = NumberMarks::default();
        self.symbols.push(Symbol::new(classify(c), pos, c.len_utf8()));
    }
}

/// Initial kind of a one-character candidate.
fn classify(c: char) -> SymbolKind {
    match chars::classify(c) {
        CharClass::Name => SymbolKind::Name,
        CharClass::Number => SymbolKind::Number,
        CharClass::Arithmetic => SymbolKind::Arithmetic,
        CharClass::Separator => SymbolKind::Separator,
        CharClass::Semicolon => SymbolKind::Semicolon,
        CharClass::Comma => SymbolKind::Comma,
        CharClass::Period => SymbolKind::Period,
        CharClass::BraceOpen => SymbolKind::BraceOpen,
        CharClass::BraceClose => SymbolKind::BraceClose,
        CharClass::BracketOpen => SymbolKind::BracketOpen,
        CharClass::BracketClose => SymbolKind::BracketClose,
        CharClass::CurlyOpen => SymbolKind::CurlyOpen,
        CharClass::CurlyClose => SymbolKind::CurlyClose,
        CharClass::Quote => SymbolKind::String,
        CharClass::Unknown => SymbolKind::None,
    }
}

/// Promote every name directly followed by another name to a type name.
///
/// `function Scalar length()` is left alone: the name after `function`/`inline` is a return type
/// position the extractor reads by shape.
fn promote_type_names(symbols: &mut [Symbol]) {
    for i in 0..symbols.len().saturating_sub(1) {
        if symbols[i].kind != SymbolKind::Name || symbols[i + 1].kind != SymbolKind::Name {
            continue;
        }
        if i > 0 && symbols[i - 1].kind.introduces_function() {
            continue;
        }
        symbols[i].kind = SymbolKind::Rt;
    }
}

/// Lex a source string into its structural symbol stream.
///
/// Separators and unclassifiable characters are dropped, then type names are promoted.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = Lexer::new(source)
        .tokenize_raw()
        .into_iter()
        .filter(|s| !s.kind.is_trivia())
        .collect();
    promote_type_names(&mut symbols);
    tracing::trace!(symbol_count = symbols.len(), "lexed");
    symbols
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kl_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<SymbolKind> {
        tokenize(source).iter().map(|s| s.kind).collect()
    }

    fn texts(source: &str) -> Vec<&str> {
        tokenize(source).iter().map(|s| s.text(source)).collect()
    }

    fn dump(source: &str) -> String {
        tokenize(source)
            .iter()
            .map(|s| format!("{}:{}", s.kind.type_name(), s.text(source)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_keywords() {
        let k = kinds("require const struct object interface operator function inline this");
        assert_eq!(
            k,
            vec![
                SymbolKind::Keyword(KeywordId::Require),
                SymbolKind::Keyword(KeywordId::Const),
                SymbolKind::Keyword(KeywordId::Struct),
                SymbolKind::Keyword(KeywordId::Object),
                SymbolKind::Keyword(KeywordId::Interface),
                SymbolKind::Keyword(KeywordId::Operator),
                SymbolKind::Keyword(KeywordId::Function),
                SymbolKind::Keyword(KeywordId::Inline),
                SymbolKind::Keyword(KeywordId::This),
            ]
        );
    }

    #[test]
    fn test_keyword_at_end_of_input() {
        assert_eq!(kinds("return"), vec![SymbolKind::Keyword(KeywordId::Return)]);
    }

    #[test]
    fn test_signed_number_in_value_position() {
        insta::assert_snapshot!(dump("x = -5;"), @"name:x assignment:= number:-5 semicolon:;");
        insta::assert_snapshot!(dump("a-5"), @"name:a arithmetic:- number:5");
        insta::assert_snapshot!(dump("f(1, -2.5)"), @"name:f brace1:( number:1 comma:, number:-2.5 brace2:)");
    }

    #[test]
    fn test_operators_and_assignments() {
        assert_eq!(texts("a >= b == c += d"), vec!["a", ">=", "b", "==", "c", "+=", "d"]);
        assert_eq!(
            kinds("a >= b == c"),
            vec![
                SymbolKind::Name,
                SymbolKind::Assignment,
                SymbolKind::Name,
                SymbolKind::Arithmetic,
                SymbolKind::Name,
            ]
        );
        assert_eq!(texts("a||b&&c"), vec!["a", "||", "b", "&&", "c"]);
    }

    #[test]
    fn test_pex_brackets() {
        insta::assert_snapshot!(
            dump("operator op<<<index>>>()"),
            @"operator:operator name:op pex1:<<< name:index pex2:>>> brace1:( brace2:)"
        );
    }

    #[test]
    fn test_comments_are_symbols() {
        let source = "// line one\nx; /* block\n comment */ y";
        assert_eq!(texts(source), vec!["// line one", "x", ";", "/* block\n comment */", "y"]);
        assert_eq!(kinds(source)[0], SymbolKind::Comment);
        assert_eq!(kinds(source)[3], SymbolKind::Comment);
    }

    #[test]
    fn test_strings_with_escapes() {
        let source = r#"report("say \"hi\"", 'x');"#;
        assert_eq!(texts(source), vec!["report", "(", r#""say \"hi\"""#, ",", "'x'", ")", ";"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("1.5 0x1 .5 3"), vec!["1.5", "0x1", ".5", "3"]);
        assert!(kinds("1.5 0x1 .5 3").iter().all(|k| *k == SymbolKind::Number));
        // A second marker starts a new symbol.
        assert_eq!(texts("1.2.3 0x1x"), vec!["1.2", ".3", "0x1", "x"]);
    }

    #[test]
    fn test_rt_promotion() {
        assert_eq!(
            kinds("Float32 x;"),
            vec![SymbolKind::Rt, SymbolKind::Name, SymbolKind::Semicolon]
        );
        // The return type after `function` is not promoted.
        assert_eq!(
            kinds("function Scalar len()")[1..3],
            [SymbolKind::Name, SymbolKind::Name]
        );
    }

    #[test]
    fn test_unknown_characters_are_dropped() {
        assert_eq!(texts("a @ b # π"), vec!["a", "b"]);
        // An unknown character does not glue its neighbours together.
        assert_eq!(texts("abc@def"), vec!["abc", "def"]);
        assert_eq!(texts("// π is fine here\n'é'"), vec!["// π is fine here", "'é'"]);
    }

    #[test]
    fn test_offsets_strictly_increase() {
        let source = "struct Pt { Float32 x; } // done";
        let symbols = tokenize(source);
        for pair in symbols.windows(2) {
            assert!(pair[0].end() <= pair[1].start());
        }
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }
}
