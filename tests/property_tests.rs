//! Property-based tests for the KL frontend
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use klsense::frontend::lexer;
use klsense::{ParsedUnit, Registry};
use proptest::prelude::*;

// =============================================================================
// Lexer Properties
// =============================================================================

mod lexer_tests {
    use super::*;
    use kl_core::lang::chars::{self, CharClass};
    use klsense::lexer::Lexer;

    /// Printable ASCII plus tab, carriage return and newline.
    fn ascii_source() -> impl Strategy<Value = String> {
        "[ -~\t\r\n]{0,120}"
    }

    /// Source built from the fragments the merge rules care about, so comments, escaped strings,
    /// signed numbers and pex brackets show up in most cases.
    fn tricky_source() -> impl Strategy<Value = String> {
        let literal = prop::sample::select(vec![
            "//", "/*", "*/", "\"", "'", "\\", "<<<", ">>>", "= -", "(-", "0x", ".", "\n", "\r\n", "\t",
        ])
        .prop_map(str::to_string);
        let fragment = prop_oneof![
            3 => literal,
            1 => "[a-z]{1,3}",
            1 => "[0-9]{1,3}",
            1 => "[-+*/<>=!?:|&^%~;,(){}\\[\\] ]",
        ];
        prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.concat())
    }

    /// Symbols are sorted, never overlap, and leave out only separators and unknown characters.
    fn check_coverage(source: &str) -> Result<(), TestCaseError> {
        let symbols = lexer::tokenize(source);
        let mut covered = vec![false; source.len()];
        let mut last: Option<(usize, usize)> = None;
        for symbol in &symbols {
            prop_assert!(symbol.length > 0);
            if let Some((start, end)) = last {
                prop_assert!(symbol.start() > start, "not increasing at {}", symbol.start());
                prop_assert!(symbol.start() >= end, "overlap at {}", symbol.start());
            }
            prop_assert!(symbol.end() <= source.len());
            for flag in &mut covered[symbol.start()..symbol.end()] {
                *flag = true;
            }
            last = Some((symbol.start(), symbol.end()));
        }
        for (i, c) in source.char_indices() {
            let droppable = matches!(chars::classify(c), CharClass::Separator | CharClass::Unknown);
            prop_assert!(covered[i] || droppable, "byte {} ({:?}) dropped", i, c);
        }
        Ok(())
    }

    /// The unfiltered stream tiles the source exactly.
    fn check_raw_tiling(source: &str) -> Result<(), TestCaseError> {
        let raw = Lexer::new(source).tokenize_raw();
        let mut offset = 0usize;
        for symbol in &raw {
            prop_assert_eq!(symbol.start(), offset);
            prop_assert!(symbol.length > 0);
            offset = symbol.end();
        }
        let rebuilt: String = raw.iter().map(|s| s.text(source)).collect();
        prop_assert_eq!(rebuilt.as_str(), source);
        Ok(())
    }

    proptest! {
        /// Property: symbols cover every byte that is not a separator or unknown character
        #[test]
        fn symbols_cover_source(source in ascii_source()) {
            check_coverage(&source)?;
        }

        /// Property: coverage holds around comments, strings, signs and pex brackets
        #[test]
        fn symbols_cover_merge_heavy_source(source in tricky_source()) {
            check_coverage(&source)?;
        }

        /// Property: concatenating the raw symbols reproduces the input byte for byte
        #[test]
        fn raw_symbols_reconstruct_source(source in ascii_source()) {
            check_raw_tiling(&source)?;
        }

        /// Property: raw tiling holds for merge-heavy input and non-ASCII text
        #[test]
        fn raw_symbols_reconstruct_merge_heavy_source(source in prop_oneof![tricky_source(), "\\PC{0,80}"]) {
            check_raw_tiling(&source)?;
        }

        /// Property: names and keywords survive lexing as one symbol
        #[test]
        fn identifiers_survive_lexing(ident in "[a-z][a-zA-Z0-9_]{0,12}") {
            let source = format!("x = {ident};");
            let symbols = lexer::tokenize(&source);
            prop_assert_eq!(symbols.len(), 4);
            prop_assert_eq!(symbols[2].text(&source), ident.as_str());
        }
    }
}

// =============================================================================
// Extraction and Resolution Properties
// =============================================================================

mod engine_tests {
    use super::*;

    fn declaration_strategy() -> impl Strategy<Value = String> {
        let ident = "[A-Z][a-z]{1,6}";
        prop_oneof![
            ident.prop_map(|name| format!("require {name};")),
            (ident, ident).prop_map(|(ty, name)| format!("struct {name} {{ {ty} value; }}")),
            (ident, ident).prop_map(|(ty, owner)| format!("function {ty} {owner}.get() {{ return 0; }}")),
            (ident, "p[a-z]{1,6}").prop_map(|(ty, name)| format!("operator run(io {ty} {name}) {{ {name}.get(); }}")),
        ]
    }

    proptest! {
        /// Property: parsing the same source twice yields identical units
        #[test]
        fn parse_is_idempotent(decls in prop::collection::vec(declaration_strategy(), 0..8)) {
            let source = decls.join("\n");
            let first = ParsedUnit::parse("prop", "unit", &source);
            let second = ParsedUnit::parse("prop", "unit", &source);
            prop_assert_eq!(first, second);
        }

        /// Property: extraction and resolution are total on arbitrary input
        #[test]
        fn arbitrary_input_never_panics(source in "\\PC{0,120}") {
            let unit = ParsedUnit::parse("prop", "unit", &source);
            let registry = Registry::new();
            for index in 0..=unit.symbol_count() {
                let _ = registry.type_of(&unit, index);
            }
        }

        /// Property: every well-formed declaration is extracted
        #[test]
        fn generated_declarations_are_extracted(decls in prop::collection::vec(declaration_strategy(), 1..8)) {
            let source = decls.join("\n");
            let unit = ParsedUnit::parse("prop", "unit", &source);
            let count = |prefix: &str| decls.iter().filter(|d| d.starts_with(prefix)).count();
            prop_assert_eq!(unit.requires().len(), count("require"));
            prop_assert_eq!(unit.structs().len(), count("struct"));
            prop_assert_eq!(unit.functions().len(), count("function"));
            prop_assert_eq!(unit.operators().len(), count("operator"));
        }
    }
}
