use std::collections::HashMap;

use kl_core::lang::chars::{self, CharClass};
use kl_core::lang::keywords;
use kl_core::lang::reserved;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn keyword_spellings_lex_as_names() {
    // Keywords are recognized by re-reading a finished name, so every spelling must start like one.
    for info in keywords::KEYWORDS {
        for c in info.canonical.chars() {
            assert_eq!(
                chars::classify(c),
                CharClass::Name,
                "keyword {:?} contains a non-name character {c:?}",
                info.canonical
            );
        }
    }
}

#[test]
fn merge_tables_only_mention_arithmetic_chars() {
    for (c, _) in chars::EQUALS_RULES {
        assert_eq!(chars::classify(*c), CharClass::Arithmetic, "equals rule for {c:?}");
    }
    for (c, _) in chars::DOUBLED_RULES {
        assert_eq!(chars::classify(*c), CharClass::Arithmetic, "doubled rule for {c:?}");
    }
}

#[test]
fn every_keyword_is_a_reserved_port_name() {
    for info in keywords::KEYWORDS {
        assert!(
            reserved::check_port_name(info.canonical).is_some(),
            "{} should be rejected as a port name",
            info.canonical
        );
    }
}
