#![no_main]

use klsense::{ParsedUnit, Registry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Lex + extract must be total
        let unit = ParsedUnit::parse("fuzz", "input", s);

        // Resolution must terminate and never panic for any symbol
        let registry = Registry::new();
        for index in 0..unit.symbol_count() {
            let _ = registry.type_of(&unit, index);
        }
    }
});
