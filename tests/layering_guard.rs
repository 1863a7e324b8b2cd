//! Layering guardrails to keep the syntax crates independent of the engine.
//!
//! `kl_core` holds vocabulary only and has no dependencies. `kl_syntax` may depend on `kl_core` but never on the
//! root `klsense` crate, which owns the registry, resolver and tooling. These tests scan the member manifests.

fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn kl_core_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/kl_core/Cargo.toml"));
    assert!(deps.is_empty(), "kl_core must stay dependency-free, found {deps:?}");
}

#[test]
fn kl_syntax_does_not_depend_on_the_engine() {
    let deps = dependencies(include_str!("../crates/kl_syntax/Cargo.toml"));
    assert!(deps.contains(&"kl_core".to_string()));
    assert!(
        !deps.iter().any(|d| d == "klsense"),
        "`klsense` must not appear in kl_syntax [dependencies]"
    );
}
