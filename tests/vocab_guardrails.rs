use std::fs;
use std::path::{Path, PathBuf};

use kl_core::lang::keywords::KEYWORDS;

/// Guardrail against reintroducing stringly-typed keyword checks.
///
/// This is intentionally a **coarse** safety net. It looks for suspicious patterns like `== "struct"` or
/// `match text { "operator" => ... }` in Rust source files where we expect callers to go through
/// `kl_core::lang::keywords` (or a `SymbolKind::Keyword` match) instead.
///
/// Notes:
/// - We allow occurrences in `crates/kl_core/src/lang/**` (the registries themselves) and in tests.
/// - This is not meant to be perfect; it's meant to catch "oops I added a string match".
#[test]
fn no_new_stringly_keyword_checks_in_rust_sources() {
    let root = repo_root();
    let spellings: Vec<&str> = KEYWORDS.iter().map(|k| k.canonical).collect();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [root.join("src"), root.join("crates")];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed keyword checks. Prefer kl_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/");
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings; allow them.
    if rel.starts_with("crates/kl_core/src/lang/") {
        return true;
    }
    // Tests can mention spellings directly.
    rel.starts_with("tests/") || rel.contains("/tests/") || rel.ends_with("/tests.rs")
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&str]) -> bool {
    // Avoid false positives in comments/docstrings.
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        return false;
    }

    // Only flag explicit equality checks or match arms for keyword spellings.
    spellings.iter().any(|s| {
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        line.contains(&eq) || line.contains(&arm)
    })
}
