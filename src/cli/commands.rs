//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::frontend::binding::{self, PortBinding};
use crate::frontend::decl::{Argument, ArgumentList, Function};
use crate::frontend::extensions::ExtensionLoader;
use crate::frontend::registry::Registry;
use crate::frontend::unit::ParsedUnit;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while lexing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file with size validation.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be accessed or read
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata =
        fs::metadata(path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Unit key for a file: owner is the file stem, name the path as given.
fn unit_key(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "main".to_string());
    (stem, path.display().to_string())
}

/// Register `path` in `registry` and load what it requires.
fn register_file(registry: &Registry, loader: &ExtensionLoader, path: &Path) -> CliResult<Arc<ParsedUnit>> {
    let source = read_source(path)?;
    let (owner, name) = unit_key(path);
    let handle = registry
        .get_or_create(&owner, &name, Some(&source))
        .map_err(|e| CliError::failure(format!("Error registering '{}': {}", path.display(), e)))?;
    let unit = handle.snapshot();
    let unresolved = loader.load_requires(registry, &unit);
    if !unresolved.is_empty() {
        eprintln!("warning: unresolved require(s) in {}: {}", path.display(), unresolved.join(", "));
    }
    Ok(unit)
}

// ============================================================================
// Commands
// ============================================================================

/// Print the declarations of every file, registering them in order.
pub fn dump_files(config: &EngineConfig, files: &[impl AsRef<Path>]) -> CliResult<ExitCode> {
    let registry = Registry::with_config(config);
    let loader = ExtensionLoader::from_config(config);
    for file in files {
        let unit = register_file(&registry, &loader, file.as_ref())?;
        print!("{}", format_declarations(&unit));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the symbol stream of a file.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let (owner, name) = unit_key(path);
    let unit = ParsedUnit::parse(&owner, &name, &source);
    print!("{}", format_symbols(&unit));
    Ok(ExitCode::SUCCESS)
}

/// Print the inferred type of the symbol under `offset`.
pub fn type_at(config: &EngineConfig, path: &Path, offset: usize) -> CliResult<ExitCode> {
    let registry = Registry::with_config(config);
    let loader = ExtensionLoader::from_config(config);
    let unit = register_file(&registry, &loader, path)?;

    let index = unit
        .symbol_under_cursor(offset)
        .ok_or_else(|| CliError::failure(format!("No symbol at offset {offset} in '{}'", path.display())))?;
    let ty = registry.type_of(&unit, index);
    println!("{}: {}", unit.symbol_text(index), ty.as_deref().unwrap_or("<unknown>"));
    Ok(if ty.is_some() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print the ports of operator `entry`.
pub fn ports(path: &Path, entry: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let (owner, name) = unit_key(path);
    let unit = ParsedUnit::parse(&owner, &name, &source);
    let ports = binding::bind_operator(&unit, entry).map_err(|e| CliError::failure(e.to_string()))?;

    let mut invalid = Vec::new();
    for port in &ports {
        println!("{}", format_port(port));
        if port.runtime_argument().is_some() {
            continue;
        }
        if let Err(e) = binding::validate_port_name(&port.name) {
            invalid.push(e.to_string());
        }
    }
    if invalid.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(invalid.join("\n")))
    }
}

// ============================================================================
// Output formatting
// ============================================================================

/// One line per symbol: `offset:length kind text`.
pub fn format_symbols(unit: &ParsedUnit) -> String {
    let mut out = String::new();
    for symbol in unit.store().symbols() {
        let _ = writeln!(
            out,
            "{}:{} {} {:?}",
            symbol.offset,
            symbol.length,
            symbol.kind.type_name(),
            symbol.text(unit.source())
        );
    }
    out
}

/// Declarations of a unit in a compact, KL-like listing.
pub fn format_declarations(unit: &ParsedUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "unit {}/{}", unit.owner(), unit.name());
    for require in unit.requires() {
        let _ = writeln!(out, "  require {require};");
    }
    for constant in unit.constants() {
        let _ = writeln!(out, "  const {} {} = {};", constant.ty, constant.name, constant.value);
    }
    for interface in unit.interfaces() {
        let _ = writeln!(out, "  interface {} {{", interface.name);
        for function in &interface.functions {
            let _ = writeln!(out, "    {};", signature(function));
        }
        let _ = writeln!(out, "  }}");
    }
    for structure in unit.structs() {
        let mut header = format!("  {} {}", structure.kind.as_str(), structure.name);
        if !structure.interfaces.is_empty() {
            let _ = write!(header, " : {}", structure.interfaces.join(", "));
        }
        let _ = writeln!(out, "{header} {{");
        for member in &structure.members {
            let _ = writeln!(out, "    {} {};", member.ty, member.name);
        }
        let _ = writeln!(out, "  }}");
    }
    for operator in unit.operators() {
        let pex = if operator.is_pex() {
            format!("<<<{}>>>", operator.pex_argument)
        } else {
            String::new()
        };
        let _ = writeln!(out, "  operator {}{}({});", operator.name, pex, arguments(&operator.arguments));
    }
    for function in unit.functions() {
        let _ = writeln!(out, "  function {};", signature(function));
    }
    for variable in unit.variables() {
        let _ = writeln!(out, "  var {} {};", variable.ty, variable.name);
    }
    out
}

fn signature(function: &Function) -> String {
    let ty = if function.ty.is_empty() {
        String::new()
    } else {
        format!("{} ", function.ty)
    };
    format!("{ty}{}({})", function.qualified_name(), arguments(&function.arguments))
}

fn arguments(list: &ArgumentList) -> String {
    list.iter().map(argument).collect::<Vec<_>>().join(", ")
}

fn argument(arg: &Argument) -> String {
    format!("{} {} {}", arg.mode.as_str(), arg.ty, arg.name)
}

/// `mode data_type binding [flags]`
pub fn format_port(port: &PortBinding) -> String {
    let mut line = format!("{} {} {}", port.mode.as_str(), port.data_type, port.binding);
    if port.is_array {
        line.push_str(" array");
    }
    if port.is_sliced {
        line.push_str(" sliced");
    }
    if let Some(runtime) = port.runtime_argument() {
        let _ = write!(line, " runtime:{runtime:?}");
    }
    line
}
