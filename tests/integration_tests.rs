//! End-to-end tests over the public API: register units, extract declarations, resolve types and
//! bind operators the way an editor integration or a graph host would.

use std::fs;

use klsense::decl::{ArgMode, StructKind};
use klsense::{BindError, EngineConfig, ExtensionLoader, ParsedUnit, Registry, bind_operator};

/// Index of the `nth` symbol spelled `text`.
fn symbol(unit: &ParsedUnit, text: &str, nth: usize) -> usize {
    (0..unit.symbol_count())
        .filter(|i| unit.symbol_text(*i) == text)
        .nth(nth)
        .unwrap_or_else(|| panic!("no symbol {text:?} #{nth}"))
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn requires_are_listed_in_order() {
    let unit = ParsedUnit::parse("op", "op", "require Math;\nrequire Vec3;\n");
    assert_eq!(unit.requires(), ["Math".to_string(), "Vec3".to_string()]);
}

#[test]
fn struct_members_are_extracted() {
    let unit = ParsedUnit::parse("geo", "pt", "struct Pt { Float32 x; Float32 y; }");
    assert_eq!(unit.structs().len(), 1);
    let pt = &unit.structs()[0];
    assert_eq!(pt.name, "Pt");
    assert_eq!(pt.kind, StructKind::Struct);
    assert!(pt.interfaces.is_empty());
    let members: Vec<_> = pt.members.iter().map(|m| (m.ty.as_str(), m.name.as_str())).collect();
    assert_eq!(members, vec![("Float32", "x"), ("Float32", "y")]);
}

#[test]
fn method_shape_is_extracted() {
    let unit = ParsedUnit::parse("t", "t", "function Scalar MyType.length() { return 0; }");
    let function = &unit.functions()[0];
    assert_eq!(function.ty, "Scalar");
    assert_eq!(function.owner, "MyType");
    assert_eq!(function.name, "length");
    assert!(function.body.is_some());
}

#[test]
fn operator_argument_modes() {
    let unit = ParsedUnit::parse("t", "t", "operator op(Scalar a, io Scalar b) {}");
    let args: Vec<_> = unit.operators()[0]
        .arguments
        .iter()
        .map(|a| (a.mode, a.ty.as_str(), a.name.as_str()))
        .collect();
    assert_eq!(args, vec![(ArgMode::In, "Scalar", "a"), (ArgMode::Io, "Scalar", "b")]);
}

// =============================================================================
// Type resolution
// =============================================================================

#[test]
fn member_type_across_units() {
    let registry = Registry::new();
    registry
        .get_or_create("geo", "pt", Some("struct Pt { Float32 x; }"))
        .unwrap();
    let unit = registry
        .get_or_create("op", "main", Some("operator entry() { Pt p; p.x = 1.0; }"))
        .unwrap()
        .snapshot();

    assert_eq!(registry.type_of(&unit, symbol(&unit, "p", 1)).as_deref(), Some("Pt"));
    assert_eq!(registry.type_of(&unit, symbol(&unit, "x", 0)).as_deref(), Some("Float32"));
    assert_eq!(registry.type_of_member("Pt", "x").as_deref(), Some("Float32"));
    assert_eq!(registry.type_of_member("Pt", "z"), None);
}

#[test]
fn reparse_updates_later_queries() {
    let registry = Registry::new();
    let lib = registry
        .get_or_create("geo", "pt", Some("struct Pt { Float32 x; }"))
        .unwrap();
    assert_eq!(registry.type_of_member("Pt", "x").as_deref(), Some("Float32"));

    registry
        .get_or_create("geo", "pt", Some("struct Pt { Float64 x; }"))
        .unwrap();
    assert_eq!(registry.type_of_member("Pt", "x").as_deref(), Some("Float64"));
    assert_eq!(lib.snapshot().structs()[0].members[0].ty, "Float64");
}

#[test]
fn intrinsic_methods_resolve_on_containers() {
    let registry = Registry::with_config(&EngineConfig::default());
    let unit = registry
        .get_or_create(
            "op",
            "main",
            Some("operator entry() { Vec3 pts[]; Scalar lookup[String]; String s; pts.size(); lookup.has(s); s.length(); }"),
        )
        .unwrap()
        .snapshot();

    let calls: Vec<_> = (0..3)
        .map(|nth| {
            // the `)` closing each call, after the `)` of `entry()`
            let close = symbol(&unit, ")", nth + 1);
            registry.type_of(&unit, close)
        })
        .collect();
    assert_eq!(
        calls,
        vec![
            Some("Size".to_string()),
            Some("ValueType".to_string()),
            Some("Size".to_string())
        ]
    );
}

#[test]
fn unknown_symbols_resolve_to_none() {
    let registry = Registry::with_config(&EngineConfig::default());
    let unit = registry
        .get_or_create("op", "main", Some("x.y.z(); q[0]; ) ] . this unknown"))
        .unwrap()
        .snapshot();
    for index in 0..unit.symbol_count() + 2 {
        assert_eq!(registry.type_of(&unit, index), None);
    }
}

// =============================================================================
// Extensions
// =============================================================================

#[test]
fn requires_pull_in_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let ext = dir.path().join("exts").join("Math");
    fs::create_dir_all(&ext).unwrap();
    fs::write(ext.join("Math.fpm.json"), r#"{ "code": "Vec3" }"#).unwrap();
    fs::write(ext.join("Vec3.kl"), "struct Vec3 { Float32 x; }\nfunction Float32 Vec3.length() {}").unwrap();

    let config = EngineConfig::new().with_extension_path(dir.path());
    let registry = Registry::with_config(&config);
    let loader = ExtensionLoader::from_config(&config);

    let unit = registry
        .get_or_create("op", "main", Some("require Math;\noperator entry() { Vec3 v; v.length(); }"))
        .unwrap()
        .snapshot();
    assert!(loader.load_requires(&registry, &unit).is_empty());
    assert_eq!(registry.type_of(&unit, symbol(&unit, ")", 1)).as_deref(), Some("Float32"));
}

// =============================================================================
// Port binding
// =============================================================================

#[test]
fn entry_operator_ports() {
    let unit = ParsedUnit::parse(
        "deform",
        "deform",
        "operator deform(io Vec3<> positions[], Scalar amount, Index index) {}\n\
         operator perPoint<<<count>>>(io Vec3 p) {}",
    );
    let ports = bind_operator(&unit, "deform").unwrap();
    let summary: Vec<_> = ports
        .iter()
        .map(|p| (p.binding.as_str(), p.data_type.as_str(), p.is_array, p.is_sliced))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("positions<>", "Vec3", true, true),
            ("amount", "Scalar", false, false),
            ("index", "Index", false, false),
        ]
    );
    assert_eq!(ports[0].mode, ArgMode::Io);
    assert_eq!(ports[0].member_type, "Vec3<>[]");

    assert_eq!(
        bind_operator(&unit, "perPoint").unwrap_err(),
        BindError::PexEntry {
            entry: "perPoint".into()
        }
    );
    assert!(matches!(
        bind_operator(&unit, "missing"),
        Err(BindError::EntryNotFound { .. })
    ));
}
