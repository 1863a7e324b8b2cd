//! Built-in KL types.
//!
//! These types exist in every KL runtime without a `require`. Resolving a `require` of one of them
//! is a no-op.
//!
//! ## Examples
//! ```rust
//! use kl_core::lang::types;
//!
//! assert!(types::is_builtin("Float32"));
//! assert!(!types::is_builtin("Vec3"));
//! assert_eq!(types::container_owner("Vec3[]"), Some(types::ARRAY_OWNER));
//! assert_eq!(types::container_owner("Scalar[String]"), Some(types::DICT_OWNER));
//! ```

/// Core value types.
pub const BUILTIN_TYPES: &[&str] = &[
    "Boolean", "Byte", "UInt8", "UInt16", "UInt32", "UInt64", "SInt8", "SInt16", "SInt32", "SInt64", "Integer", "Size",
    "Index", "Float32", "Float64", "Scalar", "String",
];

/// Owner name under which methods of variable and fixed size arrays are declared.
pub const ARRAY_OWNER: &str = "array";

/// Owner name under which methods of dictionaries are declared.
pub const DICT_OWNER: &str = "dict";

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Intrinsic owner for a container type spelling.
///
/// `T[]` and `T[3]` are arrays, `V[K]` is a dictionary. Anything else returns `None`.
pub fn container_owner(ty: &str) -> Option<&'static str> {
    let inner = ty.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let key = &inner[open + 1..];
    if key.is_empty() || key.chars().all(|c| c.is_ascii_digit()) {
        Some(ARRAY_OWNER)
    } else {
        Some(DICT_OWNER)
    }
}

/// Element type of an indexed container: the last `[...]` group is removed, or a sliced `<>`
/// marker if there is no bracket group.
pub fn element_type(ty: &str) -> &str {
    if let Some(inner) = ty.strip_suffix(']') {
        if let Some(open) = inner.rfind('[') {
            return &ty[..open];
        }
    }
    ty.strip_suffix("<>").unwrap_or(ty)
}
