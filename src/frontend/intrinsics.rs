//! Built-in units
//!
//! Arrays, dictionaries and strings have methods that no source file declares. They are described
//! here as ordinary KL declarations so the resolver finds them like any other method.

use kl_core::lang::types::{ARRAY_OWNER, DICT_OWNER};

use super::registry::Registry;

/// `(owner, name, code)` for every built-in unit.
pub const INTRINSIC_UNITS: &[(&str, &str, &str)] = &[
    (
        ARRAY_OWNER,
        ARRAY_OWNER,
        "// returns the size of the array\n\
         function Size array.size() {};\n\
         // sets a new size of the array.\n\
         // the new elements are cloned from the last element.\n\
         function array.resize(Size newSize) {};\n",
    ),
    (
        DICT_OWNER,
        DICT_OWNER,
        "// returns true if the dict contains a certain key\n\
         function ValueType dict.has(KeyType key) {};\n",
    ),
    (
        "String",
        "String",
        "// returns the length of the String\n\
         function Size String.length() {};\n",
    ),
];

/// Register every built-in unit in `registry`.
pub fn seed(registry: &Registry) {
    for (owner, name, code) in INTRINSIC_UNITS {
        if let Err(err) = registry.get_or_create(owner, name, Some(code)) {
            tracing::warn!(owner, name, error = %err, "failed to seed intrinsic unit");
        }
    }
    tracing::debug!(count = INTRINSIC_UNITS.len(), "seeded intrinsic units");
}
