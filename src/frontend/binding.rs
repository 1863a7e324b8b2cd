//! Operator port binding
//!
//! An operator used as a graph entry point exposes one port per argument. This module maps the
//! arguments of a parsed operator to port descriptions and validates port names.
//!
//! ## Type spelling
//!
//! - `Vec3[]` is an array port of `Vec3`.
//! - `Vec3<>` is a sliced port: the operator sees every slice at once, and the binding name
//!   carries the `<>` marker (`points<>`).
//! - Both may combine as `Vec3<>[]`.

use kl_core::lang::reserved::{self, ReservedReason};
use kl_syntax::decl::ArgMode;

use super::unit::ParsedUnit;

/// Errors raised while binding an operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("entry function '{entry}' not found in KL source code")]
    EntryNotFound { entry: String },
    #[error("entry function '{entry}' found in KL source code, but it uses PEX")]
    PexEntry { entry: String },
    #[error("port name '{name}' is reserved by the graph runtime")]
    ReservedName { name: String },
    #[error("port name '{name}' is a KL keyword")]
    KeywordName { name: String },
}

/// Arguments the graph runtime fills in itself rather than from a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeArgument {
    /// `Index index`: the slice being evaluated.
    Index,
    /// `EvalContext context`
    Context,
    /// `Container self`
    Container,
}

/// One operator argument mapped to a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    pub mode: ArgMode,
    pub name: String,
    /// Element type with array and slice markers removed
    pub data_type: String,
    /// Type as written in the argument list
    pub member_type: String,
    pub is_array: bool,
    pub is_sliced: bool,
    /// Name the port is bound under
    pub binding: String,
}

impl PortBinding {
    fn new(mode: ArgMode, name: &str, ty: &str) -> Self {
        let (data_type, is_array) = match ty.strip_suffix("[]") {
            Some(element) => (element, true),
            None => (ty, false),
        };
        let (data_type, is_sliced) = match data_type.strip_suffix("<>") {
            Some(element) => (element, true),
            None => (data_type, false),
        };
        let binding = if is_sliced { format!("{name}<>") } else { name.to_string() };
        Self {
            mode,
            name: name.to_string(),
            data_type: data_type.to_string(),
            member_type: ty.to_string(),
            is_array,
            is_sliced,
            binding,
        }
    }

    /// The runtime-provided argument this binding stands for, if any.
    pub fn runtime_argument(&self) -> Option<RuntimeArgument> {
        if self.is_array || self.is_sliced {
            return None;
        }
        match (self.data_type.as_str(), self.name.as_str()) {
            ("Index", "index") => Some(RuntimeArgument::Index),
            ("EvalContext", "context") => Some(RuntimeArgument::Context),
            ("Container", "self") => Some(RuntimeArgument::Container),
            _ => None,
        }
    }
}

/// Ports of the operator named `entry` in `unit`.
#[tracing::instrument(skip_all, fields(unit = unit.name(), entry = entry))]
pub fn bind_operator(unit: &ParsedUnit, entry: &str) -> Result<Vec<PortBinding>, BindError> {
    let operator = unit.operator(entry).ok_or_else(|| BindError::EntryNotFound {
        entry: entry.to_string(),
    })?;
    if operator.is_pex() {
        return Err(BindError::PexEntry {
            entry: entry.to_string(),
        });
    }
    let ports: Vec<PortBinding> = operator
        .arguments
        .iter()
        .map(|arg| PortBinding::new(arg.mode, &arg.name, &arg.ty))
        .collect();
    tracing::debug!(ports = ports.len(), "bound operator");
    Ok(ports)
}

/// Reject names that cannot be used for a port.
pub fn validate_port_name(name: &str) -> Result<(), BindError> {
    match reserved::check_port_name(name) {
        None => Ok(()),
        Some(ReservedReason::RuntimeName) => Err(BindError::ReservedName { name: name.to_string() }),
        Some(ReservedReason::Keyword) => Err(BindError::KeywordName { name: name.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_markers() {
        let plain = PortBinding::new(ArgMode::In, "p", "Vec3");
        assert!(!plain.is_array && !plain.is_sliced);
        assert_eq!(plain.binding, "p");

        let both = PortBinding::new(ArgMode::Io, "p", "Vec3<>[]");
        assert!(both.is_array && both.is_sliced);
        assert_eq!(both.data_type, "Vec3");
        assert_eq!(both.member_type, "Vec3<>[]");
        assert_eq!(both.binding, "p<>");
    }

    #[test]
    fn test_runtime_arguments() {
        assert_eq!(
            PortBinding::new(ArgMode::In, "index", "Index").runtime_argument(),
            Some(RuntimeArgument::Index)
        );
        assert_eq!(
            PortBinding::new(ArgMode::Io, "self", "Container").runtime_argument(),
            Some(RuntimeArgument::Container)
        );
        assert_eq!(PortBinding::new(ArgMode::In, "index", "Index[]").runtime_argument(), None);
        assert_eq!(PortBinding::new(ArgMode::In, "i", "Index").runtime_argument(), None);
    }

    #[test]
    fn test_validate_port_name() {
        assert_eq!(validate_port_name("points"), Ok(()));
        assert!(matches!(validate_port_name("context"), Err(BindError::ReservedName { .. })));
        assert!(matches!(validate_port_name("operator"), Err(BindError::KeywordName { .. })));
    }
}
