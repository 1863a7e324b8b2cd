/// Index range `start..=end` of a body in the symbol store.
///
/// For a bodied declaration `start` is the `{` and `end` the matching `}`. A declaration without
/// body (`function f();`, `function f() = "extern";`) has a single-symbol range on the terminating
/// `;` or string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRange {
    pub start: usize,
    pub end: usize,
}

impl BodyRange {
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// `true` for the single-symbol range of a declaration without body.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// `const Type name = value;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub symbol: usize,
    pub comments: String,
    pub ty: String,
    pub name: String,
    pub value: String,
}

impl Constant {
    pub fn is_valid(&self) -> bool {
        !self.ty.is_empty() && !self.name.is_empty() && !self.value.is_empty()
    }
}

/// A variable declaration `Type name[, name...]`, one record per name.
///
/// The anchor is the name symbol, so "declared before" comparisons use the name's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub symbol: usize,
    pub ty: String,
    pub name: String,
}

impl Variable {
    pub fn is_valid(&self) -> bool {
        !self.ty.is_empty() && !self.name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructKind {
    Struct,
    Object,
}

impl StructKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructKind::Struct => "struct",
            StructKind::Object => "object",
        }
    }
}

/// A member of a struct or object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub symbol: usize,
    pub ty: String,
    pub name: String,
}

/// `struct Name [: Interface, ...] { Type member; ... }`, or the same with `object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub symbol: usize,
    pub comments: String,
    pub kind: StructKind,
    pub name: String,
    pub interfaces: Vec<String>,
    pub members: Vec<Member>,
}

impl Struct {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.members.is_empty()
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Parameter passing mode. KL arguments are read-only unless marked `io`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArgMode {
    #[default]
    In,
    Io,
}

impl ArgMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgMode::In => "in",
            ArgMode::Io => "io",
        }
    }
}

/// One `[in|io] Type Name` entry of an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub symbol: usize,
    pub mode: ArgMode,
    pub ty: String,
    pub name: String,
}

/// Arguments of an operator or function, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    pub arguments: Vec<Argument>,
}

impl ArgumentList {
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.arguments.iter()
    }
}

impl std::ops::Index<usize> for ArgumentList {
    type Output = Argument;

    fn index(&self, index: usize) -> &Argument {
        &self.arguments[index]
    }
}

/// `operator name[<<<pex>>>](arguments) { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub symbol: usize,
    pub comments: String,
    pub name: String,
    /// Source text between `<<<` and `>>>`, empty for a plain operator.
    pub pex_argument: String,
    pub arguments: ArgumentList,
    pub body: Option<BodyRange>,
}

impl Operator {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    /// `true` when the operator is dispatched per element (`op<<<count>>>(...)`).
    pub fn is_pex(&self) -> bool {
        !self.pex_argument.is_empty()
    }
}

/// A function or method declaration.
///
/// `owner` is the receiver type for `function Type Owner.name()`, empty for free functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub symbol: usize,
    pub comments: String,
    pub ty: String,
    pub owner: String,
    pub name: String,
    pub arguments: ArgumentList,
    pub body: Option<BodyRange>,
}

impl Function {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    /// `Owner.name` for methods, `name` otherwise.
    pub fn qualified_name(&self) -> String {
        if self.owner.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.owner, self.name)
        }
    }
}

/// `interface Name { Type method(arguments); ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub symbol: usize,
    pub comments: String,
    pub name: String,
    pub functions: Vec<Function>,
}

impl Interface {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.functions.is_empty()
    }
}

/// Everything extracted from one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub requires: Vec<String>,
    pub constants: Vec<Constant>,
    pub variables: Vec<Variable>,
    pub interfaces: Vec<Interface>,
    pub structs: Vec<Struct>,
    pub operators: Vec<Operator>,
    pub functions: Vec<Function>,
}

impl Declarations {
    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.name == name)
    }

    pub fn structure(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Nearest function whose anchor is at or before `index`.
    pub fn function_before(&self, index: usize) -> Option<&Function> {
        self.functions.iter().rev().find(|f| f.symbol <= index)
    }
}
