//! Character classes and operator merge tables for the KL lexer.
//!
//! The KL lexer classifies every character on its own and then decides whether the next
//! character extends the current symbol. The per-character half of that decision lives here
//! as plain tables so it can be audited (and tested) independently of the lexer state machine.
//!
//! ## Examples
//! ```rust
//! use kl_core::lang::chars::{self, CharClass, DoubledOutcome, EqualsOutcome};
//!
//! assert_eq!(chars::classify('~'), CharClass::Name);
//! assert_eq!(chars::classify('%'), CharClass::Arithmetic);
//! assert_eq!(chars::doubled('/'), Some(DoubledOutcome::LineComment));
//! assert_eq!(chars::followed_by_equals('+'), Some(EqualsOutcome::Assignment));
//! ```

/// Characters that start an arithmetic/operator symbol.
pub const ARITHMETIC_CHARS: &[char] = &['+', '-', '*', '/', '<', '>', '?', ':', '!', '|', '&', '^', '%', '='];

/// Characters treated as whitespace between symbols.
pub const SEPARATOR_CHARS: &[char] = &[' ', '\t', '\n', '\r'];

/// Characters that open (and close) a string literal.
pub const QUOTE_CHARS: &[char] = &['"', '\''];

/// Class of a single source character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Name,
    Number,
    Arithmetic,
    Separator,
    Semicolon,
    Comma,
    Period,
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,
    Quote,
    /// Anything the lexer has no use for (non-ASCII outside strings/comments, `@`, `#`, ...).
    Unknown,
}

/// Classify one character.
pub fn classify(c: char) -> CharClass {
    match c {
        c if c.is_ascii_alphabetic() || c == '_' || c == '~' => CharClass::Name,
        c if c.is_ascii_digit() => CharClass::Number,
        c if ARITHMETIC_CHARS.contains(&c) => CharClass::Arithmetic,
        c if SEPARATOR_CHARS.contains(&c) => CharClass::Separator,
        ';' => CharClass::Semicolon,
        ',' => CharClass::Comma,
        '.' => CharClass::Period,
        '(' => CharClass::BraceOpen,
        ')' => CharClass::BraceClose,
        '[' => CharClass::BracketOpen,
        ']' => CharClass::BracketClose,
        '{' => CharClass::CurlyOpen,
        '}' => CharClass::CurlyClose,
        c if QUOTE_CHARS.contains(&c) => CharClass::Quote,
        _ => CharClass::Unknown,
    }
}

/// What an operator character followed by `=` turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualsOutcome {
    /// `==`, `!=`
    Comparison,
    /// `+=`, `>=`, `<=`, ...
    Assignment,
    /// `?=`, `:=`: merged, classification unchanged
    Keep,
}

/// Merge table for `<c>=`.
pub const EQUALS_RULES: &[(char, EqualsOutcome)] = &[
    ('=', EqualsOutcome::Comparison),
    ('!', EqualsOutcome::Comparison),
    ('>', EqualsOutcome::Assignment),
    ('<', EqualsOutcome::Assignment),
    ('^', EqualsOutcome::Assignment),
    ('|', EqualsOutcome::Assignment),
    ('&', EqualsOutcome::Assignment),
    ('+', EqualsOutcome::Assignment),
    ('-', EqualsOutcome::Assignment),
    ('*', EqualsOutcome::Assignment),
    ('/', EqualsOutcome::Assignment),
    ('%', EqualsOutcome::Assignment),
    ('?', EqualsOutcome::Keep),
    (':', EqualsOutcome::Keep),
];

/// Look up the `<c>=` rule for an operator character.
pub fn followed_by_equals(c: char) -> Option<EqualsOutcome> {
    EQUALS_RULES.iter().find(|(ch, _)| *ch == c).map(|(_, outcome)| *outcome)
}

/// What a doubled operator character (`cc`) turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubledOutcome {
    Arithmetic,
    LineComment,
}

/// Merge table for doubled operator characters. Characters not listed do not merge with themselves.
pub const DOUBLED_RULES: &[(char, DoubledOutcome)] = &[
    ('|', DoubledOutcome::Arithmetic),
    ('&', DoubledOutcome::Arithmetic),
    ('<', DoubledOutcome::Arithmetic),
    ('>', DoubledOutcome::Arithmetic),
    ('+', DoubledOutcome::Arithmetic),
    ('-', DoubledOutcome::Arithmetic),
    ('/', DoubledOutcome::LineComment),
];

/// Look up the doubling rule for an operator character.
pub fn doubled(c: char) -> Option<DoubledOutcome> {
    DOUBLED_RULES.iter().find(|(ch, _)| *ch == c).map(|(_, outcome)| *outcome)
}

/// Side of a pex (`<<<count>>>`) bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PexSide {
    Open,
    Close,
}

/// Look up the tripling rule: `<<<` opens and `>>>` closes a pex argument.
pub fn tripled(c: char) -> Option<PexSide> {
    match c {
        '<' => Some(PexSide::Open),
        '>' => Some(PexSide::Close),
        _ => None,
    }
}

/// Return `true` when `c` is the block-comment marker following `/`.
pub fn opens_block_comment(c: char) -> bool {
    c == '*'
}

/// Return `true` for method-name modifiers (`unit!()`, `isValid?()`) skipped by declaration shapes.
pub fn is_method_modifier(c: char) -> bool {
    c == '!' || c == '?'
}
