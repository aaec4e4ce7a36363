use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the front end
#[derive(Error, Debug)]
pub enum FrontEndError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as C")]
    Parse { path: PathBuf },

    #[error("{path}:{line}: syntax error")]
    Syntax { path: PathBuf, line: usize },

    #[error("{path}:{line}: function definition has no resolvable name")]
    UnnamedFunction { path: PathBuf, line: usize },
}

/// Kind of top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    Struct,
    Union,
    Enum,
    Typedef,
    Variable,
}

impl DeclarationKind {
    /// Struct, union and enum declarations share the tag namespace and the
    /// same extent quirks
    pub fn is_tag(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Struct | DeclarationKind::Union | DeclarationKind::Enum
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Union => "union",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Typedef => "typedef",
            DeclarationKind::Variable => "variable",
        }
    }
}

/// Byte range of the lexical extent a declaration covers in its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRange {
    /// Starting byte offset
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Location in source code (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A top-level declaration as reported by the front end.
///
/// The core never looks inside a declaration; it decides the declaration's
/// fate from the kind and spelling, and hands the extent to the emitter.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Symbol name; empty for anonymous tags
    pub name: String,

    /// Kind of declaration
    pub kind: DeclarationKind,

    /// Whether this declares a body (function definition, bodied tag).
    /// Prototypes and plain variable declarations carry `false`.
    pub is_definition: bool,

    /// Lexical extent in the source file
    pub extent: TokenRange,

    /// Location of the declaration's first token
    pub location: Location,
}

impl Declaration {
    /// Get a display string for diagnostics
    pub fn display(&self) -> String {
        let name = if self.name.is_empty() {
            "<anonymous>"
        } else {
            &self.name
        };
        format!("{} `{}` at {}", self.kind.display_name(), name, self.location)
    }
}

/// A lexical token produced by tokenizing a declaration's extent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn spelling(&self) -> &str {
        &self.text
    }
}

/// A statically-determinable call from one defined function to a named target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub caller: String,
    pub callee: String,
}
