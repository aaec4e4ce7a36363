//! ctrim - prune a C translation unit down to chosen functions
//!
//! This library prunes a single C source file to a requested subset of
//! top-level declarations, expanding the keep-set to every function
//! reachable from it through the call graph. The intended use is producing
//! minimal, compilable test fixtures from larger source files.
//!
//! # Architecture
//!
//! The pruning pipeline consists of:
//! 1. **Parsing** - Parse the source file using tree-sitter
//! 2. **Call Graph** - Enumerate static calls between defined functions
//! 3. **Closure** - Expand the keep-set to its transitive callees
//! 4. **Selection** - Decide emit/skip per top-level declaration
//! 5. **Emission** - Print each selected declaration's corrected token range

pub mod analysis;
pub mod config;
pub mod emit;
pub mod graph;
pub mod parser;
pub mod symbols;

pub use analysis::{ClosureEngine, Selector, UndefinedCall, Verdict};
pub use config::Config;
pub use emit::Emitter;
pub use graph::{Callee, CallGraph, CallGraphBuilder, CalleeSource, GraphError};
pub use parser::{
    CParser, Declaration, DeclarationKind, FrontEndError, Token, TokenRange, TranslationUnit,
};
pub use symbols::SymbolSet;
