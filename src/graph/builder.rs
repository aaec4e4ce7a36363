use super::{CallGraph, GraphError};
use crate::parser::{DeclarationKind, TranslationUnit};
use tracing::debug;

/// Builder deriving the call graph of a translation unit.
///
/// Walks the unit once: every function definition becomes a node, every
/// statically-determinable call becomes either an edge (target defined in
/// the unit) or an undefined-call record (target not defined here).
pub struct CallGraphBuilder;

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, unit: &TranslationUnit) -> Result<CallGraph, GraphError> {
        let mut graph = CallGraph::new();

        for decl in unit.top_level_declarations() {
            if decl.kind == DeclarationKind::Function && decl.is_definition {
                graph.add_function(decl.name);
            }
        }

        for site in unit.call_sites()? {
            if graph.is_defined(&site.callee) {
                graph.add_call(&site.caller, &site.callee);
            } else {
                debug!("`{}` calls undefined `{}`", site.caller, site.callee);
                graph.add_undefined_call(&site.caller, &site.callee);
            }
        }

        debug!(
            "call graph: {} functions, {} calls",
            graph.function_count(),
            graph.call_count()
        );

        Ok(graph)
    }
}

impl Default for CallGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
